use ss_core::frame::SpriteImage;

/// Ajustement luminosité/contraste : `clamp(round(contrast · v + brightness), 0, 255)`.
///
/// Applied to color channels only; alpha is copied unchanged. Rounding is
/// half to even. Returns a new buffer, the input is left untouched.
///
/// # Example
/// ```
/// use ss_core::frame::SpriteImage;
/// use ss_quant::adjust::adjust_brightness_contrast;
///
/// let img = SpriteImage::filled(1, 1, &[100, 200, 10, 0]).unwrap();
/// let out = adjust_brightness_contrast(&img, 1.5, -20);
/// assert_eq!(out.data(), &[130, 255, 0, 0]);
/// ```
#[must_use]
pub fn adjust_brightness_contrast(image: &SpriteImage, contrast: f64, brightness: i32) -> SpriteImage {
    let lut = build_lut(contrast, brightness);
    log::debug!("Ajustement contraste={contrast:.2} luminosité={brightness}");
    image.map_color_samples(|v| lut[usize::from(v)])
}

/// Table de correspondance 256 entrées, calculée une fois par appel.
fn build_lut(contrast: f64, brightness: i32) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (v, out) in lut.iter_mut().enumerate() {
        let adjusted = contrast * v as f64 + f64::from(brightness);
        *out = adjusted.clamp(0.0, 255.0).round_ties_even() as u8;
    }
    lut
}
