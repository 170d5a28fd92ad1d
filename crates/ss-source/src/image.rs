use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use ss_core::frame::SpriteImage;

/// Charge un sprite depuis le disque.
///
/// Images with an alpha channel are kept as RGBA, everything else is
/// converted to RGB. Higher bit depths are narrowed to 8 bits.
///
/// # Errors
/// Returns an error if the file cannot be opened or decoded.
///
/// # Example
/// ```no_run
/// use ss_source::image::load_sprite;
/// use std::path::Path;
/// let sprite = load_sprite(Path::new("sprite.png")).unwrap();
/// ```
pub fn load_sprite(path: &Path) -> Result<SpriteImage> {
    let img = image::open(path).with_context(|| format!("Impossible de charger {}", path.display()))?;
    let sprite = sprite_from_dynamic(&img)
        .with_context(|| format!("Image inutilisable : {}", path.display()))?;
    log::debug!(
        "Sprite {} : {}×{}, alpha={}",
        path.display(),
        sprite.width(),
        sprite.height(),
        sprite.has_alpha()
    );
    Ok(sprite)
}

/// Convert a decoded image into a [`SpriteImage`].
///
/// # Errors
/// Returns an error for zero-sized images.
///
/// # Example
/// ```
/// use image::{DynamicImage, RgbImage};
/// use ss_source::image::sprite_from_dynamic;
///
/// let img = DynamicImage::ImageRgb8(RgbImage::new(4, 3));
/// let sprite = sprite_from_dynamic(&img).unwrap();
/// assert!(!sprite.has_alpha());
/// assert_eq!(sprite.data().len(), 4 * 3 * 3);
/// ```
pub fn sprite_from_dynamic(img: &DynamicImage) -> Result<SpriteImage> {
    let sprite = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        let (w, h) = rgba.dimensions();
        SpriteImage::new(w, h, 4, rgba.into_raw())?
    } else {
        let rgb = img.to_rgb8();
        let (w, h) = rgb.dimensions();
        SpriteImage::new(w, h, 3, rgb.into_raw())?
    };
    Ok(sprite)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba, RgbaImage};

    #[test]
    fn alpha_is_preserved() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(1, 0, Rgba([255, 85, 85, 255]));
        let sprite = sprite_from_dynamic(&DynamicImage::ImageRgba8(img)).unwrap();
        assert!(sprite.has_alpha());
        assert_eq!(sprite.alpha(0, 0), 0);
        assert_eq!(sprite.rgb(1, 0), [255, 85, 85]);
    }

    #[test]
    fn grayscale_expands_to_rgb() {
        let img = GrayImage::from_pixel(1, 1, Luma([77]));
        let sprite = sprite_from_dynamic(&DynamicImage::ImageLuma8(img)).unwrap();
        assert_eq!(sprite.rgb(0, 0), [77, 77, 77]);
    }

    #[test]
    fn png_round_trip_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprite.png");
        RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 0])).save(&path).unwrap();
        let sprite = load_sprite(&path).unwrap();
        assert_eq!((sprite.width(), sprite.height()), (3, 2));
        assert_eq!(sprite.alpha(2, 1), 0);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_sprite(Path::new("/nonexistent/sprite.png")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/sprite.png"));
    }
}
