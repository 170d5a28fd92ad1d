use rayon::prelude::*;
use ss_core::frame::SpriteImage;
use ss_core::grid::IndexGrid;
use ss_core::palette::{ANSI256_TRANSPARENT, GRAY_RAMP_BASE, cube_index};
use ss_core::traits::Quantizer;

/// 255 / 5 : pas entre deux niveaux du cube.
const SIX_LEVEL_STEP: u16 = 51;
/// Un pixel gris a un écart max − min strictement inférieur.
const GRAY_DELTA_LIMIT: u8 = 5;
/// Plus sombre que ça, le cube (niveau 0) fait mieux que la rampe.
const BLACK_UPPER_LIMIT: u8 = 8;
/// Plus clair que ça, le cube (niveau 5) fait mieux que la rampe.
const WHITE_LOWER_LIMIT: u8 = 248;
/// Luminance step between two ramp entries.
const GRAY_RAMP_STEP: u16 = 10;

/// Quantificateur 256 couleurs : cube 6×6×6 direct, rampe de gris optionnelle.
///
/// # Example
/// ```
/// use ss_core::frame::SpriteImage;
/// use ss_core::traits::Quantizer;
/// use ss_quant::ansi256::Ansi256Quantizer;
///
/// let img = SpriteImage::from_rgba_pixels(3, 1, &[
///     [0, 0, 0, 255],
///     [128, 128, 128, 255],
///     [255, 0, 0, 0],
/// ]).unwrap();
/// let grid = Ansi256Quantizer::new(true).quantize(&img);
/// assert_eq!(grid.cells, vec![16, 244, 0]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Ansi256Quantizer {
    grayify: bool,
}

impl Default for Ansi256Quantizer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Ansi256Quantizer {
    /// `grayify` snaps near-neutral pixels onto the gray ramp.
    #[must_use]
    pub fn new(grayify: bool) -> Self {
        Self { grayify }
    }

    /// Index d'un pixel opaque.
    ///
    /// # Example
    /// ```
    /// use ss_quant::ansi256::Ansi256Quantizer;
    /// assert_eq!(Ansi256Quantizer::new(false).classify([128, 128, 128]), 145);
    /// assert_eq!(Ansi256Quantizer::new(true).classify([128, 128, 128]), 244);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn classify(&self, rgb: [u8; 3]) -> i16 {
        if self.grayify && is_gray(rgb) {
            return gray_ramp_index(rgb);
        }
        let [r, g, b] = rgb.map(cube_level);
        cube_index(r, g, b)
    }
}

impl Quantizer for Ansi256Quantizer {
    fn quantize(&self, image: &SpriteImage) -> IndexGrid {
        let mut grid = IndexGrid::new(image.width(), image.height(), ANSI256_TRANSPARENT);
        let channels = image.channels().count();
        let has_alpha = image.has_alpha();

        grid.cells
            .par_chunks_mut(image.width().max(1) as usize)
            .enumerate()
            .for_each(|(y, row)| {
                let src = image.row(y as u32);
                for (cell, px) in row.iter_mut().zip(src.chunks_exact(channels)) {
                    *cell = if has_alpha && px[3] == 0 {
                        ANSI256_TRANSPARENT
                    } else {
                        self.classify([px[0], px[1], px[2]])
                    };
                }
            });
        grid
    }

    fn transparent(&self) -> i16 {
        ANSI256_TRANSPARENT
    }

    fn name(&self) -> &'static str {
        "ansi256"
    }
}

/// round(v / 51). 51 est impair : jamais d'égalité à .5.
#[inline(always)]
fn cube_level(v: u8) -> u8 {
    ((u16::from(v) + SIX_LEVEL_STEP / 2) / SIX_LEVEL_STEP) as u8
}

#[inline(always)]
fn is_gray(rgb: [u8; 3]) -> bool {
    let max = rgb.iter().max().copied().unwrap_or(0);
    let min = rgb.iter().min().copied().unwrap_or(0);
    max - min < GRAY_DELTA_LIMIT && min >= BLACK_UPPER_LIMIT && max < WHITE_LOWER_LIMIT
}

/// floor((round(mean) − 8) / 10) + 232. Only called for pixels with min ≥ 8.
#[inline(always)]
fn gray_ramp_index(rgb: [u8; 3]) -> i16 {
    let sum: u16 = rgb.iter().map(|&c| u16::from(c)).sum();
    // a third is never exactly .5 away, so +1 then floor rounds to nearest
    let mean = (sum + 1) / 3;
    GRAY_RAMP_BASE + (mean.saturating_sub(u16::from(BLACK_UPPER_LIMIT)) / GRAY_RAMP_STEP) as i16
}
