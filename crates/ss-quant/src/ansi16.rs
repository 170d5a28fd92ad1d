use rayon::prelude::*;
use ss_core::config::DEFAULT_COLOR_CUTOFF;
use ss_core::frame::SpriteImage;
use ss_core::grid::IndexGrid;
use ss_core::palette::{Ansi16, ANSI16_TRANSPARENT, DEFAULT_DARK_DELTA, reference_table};
use ss_core::traits::Quantizer;

/// Quantificateur 16 couleurs : plus proche voisin L1 dans l'espace RGB.
///
/// Chromatic pixels pick among the 12 dim/bright references; pixels whose
/// channel spread is below `color_cutoff` pick among the 4 shades of gray
/// instead. Ties go to the lowest index.
///
/// # Example
/// ```
/// use ss_core::frame::SpriteImage;
/// use ss_core::traits::Quantizer;
/// use ss_quant::ansi16::Ansi16Quantizer;
///
/// let img = SpriteImage::from_rgba_pixels(1, 2, &[[255, 85, 85, 255], [9, 9, 9, 0]]).unwrap();
/// let grid = Ansi16Quantizer::default().quantize(&img);
/// assert_eq!(grid.cells, vec![6, -1]);
/// ```
#[derive(Clone, Debug)]
pub struct Ansi16Quantizer {
    dark_delta: u8,
    color_cutoff: u16,
    references: [[u8; 3]; 16],
}

impl Default for Ansi16Quantizer {
    fn default() -> Self {
        Self::new(DEFAULT_DARK_DELTA, DEFAULT_COLOR_CUTOFF)
    }
}

impl Ansi16Quantizer {
    /// Build the reference table for `dark_delta`.
    #[must_use]
    pub fn new(dark_delta: u8, color_cutoff: u16) -> Self {
        Self {
            dark_delta,
            color_cutoff,
            references: reference_table(dark_delta),
        }
    }

    /// Dark delta the references were built with.
    #[must_use]
    pub fn dark_delta(&self) -> u8 {
        self.dark_delta
    }

    /// Index d'un pixel opaque.
    ///
    /// # Example
    /// ```
    /// use ss_quant::ansi16::Ansi16Quantizer;
    /// let q = Ansi16Quantizer::default();
    /// assert_eq!(q.classify([170, 0, 0]), 0); // dim red
    /// assert_eq!(q.classify([200, 200, 200]), 14); // light gray
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn classify(&self, rgb: [u8; 3]) -> i16 {
        let (chromatic, shades) = self.references.split_at(Ansi16::CHROMATIC);
        if self.is_colorless(rgb) {
            (Ansi16::CHROMATIC + nearest(rgb, shades)) as i16
        } else {
            nearest(rgb, chromatic) as i16
        }
    }

    /// max(canal) − min(canal) < color_cutoff.
    #[inline(always)]
    #[must_use]
    pub fn is_colorless(&self, rgb: [u8; 3]) -> bool {
        let max = rgb.iter().max().copied().unwrap_or(0);
        let min = rgb.iter().min().copied().unwrap_or(0);
        u16::from(max - min) < self.color_cutoff
    }
}

impl Quantizer for Ansi16Quantizer {
    fn quantize(&self, image: &SpriteImage) -> IndexGrid {
        let mut grid = IndexGrid::new(image.width(), image.height(), ANSI16_TRANSPARENT);
        let channels = image.channels().count();
        let has_alpha = image.has_alpha();

        grid.cells
            .par_chunks_mut(image.width().max(1) as usize)
            .enumerate()
            .for_each(|(y, row)| {
                let src = image.row(y as u32);
                for (cell, px) in row.iter_mut().zip(src.chunks_exact(channels)) {
                    *cell = if has_alpha && px[3] == 0 {
                        ANSI16_TRANSPARENT
                    } else {
                        self.classify([px[0], px[1], px[2]])
                    };
                }
            });
        grid
    }

    fn transparent(&self) -> i16 {
        ANSI16_TRANSPARENT
    }

    fn name(&self) -> &'static str {
        "ansi16"
    }
}

/// Sum of absolute channel differences.
#[inline(always)]
fn l1(a: [u8; 3], b: [u8; 3]) -> u16 {
    a.iter().zip(b).map(|(&x, y)| u16::from(x.abs_diff(y))).sum()
}

/// Position of the closest reference; the first one wins on ties.
#[inline(always)]
fn nearest(rgb: [u8; 3], references: &[[u8; 3]]) -> usize {
    references
        .iter()
        .enumerate()
        .min_by_key(|(_, r)| l1(rgb, **r))
        .map_or(0, |(i, _)| i)
}
