use std::borrow::Cow;

use ss_core::config::{ColorScheme, SpriteConfig};
use ss_core::frame::SpriteImage;
use ss_core::grid::IndexGrid;
use ss_core::traits::Quantizer;
use ss_quant::{Ansi16Quantizer, Ansi256Quantizer, adjust_brightness_contrast};
use ss_render::cells::{RenderOptions, render_grid};
use ss_render::encoder::{Ansi16Encoder, Ansi256Encoder};

/// Ajustement (si non neutre) puis quantification selon le schéma choisi.
#[must_use]
pub fn quantize(image: &SpriteImage, config: &SpriteConfig) -> IndexGrid {
    let image = adjusted(image, config);
    let quantizer: Box<dyn Quantizer> = match config.color_scheme {
        ColorScheme::Ansi16 => Box::new(Ansi16Quantizer::new(config.dark_delta, config.color_cutoff)),
        ColorScheme::Ansi256 => Box::new(Ansi256Quantizer::new(config.grayify)),
    };
    log::debug!(
        "Quantification {} de {}×{}",
        quantizer.name(),
        image.width(),
        image.height()
    );
    quantizer.quantize(&image)
}

/// Pipeline complet : image → ajustement → index → texte.
#[must_use]
pub fn render_sprite(image: &SpriteImage, config: &SpriteConfig) -> String {
    let grid = quantize(image, config);
    let options = RenderOptions {
        padding: config.padding,
        bigshot: config.bigshot,
    };
    match config.color_scheme {
        ColorScheme::Ansi16 => render_grid(&grid, &Ansi16Encoder, &options),
        ColorScheme::Ansi256 => render_grid(&grid, &Ansi256Encoder, &options),
    }
}

fn adjusted<'a>(image: &'a SpriteImage, config: &SpriteConfig) -> Cow<'a, SpriteImage> {
    if config.is_neutral_adjustment() {
        Cow::Borrowed(image)
    } else {
        Cow::Owned(adjust_brightness_contrast(
            image,
            config.contrast,
            config.brightness,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ansi256() -> SpriteConfig {
        SpriteConfig {
            color_scheme: ColorScheme::Ansi256,
            ..SpriteConfig::default()
        }
    }

    #[test]
    fn red_over_transparent_in_16_colors() {
        let sprite =
            SpriteImage::from_rgba_pixels(1, 2, &[[255, 85, 85, 255], [0, 0, 0, 0]]).unwrap();
        let text = render_sprite(&sprite, &SpriteConfig::default());
        assert_eq!(text, "\x1b[0m\x1b[91m\u{2580}\x1b[0m\n");
        assert!(!text.contains("\x1b[101m"));
    }

    #[test]
    fn single_black_pixel_in_256_colors() {
        let sprite = SpriteImage::filled(1, 1, &[0, 0, 0, 255]).unwrap();
        let text = render_sprite(&sprite, &ansi256());
        assert_eq!(text, "\x1b[38;5;16m\u{2580}\x1b[0m\n");
    }

    #[test]
    fn uniform_images_quantize_identically() {
        for config in [SpriteConfig::default(), ansi256()] {
            let small = quantize(&SpriteImage::filled(1, 1, &[90, 60, 200]).unwrap(), &config);
            let large = quantize(&SpriteImage::filled(13, 9, &[90, 60, 200]).unwrap(), &config);
            assert!(large.cells.iter().all(|&c| c == small.cells[0]));
        }
    }

    #[test]
    fn adjustment_runs_before_quantization() {
        let sprite = SpriteImage::filled(1, 1, &[100, 100, 100]).unwrap();
        let config = SpriteConfig {
            brightness: 255,
            ..ansi256()
        };
        assert_eq!(quantize(&sprite, &config).cells, vec![231]);
    }

    #[test]
    fn nogray_keeps_cube() {
        let sprite = SpriteImage::filled(1, 1, &[128, 128, 128]).unwrap();
        let gray = quantize(&sprite, &ansi256());
        let cube = quantize(
            &sprite,
            &SpriteConfig {
                grayify: false,
                ..ansi256()
            },
        );
        assert_eq!(gray.cells, vec![244]);
        assert_eq!(cube.cells, vec![145]);
    }

    #[test]
    fn odd_height_renders_ceil_half_lines() {
        let sprite = SpriteImage::filled(4, 5, &[10, 200, 10, 255]).unwrap();
        let text = render_sprite(&sprite, &SpriteConfig::default());
        assert_eq!(text.lines().count(), 3);
    }
}
