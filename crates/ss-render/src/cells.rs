use ss_core::grid::IndexGrid;
use ss_core::traits::CellEncoder;

/// Upper half block (▀) : l'encre est en haut.
pub const UPPER_HALF: char = '\u{2580}';
/// Lower half block (▄) : l'encre est en bas.
pub const LOWER_HALF: char = '\u{2584}';
/// Deux blocs pleins (██), un pixel en mode bigshot.
pub const FULL_PAIR: &str = "\u{2588}\u{2588}";

/// Options de mise en page du rendu.
///
/// # Example
/// ```
/// use ss_render::cells::RenderOptions;
/// let opts = RenderOptions::default();
/// assert_eq!(opts.padding, 0);
/// assert!(!opts.bigshot);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces at the start of every line.
    pub padding: usize,
    /// One pixel per line as two full blocks, instead of two pixels per cell.
    pub bigshot: bool,
}

/// Rend une grille d'index en texte coloré.
///
/// Pure function: the same grid, encoder and options always give the same
/// bytes.
///
/// # Example
/// ```
/// use ss_core::grid::IndexGrid;
/// use ss_render::cells::{RenderOptions, render_grid};
/// use ss_render::encoder::Ansi256Encoder;
///
/// let grid = IndexGrid::from_rows(&[vec![16]]).unwrap();
/// let text = render_grid(&grid, &Ansi256Encoder, &RenderOptions::default());
/// assert_eq!(text, "\x1b[38;5;16m▀\x1b[0m\n");
/// ```
#[must_use]
pub fn render_grid<E: CellEncoder + ?Sized>(
    grid: &IndexGrid,
    encoder: &E,
    options: &RenderOptions,
) -> String {
    log::trace!(
        "Rendu {}×{} (bigshot={}, padding={})",
        grid.width,
        grid.height,
        options.bigshot,
        options.padding
    );
    if options.bigshot {
        render_full_blocks(grid, encoder, options.padding)
    } else {
        render_half_blocks(grid, encoder, options.padding)
    }
}

/// One grid row per line, two full blocks per pixel.
fn render_full_blocks<E: CellEncoder + ?Sized>(grid: &IndexGrid, encoder: &E, padding: usize) -> String {
    let pad = " ".repeat(padding);
    let mut out = String::with_capacity(estimate_capacity(grid, padding, 2));
    out.push_str(&pad);

    for y in 0..grid.height {
        for &index in grid.row(y) {
            if encoder.is_transparent(index) {
                out.push_str("  ");
            } else {
                encoder.push_fg(&mut out, index);
                out.push_str(FULL_PAIR);
                encoder.close_glyph(&mut out);
            }
        }
        encoder.close_line(&mut out);
        out.push('\n');
        if y + 1 < grid.height {
            out.push_str(&pad);
        }
    }
    out
}

/// Two grid rows per line; odd heights get a transparent partner row.
fn render_half_blocks<E: CellEncoder + ?Sized>(grid: &IndexGrid, encoder: &E, padding: usize) -> String {
    let grid = grid.padded_to_even(encoder.transparent());
    let pad = " ".repeat(padding);
    let mut out = String::with_capacity(estimate_capacity(&grid, padding, 1));
    out.push_str(&pad);

    for y in (0..grid.height).step_by(2) {
        for (&top, &bottom) in grid.row(y).iter().zip(grid.row(y + 1)) {
            encoder.open_cell(&mut out);
            match (encoder.is_transparent(top), encoder.is_transparent(bottom)) {
                (true, true) => {
                    out.push(' ');
                    continue;
                }
                (true, false) => {
                    encoder.push_fg(&mut out, bottom);
                    out.push(LOWER_HALF);
                }
                (false, true) => {
                    encoder.push_fg(&mut out, top);
                    out.push(UPPER_HALF);
                }
                (false, false) => {
                    encoder.push_fg_bg(&mut out, top, bottom);
                    out.push(UPPER_HALF);
                }
            }
            encoder.close_glyph(&mut out);
        }
        encoder.close_line(&mut out);
        out.push('\n');
        if y + 2 < grid.height {
            out.push_str(&pad);
        }
    }
    out
}

/// Rough upper bound: ~24 bytes of escapes per cell plus padding.
fn estimate_capacity(grid: &IndexGrid, padding: usize, rows_per_line: u32) -> usize {
    let lines = (grid.height / rows_per_line.max(1)) as usize + 1;
    lines * (padding + 8) + grid.width as usize * lines * 24
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::encoder::{Ansi16Encoder, Ansi256Encoder};

    const R: &str = "\x1b[0m";

    fn grid(rows: &[&[i16]]) -> IndexGrid {
        IndexGrid::from_rows(&rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>()).unwrap()
    }

    fn half(padding: usize) -> RenderOptions {
        RenderOptions {
            padding,
            bigshot: false,
        }
    }

    fn big(padding: usize) -> RenderOptions {
        RenderOptions {
            padding,
            bigshot: true,
        }
    }

    #[test]
    fn ansi16_pairing_rules() {
        let g = grid(&[&[-1, -1, 6, 6], &[-1, 7, -1, 0]]);
        let text = render_grid(&g, &Ansi16Encoder, &half(0));
        let expected = format!(
            "{R} {R}\x1b[92m\u{2584}{R}\x1b[91m\u{2580}{R}\x1b[91m\x1b[41m\u{2580}{R}\n"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn ansi256_pairing_rules() {
        let g = grid(&[&[0, 0, 196, 196], &[0, 46, 0, 21]]);
        let text = render_grid(&g, &Ansi256Encoder, &half(0));
        let expected = concat!(
            " ",
            "\x1b[38;5;46m\u{2584}\x1b[0m",
            "\x1b[38;5;196m\u{2580}\x1b[0m",
            "\x1b[38;5;196;48;5;21m\u{2580}\x1b[0m",
            "\n"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn odd_height_gets_transparent_partner() {
        let g = grid(&[&[12], &[13], &[14]]);
        let text = render_grid(&g, &Ansi16Encoder, &half(0));
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with(&format!("{R}\x1b[37m\u{2580}{R}\n")));
    }

    #[test]
    fn padding_skips_after_last_line() {
        let g = grid(&[&[16], &[16], &[16], &[16]]);
        let text = render_grid(&g, &Ansi256Encoder, &half(3));
        let line = "\x1b[38;5;16;48;5;16m\u{2580}\x1b[0m\n";
        assert_eq!(text, format!("   {line}   {line}"));
    }

    #[test]
    fn bigshot_doubles_full_blocks() {
        let g = grid(&[&[6, -1], &[-1, 15]]);
        let text = render_grid(&g, &Ansi16Encoder, &big(1));
        let expected = format!(" \x1b[91m\u{2588}\u{2588}  {R}\n   \x1b[97m\u{2588}\u{2588}{R}\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn bigshot_ansi256_resets_each_pixel() {
        let g = grid(&[&[231, 0]]);
        let text = render_grid(&g, &Ansi256Encoder, &big(0));
        assert_eq!(text, "\x1b[38;5;231m\u{2588}\u{2588}\x1b[0m  \x1b[0m\n");
    }

    #[test]
    fn bigshot_keeps_odd_heights() {
        let g = grid(&[&[1], &[2], &[3]]);
        assert_eq!(render_grid(&g, &Ansi16Encoder, &big(0)).lines().count(), 3);
    }

    #[test]
    fn rendering_is_idempotent() {
        let g = grid(&[&[0, 5, -1], &[9, -1, 14], &[3, 3, 3]]);
        for opts in [half(2), big(2)] {
            let a = render_grid(&g, &Ansi16Encoder, &opts);
            let b = render_grid(&g, &Ansi16Encoder, &opts);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn line_count_is_half_height_rounded_up() {
        for h in 1..=7u32 {
            let g = IndexGrid::new(2, h, 200);
            let text = render_grid(&g, &Ansi256Encoder, &half(0));
            assert_eq!(text.lines().count(), h.div_ceil(2) as usize);
        }
    }

    #[test]
    fn fully_transparent_rows_have_no_color() {
        let g = IndexGrid::new(3, 2, 0);
        assert_eq!(render_grid(&g, &Ansi256Encoder, &half(0)), "   \x1b[0m\n");
    }

    #[test]
    fn ansi256_output_always_ends_reset() {
        let g = grid(&[&[196, 0], &[196, 0], &[0, 0], &[0, 0]]);
        let text = render_grid(&g, &Ansi256Encoder, &half(1));
        let expected = concat!(
            " \x1b[38;5;196;48;5;196m\u{2580}\x1b[0m \x1b[0m\n",
            "   \x1b[0m\n",
        );
        assert_eq!(text, expected);
        assert!(text.trim_end_matches('\n').ends_with("\x1b[0m"));
    }

    #[test]
    fn quantized_black_pixel_is_not_transparent() {
        use ss_core::frame::SpriteImage;
        use ss_core::traits::Quantizer;
        use ss_quant::Ansi256Quantizer;

        let sprite = SpriteImage::filled(1, 1, &[0, 0, 0, 255]).unwrap();
        let g = Ansi256Quantizer::new(true).quantize(&sprite);
        assert_eq!(
            render_grid(&g, &Ansi256Encoder, &half(0)),
            "\x1b[38;5;16m\u{2580}\x1b[0m\n"
        );
    }
}
