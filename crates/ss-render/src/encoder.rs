use std::fmt::Write;

use ss_core::palette::{ANSI16_TRANSPARENT, ANSI256_TRANSPARENT, Ansi16, SGR_RESET};
use ss_core::traits::CellEncoder;

/// Codes SGR nommés (30–37 / 90–97), une séquence par code.
///
/// Every half-block cell starts with a reset so a previous background never
/// bleeds into it; every line ends with a reset.
///
/// # Example
/// ```
/// use ss_core::traits::CellEncoder;
/// use ss_render::encoder::Ansi16Encoder;
///
/// let mut out = String::new();
/// Ansi16Encoder.push_fg_bg(&mut out, 6, 0);
/// assert_eq!(out, "\x1b[91m\x1b[41m");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Ansi16Encoder;

impl CellEncoder for Ansi16Encoder {
    fn is_transparent(&self, index: i16) -> bool {
        index < 0
    }

    fn transparent(&self) -> i16 {
        ANSI16_TRANSPARENT
    }

    fn push_fg(&self, out: &mut String, fg: i16) {
        debug_assert!(Ansi16::from_index(fg).is_some(), "index hors palette : {fg}");
        if let Some(color) = Ansi16::from_index(fg) {
            let _ = write!(out, "\x1b[{}m", color.fg_code());
        }
    }

    fn push_fg_bg(&self, out: &mut String, fg: i16, bg: i16) {
        self.push_fg(out, fg);
        debug_assert!(Ansi16::from_index(bg).is_some(), "index hors palette : {bg}");
        if let Some(color) = Ansi16::from_index(bg) {
            let _ = write!(out, "\x1b[{}m", color.bg_code());
        }
    }

    fn open_cell(&self, out: &mut String) {
        out.push_str(SGR_RESET);
    }

    fn close_line(&self, out: &mut String) {
        out.push_str(SGR_RESET);
    }
}

/// Séquences 256 couleurs étendues (`38;5;n` / `48;5;n`).
///
/// Every colored glyph is followed by a reset, and a line that ends on a
/// transparent cell gets one before its newline. Index 0 is transparent.
///
/// # Example
/// ```
/// use ss_core::traits::CellEncoder;
/// use ss_render::encoder::Ansi256Encoder;
///
/// let mut out = String::new();
/// Ansi256Encoder.push_fg_bg(&mut out, 196, 21);
/// assert_eq!(out, "\x1b[38;5;196;48;5;21m");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Ansi256Encoder;

impl CellEncoder for Ansi256Encoder {
    fn is_transparent(&self, index: i16) -> bool {
        index == ANSI256_TRANSPARENT
    }

    fn transparent(&self) -> i16 {
        ANSI256_TRANSPARENT
    }

    fn push_fg(&self, out: &mut String, fg: i16) {
        debug_assert!((0..=255).contains(&fg), "index hors palette : {fg}");
        let _ = write!(out, "\x1b[38;5;{fg}m");
    }

    fn push_fg_bg(&self, out: &mut String, fg: i16, bg: i16) {
        debug_assert!((0..=255).contains(&bg), "index hors palette : {bg}");
        let _ = write!(out, "\x1b[38;5;{fg};48;5;{bg}m");
    }

    fn close_glyph(&self, out: &mut String) {
        out.push_str(SGR_RESET);
    }

    fn close_line(&self, out: &mut String) {
        if !out.ends_with(SGR_RESET) {
            out.push_str(SGR_RESET);
        }
    }
}
