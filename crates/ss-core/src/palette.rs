//! Tables de palette fixes : 16 couleurs nommées et cube ANSI 256.

/// SGR reset (`ESC[0m`).
pub const SGR_RESET: &str = "\x1b[0m";

/// Index réservé « transparent » du schéma 16 couleurs.
pub const ANSI16_TRANSPARENT: i16 = -1;

/// Index réservé « transparent » du schéma 256 couleurs.
///
/// Aliases ANSI black, which the quantizer never produces for an opaque
/// pixel (cube indices start at 16, gray ramp at 232).
pub const ANSI256_TRANSPARENT: i16 = 0;

/// Full channel value of the bright references.
const FULL: u8 = 0xFF;
/// Half channel value of the bright references.
const HALF: u8 = 0x55;

/// Default distance between a bright reference and its dim variant.
pub const DEFAULT_DARK_DELTA: u8 = 0x55;

/// Les 16 entrées de la palette interne, dans l'ordre des index.
///
/// Indices 0–5 are the dim chromatic colors, 6–11 the bright ones,
/// 12–15 the achromatic shades from black to white.
///
/// # Example
/// ```
/// use ss_core::palette::Ansi16;
/// let red = Ansi16::from_index(6).unwrap();
/// assert_eq!(red, Ansi16::BrightRed);
/// assert_eq!(red.fg_code(), 91);
/// assert_eq!(red.bg_code(), 101);
/// assert_eq!(red.index(), 6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Ansi16 {
    Red = 0,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
    BrightRed,
    BrightGreen,
    BrightBlue,
    BrightYellow,
    BrightMagenta,
    BrightCyan,
    Black,
    DarkGray,
    LightGray,
    White,
}

/// Chromatic bright references (RGB), in palette order.
const BRIGHT_RGB: [[u8; 3]; 6] = [
    [FULL, HALF, HALF],
    [HALF, FULL, HALF],
    [HALF, HALF, FULL],
    [FULL, FULL, HALF],
    [FULL, HALF, FULL],
    [HALF, FULL, FULL],
];

/// SGR foreground code per palette entry. Background = foreground + 10.
const FG_CODES: [u8; 16] = [
    31, 32, 34, 33, 35, 36, // dim
    91, 92, 94, 93, 95, 96, // bright
    30, 90, 37, 97, // black, dark gray, light gray, white
];

impl Ansi16 {
    /// Every entry, in index order.
    pub const ALL: [Self; 16] = [
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Yellow,
        Self::Magenta,
        Self::Cyan,
        Self::BrightRed,
        Self::BrightGreen,
        Self::BrightBlue,
        Self::BrightYellow,
        Self::BrightMagenta,
        Self::BrightCyan,
        Self::Black,
        Self::DarkGray,
        Self::LightGray,
        Self::White,
    ];

    /// Number of chromatic entries (dim + bright).
    pub const CHROMATIC: usize = 12;

    /// Lookup by grid index. `None` for the sentinel and out-of-range values.
    #[must_use]
    pub fn from_index(index: i16) -> Option<Self> {
        usize::try_from(index).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// Grid index of this entry.
    #[must_use]
    pub fn index(self) -> i16 {
        i16::from(self as u8)
    }

    /// SGR foreground code (30–37, 90–97).
    #[must_use]
    pub fn fg_code(self) -> u8 {
        FG_CODES[self as usize]
    }

    /// SGR background code (40–47, 100–107).
    #[must_use]
    pub fn bg_code(self) -> u8 {
        FG_CODES[self as usize] + 10
    }

    /// Couleur de référence RGB pour un `dark_delta` donné.
    ///
    /// Dim variants subtract `dark_delta` from every channel of the bright
    /// color, floored at 0. The two grays are `min`/`max` of
    /// `255 - dark_delta` and `dark_delta`, so they stay ordered whatever
    /// the delta.
    ///
    /// # Example
    /// ```
    /// use ss_core::palette::Ansi16;
    /// assert_eq!(Ansi16::Red.rgb(0x55), [0xAA, 0, 0]);
    /// assert_eq!(Ansi16::DarkGray.rgb(0x55), [0x55; 3]);
    /// assert_eq!(Ansi16::DarkGray.rgb(200), [55; 3]);
    /// assert_eq!(Ansi16::LightGray.rgb(200), [200; 3]);
    /// ```
    #[must_use]
    pub fn rgb(self, dark_delta: u8) -> [u8; 3] {
        let i = self as usize;
        let low = dark_delta.min(u8::MAX - dark_delta);
        let high = dark_delta.max(u8::MAX - dark_delta);
        match i {
            0..6 => BRIGHT_RGB[i].map(|c| c.saturating_sub(dark_delta)),
            6..12 => BRIGHT_RGB[i - 6],
            12 => [0; 3],
            13 => [low; 3],
            14 => [high; 3],
            _ => [u8::MAX; 3],
        }
    }

    /// Whether this entry is one of the four shades of gray.
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self as usize >= Self::CHROMATIC
    }
}

/// Full reference table for a dark delta, indexed like [`Ansi16::ALL`].
#[must_use]
pub fn reference_table(dark_delta: u8) -> [[u8; 3]; 16] {
    Ansi16::ALL.map(|c| c.rgb(dark_delta))
}

/// Base of the 6×6×6 cube in the 256-color palette.
pub const CUBE_BASE: i16 = 16;
/// Base of the 24-step gray ramp in the 256-color palette.
pub const GRAY_RAMP_BASE: i16 = 232;

/// Index du cube 6×6×6 pour des niveaux 0–5 par canal.
///
/// # Example
/// ```
/// use ss_core::palette::cube_index;
/// assert_eq!(cube_index(0, 0, 0), 16);
/// assert_eq!(cube_index(5, 5, 5), 231);
/// assert_eq!(cube_index(5, 0, 0), 196);
/// ```
#[inline(always)]
#[must_use]
pub fn cube_index(r: u8, g: u8, b: u8) -> i16 {
    debug_assert!(r <= 5 && g <= 5 && b <= 5, "cube level out of range");
    CUBE_BASE + 36 * i16::from(r) + 6 * i16::from(g) + i16::from(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_table() {
        for (i, color) in Ansi16::ALL.iter().enumerate() {
            assert_eq!(color.index(), i as i16);
            assert_eq!(Ansi16::from_index(i as i16), Some(*color));
        }
        assert_eq!(Ansi16::from_index(ANSI16_TRANSPARENT), None);
        assert_eq!(Ansi16::from_index(16), None);
    }

    #[test]
    fn sixteen_distinct_sgr_codes() {
        let mut codes: Vec<u8> = Ansi16::ALL.iter().map(|c| c.fg_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 16);
    }

    #[test]
    fn dim_colors_floor_at_zero() {
        assert_eq!(Ansi16::Cyan.rgb(0xFF), [0, 0, 0]);
        assert_eq!(Ansi16::Yellow.rgb(0x60), [0x9F, 0x9F, 0]);
        assert_eq!(Ansi16::BrightYellow.rgb(0x60), [0xFF, 0xFF, 0x55]);
    }

    #[test]
    fn grays_stay_ordered() {
        for delta in [0u8, 1, 85, 127, 128, 200, 255] {
            assert!(Ansi16::DarkGray.rgb(delta)[0] <= Ansi16::LightGray.rgb(delta)[0]);
        }
    }

    #[test]
    fn achromatic_split() {
        assert!(!Ansi16::BrightCyan.is_achromatic());
        assert!(Ansi16::Black.is_achromatic());
        assert_eq!(reference_table(0x55)[15], [255; 3]);
    }
}
