use crate::frame::SpriteImage;
use crate::grid::IndexGrid;

/// Transforme une image en grille d'index de couleur.
///
/// Implémenté par : `Ansi16Quantizer`, `Ansi256Quantizer`.
///
/// # Example
/// ```
/// use ss_core::traits::Quantizer;
/// use ss_core::frame::SpriteImage;
/// use ss_core::grid::IndexGrid;
///
/// struct Flat;
/// impl Quantizer for Flat {
///     fn quantize(&self, image: &SpriteImage) -> IndexGrid {
///         IndexGrid::new(image.width(), image.height(), 1)
///     }
///     fn transparent(&self) -> i16 { -1 }
///     fn name(&self) -> &'static str { "flat" }
/// }
/// ```
pub trait Quantizer: Send + Sync {
    /// Map every pixel to a palette index.
    ///
    /// CONTRAT : la grille a les dimensions de l'image ; les pixels
    /// d'alpha nul reçoivent `transparent()`.
    fn quantize(&self, image: &SpriteImage) -> IndexGrid;

    /// Index réservé aux pixels transparents.
    fn transparent(&self) -> i16;

    /// Nom lisible pour le debug.
    fn name(&self) -> &'static str;
}

/// Encodage des séquences SGR d'un schéma de couleur.
///
/// The cell renderer is generic over this trait; it decides which glyph goes
/// in each cell, the encoder decides how colors are written.
///
/// # Example
/// ```
/// use ss_core::traits::CellEncoder;
///
/// struct Mono;
/// impl CellEncoder for Mono {
///     fn is_transparent(&self, index: i16) -> bool { index < 0 }
///     fn transparent(&self) -> i16 { -1 }
///     fn push_fg(&self, _out: &mut String, _fg: i16) {}
///     fn push_fg_bg(&self, _out: &mut String, _fg: i16, _bg: i16) {}
/// }
/// ```
pub trait CellEncoder {
    /// Whether `index` means "render nothing".
    fn is_transparent(&self, index: i16) -> bool;

    /// Sentinel used for the synthetic row of odd-height grids.
    fn transparent(&self) -> i16;

    /// Write the foreground sequence for `fg`.
    fn push_fg(&self, out: &mut String, fg: i16);

    /// Write the sequences for a foreground/background pair.
    fn push_fg_bg(&self, out: &mut String, fg: i16, bg: i16);

    /// Emitted at the start of every half-block cell.
    fn open_cell(&self, _out: &mut String) {}

    /// Emitted right after every colored glyph.
    fn close_glyph(&self, _out: &mut String) {}

    /// Emitted at the end of every line, before the newline.
    fn close_line(&self, _out: &mut String) {}
}
