/// Block-character rendering for spritestring.
///
/// Turns color index grids into ANSI-colored text, and wraps finished
/// renders into cowfiles.

pub mod cells;
pub mod cowfile;
pub mod encoder;

pub use cells::{RenderOptions, render_grid};
pub use cowfile::wrap_cowfile;
pub use encoder::{Ansi16Encoder, Ansi256Encoder};
