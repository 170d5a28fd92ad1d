/// Shared types, traits, and configuration for spritestring.
///
/// This crate holds the image buffer, the color index grid, the fixed
/// palette tables and the rendering parameters used across the workspace.

pub mod config;
pub mod error;
pub mod frame;
pub mod grid;
pub mod palette;
pub mod traits;

pub use config::{ColorScheme, SpriteConfig};
pub use error::CoreError;
pub use frame::{Channels, SpriteImage};
pub use grid::IndexGrid;
pub use palette::Ansi16;
