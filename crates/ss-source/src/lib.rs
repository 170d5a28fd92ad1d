/// Image loading for spritestring.

pub mod image;

pub use crate::image::{load_sprite, sprite_from_dynamic};
