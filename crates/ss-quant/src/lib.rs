/// Color quantization engine for spritestring.
///
/// Maps source pixels to 16-color or 256-color ANSI palette indices, and
/// applies the brightness/contrast adjustment that runs before them.

pub mod adjust;
pub mod ansi16;
pub mod ansi256;

pub use adjust::adjust_brightness_contrast;
pub use ansi16::Ansi16Quantizer;
pub use ansi256::Ansi256Quantizer;
