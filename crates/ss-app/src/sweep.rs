use std::fmt::Write;

use ss_core::config::{ColorScheme, SpriteConfig};
use ss_core::frame::SpriteImage;
use thiserror::Error;

use crate::pipeline::render_sprite;

/// Invalid `--dark-range` bounds.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SweepError {
    /// Start above end.
    #[error("plage de dark delta inversée : {start:#04x} > {end:#04x}")]
    Inverted {
        /// First delta.
        start: u8,
        /// Last delta.
        end: u8,
    },

    /// A zero step would never reach the end.
    #[error("le pas de dark delta doit être > 0")]
    ZeroStep,
}

/// Plage inclusive de dark deltas à balayer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DarkRange {
    /// First delta rendered.
    pub start: u8,
    /// Last delta, rendered if the step lands on it.
    pub end: u8,
    /// Increment between renders.
    pub step: u8,
}

impl DarkRange {
    /// Validate and build a range.
    ///
    /// # Errors
    /// Returns an error if `start > end` or `step == 0`.
    pub fn new(start: u8, end: u8, step: u8) -> Result<Self, SweepError> {
        if start > end {
            return Err(SweepError::Inverted { start, end });
        }
        if step == 0 {
            return Err(SweepError::ZeroStep);
        }
        Ok(Self { start, end, step })
    }

    /// Every delta of the sweep, ascending.
    pub fn deltas(&self) -> impl Iterator<Item = u8> {
        (self.start..=self.end).step_by(usize::from(self.step))
    }
}

/// Rendu 16 couleurs répété pour chaque dark delta, chacun précédé d'une étiquette.
#[must_use]
pub fn render_sweep(image: &SpriteImage, config: &SpriteConfig, range: DarkRange) -> String {
    let mut out = String::new();
    for delta in range.deltas() {
        let config = SpriteConfig {
            color_scheme: ColorScheme::Ansi16,
            dark_delta: delta,
            ..config.clone()
        };
        let _ = writeln!(out, "dark delta: {delta:#04x} ({delta})");
        out.push_str(&render_sprite(image, &config));
    }
    out
}
