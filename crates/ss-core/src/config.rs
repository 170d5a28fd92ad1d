use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::palette::DEFAULT_DARK_DELTA;

/// Default gray-detection sensitivity of the 16-color scheme.
pub const DEFAULT_COLOR_CUTOFF: u16 = 32;

/// Plage de luminosité acceptée.
pub const BRIGHTNESS_RANGE: std::ops::RangeInclusive<i32> = -255..=255;

/// Schéma de couleur de sortie.
///
/// # Example
/// ```
/// use ss_core::config::ColorScheme;
/// assert_eq!(ColorScheme::default(), ColorScheme::Ansi16);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum ColorScheme {
    /// 16 couleurs nommées, plus proche voisin L1.
    #[default]
    #[serde(alias = "16")]
    Ansi16,
    /// Cube 6×6×6 + rampe de gris 24 niveaux.
    #[serde(alias = "256")]
    Ansi256,
}

/// Paramètres de rendu complets.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use ss_core::config::SpriteConfig;
/// let config = SpriteConfig::default();
/// assert_eq!(config.dark_delta, 0x55);
/// assert!(config.is_neutral_adjustment());
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SpriteConfig {
    // === Rendu ===
    /// Schéma de couleur.
    pub color_scheme: ColorScheme,
    /// Espaces ajoutés en début de chaque ligne.
    pub padding: usize,
    /// Blocs pleins doublés (██) au lieu des demi-blocs.
    pub bigshot: bool,

    // === 16 couleurs ===
    /// Écart entre une couleur vive et sa variante sombre.
    pub dark_delta: u8,
    /// Un pixel est gris si max − min < color_cutoff.
    pub color_cutoff: u16,

    // === 256 couleurs ===
    /// Projeter les pixels quasi neutres sur la rampe de gris.
    pub grayify: bool,
    /// Multiplicateur de contraste (≥ 0). 1.0 = neutre.
    pub contrast: f64,
    /// Décalage de luminosité. 0 = neutre.
    pub brightness: i32,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Ansi16,
            padding: 0,
            bigshot: false,
            dark_delta: DEFAULT_DARK_DELTA,
            color_cutoff: DEFAULT_COLOR_CUTOFF,
            grayify: true,
            contrast: 1.0,
            brightness: 0,
        }
    }
}

impl SpriteConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization and CLI overrides.
    pub fn clamp_all(&mut self) {
        self.contrast = self.contrast.max(0.0);
        self.brightness = self
            .brightness
            .clamp(*BRIGHTNESS_RANGE.start(), *BRIGHTNESS_RANGE.end());
    }

    /// Reject values no clamp can repair.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if the contrast is NaN or infinite.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.contrast.is_finite() {
            return Err(CoreError::Config(format!(
                "contrast doit être fini (reçu {})",
                self.contrast
            )));
        }
        Ok(())
    }

    /// True when brightness/contrast adjustment would be the identity.
    #[must_use]
    pub fn is_neutral_adjustment(&self) -> bool {
        (self.contrast - 1.0).abs() < f64::EPSILON && self.brightness == 0
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    render: Option<RenderSection>,
    ansi16: Option<Ansi16Section>,
    ansi256: Option<Ansi256Section>,
}

/// Render section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct RenderSection {
    color_scheme: Option<ColorScheme>,
    padding: Option<usize>,
    bigshot: Option<bool>,
}

#[derive(Deserialize)]
struct Ansi16Section {
    dark_delta: Option<u8>,
    color_cutoff: Option<u16>,
}

#[derive(Deserialize)]
struct Ansi256Section {
    grayify: Option<bool>,
    contrast: Option<f64>,
    brightness: Option<i32>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or holds a value
/// rejected by [`SpriteConfig::validate`].
///
/// # Example
/// ```no_run
/// use ss_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<SpriteConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Config invalide dans {}", path.display()))?;
    log::info!("Config chargée depuis {}", path.display());
    Ok(config)
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the TOML is malformed or a value is invalid.
///
/// # Example
/// ```
/// use ss_core::config::{parse_config, ColorScheme};
/// let config = parse_config("[render]\ncolor_scheme = \"256\"\n").unwrap();
/// assert_eq!(config.color_scheme, ColorScheme::Ansi256);
/// ```
pub fn parse_config(content: &str) -> Result<SpriteConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = SpriteConfig::default();

    if let Some(r) = file.render {
        if let Some(v) = r.color_scheme {
            config.color_scheme = v;
        }
        if let Some(v) = r.padding {
            config.padding = v;
        }
        if let Some(v) = r.bigshot {
            config.bigshot = v;
        }
    }
    if let Some(s) = file.ansi16 {
        if let Some(v) = s.dark_delta {
            config.dark_delta = v;
        }
        if let Some(v) = s.color_cutoff {
            config.color_cutoff = v;
        }
    }
    if let Some(s) = file.ansi256 {
        if let Some(v) = s.grayify {
            config.grayify = v;
        }
        if let Some(v) = s.contrast {
            config.contrast = v;
        }
        if let Some(v) = s.brightness {
            config.brightness = v;
        }
    }

    config.validate()?;
    config.clamp_all();
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), SpriteConfig::default());
    }

    #[test]
    fn shipped_default_file_matches_defaults() {
        let shipped = parse_config(include_str!("../../../config/default.toml")).unwrap();
        assert_eq!(shipped, SpriteConfig::default());
    }

    #[test]
    fn partial_sections_override_defaults() {
        let config = parse_config(
            "[ansi16]\ndark_delta = 100\n\n[ansi256]\nbrightness = -20\ncontrast = 1.5\n",
        )
        .unwrap();
        assert_eq!(config.dark_delta, 100);
        assert_eq!(config.color_cutoff, DEFAULT_COLOR_CUTOFF);
        assert_eq!(config.brightness, -20);
        assert!((config.contrast - 1.5).abs() < f64::EPSILON);
        assert!(!config.is_neutral_adjustment());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = parse_config("[ansi256]\nbrightness = 900\ncontrast = -2.0\n").unwrap();
        assert_eq!(config.brightness, 255);
        assert!(config.contrast.abs() < f64::EPSILON);
    }

    #[test]
    fn dark_delta_above_byte_is_rejected() {
        assert!(parse_config("[ansi16]\ndark_delta = 300\n").is_err());
    }

    #[test]
    fn nan_contrast_is_rejected() {
        assert!(parse_config("[ansi256]\ncontrast = nan\n").is_err());
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nbigshot = true\npadding = 4").unwrap();
        let config = load_config(file.path()).unwrap();
        assert!(config.bigshot);
        assert_eq!(config.padding, 4);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/sprite.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/sprite.toml"));
    }
}
