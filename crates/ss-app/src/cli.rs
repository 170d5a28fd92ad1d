use std::path::PathBuf;

use clap::Parser;
use ss_core::config::{ColorScheme, SpriteConfig};

use crate::sweep::DarkRange;

/// Pas par défaut du balayage `--dark-range`.
const DEFAULT_SWEEP_STEP: u8 = 16;

/// spritestring : sprites en texte ANSI à demi-blocs colorés.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Chemin vers l'image du sprite (PNG, JPEG, BMP, GIF).
    pub sprite: PathBuf,

    /// Écrire le rendu dans ce fichier.
    #[arg(short = 'w', long = "write", value_name = "FILE")]
    pub write: Option<PathBuf>,

    /// Espaces ajoutés en début de chaque ligne.
    #[arg(short, long)]
    pub padding: Option<usize>,

    /// Blocs pleins doublés au lieu des demi-blocs (sprite deux fois plus grand).
    #[arg(short = 'B', long, default_value_t = false)]
    pub bigshot: bool,

    /// Écart des couleurs sombres, décimal ou 0x.. (16 couleurs).
    #[arg(short, long, value_parser = parse_byte)]
    pub dark_delta: Option<u8>,

    /// Seuil max − min sous lequel un pixel est gris (16 couleurs).
    #[arg(short = 'k', long)]
    pub cutoff: Option<u16>,

    /// Rendre une fois par dark delta, de START à END inclus.
    #[arg(long, num_args = 2, value_parser = parse_byte, value_names = ["START", "END"])]
    pub dark_range: Option<Vec<u8>>,

    /// Pas du balayage `--dark-range`.
    #[arg(long, value_parser = parse_byte, default_value_t = DEFAULT_SWEEP_STEP, requires = "dark_range")]
    pub dark_step: u8,

    /// Ne pas projeter les pixels gris sur la rampe de 24 gris (256 couleurs).
    #[arg(short, long, default_value_t = false)]
    pub nogray: bool,

    /// Ajuster luminosité, contraste et gris de façon interactive.
    #[arg(short, long, default_value_t = false)]
    pub interactive: bool,

    /// Schéma de couleur : 16 ou 256.
    #[arg(long, value_parser = parse_scheme)]
    pub colors: Option<ColorScheme>,

    /// Contraste appliqué avant la quantification (≥ 0).
    #[arg(short, long, value_parser = parse_contrast)]
    pub contrast: Option<f64>,

    /// Luminosité ajoutée avant la quantification.
    #[arg(short, long, allow_negative_numbers = true)]
    pub brightness: Option<i32>,

    /// Écrire aussi un cowfile `<sprite>.cow` à côté de l'image.
    #[arg(long, default_value_t = false)]
    pub cowfile: bool,

    /// Commentaire d'en-tête du cowfile.
    #[arg(long)]
    pub comment: Option<String>,

    /// Fichier de configuration TOML.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply command-line values over a loaded config.
    pub fn apply_overrides(&self, config: &mut SpriteConfig) {
        if let Some(v) = self.colors {
            config.color_scheme = v;
        }
        if let Some(v) = self.padding {
            config.padding = v;
        }
        if self.bigshot {
            config.bigshot = true;
        }
        if let Some(v) = self.dark_delta {
            config.dark_delta = v;
        }
        if let Some(v) = self.cutoff {
            config.color_cutoff = v;
        }
        if self.nogray {
            config.grayify = false;
        }
        if let Some(v) = self.contrast {
            config.contrast = v;
        }
        if let Some(v) = self.brightness {
            config.brightness = v;
        }
        if self.nogray_is_ignored(config) {
            log::warn!("-n/--nogray n'a d'effet qu'en 256 couleurs (--colors 256)");
        }
    }

    /// `--nogray` given while rendering with the 16-color scheme.
    #[must_use]
    pub fn nogray_is_ignored(&self, config: &SpriteConfig) -> bool {
        self.nogray && config.color_scheme == ColorScheme::Ansi16
    }

    /// The `--dark-range` sweep, if requested.
    ///
    /// # Errors
    /// Returns an error if the range is inverted or the step is zero.
    pub fn dark_range(&self) -> anyhow::Result<Option<DarkRange>> {
        let Some(values) = self.dark_range.as_deref() else {
            return Ok(None);
        };
        let [start, end] = *values else {
            anyhow::bail!("--dark-range attend START END");
        };
        Ok(Some(DarkRange::new(start, end, self.dark_step)?))
    }

    /// Comment for the cowfile header, defaulting to the sprite's name.
    #[must_use]
    pub fn cowfile_comment(&self) -> String {
        self.comment.clone().unwrap_or_else(|| {
            let name = self
                .sprite
                .file_name()
                .map_or_else(|| self.sprite.display().to_string(), |n| n.to_string_lossy().into_owned());
            format!("spritestring: {name}")
        })
    }
}

/// Octet décimal ou hexadécimal préfixé `0x`.
fn parse_byte(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("valeur invalide « {s} » : {e} (attendu 0–255 ou 0x00–0xFF)"))
}

fn parse_scheme(s: &str) -> Result<ColorScheme, String> {
    match s {
        "16" => Ok(ColorScheme::Ansi16),
        "256" => Ok(ColorScheme::Ansi256),
        _ => Err(format!("schéma inconnu « {s} » : attendu 16 ou 256")),
    }
}

fn parse_contrast(s: &str) -> Result<f64, String> {
    let v: f64 = s
        .parse()
        .map_err(|e| format!("contraste invalide « {s} » : {e}"))?;
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(format!("contraste invalide « {s} » : attendu un nombre ≥ 0"))
    }
}
