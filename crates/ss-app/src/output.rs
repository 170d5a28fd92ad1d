use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ss_render::cowfile::wrap_cowfile;

/// Écrit le rendu tel quel.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_render(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!("Rendu écrit dans {}", path.display());
    Ok(())
}

/// `<sprite stem>.cow` next to the sprite.
#[must_use]
pub fn cowfile_path(sprite: &Path) -> PathBuf {
    sprite.with_extension("cow")
}

/// Enveloppe le rendu en cowfile et l'écrit.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_cowfile(path: &Path, art: &str, comment: &str) -> Result<()> {
    std::fs::write(path, wrap_cowfile(art, comment))
        .with_context(|| format!("Impossible d'écrire le cowfile {}", path.display()))?;
    log::info!("Cowfile écrit dans {}", path.display());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn cowfile_sits_next_to_sprite() {
        assert_eq!(
            cowfile_path(Path::new("art/hero.png")),
            PathBuf::from("art/hero.cow")
        );
    }

    #[test]
    fn render_is_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hero.txt");
        write_render(&path, "\x1b[0m\x1b[91m\u{2580}\x1b[0m\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "\x1b[0m\x1b[91m\u{2580}\x1b[0m\n"
        );
    }

    #[test]
    fn cowfile_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hero.cow");
        write_cowfile(&path, "x\n", "hero").unwrap();
        let cow = std::fs::read_to_string(&path).unwrap();
        assert!(cow.starts_with("## hero\n$the_cow"));
        assert!(cow.ends_with("EOC\n"));
    }

    #[test]
    fn unwritable_cowfile_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("hero.cow");
        assert!(write_cowfile(&path, "x\n", "hero").is_err());
    }
}
