use std::io::Write;

use anyhow::Result;
use clap::Parser;
use ss_core::config::SpriteConfig;

pub mod cli;
pub mod interactive;
pub mod output;
pub mod pipeline;
pub mod sweep;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config, puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);
    config.validate()?;
    config.clamp_all();
    let dark_range = cli.dark_range()?;
    log::debug!("Config résolue : {config:?}");

    // 4. Charger le sprite
    let sprite = ss_source::load_sprite(&cli.sprite)?;

    // 5. Mode interactif : la boucle prend la main jusqu'à 'q'
    if cli.interactive {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout().lock();
        return interactive::run(&sprite, &config, stdin.lock(), &mut stdout);
    }

    // 6. Rendu
    let text = match dark_range {
        Some(range) => sweep::render_sweep(&sprite, &config, range),
        None => pipeline::render_sprite(&sprite, &config),
    };
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;

    // 7. Sorties fichier
    if let Some(ref path) = cli.write {
        output::write_render(path, &text)?;
        writeln!(stdout, "Wrote contents into {}", path.display())?;
    }
    if cli.cowfile {
        let path = output::cowfile_path(&cli.sprite);
        if let Err(e) = output::write_cowfile(&path, &text, &cli.cowfile_comment()) {
            // Le rendu principal est déjà affiché : on prévient sans échouer.
            log::warn!("Cowfile non écrit : {e:#}");
        }
    }
    Ok(())
}

/// Resolve config: explicit --config file, else built-in defaults.
fn resolve_config(cli: &cli::Cli) -> Result<SpriteConfig> {
    if let Some(ref path) = cli.config {
        ss_core::config::load_config(path)
    } else {
        log::debug!("Pas de --config, utilisation des défauts.");
        Ok(SpriteConfig::default())
    }
}
