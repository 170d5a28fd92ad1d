//! Boucle interactive de réglage luminosité / contraste / gris.
//!
//! L'état est une valeur passée et rendue par `step`, jamais un global.

use std::io::{BufRead, Write};

use anyhow::Result;
use ss_core::config::{BRIGHTNESS_RANGE, ColorScheme, SpriteConfig};
use ss_core::frame::SpriteImage;
use thiserror::Error;

use crate::pipeline::render_sprite;

/// Pas de `bp` / `bm`.
const BRIGHTNESS_STEP: i32 = 5;
/// Pas de `cp` / `cm`.
const CONTRAST_STEP: f64 = 0.05;

const PROMPT: &str = "Enter a command ('h' for help): ";

const HELP: &str = "\
'b [int]': set brightness
'bp': increment brightness by 5
'bm': decrement brightness by 5
'c [float]': set contrast
'cp': increment contrast by 0.05
'cm': decrement contrast by 0.05
'g': toggle No Grayscale flag
'r': reset values
'o': show original image
'h': print this help listing
'q': quit program
";

/// Paramètres modifiables entre deux rendus.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TuningState {
    /// Contrast multiplier, never negative.
    pub contrast: f64,
    /// Brightness offset.
    pub brightness: i32,
    /// Gray-ramp detection.
    pub grayify: bool,
}

impl TuningState {
    /// Initial state taken from the resolved config.
    #[must_use]
    pub fn from_config(config: &SpriteConfig) -> Self {
        Self {
            contrast: config.contrast,
            brightness: config.brightness,
            grayify: config.grayify,
        }
    }

    /// Config for the next render, always in 256 colors: gray detection
    /// only exists there.
    #[must_use]
    pub fn apply_to(&self, config: &SpriteConfig) -> SpriteConfig {
        SpriteConfig {
            color_scheme: ColorScheme::Ansi256,
            contrast: self.contrast,
            brightness: self.brightness,
            grayify: self.grayify,
            ..config.clone()
        }
    }

    /// Bloc d'état affiché après chaque rendu.
    #[must_use]
    pub fn status(&self) -> String {
        format!(
            "No Grayscale: {}\nBrightness: {:4}\nContrast: {:6.2}",
            !self.grayify, self.brightness, self.contrast
        )
    }

    fn with_brightness(self, brightness: i32) -> Self {
        Self {
            brightness: brightness.clamp(*BRIGHTNESS_RANGE.start(), *BRIGHTNESS_RANGE.end()),
            ..self
        }
    }

    fn with_contrast(self, contrast: f64) -> Self {
        Self {
            contrast: contrast.max(0.0),
            ..self
        }
    }
}

/// Commande saisie par l'utilisateur.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    SetBrightness(i32),
    BrightnessUp,
    BrightnessDown,
    SetContrast(f64),
    ContrastUp,
    ContrastDown,
    ToggleGray,
    Reset,
    Original,
    Help,
    Quit,
}

/// Unparseable input line.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// Known command, bad or missing value.
    #[error("Bad Input <{0}>")]
    BadValue(String),
    /// Nothing matches.
    #[error("Unknown command <{0}> ('h' for help)")]
    Unknown(String),
}

/// What the loop does after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// State changed: render again.
    Render,
    /// Print the help listing.
    Help,
    /// Render without adjustment.
    ShowOriginal,
    /// Leave the loop.
    Quit,
}

/// Parse one input line.
///
/// # Errors
/// Returns [`CommandError`] for unknown commands and malformed values.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default();
    let arg = words.next();

    let command = match head {
        "b" | "bright" | "brightness" => Command::SetBrightness(parse_value(arg, line)?),
        "c" | "con" | "contrast" => {
            let contrast: f64 = parse_value(arg, line)?;
            if !contrast.is_finite() {
                return Err(CommandError::BadValue(line.to_string()));
            }
            Command::SetContrast(contrast)
        }
        "bp" => Command::BrightnessUp,
        "bm" => Command::BrightnessDown,
        "cp" => Command::ContrastUp,
        "cm" => Command::ContrastDown,
        "g" | "gray" | "grayscale" => Command::ToggleGray,
        "r" | "reset" => Command::Reset,
        "o" | "original" => Command::Original,
        "h" | "help" => Command::Help,
        "q" | "quit" => Command::Quit,
        _ => return Err(CommandError::Unknown(line.to_string())),
    };
    Ok(command)
}

fn parse_value<T: std::str::FromStr>(arg: Option<&str>, line: &str) -> Result<T, CommandError> {
    arg.and_then(|a| a.parse().ok())
        .ok_or_else(|| CommandError::BadValue(line.to_string()))
}

/// Transition pure : nouvel état et action à effectuer.
#[must_use]
pub fn step(state: TuningState, initial: &TuningState, command: Command) -> (TuningState, Action) {
    match command {
        Command::SetBrightness(v) => (state.with_brightness(v), Action::Render),
        Command::BrightnessUp => (
            state.with_brightness(state.brightness + BRIGHTNESS_STEP),
            Action::Render,
        ),
        Command::BrightnessDown => (
            state.with_brightness(state.brightness - BRIGHTNESS_STEP),
            Action::Render,
        ),
        Command::SetContrast(v) => (state.with_contrast(v), Action::Render),
        Command::ContrastUp => (state.with_contrast(state.contrast + CONTRAST_STEP), Action::Render),
        Command::ContrastDown => (state.with_contrast(state.contrast - CONTRAST_STEP), Action::Render),
        Command::ToggleGray => (
            TuningState {
                grayify: !state.grayify,
                ..state
            },
            Action::Render,
        ),
        Command::Reset => (*initial, Action::Render),
        Command::Original => (state, Action::ShowOriginal),
        Command::Help => (state, Action::Help),
        Command::Quit => (state, Action::Quit),
    }
}

/// Lance la boucle : rendu, état, invite, jusqu'à `q` ou fin d'entrée.
///
/// # Errors
/// Returns an error if reading `input` or writing `output` fails.
pub fn run<R: BufRead, W: Write>(
    image: &SpriteImage,
    config: &SpriteConfig,
    mut input: R,
    output: &mut W,
) -> Result<()> {
    let initial = TuningState::from_config(config);
    let mut state = initial;
    let mut modified = true;
    let mut line = String::new();

    loop {
        if modified {
            write!(output, "{}", render_sprite(image, &state.apply_to(config)))?;
            writeln!(output, "{}", state.status())?;
            modified = false;
        }

        write!(output, "{PROMPT}")?;
        output.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            log::debug!("Fin de l'entrée, sortie du mode interactif");
            return Ok(());
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let command = match parse_command(trimmed) {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "Error: {e}")?;
                continue;
            }
        };
        let (next, action) = step(state, &initial, command);
        state = next;
        match action {
            Action::Render => modified = true,
            Action::Help => writeln!(output, "{HELP}")?,
            Action::ShowOriginal => {
                let original = TuningState {
                    contrast: 1.0,
                    brightness: 0,
                    grayify: true,
                }
                .apply_to(config);
                write!(output, "{}", render_sprite(image, &original))?;
            }
            Action::Quit => return Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn initial() -> TuningState {
        TuningState {
            contrast: 1.0,
            brightness: 0,
            grayify: true,
        }
    }

    #[test]
    fn parses_aliases_and_values() {
        assert_eq!(parse_command("brightness -40"), Ok(Command::SetBrightness(-40)));
        assert_eq!(parse_command("con 1.25"), Ok(Command::SetContrast(1.25)));
        assert_eq!(parse_command("grayscale"), Ok(Command::ToggleGray));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
    }

    #[test]
    fn bad_values_and_unknown_commands() {
        assert_eq!(
            parse_command("b lots"),
            Err(CommandError::BadValue("b lots".into()))
        );
        assert_eq!(parse_command("c"), Err(CommandError::BadValue("c".into())));
        assert!(parse_command("c inf").is_err());
        assert!(matches!(parse_command("zoom"), Err(CommandError::Unknown(_))));
    }

    #[test]
    fn steps_adjust_and_reset() {
        let init = initial();
        let (s, a) = step(init, &init, Command::BrightnessUp);
        assert_eq!((s.brightness, a), (5, Action::Render));
        let (s, _) = step(s, &init, Command::ContrastDown);
        assert!((s.contrast - 0.95).abs() < 1e-9);
        let (s, _) = step(s, &init, Command::ToggleGray);
        assert!(!s.grayify);
        let (s, a) = step(s, &init, Command::Reset);
        assert_eq!((s, a), (init, Action::Render));
    }

    #[test]
    fn values_stay_in_range() {
        let init = initial();
        let (s, _) = step(init, &init, Command::SetContrast(0.02));
        let (s, _) = step(s, &init, Command::ContrastDown);
        assert!(s.contrast.abs() < f64::EPSILON);
        let (s, _) = step(s, &init, Command::SetBrightness(10_000));
        assert_eq!(s.brightness, 255);
    }

    #[test]
    fn status_block_format() {
        let state = TuningState {
            contrast: 1.5,
            brightness: -5,
            grayify: false,
        };
        assert_eq!(
            state.status(),
            "No Grayscale: true\nBrightness:   -5\nContrast:   1.50"
        );
    }

    #[test]
    fn session_renders_after_each_change() {
        let image = SpriteImage::filled(1, 2, &[128, 128, 128, 255]).unwrap();
        let config = SpriteConfig {
            color_scheme: ColorScheme::Ansi256,
            ..SpriteConfig::default()
        };
        let input = b"g\nnope\nb 300\nq\nbp\n";
        let mut output = Vec::new();
        run(&image, &config, &input[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("\x1b[38;5;244;48;5;244m"));
        assert!(text.contains("\x1b[38;5;145;48;5;145m"));
        assert!(text.contains("\x1b[38;5;231;48;5;231m"));
        assert!(text.contains("Error: Unknown command <nope>"));
        assert!(text.contains("Brightness:  255"));
        // `bp` comes after `q` and is never read
        assert!(!text.contains("Brightness:  260"));
        assert_eq!(text.matches(PROMPT).count(), 4);
    }

    #[test]
    fn gray_toggle_changes_render_with_default_config() {
        let image = SpriteImage::filled(1, 2, &[128, 128, 128, 255]).unwrap();
        let mut output = Vec::new();
        run(&image, &SpriteConfig::default(), &b"g\no\nq\n"[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        let renders: Vec<&str> = text
            .split(PROMPT)
            .filter_map(|chunk| chunk.lines().find(|l| l.contains('\u{2580}')))
            .collect();
        assert_eq!(
            renders,
            vec![
                "\x1b[38;5;244;48;5;244m\u{2580}\x1b[0m",
                "\x1b[38;5;145;48;5;145m\u{2580}\x1b[0m",
                // original view keeps gray detection on
                "\x1b[38;5;244;48;5;244m\u{2580}\x1b[0m",
            ]
        );
        assert!(!text.contains("\x1b[37m"));
    }

    #[test]
    fn end_of_input_quits() {
        let image = SpriteImage::filled(1, 1, &[0, 0, 0]).unwrap();
        let mut output = Vec::new();
        run(&image, &SpriteConfig::default(), &b""[..], &mut output).unwrap();
        assert!(String::from_utf8(output).unwrap().ends_with(PROMPT));
    }
}
