use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use grounding_core::model::Palette;
use services::{Clock, ConfigSource, ExerciseService};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidPalette { raw: String },
    InvalidFlag { name: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidPalette { raw } => write!(f, "invalid palette: {raw}"),
            ArgsError::InvalidFlag { name, raw } => {
                write!(f, "invalid {name} value: {raw} (expected 1/0, true/false, yes/no)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    exercise: Arc<ExerciseService>,
}

impl UiApp for DesktopApp {
    fn exercise(&self) -> Arc<ExerciseService> {
        Arc::clone(&self.exercise)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  grounding [--palette <name>] [--steps <path.json>] [--reset-on-inactive]");
    eprintln!();
    eprintln!("Palettes:");
    eprintln!("  midnight (default), dawn, forest, ocean");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  GROUNDING_PALETTE, GROUNDING_STEPS, GROUNDING_RESET_ON_INACTIVE, RUST_LOG");
}

enum Parsed {
    Run(ConfigSource),
    Help,
}

fn parse_palette(raw: String) -> Result<Palette, ArgsError> {
    Palette::from_name(&raw).map_err(|_| ArgsError::InvalidPalette { raw })
}

fn parse_flag(name: &'static str, raw: String) -> Result<bool, ArgsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ArgsError::InvalidFlag { name, raw }),
    }
}

/// Environment first, then flags on top.
fn parse_args(
    args: &mut impl Iterator<Item = String>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Parsed, ArgsError> {
    let mut source = ConfigSource {
        palette: env("GROUNDING_PALETTE").map(parse_palette).transpose()?,
        steps_path: env("GROUNDING_STEPS")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from),
        reset_on_inactive: env("GROUNDING_RESET_ON_INACTIVE")
            .map(|raw| parse_flag("GROUNDING_RESET_ON_INACTIVE", raw))
            .transpose()?,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--palette" => {
                let value = require_value(args, "--palette")?;
                source.palette = Some(parse_palette(value)?);
            }
            "--steps" => {
                let value = require_value(args, "--steps")?;
                source.steps_path = Some(PathBuf::from(value));
            }
            "--reset-on-inactive" => source.reset_on_inactive = Some(true),
            "--help" | "-h" => return Ok(Parsed::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    Ok(Parsed::Run(source))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let source = match parse_args(&mut argv, |key| std::env::var(key).ok()).inspect_err(|_| {
        print_usage();
    })? {
        Parsed::Run(source) => source,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
    };

    init_tracing();

    let exercise = Arc::new(ExerciseService::from_source(Clock::system(), &source)?);
    tracing::info!(
        palette = %exercise.settings().palette(),
        steps = exercise.settings().steps().len(),
        "launching grounding window"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { exercise });
    let context = build_app_context(&app);

    // Some dev setups default to an always-on-top window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Grounding")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
