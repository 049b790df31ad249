//! QuickSheet demo: present a sheet headlessly and replay a gesture tour.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use qsheet::{PresentationMode, ScreenMetrics};
use qsheet_demo::{Preference, Preferences, Script, logging, run_demo};

/// Replay a scripted gesture tour against a QuickSheet and log every frame.
#[derive(Parser, Debug)]
#[command(name = "qsheet-demo")]
#[command(about = "Headless QuickSheet demo", long_about = None)]
struct Args {
    /// Load preferences from a JSON file
    #[arg(long, value_name = "PATH")]
    preferences: Option<PathBuf>,

    /// Override the height fraction
    #[arg(long)]
    fraction: Option<f64>,

    /// Override the presentation mode
    #[arg(long, value_parser = parse_mode)]
    mode: Option<PresentationMode>,

    /// Screen width in logical points
    #[arg(long, default_value_t = 390.0)]
    width: f64,

    /// Screen height in logical points
    #[arg(long, default_value_t = 844.0)]
    height: f64,

    /// Frame interval in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Print the preference form and exit
    #[arg(long)]
    list_preferences: bool,
}

fn parse_mode(value: &str) -> Result<PresentationMode, String> {
    PresentationMode::ALL
        .into_iter()
        .find(|mode| mode.label().eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("unknown mode `{value}` (regular, expandable, scrollable)"))
}

fn run(args: Args) -> qsheet_demo::Result<()> {
    let mut prefs = match &args.preferences {
        Some(path) => Preferences::load(path)?,
        None => Preferences::default(),
    };
    if let Some(fraction) = args.fraction {
        prefs.fraction = fraction;
    }
    if let Some(mode) = args.mode {
        prefs.presentation_mode = mode;
    }

    if args.list_preferences {
        for preference in Preference::ALL {
            println!("{:<20} {}", preference.label(), prefs.display(preference));
        }
        return Ok(());
    }

    let screen = ScreenMetrics::new(args.width, args.height)?;
    let report = run_demo(
        &prefs,
        screen,
        &Script::tour(),
        Duration::from_millis(args.frame_ms),
    )?;

    println!("frames:  {}", report.frames.len());
    for action in &report.actions {
        println!("action:  {action:?}");
    }
    if let Some(last) = report.frames.last() {
        println!(
            "final:   {} offset={:.1} backdrop={:.2}",
            last.state.label(),
            last.frame.offset,
            last.frame.backdrop_opacity
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = logging::init() {
        eprintln!("qsheet-demo: {err}");
    }
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "demo failed");
            eprintln!("qsheet-demo: {err}");
            ExitCode::FAILURE
        }
    }
}
