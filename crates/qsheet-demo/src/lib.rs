#![forbid(unsafe_code)]

//! Headless QuickSheet demo.
//!
//! The binary entry point lives in `main.rs`; everything it needs is here so
//! it can be tested without a terminal.

pub mod error;
pub mod logging;
pub mod preferences;
pub mod script;

pub use error::{DemoError, Result};
pub use preferences::{DemoContent, Preference, Preferences, ShadowColor, Stepper};
pub use script::{FrameRecord, RunReport, Runner, Script, Step};

use std::time::Duration;

use qsheet::{KeyboardCenter, ScreenMetrics, SheetPresentation, Timeline};

/// Placeholder view presented by the demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoView {
    pub title: &'static str,
    pub rows: usize,
}

impl DemoView {
    #[must_use]
    pub fn for_content(content: DemoContent) -> Self {
        match content {
            DemoContent::Scroll => Self {
                title: content.label(),
                rows: 50,
            },
            DemoContent::NoScroll => Self {
                title: content.label(),
                rows: 3,
            },
        }
    }
}

/// Present a sheet with `prefs` on `screen` and replay `script` against it.
pub fn run_demo(
    prefs: &Preferences,
    screen: ScreenMetrics,
    script: &Script,
    frame_interval: Duration,
) -> Result<RunReport> {
    let configuration = prefs.to_configuration()?;
    let keyboard = KeyboardCenter::new();
    let mut host = SheetPresentation::builder()
        .content(DemoView::for_content(prefs.demo))
        .configuration(configuration)
        .screen(screen)
        .keyboard_center(keyboard.clone())
        .present(Timeline::default())?;

    tracing::info!(
        fraction = configuration.height_fraction(),
        mode = configuration.presentation_mode().label(),
        demo = prefs.demo.label(),
        "demo sheet presented"
    );

    Ok(Runner::new(&mut host, keyboard, frame_interval).run(script))
}
