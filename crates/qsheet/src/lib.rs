#![forbid(unsafe_code)]

//! QuickSheet: a gesture-driven bottom sheet.
//!
//! This crate re-exports the workspace crates and offers the one-call
//! presentation entry points. Most embedders only need the [`prelude`].
//!
//! ```ignore
//! use qsheet::prelude::*;
//!
//! let screen = ScreenMetrics::new(390.0, 844.0)?;
//! let mut sheet = qsheet::present_with_fraction(view, 0.4, screen, Timeline::default())?;
//!
//! // Event loop:
//! sheet.handle_event(SheetEvent::Gesture(GestureEvent::Changed(-30.0)));
//! sheet.pump_keyboard();
//! let _ = sheet.advance(frame_time);
//! render(sheet.layout(), sheet.frame());
//! ```

pub use qsheet_core as types;
pub use qsheet_runtime as runtime;
pub use qsheet_style as style;
pub use qsheet_widgets as widgets;

pub use qsheet_core::{
    BackdropStyle, GestureEvent, KeyboardSignal, PresentationMode, Result, Rgba, ScreenMetrics,
    ShadowStyle, SheetConfiguration, SheetError, SheetGeometry, set_standard,
};
pub use qsheet_runtime::{
    AnimationCompletion, AnimationDriver, AnimationRequest, KeyboardCenter, SheetFrame, Timeline,
    post_keyboard,
};
pub use qsheet_style::backdrop_label;
pub use qsheet_widgets::sheet::{
    DismissTrigger, SheetAction, SheetChanges, SheetEvent, SheetHost, SheetLayout,
    SheetPresentation, SheetState,
};

/// Present `content` with `configuration` on `screen`.
pub fn present<C, D: AnimationDriver>(
    content: C,
    configuration: SheetConfiguration,
    screen: ScreenMetrics,
    driver: D,
) -> Result<SheetHost<C, D>> {
    SheetPresentation::builder()
        .content(content)
        .configuration(configuration)
        .screen(screen)
        .present(driver)
}

/// Present with the standard configuration at a different height fraction.
pub fn present_with_fraction<C, D: AnimationDriver>(
    content: C,
    fraction: f64,
    screen: ScreenMetrics,
    driver: D,
) -> Result<SheetHost<C, D>> {
    present(
        content,
        SheetConfiguration::with_fraction(fraction)?,
        screen,
        driver,
    )
}

/// Present with the standard configuration at a different fraction and mode.
pub fn present_with_fraction_and_mode<C, D: AnimationDriver>(
    content: C,
    fraction: f64,
    mode: PresentationMode,
    screen: ScreenMetrics,
    driver: D,
) -> Result<SheetHost<C, D>> {
    present(
        content,
        SheetConfiguration::with_fraction_and_mode(fraction, mode)?,
        screen,
        driver,
    )
}

/// Everything needed to present and drive a sheet.
pub mod prelude {
    pub use crate::{
        BackdropStyle, DismissTrigger, GestureEvent, KeyboardSignal, PresentationMode,
        ScreenMetrics, SheetAction, SheetConfiguration, SheetEvent, SheetHost, SheetState,
        Timeline,
    };
}
