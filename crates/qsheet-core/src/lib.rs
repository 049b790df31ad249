#![forbid(unsafe_code)]

//! Core types for QuickSheet: screen geometry, sheet configuration, typed
//! platform events, and the error taxonomy.

pub mod config;
pub mod error;
pub mod event;
pub mod geometry;

pub use config::{
    EXPANDABLE_FRACTION_LIMIT, PresentationMode, SheetConfiguration, SheetConfigurationBuilder,
    set_standard,
};
pub use error::{Result, SheetError};
pub use event::{GestureEvent, KeyboardSignal};
pub use geometry::{MAX_HEIGHT_RATIO, ScreenMetrics, SheetGeometry};

pub use qsheet_style::{BackdropStyle, Rgba, ShadowStyle};
