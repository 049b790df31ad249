#![forbid(unsafe_code)]

//! Error taxonomy for sheet construction and presentation.
//!
//! Every error here is raised before anything is shown: configurations are
//! validated when they are built, and presentation preconditions are checked
//! before the first frame is produced. The state machine itself has no error
//! path.

use thiserror::Error;

/// Result alias using [`SheetError`].
pub type Result<T> = std::result::Result<T, SheetError>;

/// Errors raised while building a configuration or presenting a sheet.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SheetError {
    // Configuration
    #[error("height fraction must be in (0, 1], got {fraction}")]
    InvalidHeightFraction { fraction: f64 },

    #[error("corner radius must be a finite value >= 0, got {radius}")]
    InvalidCornerRadius { radius: f64 },

    #[error("invalid shadow: radius {radius} must be >= 0 and opacity {opacity} in [0, 1]")]
    InvalidShadow { radius: f64, opacity: f32 },

    #[error("screen height must be a finite value > 0, got {height}")]
    InvalidScreen { height: f64 },

    // Presentation
    #[error("cannot present a sheet without content")]
    MissingContent,

    #[error("cannot present a sheet without screen metrics")]
    MissingScreen,
}

impl SheetError {
    /// Whether this error was raised while validating a configuration.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::MissingContent | Self::MissingScreen)
    }
}
