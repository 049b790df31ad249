#![forbid(unsafe_code)]

//! Screen metrics and the sheet's derived heights.
//!
//! The sheet container is `max_height` tall and anchored to the bottom edge of
//! the screen. Its position is expressed as a downward translation from the
//! fully expanded rest position:
//!
//! | translation | meaning |
//! |---|---|
//! | `0` | expanded, container top at 10% of the screen |
//! | [`SheetGeometry::offset`] | compressed, `min_height` visible |
//! | [`SheetGeometry::max_height`] | fully off-screen |

use crate::error::{Result, SheetError};

/// Fraction of the screen height occupied by an expanded sheet.
pub const MAX_HEIGHT_RATIO: f64 = 0.9;

/// Logical size of the screen the sheet is presented on.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScreenMetrics {
    width: f64,
    height: f64,
}

impl ScreenMetrics {
    /// Create screen metrics, rejecting a non-positive or non-finite height.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !height.is_finite() || height <= 0.0 {
            return Err(SheetError::InvalidScreen { height });
        }
        Ok(Self {
            width: if width.is_finite() { width.max(0.0) } else { 0.0 },
            height,
        })
    }

    /// Screen width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Screen height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Heights derived from a height fraction and the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetGeometry {
    screen_height: f64,
    min_height: f64,
    max_height: f64,
}

impl SheetGeometry {
    /// Derive the geometry for `fraction` of `screen`.
    ///
    /// `fraction` is expected to be validated already (see
    /// [`SheetConfiguration`](crate::SheetConfiguration)).
    #[must_use]
    pub fn new(fraction: f64, screen: ScreenMetrics) -> Self {
        let screen_height = screen.height();
        Self {
            screen_height,
            min_height: fraction * screen_height,
            max_height: MAX_HEIGHT_RATIO * screen_height,
        }
    }

    /// Height of the screen this geometry was derived for.
    #[must_use]
    pub fn screen_height(&self) -> f64 {
        self.screen_height
    }

    /// Visible height in the compressed state.
    #[must_use]
    pub fn min_height(&self) -> f64 {
        self.min_height
    }

    /// Visible height in the expanded state; also the container height.
    #[must_use]
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// Travel between the expanded and compressed rest positions.
    ///
    /// Negative for fractions above [`MAX_HEIGHT_RATIO`]: the compressed sheet
    /// then rests above the expanded position.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.max_height - self.min_height
    }

    /// Screen y of the container's top edge for a given translation.
    #[must_use]
    pub fn container_top(&self, translation: f64) -> f64 {
        self.screen_height - self.max_height + translation
    }

    /// Highest point the container top may reach while dragging up from the
    /// compressed state.
    #[must_use]
    pub fn drag_top_limit(&self) -> f64 {
        (1.0 - MAX_HEIGHT_RATIO) * self.screen_height
    }
}
