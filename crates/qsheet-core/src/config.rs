#![forbid(unsafe_code)]

//! Sheet configuration and the process-wide standard default.
//!
//! A [`SheetConfiguration`] is built once, validated in
//! [`SheetConfigurationBuilder::build`], and immutable afterwards.
//!
//! # Invariants
//!
//! 1. `height_fraction` is finite and in `(0, 1]`.
//! 2. A fraction above [`EXPANDABLE_FRACTION_LIMIT`] always yields
//!    [`PresentationMode::Regular`], whatever mode was requested.
//! 3. `corner_radius` is finite and `>= 0`; the shadow radius is `>= 0` and its
//!    opacity in `[0, 1]`.
//!
//! # Standard default
//!
//! The standard configuration lives in a thread-local slot on the UI thread.
//! It is initialised on first use to [`SheetConfiguration::STANDARD`] and may be
//! replaced with [`set_standard`] at any time; sheets already presented keep
//! the configuration they were built with. There is no teardown.

use std::cell::RefCell;

use qsheet_style::{BackdropStyle, ShadowStyle};

use crate::error::{Result, SheetError};
use crate::geometry::{ScreenMetrics, SheetGeometry};

/// Fractions above this cannot expand any further.
pub const EXPANDABLE_FRACTION_LIMIT: f64 = 0.8;

thread_local! {
    static STANDARD: RefCell<SheetConfiguration> = const {
        RefCell::new(SheetConfiguration::STANDARD)
    };
}

/// How the sheet reacts once presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PresentationMode {
    /// Fixed height; drag down to dismiss.
    #[default]
    Regular,
    /// Can be dragged up to 90% of the screen height.
    Expandable,
    /// Expandable, with scrolling enabled in the content area.
    Scrollable,
}

impl PresentationMode {
    pub const ALL: [Self; 3] = [Self::Regular, Self::Expandable, Self::Scrollable];

    /// `true` for modes that allow dragging up to expand.
    #[inline]
    #[must_use]
    pub const fn is_expandable(self) -> bool {
        matches!(self, Self::Expandable | Self::Scrollable)
    }

    /// `true` for [`PresentationMode::Scrollable`].
    #[inline]
    #[must_use]
    pub const fn is_scrollable(self) -> bool {
        matches!(self, Self::Scrollable)
    }

    /// Display name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Expandable => "Expandable",
            Self::Scrollable => "Scrollable",
        }
    }
}

/// Visual and behavioral parameters of a sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SheetConfiguration {
    height_fraction: f64,
    presentation_mode: PresentationMode,
    corner_radius: f64,
    backdrop: Option<BackdropStyle>,
    shadow: ShadowStyle,
}

impl SheetConfiguration {
    /// Built-in standard: 30% height, expandable, radius 5, ultra-thin dark
    /// material backdrop, standard shadow.
    pub const STANDARD: Self = Self {
        height_fraction: 0.3,
        presentation_mode: PresentationMode::Expandable,
        corner_radius: 5.0,
        backdrop: Some(BackdropStyle::SystemUltraThinMaterialDark),
        shadow: ShadowStyle::STANDARD,
    };

    /// Start a builder from the built-in standard values.
    #[must_use]
    pub fn builder() -> SheetConfigurationBuilder {
        SheetConfigurationBuilder::from(Self::STANDARD)
    }

    /// The current process-wide standard configuration.
    #[must_use]
    pub fn standard() -> Self {
        STANDARD.with(|slot| *slot.borrow())
    }

    /// The current standard with only the height fraction changed.
    pub fn with_fraction(fraction: f64) -> Result<Self> {
        Self::standard().to_builder().height_fraction(fraction).build()
    }

    /// The current standard with the height fraction and mode changed.
    pub fn with_fraction_and_mode(fraction: f64, mode: PresentationMode) -> Result<Self> {
        Self::standard()
            .to_builder()
            .height_fraction(fraction)
            .presentation_mode(mode)
            .build()
    }

    /// A builder pre-filled with this configuration.
    #[must_use]
    pub fn to_builder(&self) -> SheetConfigurationBuilder {
        SheetConfigurationBuilder::from(*self)
    }

    /// Compressed height as a fraction of the screen height.
    #[must_use]
    pub fn height_fraction(&self) -> f64 {
        self.height_fraction
    }

    /// Effective presentation mode.
    #[must_use]
    pub fn presentation_mode(&self) -> PresentationMode {
        self.presentation_mode
    }

    /// Whether the sheet can be dragged up to expand.
    #[must_use]
    pub fn is_expandable(&self) -> bool {
        self.presentation_mode.is_expandable()
    }

    /// Whether the content scrolls.
    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.presentation_mode.is_scrollable()
    }

    /// Top corner radius.
    #[must_use]
    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// Backdrop blur style, if any.
    #[must_use]
    pub fn backdrop(&self) -> Option<BackdropStyle> {
        self.backdrop
    }

    /// Container shadow.
    #[must_use]
    pub fn shadow(&self) -> ShadowStyle {
        self.shadow
    }

    /// Heights derived for the given screen.
    #[must_use]
    pub fn geometry(&self, screen: ScreenMetrics) -> SheetGeometry {
        SheetGeometry::new(self.height_fraction, screen)
    }
}

impl Default for SheetConfiguration {
    fn default() -> Self {
        Self::standard()
    }
}

/// Replace the process-wide standard configuration.
///
/// Only sheets presented afterwards are affected. Must be called from the UI
/// thread; other threads see their own slot.
pub fn set_standard(configuration: SheetConfiguration) {
    tracing::debug!(
        fraction = configuration.height_fraction,
        mode = configuration.presentation_mode.label(),
        "standard sheet configuration replaced"
    );
    STANDARD.with(|slot| *slot.borrow_mut() = configuration);
}

/// Builder for [`SheetConfiguration`].
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct SheetConfigurationBuilder {
    height_fraction: f64,
    presentation_mode: PresentationMode,
    corner_radius: f64,
    backdrop: Option<BackdropStyle>,
    shadow: ShadowStyle,
}

impl From<SheetConfiguration> for SheetConfigurationBuilder {
    fn from(config: SheetConfiguration) -> Self {
        Self {
            height_fraction: config.height_fraction,
            presentation_mode: config.presentation_mode,
            corner_radius: config.corner_radius,
            backdrop: config.backdrop,
            shadow: config.shadow,
        }
    }
}

impl SheetConfigurationBuilder {
    /// Compressed height as a fraction of the screen height.
    pub fn height_fraction(mut self, fraction: f64) -> Self {
        self.height_fraction = fraction;
        self
    }

    /// Set the presentation mode.
    pub fn presentation_mode(mut self, mode: PresentationMode) -> Self {
        self.presentation_mode = mode;
        self
    }

    /// Set the top corner radius.
    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Backdrop blur style; `None` renders an opaque dim layer instead.
    pub fn backdrop(mut self, backdrop: Option<BackdropStyle>) -> Self {
        self.backdrop = backdrop;
        self
    }

    /// Set the container shadow.
    pub fn shadow(mut self, shadow: ShadowStyle) -> Self {
        self.shadow = shadow;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<SheetConfiguration> {
        let fraction = self.height_fraction;
        if !fraction.is_finite() || fraction <= 0.0 || fraction > 1.0 {
            return Err(SheetError::InvalidHeightFraction { fraction });
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(SheetError::InvalidCornerRadius {
                radius: self.corner_radius,
            });
        }
        let shadow = self.shadow;
        if !shadow.radius.is_finite()
            || shadow.radius < 0.0
            || !(0.0..=1.0).contains(&shadow.opacity)
        {
            return Err(SheetError::InvalidShadow {
                radius: shadow.radius,
                opacity: shadow.opacity,
            });
        }

        let presentation_mode = if fraction > EXPANDABLE_FRACTION_LIMIT {
            if self.presentation_mode != PresentationMode::Regular {
                tracing::debug!(
                    fraction,
                    requested = self.presentation_mode.label(),
                    "fraction above expandable limit, forcing regular mode"
                );
            }
            PresentationMode::Regular
        } else {
            self.presentation_mode
        };

        Ok(SheetConfiguration {
            height_fraction: fraction,
            presentation_mode,
            corner_radius: self.corner_radius,
            backdrop: self.backdrop,
            shadow,
        })
    }
}
