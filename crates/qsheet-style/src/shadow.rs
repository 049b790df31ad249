#![forbid(unsafe_code)]

//! Drop shadow parameters for the sheet container.

use crate::color::Rgba;

/// Layer shadow of the sheet container.
///
/// The values are not validated here; `qsheet-core` rejects negative radii
/// and opacities outside `[0, 1]` when a configuration is built.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShadowStyle {
    /// Blur radius in logical units.
    pub radius: f64,
    pub color: Rgba,
    /// Opacity in `[0.0, 1.0]`.
    pub opacity: f32,
}

impl ShadowStyle {
    /// The standard shadow: radius 15, black, 15% opacity.
    pub const STANDARD: Self = Self::new(15.0, Rgba::BLACK, 0.15);

    #[must_use]
    pub const fn new(radius: f64, color: Rgba, opacity: f32) -> Self {
        Self {
            radius,
            color,
            opacity,
        }
    }

    #[must_use]
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Shadow color with the opacity folded into its alpha channel.
    #[must_use]
    pub fn effective_color(&self) -> Rgba {
        self.color.with_opacity(self.opacity)
    }
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self::STANDARD
    }
}
