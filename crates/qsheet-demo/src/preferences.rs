#![forbid(unsafe_code)]

//! Demo preferences: the values a user tweaks before presenting a sheet.
//!
//! Numeric preferences move along fixed [`Stepper`] grids; pickers cycle
//! through their choices. [`Preferences::to_configuration`] turns the current
//! values into a validated [`SheetConfiguration`].

use std::path::Path;

use qsheet::{BackdropStyle, PresentationMode, Rgba, ShadowStyle, SheetConfiguration, backdrop_label};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A bounded numeric grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stepper {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Stepper {
    pub const FRACTION: Self = Self::new(0.3, 1.0, 0.1);
    pub const CORNER_RADIUS: Self = Self::new(5.0, 30.0, 5.0);
    pub const SHADOW_OPACITY: Self = Self::new(0.3, 1.0, 0.1);
    pub const SHADOW_RADIUS: Self = Self::new(10.0, 30.0, 2.5);

    #[must_use]
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    fn last_index(&self) -> i64 {
        ((self.max - self.min) / self.step).round() as i64
    }

    fn index_of(&self, value: f64) -> i64 {
        if !value.is_finite() {
            return 0;
        }
        (((value - self.min) / self.step).round() as i64).clamp(0, self.last_index())
    }

    fn value_at(&self, index: i64) -> f64 {
        let raw = self.min + index as f64 * self.step;
        (raw * 1e6).round() / 1e6
    }

    /// Snap `value` onto the grid.
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        self.value_at(self.index_of(value))
    }

    /// Move `steps` grid points from `value`, stopping at the bounds.
    #[must_use]
    pub fn offset(&self, value: f64, steps: i64) -> f64 {
        let index = self
            .index_of(value)
            .saturating_add(steps)
            .clamp(0, self.last_index());
        self.value_at(index)
    }

    /// Number of grid points, bounds included.
    #[must_use]
    pub fn positions(&self) -> usize {
        self.last_index() as usize + 1
    }
}

/// Shadow colours offered by the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShadowColor {
    #[default]
    Black,
    Blue,
    Gray,
    Red,
    Cyan,
}

impl ShadowColor {
    pub const ALL: [Self; 5] = [Self::Black, Self::Blue, Self::Gray, Self::Red, Self::Cyan];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::Blue => "Blue",
            Self::Gray => "Gray",
            Self::Red => "Red",
            Self::Cyan => "Cyan",
        }
    }

    #[must_use]
    pub const fn rgba(self) -> Rgba {
        match self {
            Self::Black => Rgba::BLACK,
            Self::Blue => Rgba::BLUE,
            Self::Gray => Rgba::GRAY,
            Self::Red => Rgba::RED,
            Self::Cyan => Rgba::CYAN,
        }
    }
}

/// Placeholder content presented by the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DemoContent {
    /// A long list that scrolls inside the sheet.
    #[default]
    Scroll,
    /// A short fixed view.
    NoScroll,
}

impl DemoContent {
    pub const ALL: [Self; 2] = [Self::Scroll, Self::NoScroll];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scroll => "Scroll Demo",
            Self::NoScroll => "No Scroll Demo",
        }
    }
}

/// Preference keys, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preference {
    Fraction,
    PresentationMode,
    CornerRadius,
    Backdrop,
    ShadowOpacity,
    ShadowRadius,
    ShadowColor,
    Demo,
}

impl Preference {
    pub const ALL: [Self; 8] = [
        Self::Fraction,
        Self::PresentationMode,
        Self::CornerRadius,
        Self::Backdrop,
        Self::ShadowOpacity,
        Self::ShadowRadius,
        Self::ShadowColor,
        Self::Demo,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fraction => "Fraction",
            Self::PresentationMode => "Presentation Style",
            Self::CornerRadius => "Corner Radius",
            Self::Backdrop => "Blur Effect",
            Self::ShadowOpacity => "Shadow Opacity",
            Self::ShadowRadius => "Shadow Radius",
            Self::ShadowColor => "Shadow Color",
            Self::Demo => "Select Demo",
        }
    }

    #[must_use]
    pub const fn stepper(self) -> Option<Stepper> {
        match self {
            Self::Fraction => Some(Stepper::FRACTION),
            Self::CornerRadius => Some(Stepper::CORNER_RADIUS),
            Self::ShadowOpacity => Some(Stepper::SHADOW_OPACITY),
            Self::ShadowRadius => Some(Stepper::SHADOW_RADIUS),
            _ => None,
        }
    }
}

/// Current demo settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub fraction: f64,
    pub presentation_mode: PresentationMode,
    pub corner_radius: f64,
    pub backdrop: Option<BackdropStyle>,
    pub shadow_opacity: f32,
    pub shadow_radius: f64,
    pub shadow_color: ShadowColor,
    pub demo: DemoContent,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            fraction: 0.3,
            presentation_mode: PresentationMode::Regular,
            corner_radius: 5.0,
            backdrop: None,
            shadow_opacity: 0.3,
            shadow_radius: 10.0,
            shadow_color: ShadowColor::Black,
            demo: DemoContent::Scroll,
        }
    }
}

impl Preferences {
    /// Load preferences from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let prefs: Self = serde_json::from_str(&text)?;
        tracing::debug!(path = %path.display(), "preferences loaded");
        Ok(prefs)
    }

    /// Write preferences as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Build the sheet configuration these preferences describe.
    pub fn to_configuration(&self) -> Result<SheetConfiguration> {
        let shadow = ShadowStyle::new(
            self.shadow_radius,
            self.shadow_color.rgba(),
            self.shadow_opacity,
        );
        let configuration = SheetConfiguration::builder()
            .height_fraction(self.fraction)
            .presentation_mode(self.presentation_mode)
            .corner_radius(self.corner_radius)
            .backdrop(self.backdrop)
            .shadow(shadow)
            .build()?;
        Ok(configuration)
    }

    /// Move a preference forward (`steps > 0`) or back.
    ///
    /// Steppers stop at their bounds; pickers wrap around.
    pub fn step(&mut self, preference: Preference, steps: i64) {
        match preference {
            Preference::Fraction => {
                self.fraction = Stepper::FRACTION.offset(self.fraction, steps);
            }
            Preference::CornerRadius => {
                self.corner_radius = Stepper::CORNER_RADIUS.offset(self.corner_radius, steps);
            }
            Preference::ShadowOpacity => {
                let next = Stepper::SHADOW_OPACITY.offset(f64::from(self.shadow_opacity), steps);
                self.shadow_opacity = next as f32;
            }
            Preference::ShadowRadius => {
                self.shadow_radius = Stepper::SHADOW_RADIUS.offset(self.shadow_radius, steps);
            }
            Preference::PresentationMode => {
                self.presentation_mode =
                    cycle(&PresentationMode::ALL, self.presentation_mode, steps);
            }
            Preference::Backdrop => {
                let choices = backdrop_choices();
                self.backdrop = cycle(&choices, self.backdrop, steps);
            }
            Preference::ShadowColor => {
                self.shadow_color = cycle(&ShadowColor::ALL, self.shadow_color, steps);
            }
            Preference::Demo => {
                self.demo = cycle(&DemoContent::ALL, self.demo, steps);
            }
        }
    }

    /// Display value for a preference, as shown next to its label.
    #[must_use]
    pub fn display(&self, preference: Preference) -> String {
        match preference {
            Preference::Fraction => format!("{:.2}", self.fraction),
            Preference::PresentationMode => self.presentation_mode.label().to_owned(),
            Preference::CornerRadius => format!("{:.2}", self.corner_radius),
            Preference::Backdrop => backdrop_label(self.backdrop).to_owned(),
            Preference::ShadowOpacity => format!("{:.2}", self.shadow_opacity),
            Preference::ShadowRadius => format!("{:.2}", self.shadow_radius),
            Preference::ShadowColor => self.shadow_color.label().to_owned(),
            Preference::Demo => self.demo.label().to_owned(),
        }
    }
}

/// Every blur material followed by "No Blur".
fn backdrop_choices() -> Vec<Option<BackdropStyle>> {
    BackdropStyle::ALL
        .iter()
        .copied()
        .map(Some)
        .chain(std::iter::once(None))
        .collect()
}

fn cycle<T: Copy + PartialEq>(choices: &[T], current: T, steps: i64) -> T {
    let len = choices.len() as i64;
    let at = choices.iter().position(|c| *c == current).unwrap_or(0) as i64;
    let next = (at + steps).rem_euclid(len);
    choices[next as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn stepper_grids() {
        assert_eq!(Stepper::FRACTION.positions(), 8);
        assert_eq!(Stepper::CORNER_RADIUS.positions(), 6);
        assert_eq!(Stepper::SHADOW_OPACITY.positions(), 8);
        assert_eq!(Stepper::SHADOW_RADIUS.positions(), 9);
    }

    #[test]
    fn stepper_stops_at_bounds() {
        assert_eq!(Stepper::FRACTION.offset(0.3, -1), 0.3);
        assert_eq!(Stepper::FRACTION.offset(0.3, 1), 0.4);
        assert_eq!(Stepper::FRACTION.offset(0.9, 5), 1.0);
        assert_eq!(Stepper::SHADOW_RADIUS.offset(10.0, 1), 12.5);
    }

    #[test]
    fn snap_rounds_to_grid() {
        assert_eq!(Stepper::CORNER_RADIUS.snap(13.0), 15.0);
        assert_eq!(Stepper::CORNER_RADIUS.snap(f64::NAN), 5.0);
        assert_eq!(Stepper::CORNER_RADIUS.snap(99.0), 30.0);
    }

    #[test]
    fn defaults_build_a_configuration() {
        let configuration = Preferences::default().to_configuration().unwrap();
        assert_eq!(configuration.height_fraction(), 0.3);
        assert_eq!(configuration.presentation_mode(), PresentationMode::Regular);
        assert_eq!(configuration.backdrop(), None);
        assert_eq!(configuration.shadow().radius, 10.0);
    }

    #[test]
    fn high_fraction_configuration_is_regular() {
        let prefs = Preferences {
            fraction: 1.0,
            presentation_mode: PresentationMode::Scrollable,
            ..Preferences::default()
        };
        let configuration = prefs.to_configuration().unwrap();
        assert_eq!(configuration.presentation_mode(), PresentationMode::Regular);
    }

    #[test]
    fn backdrop_picker_includes_no_blur() {
        let mut prefs = Preferences::default();
        assert_eq!(prefs.display(Preference::Backdrop), "No Blur");
        prefs.step(Preference::Backdrop, 1);
        assert_eq!(prefs.backdrop, Some(BackdropStyle::ALL[0]));
        prefs.step(Preference::Backdrop, -1);
        assert_eq!(prefs.backdrop, None);
    }

    #[test]
    fn pickers_wrap() {
        let mut prefs = Preferences::default();
        prefs.step(Preference::ShadowColor, -1);
        assert_eq!(prefs.shadow_color, ShadowColor::Cyan);
        prefs.step(Preference::PresentationMode, 4);
        assert_eq!(prefs.presentation_mode, PresentationMode::Expandable);
    }

    #[test]
    fn display_formats_numbers() {
        let prefs = Preferences::default();
        assert_eq!(prefs.display(Preference::Fraction), "0.30");
        assert_eq!(prefs.display(Preference::ShadowRadius), "10.00");
        assert_eq!(prefs.display(Preference::Demo), "Scroll Demo");
    }

    #[test]
    fn only_numeric_preferences_have_steppers() {
        let numeric: Vec<_> = Preference::ALL
            .into_iter()
            .filter(|p| p.stepper().is_some())
            .collect();
        assert_eq!(
            numeric,
            vec![
                Preference::Fraction,
                Preference::CornerRadius,
                Preference::ShadowOpacity,
                Preference::ShadowRadius,
            ]
        );
    }

    proptest! {
        #[test]
        fn any_stepped_preferences_are_valid(
            moves in proptest::collection::vec((0usize..8, -10i64..10), 0..40)
        ) {
            let mut prefs = Preferences::default();
            for (key, steps) in moves {
                prefs.step(Preference::ALL[key], steps);
            }
            prop_assert!(prefs.to_configuration().is_ok());
        }
    }
}
