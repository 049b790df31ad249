#![forbid(unsafe_code)]

//! Declarative description of the sheet chrome.
//!
//! A renderer draws, back to front: the backdrop over the whole screen, the
//! bottom-anchored container with its shadow and rounded top corners, the
//! grabber pill, and the scroll area holding the content.

use qsheet_core::{BackdropStyle, Rgba, SheetConfiguration, SheetGeometry, ShadowStyle};

use super::machine::ScrollHeight;

pub const GRABBER_WIDTH: f64 = 100.0;
pub const GRABBER_HEIGHT: f64 = 6.0;
pub const GRABBER_CORNER_RADIUS: f64 = 3.0;
/// Gap between the container top and the grabber.
pub const GRABBER_TOP_INSET: f64 = 4.0;

/// Dim fallback drawn when no blur material is configured.
pub const DIM_BACKDROP: Rgba = Rgba::rgba(0, 0, 0, 153);

bitflags::bitflags! {
    /// Parts of the sheet a handled event changed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct SheetChanges: u8 {
        /// A container offset animation was requested.
        const OFFSET        = 0b0000_0001;
        /// A backdrop opacity animation was requested.
        const BACKDROP      = 0b0000_0010;
        /// The resting state changed.
        const STATE         = 0b0000_0100;
        /// The scroll area switched height.
        const SCROLL_HEIGHT = 0b0000_1000;
        /// The keyboard offset changed.
        const KEYBOARD      = 0b0001_0000;
        /// Content and observers were released.
        const TORN_DOWN     = 0b0010_0000;
    }
}

/// Full-screen layer behind the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackdropLayer {
    Blur(BackdropStyle),
    Dim(Rgba),
}

impl BackdropLayer {
    #[must_use]
    pub fn from_style(style: Option<BackdropStyle>) -> Self {
        style.map_or(Self::Dim(DIM_BACKDROP), Self::Blur)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerLayer {
    /// Always `max_height`; the visible part is set by the offset.
    pub height: f64,
    /// Applied to the top corners only.
    pub corner_radius: f64,
    pub shadow: ShadowStyle,
    pub background: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrabberLayer {
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub top_inset: f64,
    pub color: Rgba,
}

impl Default for GrabberLayer {
    fn default() -> Self {
        Self {
            width: GRABBER_WIDTH,
            height: GRABBER_HEIGHT,
            corner_radius: GRABBER_CORNER_RADIUS,
            top_inset: GRABBER_TOP_INSET,
            color: Rgba::GRABBER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollArea {
    pub scroll_enabled: bool,
    pub height: ScrollHeight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentFrame {
    pub height: f64,
    pub corner_radius: f64,
    pub clips_to_bounds: bool,
}

/// Everything a renderer needs besides the animated [`SheetFrame`](qsheet_runtime::SheetFrame).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetLayout {
    pub backdrop: BackdropLayer,
    pub container: ContainerLayer,
    pub grabber: GrabberLayer,
    pub scroll: ScrollArea,
    pub content: ContentFrame,
}

impl SheetLayout {
    #[must_use]
    pub fn new(
        configuration: &SheetConfiguration,
        geometry: &SheetGeometry,
        scroll_height: ScrollHeight,
    ) -> Self {
        let corner_radius = configuration.corner_radius();
        Self {
            backdrop: BackdropLayer::from_style(configuration.backdrop()),
            container: ContainerLayer {
                height: geometry.max_height(),
                corner_radius,
                shadow: configuration.shadow(),
                background: Rgba::WHITE,
            },
            grabber: GrabberLayer::default(),
            scroll: ScrollArea {
                scroll_enabled: configuration.is_scrollable(),
                height: scroll_height,
            },
            content: ContentFrame {
                height: geometry.max_height(),
                corner_radius,
                clips_to_bounds: true,
            },
        }
    }

    /// Copy of this layout with the scroll area at `height`.
    #[must_use]
    pub fn with_scroll_height(mut self, height: ScrollHeight) -> Self {
        self.scroll.height = height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsheet_core::{PresentationMode, ScreenMetrics};

    fn geometry(config: &SheetConfiguration) -> SheetGeometry {
        config.geometry(ScreenMetrics::new(400.0, 1000.0).unwrap())
    }

    #[test]
    fn standard_layout() {
        let config = SheetConfiguration::STANDARD;
        let geometry = geometry(&config);
        let layout = SheetLayout::new(&config, &geometry, ScrollHeight::Compressed(300.0));

        assert_eq!(
            layout.backdrop,
            BackdropLayer::Blur(BackdropStyle::SystemUltraThinMaterialDark)
        );
        assert_eq!(layout.container.height, 900.0);
        assert_eq!(layout.container.corner_radius, 5.0);
        assert_eq!(layout.container.shadow, ShadowStyle::STANDARD);
        assert_eq!(layout.grabber.width, 100.0);
        assert_eq!(layout.grabber.height, 6.0);
        assert!(!layout.scroll.scroll_enabled);
        assert!(layout.content.clips_to_bounds);
    }

    #[test]
    fn no_blur_falls_back_to_dim() {
        let config = SheetConfiguration::builder().backdrop(None).build().unwrap();
        let layout = SheetLayout::new(&config, &geometry(&config), ScrollHeight::Compressed(1.0));
        assert_eq!(layout.backdrop, BackdropLayer::Dim(DIM_BACKDROP));
    }

    #[test]
    fn scrollable_enables_scrolling() {
        let config =
            SheetConfiguration::with_fraction_and_mode(0.5, PresentationMode::Scrollable).unwrap();
        let layout = SheetLayout::new(&config, &geometry(&config), ScrollHeight::Compressed(500.0));
        assert!(layout.scroll.scroll_enabled);
    }

    #[test]
    fn with_scroll_height_only_touches_scroll() {
        let config = SheetConfiguration::STANDARD;
        let layout = SheetLayout::new(&config, &geometry(&config), ScrollHeight::Compressed(300.0));
        let expanded = layout.with_scroll_height(ScrollHeight::Expanded(900.0));
        assert_eq!(expanded.scroll.height, ScrollHeight::Expanded(900.0));
        assert_eq!(expanded.container, layout.container);
    }

    #[test]
    fn changes_combine() {
        let changes = SheetChanges::OFFSET | SheetChanges::BACKDROP;
        assert!(changes.contains(SheetChanges::OFFSET));
        assert!(!changes.contains(SheetChanges::STATE));
        assert!(SheetChanges::default().is_empty());
    }
}
