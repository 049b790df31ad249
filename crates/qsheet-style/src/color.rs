#![forbid(unsafe_code)]

//! Straight-alpha RGBA colors.

/// An 8-bit-per-channel RGBA color packed as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba(pub u32);

impl Rgba {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    /// Neutral gray used for the drag grabber.
    pub const GRABBER: Self = Self::rgb(209, 209, 214);

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    #[must_use]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    #[must_use]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    #[must_use]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    #[must_use]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Scale the alpha channel by `opacity` (clamped to `[0.0, 1.0]`).
    #[must_use]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        let a = (f32::from(self.a()) * opacity).round() as u8;
        Self::rgba(self.r(), self.g(), self.b(), a)
    }

    /// Alpha as a float in `[0.0, 1.0]`.
    #[must_use]
    pub fn alpha(self) -> f32 {
        f32::from(self.a()) / 255.0
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn channels_round_trip_through_packing() {
        let color = Rgba::rgba(10, 20, 30, 40);
        assert_eq!(
            (color.r(), color.g(), color.b(), color.a()),
            (10, 20, 30, 40)
        );
    }

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(Rgba::rgb(1, 2, 3).a(), 255);
        assert_eq!(Rgba::BLACK.alpha(), 1.0);
    }

    #[test]
    fn with_opacity_scales_alpha_only() {
        let half = Rgba::RED.with_opacity(0.5);
        assert_eq!((half.r(), half.g(), half.b()), (255, 0, 0));
        assert_eq!(half.a(), 128);
    }

    #[test]
    fn with_opacity_nan_is_transparent() {
        assert_eq!(Rgba::WHITE.with_opacity(f32::NAN).a(), 0);
    }

    proptest! {
        #[test]
        fn with_opacity_never_increases_alpha(a in 0u8..=255, opacity in -2.0f32..3.0) {
            let color = Rgba::rgba(9, 9, 9, a);
            prop_assert!(color.with_opacity(opacity).a() <= a);
        }
    }
}
