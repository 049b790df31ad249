#![forbid(unsafe_code)]

//! Dismissal transition.

use std::time::Duration;

use qsheet_core::SheetGeometry;
use qsheet_runtime::{AnimationCurve, AnimationRequest, SETTLE_DURATION, SheetFrame, SheetMutation};

/// What started a dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissTrigger {
    /// Drag ended past the dismiss threshold.
    Gesture,
    /// The backdrop was tapped.
    BackdropTap,
    /// The embedder asked for it.
    Programmatic,
    /// The platform dismissed the presentation (e.g. system back).
    Platform,
}

impl DismissTrigger {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gesture => "gesture",
            Self::BackdropTap => "backdrop_tap",
            Self::Programmatic => "programmatic",
            Self::Platform => "platform",
        }
    }
}

/// Animation that slides the container off-screen and clears the backdrop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DismissTransition {
    duration: Duration,
    curve: AnimationCurve,
}

impl DismissTransition {
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            curve: AnimationCurve::EaseOut,
        }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Request moving the container to `max_height` with a clear backdrop.
    #[must_use]
    pub fn request(&self, geometry: &SheetGeometry) -> AnimationRequest {
        AnimationRequest {
            duration: self.duration,
            curve: self.curve,
            mutation: SheetMutation::frame(SheetFrame::new(geometry.max_height(), 0.0)),
        }
    }
}

impl Default for DismissTransition {
    fn default() -> Self {
        Self::new(SETTLE_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsheet_core::ScreenMetrics;

    #[test]
    fn default_matches_settle_duration() {
        assert_eq!(DismissTransition::default().duration(), SETTLE_DURATION);
    }

    #[test]
    fn request_targets_offscreen() {
        let geometry = SheetGeometry::new(0.3, ScreenMetrics::new(400.0, 1000.0).unwrap());
        let request = DismissTransition::default().request(&geometry);
        assert_eq!(request.curve, AnimationCurve::EaseOut);
        assert_eq!(
            request.mutation,
            SheetMutation::frame(SheetFrame::new(900.0, 0.0))
        );
        assert!(!request.is_tracking());
    }

    #[test]
    fn labels_are_distinct() {
        let labels = [
            DismissTrigger::Gesture,
            DismissTrigger::BackdropTap,
            DismissTrigger::Programmatic,
            DismissTrigger::Platform,
        ]
        .map(DismissTrigger::label);
        for (i, a) in labels.iter().enumerate() {
            for b in &labels[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
