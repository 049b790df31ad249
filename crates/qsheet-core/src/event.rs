#![forbid(unsafe_code)]

//! Typed input events delivered by the host platform.
//!
//! The platform's gesture recognizers and keyboard notifications are reduced to
//! these values before they reach the sheet, so the sheet never depends on a
//! concrete recognizer or notification type.

/// Vertical pan gesture phases.
///
/// Translations are cumulative since [`GestureEvent::Started`], in logical
/// units, positive downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Started,
    Changed(f64),
    Ended(f64),
}

impl GestureEvent {
    /// Cumulative translation carried by the event, if any.
    #[must_use]
    pub fn translation(&self) -> Option<f64> {
        match *self {
            Self::Started => None,
            Self::Changed(t) | Self::Ended(t) => Some(t),
        }
    }
}

/// Software keyboard visibility changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyboardSignal {
    /// The keyboard is about to appear with the given height.
    WillShow { height: f64 },
    /// The keyboard is about to disappear.
    WillHide,
}

impl KeyboardSignal {
    /// Signed offset this signal asks the compressed sheet to apply.
    ///
    /// Negative moves the sheet up. Non-finite or negative heights are
    /// treated as zero.
    #[must_use]
    pub fn offset(&self) -> f64 {
        match *self {
            Self::WillShow { height } if height.is_finite() && height > 0.0 => -height,
            _ => 0.0,
        }
    }
}
