#![forbid(unsafe_code)]

//! Keyboard offset composed into the compressed rest position.

use qsheet_core::KeyboardSignal;

use super::machine::SheetState;

/// Vertical offset contributed by the software keyboard.
///
/// Zero while the keyboard is hidden, `-height` while it is shown. The value is
/// recorded in every non-terminal state but only composed into the target
/// position while the sheet is [`SheetState::Compressed`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KeyboardOffset {
    offset: f64,
}

impl KeyboardOffset {
    /// Record a signal. Returns `true` if the offset changed.
    pub fn apply(&mut self, signal: KeyboardSignal) -> bool {
        let next = signal.offset();
        let changed = next != self.offset;
        self.offset = next;
        changed
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.offset != 0.0
    }

    /// Add the offset to `base` when `state` composes it.
    #[must_use]
    pub fn compose(&self, state: SheetState, base: f64) -> f64 {
        match state {
            SheetState::Compressed => base + self.offset,
            SheetState::Expanded | SheetState::Dismissing => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_then_hide_returns_to_zero() {
        let mut kb = KeyboardOffset::default();
        assert!(kb.apply(KeyboardSignal::WillShow { height: 300.0 }));
        assert_eq!(kb.value(), -300.0);
        assert!(kb.is_visible());
        assert!(kb.apply(KeyboardSignal::WillHide));
        assert_eq!(kb.value(), 0.0);
        assert!(!kb.is_visible());
    }

    #[test]
    fn repeated_hide_is_unchanged() {
        let mut kb = KeyboardOffset::default();
        assert!(!kb.apply(KeyboardSignal::WillHide));
    }

    #[test]
    fn composes_only_when_compressed() {
        let mut kb = KeyboardOffset::default();
        kb.apply(KeyboardSignal::WillShow { height: 120.0 });
        assert_eq!(kb.compose(SheetState::Compressed, 400.0), 280.0);
        assert_eq!(kb.compose(SheetState::Expanded, 0.0), 0.0);
        assert_eq!(kb.compose(SheetState::Dismissing, 700.0), 700.0);
    }
}
