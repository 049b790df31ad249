#![forbid(unsafe_code)]

//! Sheet state machine.
//!
//! The machine owns the resting state, the drag session, and the keyboard
//! offset. It is pure: it computes target positions and transitions but never
//! talks to an animation driver. [`SheetHost`](super::SheetHost) turns its
//! output into animation requests.
//!
//! # Transition table
//!
//! Evaluated on gesture end with translation `t`, where `offset` is
//! [`SheetGeometry::offset`] and the threshold is [`DISMISS_THRESHOLD`]:
//!
//! | state | expandable | condition | next |
//! |---|---|---|---|
//! | Compressed | yes | `t > 40` | Dismissing |
//! | Compressed | yes | `-40 <= t <= 40` | Compressed |
//! | Compressed | yes | `t < -40` | Expanded |
//! | Compressed | no | `t > 40` | Dismissing |
//! | Compressed | no | otherwise | Compressed |
//! | Expanded | any | `t < 40` | Expanded |
//! | Expanded | any | `40 <= t < offset` | Compressed |
//! | Expanded | any | `t >= offset` | Dismissing |
//! | Dismissing | any | any | Dismissing |
//!
//! # Invariants
//!
//! 1. `Dismissing` is terminal.
//! 2. [`ScrollHeight`] changes in the same call that enters a rest state and
//!    is left alone on dismiss.
//! 3. While compressed and expandable, tracking never lifts the container top
//!    above [`SheetGeometry::drag_top_limit`] unless it already rests there.
//! 4. A non-finite translation is treated as zero.

use qsheet_core::{KeyboardSignal, ScreenMetrics, SheetConfiguration, SheetGeometry};
use qsheet_runtime::SheetFrame;

use super::keyboard::KeyboardOffset;

/// Drag distance (logical points) that separates a snap-back from a state change.
pub const DISMISS_THRESHOLD: f64 = 40.0;

/// Resting state of a presented sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SheetState {
    /// `min_height` visible.
    #[default]
    Compressed,
    /// `max_height` visible.
    Expanded,
    /// Animating off-screen. Terminal.
    Dismissing,
}

impl SheetState {
    /// `true` for [`SheetState::Dismissing`].
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Dismissing)
    }

    /// Lowercase name used in logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Compressed => "compressed",
            Self::Expanded => "expanded",
            Self::Dismissing => "dismissing",
        }
    }
}

/// Height of the scroll area, tagged with the state it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollHeight {
    Compressed(f64),
    Expanded(f64),
}

impl ScrollHeight {
    /// Height for a rest state; `None` for [`SheetState::Dismissing`].
    fn for_state(state: SheetState, geometry: &SheetGeometry) -> Option<Self> {
        match state {
            SheetState::Compressed => Some(Self::Compressed(geometry.min_height())),
            SheetState::Expanded => Some(Self::Expanded(geometry.max_height())),
            SheetState::Dismissing => None,
        }
    }

    /// Height in logical points.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Compressed(h) | Self::Expanded(h) => h,
        }
    }
}

/// Translation accumulated by an in-progress pan.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragSession {
    translation: f64,
}

impl DragSession {
    /// Latest translation reported by the pan.
    #[must_use]
    pub fn translation(&self) -> f64 {
        self.translation
    }
}

/// A completed state evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: SheetState,
    pub to: SheetState,
    /// Frame to settle on. For [`SheetState::Dismissing`] this is off-screen.
    pub target: SheetFrame,
}

impl Transition {
    /// `true` when the drag ended back where it started.
    #[must_use]
    pub fn is_snap_back(&self) -> bool {
        self.from == self.to
    }
}

/// Evaluate the transition table for a gesture ending at `translation`.
#[must_use]
pub fn next_state(state: SheetState, expandable: bool, translation: f64, offset: f64) -> SheetState {
    let t = sanitize(translation);
    match state {
        SheetState::Dismissing => SheetState::Dismissing,
        SheetState::Compressed if t > DISMISS_THRESHOLD => SheetState::Dismissing,
        SheetState::Compressed if expandable && t < -DISMISS_THRESHOLD => SheetState::Expanded,
        SheetState::Compressed => SheetState::Compressed,
        SheetState::Expanded if t < DISMISS_THRESHOLD => SheetState::Expanded,
        SheetState::Expanded if t < offset => SheetState::Compressed,
        SheetState::Expanded => SheetState::Dismissing,
    }
}

fn sanitize(translation: f64) -> f64 {
    if translation.is_finite() { translation } else { 0.0 }
}

/// Gesture-driven bottom-sheet state machine.
#[derive(Debug, Clone)]
pub struct SheetMachine {
    geometry: SheetGeometry,
    expandable: bool,
    state: SheetState,
    scroll_height: ScrollHeight,
    keyboard: KeyboardOffset,
    drag: Option<DragSession>,
}

impl SheetMachine {
    /// A compressed machine for `configuration` on `screen`.
    #[must_use]
    pub fn new(configuration: &SheetConfiguration, screen: ScreenMetrics) -> Self {
        let geometry = configuration.geometry(screen);
        Self {
            geometry,
            expandable: configuration.is_expandable(),
            state: SheetState::Compressed,
            scroll_height: ScrollHeight::Compressed(geometry.min_height()),
            keyboard: KeyboardOffset::default(),
            drag: None,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SheetState {
        self.state
    }

    /// Geometry resolved at construction.
    #[must_use]
    pub fn geometry(&self) -> &SheetGeometry {
        &self.geometry
    }

    /// Current scroll-area height.
    #[must_use]
    pub fn scroll_height(&self) -> ScrollHeight {
        self.scroll_height
    }

    /// Whether an upward drag can expand the sheet.
    #[must_use]
    pub fn is_expandable(&self) -> bool {
        self.expandable
    }

    /// Recorded keyboard offset, zero or negative.
    #[must_use]
    pub fn keyboard_offset(&self) -> f64 {
        self.keyboard.value()
    }

    /// In-progress drag, if any.
    #[must_use]
    pub fn drag(&self) -> Option<DragSession> {
        self.drag
    }

    /// Frame the container rests on in the current state.
    #[must_use]
    pub fn rest_frame(&self) -> SheetFrame {
        match self.state {
            SheetState::Compressed => SheetFrame::new(self.compressed_base(), 1.0),
            SheetState::Expanded => SheetFrame::new(0.0, 1.0),
            SheetState::Dismissing => self.offscreen_frame(),
        }
    }

    /// Frame with the container fully below the screen and the backdrop clear.
    #[must_use]
    pub fn offscreen_frame(&self) -> SheetFrame {
        SheetFrame::new(self.geometry.max_height(), 0.0)
    }

    /// Start a drag session. Returns `false` once dismissing.
    pub fn begin_drag(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.drag = Some(DragSession::default());
        true
    }

    /// Tracking offset for a pan at `translation`, or `None` if the update is
    /// ignored.
    pub fn track(&mut self, translation: f64) -> Option<f64> {
        if self.state.is_terminal() {
            return None;
        }
        let t = sanitize(translation);
        self.drag.get_or_insert_with(DragSession::default).translation = t;

        match self.state {
            SheetState::Compressed if self.expandable => {
                let base = self.compressed_base();
                let floor = base.min(0.0);
                Some((base + t).max(floor))
            }
            SheetState::Compressed => {
                if t <= -DISMISS_THRESHOLD {
                    None
                } else {
                    Some(self.compressed_base() + t)
                }
            }
            SheetState::Expanded => Some(t),
            SheetState::Dismissing => None,
        }
    }

    /// End the drag at `translation` and move to the next state.
    ///
    /// Returns `None` if the machine is already dismissing.
    pub fn end_drag(&mut self, translation: f64) -> Option<Transition> {
        if self.state.is_terminal() {
            return None;
        }
        self.drag = None;
        let from = self.state;
        let to = next_state(from, self.expandable, translation, self.geometry.offset());
        self.enter(to);
        tracing::debug!(
            from = from.label(),
            to = to.label(),
            translation,
            "sheet drag ended"
        );
        Some(Transition {
            from,
            to,
            target: self.rest_frame(),
        })
    }

    /// Enter [`SheetState::Dismissing`]. Returns `None` if already there.
    pub fn dismiss(&mut self) -> Option<Transition> {
        if self.state.is_terminal() {
            return None;
        }
        let from = self.state;
        self.drag = None;
        self.enter(SheetState::Dismissing);
        Some(Transition {
            from,
            to: SheetState::Dismissing,
            target: self.offscreen_frame(),
        })
    }

    /// Record a keyboard signal.
    ///
    /// Returns the re-rendered compressed offset when the sheet is compressed
    /// and the offset changed. Signals are dropped once dismissing.
    pub fn keyboard(&mut self, signal: KeyboardSignal) -> Option<f64> {
        if self.state.is_terminal() {
            return None;
        }
        let changed = self.keyboard.apply(signal);
        (changed && self.state == SheetState::Compressed).then(|| self.compressed_base())
    }

    fn compressed_base(&self) -> f64 {
        self.keyboard
            .compose(SheetState::Compressed, self.geometry.offset())
    }

    fn enter(&mut self, state: SheetState) {
        self.state = state;
        if let Some(height) = ScrollHeight::for_state(state, &self.geometry) {
            self.scroll_height = height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use qsheet_core::PresentationMode;

    const EPS: f64 = 1e-9;

    fn screen() -> ScreenMetrics {
        ScreenMetrics::new(375.0, 1000.0).unwrap()
    }

    fn machine(fraction: f64, mode: PresentationMode) -> SheetMachine {
        let config = SheetConfiguration::with_fraction_and_mode(fraction, mode).unwrap();
        SheetMachine::new(&config, screen())
    }

    fn expandable() -> SheetMachine {
        machine(0.3, PresentationMode::Expandable)
    }

    fn regular() -> SheetMachine {
        machine(0.3, PresentationMode::Regular)
    }

    #[test]
    fn starts_compressed_at_offset() {
        let m = expandable();
        assert_eq!(m.state(), SheetState::Compressed);
        assert!((m.rest_frame().offset - 600.0).abs() < EPS);
        assert_eq!(m.rest_frame().backdrop_opacity, 1.0);
        assert_eq!(m.scroll_height(), ScrollHeight::Compressed(300.0));
    }

    #[test]
    fn table_compressed_expandable() {
        let n = |t| next_state(SheetState::Compressed, true, t, 600.0);
        assert_eq!(n(41.0), SheetState::Dismissing);
        assert_eq!(n(40.0), SheetState::Compressed);
        assert_eq!(n(-40.0), SheetState::Compressed);
        assert_eq!(n(-41.0), SheetState::Expanded);
    }

    #[test]
    fn table_compressed_regular() {
        let n = |t| next_state(SheetState::Compressed, false, t, 600.0);
        assert_eq!(n(41.0), SheetState::Dismissing);
        assert_eq!(n(40.0), SheetState::Compressed);
        assert_eq!(n(-500.0), SheetState::Compressed);
    }

    #[test]
    fn table_expanded() {
        let n = |t| next_state(SheetState::Expanded, true, t, 600.0);
        assert_eq!(n(-100.0), SheetState::Expanded);
        assert_eq!(n(39.9), SheetState::Expanded);
        assert_eq!(n(40.0), SheetState::Compressed);
        assert_eq!(n(599.9), SheetState::Compressed);
        assert_eq!(n(600.0), SheetState::Dismissing);
    }

    #[test]
    fn table_is_total_for_expanded_without_expandable() {
        assert_eq!(
            next_state(SheetState::Expanded, false, 100.0, 600.0),
            SheetState::Compressed
        );
    }

    #[test]
    fn non_finite_translation_snaps_back() {
        assert_eq!(
            next_state(SheetState::Compressed, true, f64::NAN, 600.0),
            SheetState::Compressed
        );
        assert_eq!(
            next_state(SheetState::Expanded, true, f64::INFINITY, 600.0),
            SheetState::Expanded
        );
    }

    #[test]
    fn drag_up_expands() {
        let mut m = expandable();
        assert!(m.begin_drag());
        assert!((m.track(-100.0).unwrap() - 500.0).abs() < EPS);
        let transition = m.end_drag(-100.0).unwrap();
        assert_eq!(transition.to, SheetState::Expanded);
        assert_eq!(transition.target, SheetFrame::new(0.0, 1.0));
        assert_eq!(m.scroll_height(), ScrollHeight::Expanded(900.0));
        assert!(m.drag().is_none());
    }

    #[test]
    fn expanded_drag_down_compresses() {
        let mut m = expandable();
        m.end_drag(-100.0);
        assert_eq!(m.track(200.0), Some(200.0));
        let transition = m.end_drag(200.0).unwrap();
        assert_eq!(transition.to, SheetState::Compressed);
        assert!((transition.target.offset - 600.0).abs() < EPS);
        assert_eq!(m.scroll_height(), ScrollHeight::Compressed(300.0));
    }

    #[test]
    fn expanded_drag_past_offset_dismisses() {
        let mut m = expandable();
        m.end_drag(-100.0);
        let transition = m.end_drag(650.0).unwrap();
        assert_eq!(transition.to, SheetState::Dismissing);
        assert_eq!(transition.target, m.offscreen_frame());
    }

    #[test]
    fn small_drag_snaps_back() {
        let mut m = expandable();
        let transition = m.end_drag(25.0).unwrap();
        assert!(transition.is_snap_back());
        assert!((transition.target.offset - 600.0).abs() < EPS);
    }

    #[test]
    fn regular_drag_down_dismisses() {
        let mut m = regular();
        assert!((m.track(50.0).unwrap() - 650.0).abs() < EPS);
        assert_eq!(m.end_drag(50.0).unwrap().to, SheetState::Dismissing);
    }

    #[test]
    fn regular_ignores_far_upward_tracking() {
        let mut m = regular();
        assert!((m.track(-39.0).unwrap() - 561.0).abs() < EPS);
        assert_eq!(m.track(-40.0), None);
        assert_eq!(m.track(-300.0), None);
        assert_eq!(m.end_drag(-300.0).unwrap().to, SheetState::Compressed);
    }

    #[test]
    fn upward_tracking_clamps_at_top_limit() {
        let mut m = expandable();
        assert_eq!(m.track(-900.0), Some(0.0));
        let top = m.geometry().container_top(0.0);
        assert!((top - m.geometry().drag_top_limit()).abs() < EPS);
    }

    #[test]
    fn tall_fraction_forbids_upward_travel() {
        // 0.95 is forced to regular mode; the compressed rest sits above the
        // expanded position.
        let mut m = machine(0.95, PresentationMode::Scrollable);
        assert!(!m.is_expandable());
        assert!(m.geometry().offset() < 0.0);
        let base = m.rest_frame().offset;
        assert!((m.track(10.0).unwrap() - (base + 10.0)).abs() < EPS);
    }

    #[test]
    fn keyboard_shifts_compressed_rest() {
        let mut m = expandable();
        let offset = m.keyboard(KeyboardSignal::WillShow { height: 250.0 });
        assert!((offset.unwrap() - 350.0).abs() < EPS);
        assert!((m.rest_frame().offset - 350.0).abs() < EPS);

        // Tracking composes the keyboard offset.
        assert!((m.track(20.0).unwrap() - 370.0).abs() < EPS);

        assert!((m.keyboard(KeyboardSignal::WillHide).unwrap() - 600.0).abs() < EPS);
    }

    #[test]
    fn keyboard_recorded_while_expanded() {
        let mut m = expandable();
        m.end_drag(-100.0);
        assert_eq!(m.keyboard(KeyboardSignal::WillShow { height: 250.0 }), None);
        assert_eq!(m.rest_frame().offset, 0.0);
        assert_eq!(m.keyboard_offset(), -250.0);

        let transition = m.end_drag(100.0).unwrap();
        assert_eq!(transition.to, SheetState::Compressed);
        assert!((transition.target.offset - 350.0).abs() < EPS);
    }

    #[test]
    fn dismissing_is_terminal() {
        let mut m = expandable();
        let transition = m.dismiss().unwrap();
        assert_eq!(transition.from, SheetState::Compressed);
        assert_eq!(m.state(), SheetState::Dismissing);

        assert!(m.dismiss().is_none());
        assert!(!m.begin_drag());
        assert_eq!(m.track(-100.0), None);
        assert!(m.end_drag(-100.0).is_none());
        assert_eq!(m.keyboard(KeyboardSignal::WillShow { height: 10.0 }), None);
        assert_eq!(m.state(), SheetState::Dismissing);
    }

    #[test]
    fn dismiss_keeps_expanded_scroll_height() {
        let mut m = expandable();
        m.end_drag(-100.0);
        assert_eq!(m.scroll_height(), ScrollHeight::Expanded(900.0));
        m.dismiss().unwrap();
        assert_eq!(m.scroll_height(), ScrollHeight::Expanded(900.0));
    }

    #[test]
    fn dismiss_by_drag_keeps_scroll_height() {
        let mut m = expandable();
        m.end_drag(-100.0);
        assert_eq!(m.end_drag(950.0).unwrap().to, SheetState::Dismissing);
        assert_eq!(m.scroll_height(), ScrollHeight::Expanded(900.0));
    }

    fn any_state() -> impl Strategy<Value = SheetState> {
        prop_oneof![
            Just(SheetState::Compressed),
            Just(SheetState::Expanded),
            Just(SheetState::Dismissing),
        ]
    }

    proptest! {
        #[test]
        fn dismissing_absorbs_every_input(
            expandable in any::<bool>(),
            t in -2000.0f64..2000.0,
            offset in -100.0f64..1000.0,
        ) {
            prop_assert_eq!(
                next_state(SheetState::Dismissing, expandable, t, offset),
                SheetState::Dismissing
            );
        }

        #[test]
        fn small_translations_never_change_state(
            state in any_state(),
            expandable in any::<bool>(),
            t in -40.0f64..39.99,
        ) {
            prop_assert_eq!(next_state(state, expandable, t, 600.0), state);
        }

        #[test]
        fn scroll_height_tracks_state(
            gestures in proptest::collection::vec(-800.0f64..800.0, 1..12)
        ) {
            let mut m = expandable();
            for t in gestures {
                let before = m.scroll_height();
                m.begin_drag();
                let _ = m.track(t);
                let _ = m.end_drag(t);
                let expected = match m.state() {
                    SheetState::Expanded => ScrollHeight::Expanded(m.geometry().max_height()),
                    SheetState::Compressed => ScrollHeight::Compressed(m.geometry().min_height()),
                    SheetState::Dismissing => before,
                };
                prop_assert_eq!(m.scroll_height(), expected);
            }
        }

        #[test]
        fn compressed_tracking_respects_top_limit(t in -2000.0f64..2000.0) {
            let mut m = expandable();
            let offset = m.track(t).unwrap();
            prop_assert!(m.geometry().container_top(offset) >= m.geometry().drag_top_limit() - EPS);
        }
    }
}
