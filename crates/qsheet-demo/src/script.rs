#![forbid(unsafe_code)]

//! Scripted interaction replayed against a presented sheet.
//!
//! A [`Script`] is a list of steps. Drags are expanded into a gesture start,
//! evenly spaced `Changed` samples, and an end. Waits advance the
//! [`Timeline`] one frame at a time so every interpolated frame is recorded.

use std::time::Duration;

use qsheet::{
    GestureEvent, KeyboardCenter, KeyboardSignal, SheetAction, SheetEvent, SheetFrame, SheetHost,
    SheetState, Timeline,
};

/// Samples emitted per drag, end excluded.
const DRAG_SAMPLES: u32 = 4;

/// One scripted interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Pan by `translation` and release.
    Drag(f64),
    /// Post a keyboard signal and pump it.
    Keyboard(KeyboardSignal),
    TapBackdrop,
    /// Let animations run.
    Wait(Duration),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    #[must_use]
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Expand, compress, raise and lower the keyboard, snap back, then tap
    /// the backdrop.
    #[must_use]
    pub fn tour() -> Self {
        let settle = Duration::from_millis(300);
        Self::new(vec![
            Step::Wait(settle),
            Step::Drag(-120.0),
            Step::Wait(settle),
            Step::Drag(150.0),
            Step::Wait(settle),
            Step::Keyboard(KeyboardSignal::WillShow { height: 291.0 }),
            Step::Wait(settle),
            Step::Keyboard(KeyboardSignal::WillHide),
            Step::Wait(settle),
            Step::Drag(30.0),
            Step::Wait(settle),
            Step::TapBackdrop,
            Step::Wait(settle),
        ])
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Snapshot of the sheet after one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRecord {
    pub elapsed: Duration,
    pub state: SheetState,
    pub frame: SheetFrame,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunReport {
    pub frames: Vec<FrameRecord>,
    pub actions: Vec<SheetAction>,
}

impl RunReport {
    #[must_use]
    pub fn dismissed(&self) -> bool {
        self.actions
            .iter()
            .any(|action| matches!(action, SheetAction::Dismissed(_)))
    }
}

/// Replays scripts against a host driven by a [`Timeline`].
#[derive(Debug)]
pub struct Runner<'a, C> {
    host: &'a mut SheetHost<C, Timeline>,
    keyboard: KeyboardCenter,
    frame_interval: Duration,
    elapsed: Duration,
    report: RunReport,
}

impl<'a, C> Runner<'a, C> {
    /// `keyboard` must be the center the host observes.
    pub fn new(
        host: &'a mut SheetHost<C, Timeline>,
        keyboard: KeyboardCenter,
        frame_interval: Duration,
    ) -> Self {
        Self {
            host,
            keyboard,
            frame_interval: frame_interval.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
            report: RunReport::default(),
        }
    }

    pub fn run(mut self, script: &Script) -> RunReport {
        for step in script.steps() {
            if self.host.is_torn_down() {
                tracing::debug!("sheet gone, stopping script");
                break;
            }
            self.apply(*step);
        }
        self.report
    }

    fn apply(&mut self, step: Step) {
        tracing::debug!(?step, "script step");
        match step {
            Step::Drag(translation) => {
                self.send(SheetEvent::Gesture(GestureEvent::Started));
                for i in 1..=DRAG_SAMPLES {
                    let t = translation * f64::from(i) / f64::from(DRAG_SAMPLES);
                    self.send(SheetEvent::Gesture(GestureEvent::Changed(t)));
                }
                self.send(SheetEvent::Gesture(GestureEvent::Ended(translation)));
            }
            Step::Keyboard(signal) => {
                self.keyboard.post(signal);
                let actions = self.host.pump_keyboard();
                self.report.actions.extend(actions);
            }
            Step::TapBackdrop => self.send(SheetEvent::BackdropTapped),
            Step::Wait(duration) => self.wait(duration),
        }
        self.record();
    }

    fn send(&mut self, event: SheetEvent) {
        if let Some(action) = self.host.handle_event(event) {
            self.report.actions.push(action);
        }
    }

    fn wait(&mut self, duration: Duration) {
        let mut waited = Duration::ZERO;
        while waited < duration {
            let delta = self.frame_interval.min(duration - waited);
            waited += delta;
            self.elapsed += delta;
            let actions = self.host.advance(delta);
            self.report.actions.extend(actions);
            self.record();
        }
    }

    fn record(&mut self) {
        let record = FrameRecord {
            elapsed: self.elapsed,
            state: self.host.state(),
            frame: self.host.frame(),
        };
        tracing::info!(
            elapsed_ms = record.elapsed.as_millis() as u64,
            state = record.state.label(),
            offset = record.frame.offset,
            backdrop = record.frame.backdrop_opacity,
            "frame"
        );
        self.report.frames.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsheet::{DismissTrigger, ScreenMetrics, SheetConfiguration, SheetPresentation};

    fn host(center: &KeyboardCenter) -> SheetHost<(), Timeline> {
        SheetPresentation::builder()
            .content(())
            .configuration(SheetConfiguration::STANDARD)
            .screen(ScreenMetrics::new(390.0, 844.0).unwrap())
            .keyboard_center(center.clone())
            .present(Timeline::default())
            .unwrap()
    }

    #[test]
    fn tour_ends_dismissed() {
        let center = KeyboardCenter::new();
        let mut host = host(&center);
        let report = Runner::new(&mut host, center.clone(), Duration::from_millis(16))
            .run(&Script::tour());

        assert!(report.dismissed());
        assert!(host.is_torn_down());
        assert_eq!(center.observer_count(), 0);
        assert_eq!(
            report.actions.last(),
            Some(&SheetAction::Dismissed(DismissTrigger::BackdropTap))
        );
        assert!(report.actions.contains(&SheetAction::Settling {
            to: SheetState::Expanded
        }));
    }

    #[test]
    fn frames_are_recorded_per_tick() {
        let center = KeyboardCenter::new();
        let mut host = host(&center);
        let script = Script::new(vec![Step::Wait(Duration::from_millis(100))]);
        let report = Runner::new(&mut host, center, Duration::from_millis(25)).run(&script);
        // Four ticks plus the step snapshot.
        assert_eq!(report.frames.len(), 5);
        assert_eq!(report.frames[3].elapsed, Duration::from_millis(100));
    }

    #[test]
    fn drag_is_sampled() {
        let center = KeyboardCenter::new();
        let mut host = host(&center);
        let script = Script::new(vec![Step::Drag(20.0)]);
        let report = Runner::new(&mut host, center, Duration::from_millis(16)).run(&script);
        let moves = report
            .actions
            .iter()
            .filter(|a| matches!(a, SheetAction::Moved { .. }))
            .count();
        assert_eq!(moves, DRAG_SAMPLES as usize);
    }

    #[test]
    fn steps_after_teardown_are_skipped() {
        let center = KeyboardCenter::new();
        let mut host = host(&center);
        let script = Script::new(vec![
            Step::TapBackdrop,
            Step::Wait(Duration::from_millis(300)),
            Step::Drag(-200.0),
        ]);
        let report = Runner::new(&mut host, center, Duration::from_millis(50)).run(&script);
        assert!(report.dismissed());
        assert!(
            !report
                .actions
                .iter()
                .any(|a| matches!(a, SheetAction::Moved { .. }))
        );
    }

    #[tracing_test::traced_test]
    #[test]
    fn frames_are_logged() {
        let center = KeyboardCenter::new();
        let mut host = host(&center);
        let script = Script::new(vec![Step::Wait(Duration::from_millis(32))]);
        Runner::new(&mut host, center, Duration::from_millis(16)).run(&script);
        assert!(logs_contain("frame"));
        assert!(logs_contain("elapsed_ms=32"));
    }
}
