#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use qsheet_core::{
    GestureEvent, KeyboardSignal, PresentationMode, ScreenMetrics, SheetConfiguration,
};
use qsheet_runtime::{KeyboardCenter, Timeline};
use qsheet_widgets::sheet::{SheetAction, SheetEvent, SheetPresentation, SheetState};

#[derive(Debug, Arbitrary)]
enum Input {
    Started,
    Changed(f64),
    Ended(f64),
    KeyboardShow(f64),
    KeyboardHide,
    Tap,
    Platform,
    Tick(u16),
}

#[derive(Debug, Arbitrary)]
struct Case {
    fraction: f64,
    mode: u8,
    height: f64,
    inputs: Vec<Input>,
}

fn count_dismissed(actions: &[SheetAction]) -> usize {
    actions
        .iter()
        .filter(|a| matches!(a, SheetAction::Dismissed(_)))
        .count()
}

fuzz_target!(|case: Case| {
    let mode = PresentationMode::ALL[usize::from(case.mode) % PresentationMode::ALL.len()];
    let Ok(configuration) = SheetConfiguration::with_fraction_and_mode(case.fraction, mode) else {
        return;
    };
    let Ok(screen) = ScreenMetrics::new(400.0, case.height) else {
        return;
    };
    let center = KeyboardCenter::new();
    let Ok(mut host) = SheetPresentation::builder()
        .content(())
        .configuration(configuration)
        .screen(screen)
        .keyboard_center(center.clone())
        .present(Timeline::default())
    else {
        return;
    };

    let mut dismissed = 0;
    for input in case.inputs {
        let was_dismissing = host.state() == SheetState::Dismissing;
        let event = match input {
            Input::Started => SheetEvent::Gesture(GestureEvent::Started),
            Input::Changed(t) => SheetEvent::Gesture(GestureEvent::Changed(t)),
            Input::Ended(t) => SheetEvent::Gesture(GestureEvent::Ended(t)),
            Input::KeyboardShow(height) => SheetEvent::Keyboard(KeyboardSignal::WillShow { height }),
            Input::KeyboardHide => SheetEvent::Keyboard(KeyboardSignal::WillHide),
            Input::Tap => SheetEvent::BackdropTapped,
            Input::Platform => SheetEvent::PlatformDismiss,
            Input::Tick(ms) => {
                let actions = host.advance(Duration::from_millis(u64::from(ms)));
                dismissed += count_dismissed(&actions);
                continue;
            }
        };
        let actions: Vec<SheetAction> = host.handle_event(event).into_iter().collect();
        dismissed += count_dismissed(&actions);
        if was_dismissing {
            assert_eq!(host.state(), SheetState::Dismissing);
        }
    }
    assert!(dismissed <= 1);
    if host.is_torn_down() {
        assert_eq!(center.observer_count(), 0);
        assert!(host.content().is_none());
    }
});
