#![forbid(unsafe_code)]

//! Presentation host.
//!
//! [`SheetHost`] owns one presented sheet: its content, the [`SheetMachine`],
//! the animation driver, and a keyboard subscription. The embedder feeds it
//! [`SheetEvent`]s from a single event loop and renders
//! [`SheetHost::layout`] plus the driver's current frame.
//!
//! # Lifecycle
//!
//! 1. [`SheetPresentation::present`] validates its inputs, subscribes to the
//!    keyboard center, places the sheet off-screen, and starts the settle
//!    animation to the compressed rest frame.
//! 2. Gestures, keyboard signals, and taps move the machine and issue
//!    animation requests.
//! 3. Any dismiss trigger runs the [`DismissTransition`]. Once the driver
//!    reports it `Finished`, the host releases the content and the keyboard
//!    subscription and reports [`SheetAction::Dismissed`].
//!
//! # Invariants
//!
//! 1. No event other than an animation completion is processed while
//!    dismissing; nothing is processed after teardown.
//! 2. Teardown happens exactly once and only after the dismiss animation
//!    finished.
//! 3. A gesture start cancels an in-flight settle animation.
//!
//! # Failure Modes
//!
//! - Presenting without content or screen metrics fails before any side
//!   effect.
//! - A dismiss animation reported `Superseded` is re-issued, so teardown is
//!   still reached.

use std::time::Duration;

use qsheet_core::{
    GestureEvent, KeyboardSignal, Result, ScreenMetrics, SheetConfiguration, SheetError,
    SheetGeometry,
};
use qsheet_runtime::{
    AnimationCompletion, AnimationDriver, AnimationId, AnimationOutcome, AnimationRequest,
    KeyboardCenter, KeyboardSubscription, SheetFrame, SheetMutation, Timeline,
};

use super::layout::{SheetChanges, SheetLayout};
use super::machine::{SheetMachine, SheetState, Transition};
use super::transition::{DismissTransition, DismissTrigger};

/// Input to [`SheetHost::handle_event`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetEvent {
    Gesture(GestureEvent),
    Keyboard(KeyboardSignal),
    BackdropTapped,
    DismissRequested,
    PlatformDismiss,
    Animation(AnimationCompletion),
}

/// Observable outcome of a handled event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetAction {
    /// The container was moved without animation.
    Moved { offset: f64 },
    /// A settle animation toward a rest state was started.
    Settling { to: SheetState },
    /// The dismiss animation was started.
    DismissStarted(DismissTrigger),
    /// The sheet is gone; content and observers are released.
    Dismissed(DismissTrigger),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Presented,
    Dismissing {
        animation: AnimationId,
        trigger: DismissTrigger,
    },
    TornDown,
}

/// Builder for a presented sheet.
#[derive(Debug, Clone)]
pub struct SheetPresentation<C> {
    content: Option<C>,
    configuration: Option<SheetConfiguration>,
    screen: Option<ScreenMetrics>,
    keyboard: Option<KeyboardCenter>,
    transition: DismissTransition,
}

impl<C> Default for SheetPresentation<C> {
    fn default() -> Self {
        Self {
            content: None,
            configuration: None,
            screen: None,
            keyboard: None,
            transition: DismissTransition::default(),
        }
    }
}

impl<C> SheetPresentation<C> {
    #[must_use]
    pub fn builder() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn content(mut self, content: C) -> Self {
        self.content = Some(content);
        self
    }

    /// Configuration to present with. Defaults to
    /// [`SheetConfiguration::standard`] at present time.
    #[must_use]
    pub fn configuration(mut self, configuration: SheetConfiguration) -> Self {
        self.configuration = Some(configuration);
        self
    }

    #[must_use]
    pub fn screen(mut self, screen: ScreenMetrics) -> Self {
        self.screen = Some(screen);
        self
    }

    /// Keyboard center to observe. Defaults to [`KeyboardCenter::global`].
    #[must_use]
    pub fn keyboard_center(mut self, center: KeyboardCenter) -> Self {
        self.keyboard = Some(center);
        self
    }

    #[must_use]
    pub fn dismiss_transition(mut self, transition: DismissTransition) -> Self {
        self.transition = transition;
        self
    }

    /// Present the sheet, driving its animations through `driver`.
    pub fn present<D: AnimationDriver>(self, mut driver: D) -> Result<SheetHost<C, D>> {
        let content = self.content.ok_or(SheetError::MissingContent)?;
        let screen = self.screen.ok_or(SheetError::MissingScreen)?;
        let configuration = self
            .configuration
            .unwrap_or_else(SheetConfiguration::standard);

        let machine = SheetMachine::new(&configuration, screen);
        let layout = SheetLayout::new(&configuration, machine.geometry(), machine.scroll_height());
        let keyboard = self
            .keyboard
            .unwrap_or_else(KeyboardCenter::global)
            .subscribe();

        driver.animate(AnimationRequest::tracking(SheetMutation::frame(
            machine.offscreen_frame(),
        )));
        let settle = driver.animate(AnimationRequest::settle(SheetMutation::frame(
            machine.rest_frame(),
        )));

        tracing::debug!(
            fraction = configuration.height_fraction(),
            mode = configuration.presentation_mode().label(),
            screen_height = screen.height(),
            "sheet presented"
        );

        Ok(SheetHost {
            content: Some(content),
            configuration,
            machine,
            layout,
            driver,
            transition: self.transition,
            keyboard: Some(keyboard),
            phase: Phase::Presented,
            settle: Some(settle),
            changes: SheetChanges::OFFSET | SheetChanges::BACKDROP,
        })
    }
}

/// A presented bottom sheet.
#[derive(Debug)]
pub struct SheetHost<C, D> {
    content: Option<C>,
    configuration: SheetConfiguration,
    machine: SheetMachine,
    layout: SheetLayout,
    driver: D,
    transition: DismissTransition,
    keyboard: Option<KeyboardSubscription>,
    phase: Phase,
    settle: Option<AnimationId>,
    changes: SheetChanges,
}

impl<C, D: AnimationDriver> SheetHost<C, D> {
    /// Process one event.
    pub fn handle_event(&mut self, event: SheetEvent) -> Option<SheetAction> {
        match (self.phase, event) {
            (Phase::TornDown, _) => None,
            (_, SheetEvent::Animation(completion)) => self.handle_completion(completion),
            (Phase::Dismissing { .. }, _) => None,
            (_, SheetEvent::Gesture(gesture)) => self.handle_gesture(gesture),
            (_, SheetEvent::Keyboard(signal)) => self.handle_keyboard(signal),
            (_, SheetEvent::BackdropTapped) => self.begin_dismiss(DismissTrigger::BackdropTap),
            (_, SheetEvent::DismissRequested) => self.begin_dismiss(DismissTrigger::Programmatic),
            (_, SheetEvent::PlatformDismiss) => self.begin_dismiss(DismissTrigger::Platform),
        }
    }

    /// Dismiss as if the backdrop was tapped. Idempotent.
    pub fn dismiss(&mut self) -> Option<SheetAction> {
        self.handle_event(SheetEvent::BackdropTapped)
    }

    /// Dismiss on behalf of the platform presentation. Idempotent.
    pub fn platform_dismiss(&mut self) -> Option<SheetAction> {
        self.handle_event(SheetEvent::PlatformDismiss)
    }

    /// Handle every keyboard signal queued since the last call.
    pub fn pump_keyboard(&mut self) -> Vec<SheetAction> {
        let signals = self
            .keyboard
            .as_ref()
            .map(KeyboardSubscription::drain)
            .unwrap_or_default();
        signals
            .into_iter()
            .filter_map(|signal| self.handle_event(SheetEvent::Keyboard(signal)))
            .collect()
    }

    /// Current machine state.
    #[must_use]
    pub fn state(&self) -> SheetState {
        self.machine.state()
    }

    /// The underlying state machine.
    #[must_use]
    pub fn machine(&self) -> &SheetMachine {
        &self.machine
    }

    /// Configuration the sheet was presented with.
    #[must_use]
    pub fn configuration(&self) -> &SheetConfiguration {
        &self.configuration
    }

    /// Resolved geometry.
    #[must_use]
    pub fn geometry(&self) -> &SheetGeometry {
        self.machine.geometry()
    }

    /// Chrome description with the scroll area at the current state's height.
    #[must_use]
    pub fn layout(&self) -> SheetLayout {
        self.layout.with_scroll_height(self.machine.scroll_height())
    }

    /// The presented content, until teardown.
    #[must_use]
    pub fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }

    /// Mutable access to the content, until teardown.
    pub fn content_mut(&mut self) -> Option<&mut C> {
        self.content.as_mut()
    }

    /// The animation driver.
    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the animation driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// `true` while the dismiss animation runs.
    #[must_use]
    pub fn is_dismissing(&self) -> bool {
        matches!(self.phase, Phase::Dismissing { .. })
    }

    /// `true` once content and observers are released.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.phase == Phase::TornDown
    }

    /// Parts changed since the previous call.
    pub fn take_changes(&mut self) -> SheetChanges {
        std::mem::take(&mut self.changes)
    }

    fn handle_gesture(&mut self, gesture: GestureEvent) -> Option<SheetAction> {
        match gesture {
            GestureEvent::Started => {
                self.cancel_settle();
                self.machine.begin_drag();
                None
            }
            GestureEvent::Changed(translation) => {
                let offset = self.machine.track(translation)?;
                self.cancel_settle();
                self.move_to(offset);
                Some(SheetAction::Moved { offset })
            }
            GestureEvent::Ended(translation) => {
                let transition = self.machine.end_drag(translation)?;
                self.cancel_settle();
                Some(self.apply(transition, DismissTrigger::Gesture))
            }
        }
    }

    fn handle_keyboard(&mut self, signal: KeyboardSignal) -> Option<SheetAction> {
        let before = self.machine.keyboard_offset();
        let rest = self.machine.keyboard(signal);
        if self.machine.keyboard_offset() != before {
            self.changes |= SheetChanges::KEYBOARD;
        }
        let rest = rest?;

        if self.settle.is_some() {
            // Retarget instead of cutting the settle short.
            self.cancel_settle();
            self.settle_to(self.machine.rest_frame());
            return Some(SheetAction::Settling {
                to: self.machine.state(),
            });
        }
        let offset = match self.machine.drag() {
            Some(drag) => self.machine.track(drag.translation())?,
            None => rest,
        };
        self.move_to(offset);
        Some(SheetAction::Moved { offset })
    }

    fn begin_dismiss(&mut self, trigger: DismissTrigger) -> Option<SheetAction> {
        let transition = self.machine.dismiss()?;
        self.cancel_settle();
        Some(self.apply(transition, trigger))
    }

    fn apply(&mut self, transition: Transition, trigger: DismissTrigger) -> SheetAction {
        if transition.from != transition.to {
            self.changes |= SheetChanges::STATE;
        }
        let resized = !transition.to.is_terminal()
            && (transition.from == SheetState::Expanded) != (transition.to == SheetState::Expanded);
        if resized {
            self.changes |= SheetChanges::SCROLL_HEIGHT;
        }
        if transition.to == SheetState::Dismissing {
            return self.start_dismiss(trigger);
        }
        self.settle_to(transition.target);
        SheetAction::Settling { to: transition.to }
    }

    fn start_dismiss(&mut self, trigger: DismissTrigger) -> SheetAction {
        let animation = self
            .driver
            .animate(self.transition.request(self.machine.geometry()));
        self.phase = Phase::Dismissing { animation, trigger };
        self.changes |= SheetChanges::OFFSET | SheetChanges::BACKDROP | SheetChanges::STATE;
        tracing::debug!(trigger = trigger.label(), "sheet dismissing");
        SheetAction::DismissStarted(trigger)
    }

    fn handle_completion(&mut self, completion: AnimationCompletion) -> Option<SheetAction> {
        match self.phase {
            Phase::Dismissing { animation, trigger } if completion.id == animation => {
                match completion.outcome {
                    AnimationOutcome::Finished => Some(self.teardown(trigger)),
                    AnimationOutcome::Superseded => {
                        tracing::warn!(
                            id = animation.get(),
                            "dismiss animation superseded, restarting"
                        );
                        self.start_dismiss(trigger);
                        None
                    }
                }
            }
            _ => {
                if self.settle == Some(completion.id) {
                    self.settle = None;
                }
                None
            }
        }
    }

    fn teardown(&mut self, trigger: DismissTrigger) -> SheetAction {
        self.content = None;
        self.keyboard = None;
        self.settle = None;
        self.phase = Phase::TornDown;
        self.changes |= SheetChanges::TORN_DOWN;
        tracing::debug!(trigger = trigger.label(), "sheet dismissed");
        SheetAction::Dismissed(trigger)
    }

    fn move_to(&mut self, offset: f64) {
        self.driver
            .animate(AnimationRequest::tracking(SheetMutation::offset(offset)));
        self.changes |= SheetChanges::OFFSET;
    }

    fn settle_to(&mut self, frame: SheetFrame) {
        let id = self
            .driver
            .animate(AnimationRequest::settle(SheetMutation::frame(frame)));
        self.settle = Some(id);
        self.changes |= SheetChanges::OFFSET | SheetChanges::BACKDROP;
    }

    fn cancel_settle(&mut self) {
        if let Some(id) = self.settle.take() {
            self.driver.cancel(id);
        }
    }
}

impl<C> SheetHost<C, Timeline> {
    /// Advance the timeline by `delta` and feed its completions back.
    pub fn advance(&mut self, delta: Duration) -> Vec<SheetAction> {
        let completions = self.driver.tick(delta);
        completions
            .into_iter()
            .filter_map(|completion| self.handle_event(SheetEvent::Animation(completion)))
            .collect()
    }

    /// The frame to render.
    #[must_use]
    pub fn frame(&self) -> SheetFrame {
        self.driver.frame()
    }
}
