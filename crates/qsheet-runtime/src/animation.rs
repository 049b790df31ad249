#![forbid(unsafe_code)]

//! Animation driver contract and a deterministic timeline implementation.
//!
//! The sheet never animates views itself. It describes the end state of a
//! transition as a [`SheetMutation`] and hands it to an [`AnimationDriver`]
//! together with a duration and a curve. The driver interpolates and, once the
//! visual state has settled, reports an [`AnimationCompletion`] that the
//! embedder feeds back to the sheet on the same event loop.
//!
//! # Shapes
//!
//! - [`AnimationRequest::settle`]: 250 ms ease-out, used on gesture end,
//!   initial presentation, and dismissal.
//! - [`AnimationRequest::tracking`]: zero-duration linear update, used while a
//!   drag is in progress and for keyboard re-renders.
//!
//! # Invariants
//!
//! 1. Every accepted request produces exactly one completion.
//! 2. A `Finished` completion is reported only after the frame equals the
//!    request's target.
//! 3. Starting a new request while another runs reports the older one as
//!    `Superseded`; the new one starts from the current interpolated frame.
//!
//! # Failure Modes
//!
//! - Cancelling an unknown or already completed id is a no-op.
//! - Progress is clamped to `[0, 1]`; zero durations complete on the next
//!   [`Timeline::tick`].

use std::time::Duration;

use web_time::Instant;

/// Duration of every settle animation.
pub const SETTLE_DURATION: Duration = Duration::from_millis(250);

/// Identifier of a requested animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

impl AnimationId {
    /// Wrap a driver-assigned id. Drivers keep ids unique per driver.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Renderable sheet properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetFrame {
    /// Downward translation of the container from its expanded rest position.
    pub offset: f64,
    /// Backdrop opacity in `[0, 1]`.
    pub backdrop_opacity: f64,
}

impl SheetFrame {
    #[must_use]
    pub const fn new(offset: f64, backdrop_opacity: f64) -> Self {
        Self {
            offset,
            backdrop_opacity,
        }
    }

    fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            offset: self.offset + (to.offset - self.offset) * t,
            backdrop_opacity: self.backdrop_opacity
                + (to.backdrop_opacity - self.backdrop_opacity) * t,
        }
    }
}

/// Batch of property changes applied by one animation.
///
/// `None` leaves the property where it is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SheetMutation {
    pub offset: Option<f64>,
    pub backdrop_opacity: Option<f64>,
}

impl SheetMutation {
    #[must_use]
    pub const fn offset(offset: f64) -> Self {
        Self {
            offset: Some(offset),
            backdrop_opacity: None,
        }
    }

    #[must_use]
    pub const fn frame(frame: SheetFrame) -> Self {
        Self {
            offset: Some(frame.offset),
            backdrop_opacity: Some(frame.backdrop_opacity),
        }
    }

    /// The frame reached by applying this mutation to `frame`.
    #[must_use]
    pub fn applied_to(&self, frame: SheetFrame) -> SheetFrame {
        SheetFrame {
            offset: self.offset.unwrap_or(frame.offset),
            backdrop_opacity: self
                .backdrop_opacity
                .map_or(frame.backdrop_opacity, |o| o.clamp(0.0, 1.0)),
        }
    }
}

/// Interpolation curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationCurve {
    Linear,
    /// Cubic deceleration.
    #[default]
    EaseOut,
    EaseIn,
    EaseInOut,
}

impl AnimationCurve {
    /// Map linear progress to eased progress. Input is clamped to `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseIn => t * t * t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

/// A request to animate toward a mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRequest {
    pub duration: Duration,
    pub curve: AnimationCurve,
    pub mutation: SheetMutation,
}

impl AnimationRequest {
    /// Ease-out settle over [`SETTLE_DURATION`].
    #[must_use]
    pub const fn settle(mutation: SheetMutation) -> Self {
        Self {
            duration: SETTLE_DURATION,
            curve: AnimationCurve::EaseOut,
            mutation,
        }
    }

    /// Immediate linear update.
    #[must_use]
    pub const fn tracking(mutation: SheetMutation) -> Self {
        Self {
            duration: Duration::ZERO,
            curve: AnimationCurve::Linear,
            mutation,
        }
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.duration.is_zero()
    }
}

/// How an animation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    /// Reached its target.
    Finished,
    /// Cancelled or replaced before reaching its target.
    Superseded,
}

/// Completion signal for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationCompletion {
    pub id: AnimationId,
    pub outcome: AnimationOutcome,
}

/// Capability the sheet uses to render transitions.
pub trait AnimationDriver {
    /// Start animating toward `request.mutation`.
    fn animate(&mut self, request: AnimationRequest) -> AnimationId;

    /// Cancel a running animation, leaving the properties where they are.
    fn cancel(&mut self, id: AnimationId);
}

#[derive(Debug, Clone, Copy)]
struct Running {
    id: AnimationId,
    from: SheetFrame,
    to: SheetFrame,
    curve: AnimationCurve,
    duration: Duration,
    elapsed: Duration,
}

impl Running {
    fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    fn current(&self) -> SheetFrame {
        self.from.lerp(self.to, self.curve.apply(self.progress()))
    }
}

/// Single-track driver advanced explicitly by the event loop.
#[derive(Debug, Clone)]
pub struct Timeline {
    frame: SheetFrame,
    running: Option<Running>,
    completions: Vec<AnimationCompletion>,
    next_id: u64,
    last_tick: Option<Instant>,
}

impl Timeline {
    /// Create a timeline resting at `frame`.
    #[must_use]
    pub fn new(frame: SheetFrame) -> Self {
        Self {
            frame,
            running: None,
            completions: Vec::new(),
            next_id: 1,
            last_tick: None,
        }
    }

    /// The current (possibly interpolated) frame.
    /// Frame as of the last tick.
    #[must_use]
    pub fn frame(&self) -> SheetFrame {
        self.frame
    }

    /// `true` while a timed animation is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.running.is_some()
    }

    /// Id of the running animation.
    #[must_use]
    pub fn running_id(&self) -> Option<AnimationId> {
        self.running.map(|r| r.id)
    }

    /// Advance by `delta` and return the completions produced so far.
    pub fn tick(&mut self, delta: Duration) -> Vec<AnimationCompletion> {
        if let Some(mut running) = self.running.take() {
            running.elapsed = running.elapsed.saturating_add(delta);
            if running.progress() >= 1.0 {
                self.frame = running.to;
                tracing::trace!(id = running.id.get(), "animation finished");
                self.completions.push(AnimationCompletion {
                    id: running.id,
                    outcome: AnimationOutcome::Finished,
                });
            } else {
                self.frame = running.current();
                self.running = Some(running);
            }
        }
        self.drain_completions()
    }

    /// Advance by the wall-clock time since the previous call.
    pub fn tick_now(&mut self) -> Vec<AnimationCompletion> {
        let now = Instant::now();
        let delta = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);
        self.tick(delta)
    }

    /// Take completions queued without advancing time.
    pub fn drain_completions(&mut self) -> Vec<AnimationCompletion> {
        std::mem::take(&mut self.completions)
    }

    fn supersede_running(&mut self) {
        if let Some(running) = self.running.take() {
            self.frame = running.current();
            tracing::trace!(id = running.id.get(), "animation superseded");
            self.completions.push(AnimationCompletion {
                id: running.id,
                outcome: AnimationOutcome::Superseded,
            });
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(SheetFrame::new(0.0, 0.0))
    }
}

impl AnimationDriver for Timeline {
    fn animate(&mut self, request: AnimationRequest) -> AnimationId {
        self.supersede_running();
        let id = AnimationId(self.next_id);
        self.next_id += 1;

        let to = request.mutation.applied_to(self.frame);
        if request.is_tracking() {
            self.frame = to;
            self.completions.push(AnimationCompletion {
                id,
                outcome: AnimationOutcome::Finished,
            });
        } else {
            tracing::trace!(
                id = id.get(),
                duration_ms = request.duration.as_millis() as u64,
                target_offset = to.offset,
                target_backdrop = to.backdrop_opacity,
                "animation started"
            );
            self.running = Some(Running {
                id,
                from: self.frame,
                to,
                curve: request.curve,
                duration: request.duration,
                elapsed: Duration::ZERO,
            });
        }
        id
    }

    fn cancel(&mut self, id: AnimationId) {
        if self.running_id() == Some(id) {
            self.supersede_running();
        }
    }
}
