#![forbid(unsafe_code)]

//! Runtime services for QuickSheet: the animation driver contract with a
//! deterministic [`Timeline`] implementation, and the process-wide
//! [`KeyboardCenter`].

pub mod animation;
pub mod keyboard;

pub use animation::{
    AnimationCompletion, AnimationCurve, AnimationDriver, AnimationId, AnimationOutcome,
    AnimationRequest, SETTLE_DURATION, SheetFrame, SheetMutation, Timeline,
};
pub use keyboard::{KeyboardCenter, KeyboardSubscription, post_keyboard};
