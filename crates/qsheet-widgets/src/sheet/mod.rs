#![forbid(unsafe_code)]

//! Bottom sheet: state machine, keyboard composition, dismiss transition,
//! declarative chrome, and the presentation host.
//!
//! # Gestures
//!
//! A vertical pan drives the sheet between two rest states. Dragging a
//! compressed, expandable sheet up past [`DISMISS_THRESHOLD`] expands it;
//! dragging down past the threshold dismisses it. An expanded sheet dragged
//! down compresses, or dismisses once the drag covers the full travel.
//!
//! # Keyboard
//!
//! While compressed, the sheet rides on top of the software keyboard. The
//! offset is recorded while expanded and applied at the next compressed rest.
//!
//! # Example
//!
//! ```ignore
//! use qsheet_widgets::sheet::{SheetEvent, SheetPresentation};
//!
//! let mut host = SheetPresentation::builder()
//!     .content(view)
//!     .configuration(SheetConfiguration::standard())
//!     .screen(screen)
//!     .present(Timeline::default())?;
//!
//! host.handle_event(SheetEvent::Gesture(GestureEvent::Ended(-120.0)));
//! for action in host.advance(frame_time) {
//!     // ...
//! }
//! ```

mod host;
mod keyboard;
mod layout;
mod machine;
mod transition;

pub use host::{SheetAction, SheetEvent, SheetHost, SheetPresentation};
pub use keyboard::KeyboardOffset;
pub use layout::{
    BackdropLayer, ContainerLayer, ContentFrame, DIM_BACKDROP, GRABBER_CORNER_RADIUS,
    GRABBER_HEIGHT, GRABBER_TOP_INSET, GRABBER_WIDTH, GrabberLayer, ScrollArea, SheetChanges,
    SheetLayout,
};
pub use machine::{
    DISMISS_THRESHOLD, DragSession, ScrollHeight, SheetMachine, SheetState, Transition,
    next_state,
};
pub use transition::{DismissTransition, DismissTrigger};
