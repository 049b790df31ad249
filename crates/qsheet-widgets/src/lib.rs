#![forbid(unsafe_code)]

//! Widgets for QuickSheet.

pub mod sheet;

pub use sheet::{
    DISMISS_THRESHOLD, DismissTrigger, ScrollHeight, SheetAction, SheetChanges, SheetEvent,
    SheetHost, SheetLayout, SheetMachine, SheetPresentation, SheetState,
};
