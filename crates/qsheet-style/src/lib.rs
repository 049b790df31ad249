#![forbid(unsafe_code)]

//! Style types for QuickSheet chrome.
//!
//! This crate provides:
//! - [`Rgba`] for straight-alpha colors and a handful of named presets
//! - [`ShadowStyle`] for the sheet container's drop shadow
//! - [`BackdropStyle`] for the blur/material variant behind the sheet, with a
//!   static display-label table

pub mod backdrop;
pub mod color;
pub mod shadow;

pub use backdrop::{BackdropStyle, backdrop_label};
pub use color::Rgba;
pub use shadow::ShadowStyle;
