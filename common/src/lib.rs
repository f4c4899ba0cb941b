//! Core logic of the golden-ratio steps watchface.
//!
//! This crate contains the platform-agnostic part of the watchface, shared
//! between the desktop simulator and firmware hosts:
//!
//! - [`layout`]: golden-ratio frames for the time, date and steps labels
//! - [`steps`]: step count classification and its persisted state
//! - [`text`]: time and date label formatting
//! - [`app`]: owned watchface context, event dispatch and lifecycle
//! - [`platform`]: traits for the host services the watchface consumes
//! - [`theme`], [`colors`], [`config`]: fonts, colors and constants
//! - [`diagnostics`]: ring buffer of recent log lines
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` outside of tests and allocates nothing; every string
//! is a fixed-capacity `heapless::String`.
//!
//! # Testing
//!
//! ```bash
//! cargo test -p watchface-common
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod app;
pub mod colors;
pub mod config;
pub mod diagnostics;
pub mod layout;
pub mod platform;
pub mod steps;
pub mod text;
pub mod theme;

#[cfg(test)]
mod mocks;

// Re-export commonly used items
pub use app::{Event, EventKind, Watchface};
pub use layout::{LayoutRects, compute_layout};
pub use platform::{PlatformError, Services};
pub use steps::{Classification, StepsComparisonState, classify};
pub use text::DisplayState;
pub use theme::Theme;
