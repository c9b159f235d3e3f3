//! Application core — the control cycle and its boundaries.
//!
//! The [`service::LightController`] owns every piece of mutable state
//! (sample buffer, mode, pixel count, hue, decoder latches) and touches
//! the outside world only through the **port traits** defined in
//! [`ports`], keeping the whole cycle testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
