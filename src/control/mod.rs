//! Pure control logic — no I/O, fully host-testable.

pub mod classify;
pub mod encoder;
pub mod mode;
pub mod sampling;
