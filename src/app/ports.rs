//! Port traits — the hexagonal boundary between the control cycle and
//! the outside world.
//!
//! Driven adapters (ADC, GPIO, WS2812 ring, MQTT client, system timer)
//! implement these traits. The [`LightController`](super::service::LightController)
//! consumes them via generics, so the cycle logic never touches hardware
//! directly.

use smart_leds::RGB8;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Ambient-light sensor (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the LDR divider.
pub trait LightSensor {
    /// One raw ADC reading, 0–4095.
    fn read_raw(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Rotary encoders and mode button
// ───────────────────────────────────────────────────────────────

/// Snapshot of one encoder's two digital lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncoderLines {
    pub clk: bool,
    pub dt: bool,
}

/// Read-side port for the two encoders and the mode button.
pub trait ControlInputs {
    /// Lines of encoder 1 (pixel count in manual mode).
    fn encoder1(&mut self) -> EncoderLines;

    /// Lines of encoder 2 (hue, both modes).
    fn encoder2(&mut self) -> EncoderLines;

    /// Whether the mode button is currently held. The adapter resolves
    /// the active-low electrical level; `true` means pressed.
    fn mode_button_pressed(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// LED ring (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the WS2812 ring. `render` commits a complete
/// frame — per-pixel writes and the latch are the adapter's business.
pub trait LedStrip {
    fn render(&mut self, frame: &[RGB8]);
}

// ───────────────────────────────────────────────────────────────
// Message broker
// ───────────────────────────────────────────────────────────────

/// Publish-only broker client.
///
/// `publish` is fire-and-forget: a failure is reported to the caller as
/// `false`, logged, and *not* retried inline — the next cycle's
/// connectivity check is the retry mechanism. A broker that never comes
/// back makes [`LightController::run_cycle`](super::service::LightController::run_cycle)
/// block indefinitely in its reconnect loop; that is an accepted design
/// limitation, not a bug.
pub trait Broker {
    /// Whether the client currently holds a live session.
    fn connected(&self) -> bool;

    /// One connect attempt with the given client identifier.
    fn connect(&mut self, client_id: &str) -> bool;

    /// Publish a text payload. Returns `false` when not connected or the
    /// enqueue failed.
    fn publish(&mut self, topic: &str, payload: &str) -> bool;

    /// Per-cycle client housekeeping (keep-alive, acks).
    fn poll(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Time
// ───────────────────────────────────────────────────────────────

/// Monotonic time source and blocking delay.
///
/// Every intentional blocking wait in the firmware (loop pacing, mode
/// debounce, reconnect backoff, boot-time association polling) goes
/// through `delay_ms`, so tests can inject a fake clock and assert on
/// hold counts rather than real elapsed time.
pub trait Clock {
    /// Milliseconds since boot, monotonic.
    fn now_ms(&self) -> u64;

    /// Block the caller for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The controller emits structured [`AppEvent`]s through this port.
/// Adapters decide where they go (serial log today; anything later).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
