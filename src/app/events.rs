//! Outbound application events.
//!
//! The [`LightController`](super::service::LightController) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on
//! the other side decide what to do with them — today that is the serial
//! log; the events are informational and not part of the control
//! contract.

use crate::control::mode::Mode;

/// Structured events emitted by the control cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The mode button toggled manual/automatic.
    ModeChanged(Mode),

    /// The lit-pixel count changed by a manual encoder step.
    LedCountChanged(u8),

    /// The hue changed by an encoder-2 step (degrees, 0–359).
    HueChanged(u16),

    /// A rolling average was published to the broker.
    AveragePublished(u16),

    /// A publish was attempted and dropped (client not connected or
    /// enqueue failed). Not retried this cycle.
    PublishFailed(u16),

    /// A broker reconnect attempt is in flight.
    BrokerReconnecting { attempt: u32 },

    /// The broker session is (re-)established.
    BrokerConnected,
}
