//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production). The events are diagnostic
//! only; a future network sink would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::ModeChanged(mode) => {
                info!("MODE  | {mode:?}");
            }
            AppEvent::LedCountChanged(count) => {
                info!("COUNT | {count} lit");
            }
            AppEvent::HueChanged(deg) => {
                info!("HUE   | {deg} deg");
            }
            AppEvent::AveragePublished(avg) => {
                info!("LUX   | published avg={avg}");
            }
            AppEvent::PublishFailed(avg) => {
                warn!("LUX   | publish dropped avg={avg}");
            }
            AppEvent::BrokerReconnecting { attempt } => {
                info!("MQTT  | reconnect attempt {attempt}");
            }
            AppEvent::BrokerConnected => {
                info!("MQTT  | session established");
            }
        }
    }
}
