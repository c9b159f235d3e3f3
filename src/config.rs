//! System configuration parameters.
//!
//! All tunable timing and input parameters for the LuxRing controller.
//! There is no runtime configuration surface — the network identity and
//! broker address are compiled-in constants, matching the deployment.

use serde::{Deserialize, Serialize};

use crate::control::sampling::SAMPLE_CAPACITY;

// ---------------------------------------------------------------------------
// Compiled-in network identity
// ---------------------------------------------------------------------------

/// Access-point name for station-mode association.
pub const WIFI_SSID: &str = "IoT518";
/// WPA2 passphrase.
pub const WIFI_PASSWORD: &str = "iot123456";

/// MQTT broker address.
pub const MQTT_BROKER_HOST: &str = "172.20.10.12";
/// MQTT broker port.
pub const MQTT_BROKER_PORT: u16 = 1883;
/// Fixed client identifier presented to the broker.
pub const MQTT_CLIENT_ID: &str = "ESP32Client";
/// Topic the rolling lux average is published on.
pub const MQTT_TOPIC: &str = "home/lux";

// ---------------------------------------------------------------------------
// Runtime parameters
// ---------------------------------------------------------------------------

/// Core system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Timing ---
    /// Fixed pacing delay at the end of every control cycle (milliseconds).
    pub loop_delay_ms: u32,
    /// Full averaging window: one publish per window, and one sensor
    /// sample every `sample_interval_ms / SAMPLE_CAPACITY` (milliseconds).
    pub sample_interval_ms: u32,
    /// Blocking hold after a mode-button press (milliseconds).
    pub mode_debounce_ms: u32,

    // --- Connectivity ---
    /// Delay between broker reconnect attempts (milliseconds).
    pub mqtt_retry_delay_ms: u32,
    /// Delay between WiFi association polls at boot (milliseconds).
    pub wifi_poll_delay_ms: u32,

    // --- Input ---
    /// Hue change per encoder-2 detent (degrees).
    pub hue_step_deg: u16,
}

impl SystemConfig {
    /// Cadence of individual sensor samples within the averaging window.
    pub fn sample_subinterval_ms(&self) -> u32 {
        self.sample_interval_ms / SAMPLE_CAPACITY as u32
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            loop_delay_ms: 50,
            sample_interval_ms: 5000,
            mode_debounce_ms: 500,
            mqtt_retry_delay_ms: 5000,
            wifi_poll_delay_ms: 500,
            hue_step_deg: 30,
        }
    }
}
