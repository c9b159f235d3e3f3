//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements      | Connects to              |
//! |------------|-----------------|--------------------------|
//! | `hardware` | LightSensor     | ESP32 ADC1               |
//! |            | ControlInputs   | Encoder / button GPIO    |
//! |            | LedStrip        | WS2812 ring via RMT      |
//! | `log_sink` | EventSink       | Serial log output        |
//! | `mqtt`     | Broker          | ESP-IDF MQTT client      |
//! | `time`     | Clock           | ESP32 system timer       |
//! | `wifi`     | —               | ESP-IDF WiFi STA         |

pub mod hardware;
pub mod log_sink;
pub mod mqtt;
pub mod time;
pub mod wifi;
