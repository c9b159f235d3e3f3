//! MQTT broker adapter.
//!
//! Implements the [`Broker`] port over the ESP-IDF MQTT client. The
//! client session state is tracked through the connection event callback
//! into an atomic flag, so `connected()` is a cheap main-loop query.
//!
//! On non-espidf targets the adapter is a scripted simulation that
//! records publishes and can be told to fail a number of connect
//! attempts, mirroring the teacher-pattern sim stubs used elsewhere.

use log::info;

use crate::app::ports::Broker;
#[cfg(target_os = "espidf")]
use crate::error::{CommsError, Error};
use crate::error::Result;

// ───────────────────────────────────────────────────────────────
// ESP-IDF client
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub struct MqttBroker {
    client: esp_idf_svc::mqtt::client::EspMqttClient<'static>,
    connected: std::sync::Arc<std::sync::atomic::AtomicBool>,
}

#[cfg(target_os = "espidf")]
impl MqttBroker {
    /// Create the client against `mqtt://host:port`. The underlying
    /// ESP-IDF client starts its own task and reconnects on its own; the
    /// control loop still gates publishing on `connected()`.
    pub fn new(host: &str, port: u16, client_id: &str) -> Result<Self> {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        use esp_idf_svc::mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration};

        let url = format!("mqtt://{host}:{port}");
        let conf = MqttClientConfiguration {
            client_id: Some(client_id),
            ..Default::default()
        };

        let connected = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&connected);
        let client = EspMqttClient::new_cb(&url, &conf, move |event| match event.payload() {
            EventPayload::Connected(_) => {
                info!("MQTT event: connected");
                flag.store(true, Ordering::Release);
            }
            EventPayload::Disconnected => {
                info!("MQTT event: disconnected");
                flag.store(false, Ordering::Release);
            }
            _ => {}
        })
        .map_err(|_| Error::Comms(CommsError::MqttConnectFailed))?;

        Ok(Self { client, connected })
    }
}

#[cfg(target_os = "espidf")]
impl Broker for MqttBroker {
    fn connected(&self) -> bool {
        self.connected.load(std::sync::atomic::Ordering::Acquire)
    }

    fn connect(&mut self, _client_id: &str) -> bool {
        // The client id was fixed at construction and the ESP-IDF client
        // retries the session itself; one "attempt" is a fresh look at
        // the session flag after the caller's retry delay.
        self.connected()
    }

    fn publish(&mut self, topic: &str, payload: &str) -> bool {
        use esp_idf_svc::mqtt::client::QoS;
        self.client
            .publish(topic, QoS::AtMostOnce, false, payload.as_bytes())
            .is_ok()
    }

    fn poll(&mut self) {
        // Keep-alive and acks run on the client's own task.
    }
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
pub struct MqttBroker {
    connected: bool,
    sim_fail_connects: u32,
    published: Vec<(String, String)>,
    poll_count: u32,
}

#[cfg(not(target_os = "espidf"))]
impl MqttBroker {
    pub fn new(host: &str, port: u16, client_id: &str) -> Result<Self> {
        info!("MQTT(sim): client '{client_id}' for mqtt://{host}:{port}");
        Ok(Self {
            connected: false,
            sim_fail_connects: 0,
            published: Vec::new(),
            poll_count: 0,
        })
    }

    /// Fail the next `n` connect attempts.
    pub fn sim_set_fail_connects(&mut self, n: u32) {
        self.sim_fail_connects = n;
    }

    /// Drop the simulated session, as after a broker restart.
    pub fn sim_drop_connection(&mut self) {
        self.connected = false;
    }

    pub fn published(&self) -> &[(String, String)] {
        &self.published
    }

    pub fn poll_count(&self) -> u32 {
        self.poll_count
    }
}

#[cfg(not(target_os = "espidf"))]
impl Broker for MqttBroker {
    fn connected(&self) -> bool {
        self.connected
    }

    fn connect(&mut self, _client_id: &str) -> bool {
        if self.sim_fail_connects > 0 {
            self.sim_fail_connects -= 1;
            return false;
        }
        self.connected = true;
        true
    }

    fn publish(&mut self, topic: &str, payload: &str) -> bool {
        if !self.connected {
            return false;
        }
        self.published.push((topic.to_owned(), payload.to_owned()));
        true
    }

    fn poll(&mut self) {
        self.poll_count += 1;
    }
}
