//! LuxRing firmware — main entry point.
//!
//! Boot sequence: peripherals, WiFi association (blocks), initial broker
//! session (blocks with fixed-delay retry), then the cooperative control
//! loop. One `run_cycle` per iteration; the only mid-cycle blocking is
//! the mode-toggle debounce and the broker reconnect delay.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter      MqttBroker        LogEventSink     │
//! │  (Sensor+Inputs+Strip)(Broker)          (EventSink)      │
//! │  WifiAdapter          MonotonicClock                     │
//! │  (boot-time link)     (Clock)                            │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ──────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │        LightController (pure cycle logic)          │  │
//! │  │  sample · average · classify · mode · encoders     │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use luxring::adapters::hardware::HardwareAdapter;
use luxring::adapters::log_sink::LogEventSink;
use luxring::adapters::mqtt::MqttBroker;
use luxring::adapters::time::MonotonicClock;
use luxring::adapters::wifi::WifiAdapter;
use luxring::app::ports::{Broker, Clock, ControlInputs, EventSink};
use luxring::app::service::LightController;
use luxring::config::{self, SystemConfig};
use luxring::drivers::strip::Ws2812Driver;
use luxring::{app::events::AppEvent, drivers};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("LuxRing v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals ────────────────────────────────────────
    drivers::hw_init::init_peripherals().map_err(luxring::error::Error::from)?;
    let peripherals = esp_idf_svc::hal::peripherals::Peripherals::take()?;
    let sysloop = esp_idf_svc::eventloop::EspSystemEventLoop::take()?;

    let strip = Ws2812Driver::new(peripherals.rmt.channel0, peripherals.pins.gpio4)?;
    let mut hw = HardwareAdapter::new(strip);
    let mut clock = MonotonicClock::new();
    let mut sink = LogEventSink::new();
    let cfg = SystemConfig::default();

    // ── 3. Network bring-up (blocks until associated) ─────────
    let mut wifi = WifiAdapter::new(peripherals.modem, sysloop)?;
    wifi.set_credentials(config::WIFI_SSID, config::WIFI_PASSWORD)?;
    wifi.connect_blocking(&mut clock, cfg.wifi_poll_delay_ms)?;

    // ── 4. Broker session (blocks with fixed-delay retry) ─────
    let mut net = MqttBroker::new(
        config::MQTT_BROKER_HOST,
        config::MQTT_BROKER_PORT,
        config::MQTT_CLIENT_ID,
    )?;
    let mut attempt: u32 = 0;
    while !net.connected() {
        attempt += 1;
        info!("Connecting to MQTT (attempt {attempt})...");
        sink.emit(&AppEvent::BrokerReconnecting { attempt });
        if net.connect(config::MQTT_CLIENT_ID) {
            sink.emit(&AppEvent::BrokerConnected);
            break;
        }
        clock.delay_ms(cfg.mqtt_retry_delay_ms);
    }
    info!("MQTT connected");

    // ── 5. Controller ─────────────────────────────────────────
    // Latch the boot-time encoder levels before the first cycle.
    let enc1 = hw.encoder1();
    let enc2 = hw.encoder2();
    let mut controller = LightController::new(cfg, enc1, enc2, clock.now_ms());

    info!("System initialized. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        controller.run_cycle(&mut hw, &mut net, &mut clock, &mut sink);
    }
}
