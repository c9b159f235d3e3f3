//! The control cycle — one `run_cycle` call per loop iteration.
//!
//! [`LightController`] owns all mutable state and sequences the cycle:
//! connectivity, broker housekeeping, mode toggle, the count-producing
//! path for the current mode, hue adjustment, and the output refresh.
//! All I/O flows through port traits injected at the call site, making
//! the entire cycle testable with mock adapters.
//!
//! ```text
//!  LightSensor ──▶ ┌──────────────────────────┐ ──▶ LedStrip
//! ControlInputs ─▶ │      LightController      │ ──▶ Broker
//!        Clock ──▶ │ sample · classify · mode  │ ──▶ EventSink
//!                  └──────────────────────────┘
//! ```

use core::fmt::Write;

use log::{debug, info, warn};

use crate::config::{self, SystemConfig};
use crate::control::classify::classify;
use crate::control::encoder::QuadratureDecoder;
use crate::control::mode::{Mode, ModeArbiter};
use crate::control::sampling::{RollingBuffer, SAMPLE_CAPACITY};
use crate::drivers::strip;
use crate::pins::NUM_LEDS;

use super::events::AppEvent;
use super::ports::{Broker, Clock, ControlInputs, EncoderLines, EventSink, LedStrip, LightSensor};

/// Owns every piece of per-cycle mutable state. Exactly one writer per
/// field per iteration — mode-exclusive paths never race because the
/// whole cycle is a single sequential call.
pub struct LightController {
    config: SystemConfig,
    buffer: RollingBuffer<SAMPLE_CAPACITY>,
    count_encoder: QuadratureDecoder,
    hue_encoder: QuadratureDecoder,
    arbiter: ModeArbiter,
    led_count: u8,
    hue_deg: u16,
    last_sample_ms: u64,
    last_publish_ms: u64,
}

impl LightController {
    /// Construct the controller. `enc1`/`enc2` are the boot-time encoder
    /// line levels, latched so the first cycle sees no phantom edge;
    /// `now_ms` bases both time gates.
    pub fn new(config: SystemConfig, enc1: EncoderLines, enc2: EncoderLines, now_ms: u64) -> Self {
        let arbiter = ModeArbiter::new(config.mode_debounce_ms);
        Self {
            config,
            buffer: RollingBuffer::new(),
            count_encoder: QuadratureDecoder::new(enc1.clk),
            hue_encoder: QuadratureDecoder::new(enc2.clk),
            arbiter,
            led_count: NUM_LEDS as u8,
            hue_deg: 0,
            last_sample_ms: now_ms,
            last_publish_ms: now_ms,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.arbiter.mode()
    }

    pub fn led_count(&self) -> u8 {
        self.led_count
    }

    pub fn hue_deg(&self) -> u16 {
        self.hue_deg
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full control cycle.
    ///
    /// The `hw` parameter satisfies the sensor, input, and strip ports
    /// at once — this avoids a triple mutable borrow while keeping the
    /// port boundary explicit. The ordering is significant: the output
    /// refresh at the end always reflects *this* iteration's mode,
    /// count, and hue, never a stale prior value.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl LightSensor + ControlInputs + LedStrip),
        net: &mut impl Broker,
        clock: &mut impl Clock,
        sink: &mut impl EventSink,
    ) {
        // 1. Broker connectivity. Blocks until a session exists.
        self.ensure_connected(net, clock, sink);

        // 2. Client housekeeping (keep-alive, acks).
        net.poll();

        // 3. Mode button — possibly toggles and holds for the debounce.
        if let Some(mode) = self.arbiter.poll(hw.mode_button_pressed(), clock) {
            info!(
                "{} mode activated",
                if mode == Mode::Manual { "Manual" } else { "Automatic" }
            );
            sink.emit(&AppEvent::ModeChanged(mode));
        }

        // 4. The count-producing path for this cycle's mode.
        match self.arbiter.mode() {
            Mode::Manual => self.adjust_count_manual(hw, sink),
            Mode::Automatic => self.sample_and_classify(hw, net, clock, sink),
        }

        // 5. Hue follows encoder 2 regardless of mode.
        self.adjust_hue(hw, sink);

        // 6. Output refresh from this iteration's count and hue.
        let mut frame = [smart_leds::RGB8::default(); NUM_LEDS];
        strip::frame(self.led_count, self.hue_deg, &mut frame);
        hw.render(&frame);

        // 7. Loop pacing.
        clock.delay_ms(self.config.loop_delay_ms);
    }

    // ── Connectivity ──────────────────────────────────────────

    /// Loop until the broker session exists, with a fixed delay between
    /// attempts. Blocks the entire cycle — sampling, encoders, and the
    /// ring all stall while the broker is unreachable.
    fn ensure_connected(
        &mut self,
        net: &mut impl Broker,
        clock: &mut impl Clock,
        sink: &mut impl EventSink,
    ) {
        let mut attempt: u32 = 0;
        while !net.connected() {
            attempt += 1;
            sink.emit(&AppEvent::BrokerReconnecting { attempt });
            info!("Reconnecting to MQTT (attempt {attempt})...");
            if net.connect(config::MQTT_CLIENT_ID) {
                info!("MQTT connected");
                sink.emit(&AppEvent::BrokerConnected);
                return;
            }
            warn!(
                "MQTT connect failed, retrying in {} ms",
                self.config.mqtt_retry_delay_ms
            );
            clock.delay_ms(self.config.mqtt_retry_delay_ms);
        }
    }

    // ── Manual path ───────────────────────────────────────────

    fn adjust_count_manual(&mut self, hw: &mut impl ControlInputs, sink: &mut impl EventSink) {
        let lines = hw.encoder1();
        let step = self.count_encoder.update(lines.clk, lines.dt);
        if step == 0 {
            return;
        }
        self.led_count =
            (i16::from(self.led_count) + i16::from(step)).clamp(1, NUM_LEDS as i16) as u8;
        info!("Manual LED count: {}", self.led_count);
        sink.emit(&AppEvent::LedCountChanged(self.led_count));
    }

    // ── Automatic path ────────────────────────────────────────

    /// Sub-interval sample gate plus the full-interval publish gate.
    ///
    /// Both gates are "time since last trigger ≥ interval" checks that
    /// re-base on each trigger, so drift never accumulates and a late
    /// cycle can neither skip nor double-fire a window.
    fn sample_and_classify(
        &mut self,
        hw: &mut impl LightSensor,
        net: &mut impl Broker,
        clock: &mut impl Clock,
        sink: &mut impl EventSink,
    ) {
        let now = clock.now_ms();

        if now - self.last_sample_ms >= u64::from(self.config.sample_subinterval_ms()) {
            let raw = hw.read_raw();
            self.buffer.push(raw);
            self.last_sample_ms = now;
            debug!("LDR sample: {raw}");
        }

        if now - self.last_publish_ms >= u64::from(self.config.sample_interval_ms) {
            let average = self.buffer.average();
            info!("Average LDR value: {average}");
            self.led_count = classify(average);
            self.publish_average(average, net, sink);
            self.last_publish_ms = now;
        }
    }

    /// Fire-and-forget publish of the averaged reading as decimal text.
    fn publish_average(&mut self, average: u16, net: &mut impl Broker, sink: &mut impl EventSink) {
        let mut payload: heapless::String<8> = heapless::String::new();
        let _ = write!(payload, "{average}");

        if net.connected() && net.publish(config::MQTT_TOPIC, &payload) {
            info!("MQTT published: {payload}");
            sink.emit(&AppEvent::AveragePublished(average));
        } else {
            warn!("MQTT not connected, unable to send data");
            sink.emit(&AppEvent::PublishFailed(average));
        }
    }

    // ── Hue path ──────────────────────────────────────────────

    fn adjust_hue(&mut self, hw: &mut impl ControlInputs, sink: &mut impl EventSink) {
        let lines = hw.encoder2();
        let step = self.hue_encoder.update(lines.clk, lines.dt);
        if step == 0 {
            return;
        }
        let delta = i32::from(step) * i32::from(self.config.hue_step_deg);
        self.hue_deg = (i32::from(self.hue_deg) + delta).rem_euclid(360) as u16;
        info!("Hue: {}", self.hue_deg);
        sink.emit(&AppEvent::HueChanged(self.hue_deg));
    }
}
