//! End-to-end control-cycle scenarios.

use luxring::adapters::mqtt::MqttBroker;
use luxring::app::events::AppEvent;
use luxring::app::ports::EncoderLines;
use luxring::app::service::LightController;
use luxring::config::SystemConfig;
use luxring::control::mode::Mode;
use luxring::drivers::strip::hue_to_rgb;

use crate::mock_hw::{FakeClock, MockHardware, RecordingSink};

struct Harness {
    controller: LightController,
    hw: MockHardware,
    net: MqttBroker,
    clock: FakeClock,
    sink: RecordingSink,
}

impl Harness {
    fn new(ldr_raw: u16) -> Self {
        let mut hw = MockHardware::new();
        hw.ldr_raw = ldr_raw;
        let clock = FakeClock::new();
        let controller =
            LightController::new(SystemConfig::default(), hw.enc1, hw.enc2, clock.now);
        Self {
            controller,
            hw,
            net: MqttBroker::new("localhost", 1883, "test-client").unwrap(),
            clock,
            sink: RecordingSink::new(),
        }
    }

    fn run_cycles(&mut self, n: usize) {
        for _ in 0..n {
            self.controller
                .run_cycle(&mut self.hw, &mut self.net, &mut self.clock, &mut self.sink);
        }
    }

    /// Feed one encoder edge on the count encoder. `dt_matches_clk`
    /// selects counter-clockwise (true) or clockwise (false).
    fn step_count_encoder(&mut self, dt_matches_clk: bool) {
        let clk = !self.hw.enc1.clk;
        self.hw.enc1 = EncoderLines {
            clk,
            dt: if dt_matches_clk { clk } else { !clk },
        };
        self.run_cycles(1);
    }

    /// Feed one encoder edge on the hue encoder.
    fn step_hue_encoder(&mut self, dt_matches_clk: bool) {
        let clk = !self.hw.enc2.clk;
        self.hw.enc2 = EncoderLines {
            clk,
            dt: if dt_matches_clk { clk } else { !clk },
        };
        self.run_cycles(1);
    }

    fn toggle_mode(&mut self) {
        self.hw.button_pressed = true;
        self.run_cycles(1);
        self.hw.button_pressed = false;
    }
}

// With the default config (50 ms pacing, 5000 ms window, 10 samples)
// the first publish lands exactly on cycle 101, when simulated time
// reaches the full window.
const CYCLES_PER_WINDOW: usize = 101;

// ── Automatic-mode scenarios ──────────────────────────────────

#[test]
fn bright_room_lights_two_pixels_and_publishes() {
    let mut h = Harness::new(3500);
    h.run_cycles(CYCLES_PER_WINDOW);

    assert_eq!(h.controller.led_count(), 2);
    assert_eq!(h.hw.lit_count(), 2);
    assert_eq!(h.net.published(), &[("home/lux".to_owned(), "3500".to_owned())]);
    assert!(h.sink.events.contains(&AppEvent::AveragePublished(3500)));
}

#[test]
fn medium_room_lights_four_pixels() {
    let mut h = Harness::new(1500);
    h.run_cycles(CYCLES_PER_WINDOW);

    assert_eq!(h.controller.led_count(), 4);
    assert_eq!(h.hw.lit_count(), 4);
    assert_eq!(h.net.published(), &[("home/lux".to_owned(), "1500".to_owned())]);
}

#[test]
fn dark_room_lights_full_ring() {
    let mut h = Harness::new(500);
    h.run_cycles(CYCLES_PER_WINDOW);

    assert_eq!(h.controller.led_count(), 8);
    assert_eq!(h.hw.lit_count(), 8);
    assert_eq!(h.net.published(), &[("home/lux".to_owned(), "500".to_owned())]);
}

#[test]
fn no_publish_before_window_elapses() {
    let mut h = Harness::new(3500);
    h.run_cycles(CYCLES_PER_WINDOW - 1);
    assert!(h.net.published().is_empty());
}

#[test]
fn exactly_one_publish_per_window() {
    let mut h = Harness::new(3500);
    h.run_cycles(2 * CYCLES_PER_WINDOW - 1);
    // Two full windows: no skipped or doubled fire regardless of cycle phase.
    assert_eq!(h.net.published().len(), 2);
}

#[test]
fn broker_polled_every_cycle() {
    let mut h = Harness::new(0);
    h.run_cycles(10);
    assert_eq!(h.net.poll_count(), 10);
}

// ── Mode toggling ─────────────────────────────────────────────

#[test]
fn mode_button_toggles_with_blocking_debounce() {
    let mut h = Harness::new(0);
    h.run_cycles(1);
    assert_eq!(h.controller.mode(), Mode::Automatic);

    h.toggle_mode();
    assert_eq!(h.controller.mode(), Mode::Manual);
    assert!(h.sink.events.contains(&AppEvent::ModeChanged(Mode::Manual)));
    // The 500 ms debounce hold was issued through the clock.
    assert!(h.clock.delays.contains(&500));

    h.toggle_mode();
    assert_eq!(h.controller.mode(), Mode::Automatic);
}

#[test]
fn manual_mode_suppresses_publishing() {
    let mut h = Harness::new(3500);
    h.toggle_mode();
    assert_eq!(h.controller.mode(), Mode::Manual);

    // Far more cycles than a publish window — nothing may be published
    // and the classifier must not touch the count.
    h.run_cycles(3 * CYCLES_PER_WINDOW);
    assert!(h.net.published().is_empty());
    assert_eq!(h.controller.led_count(), 8);
}

// ── Manual count adjustment ───────────────────────────────────

#[test]
fn counter_clockwise_step_decrements_count() {
    let mut h = Harness::new(3500);
    h.toggle_mode();

    h.step_count_encoder(true);
    assert_eq!(h.controller.led_count(), 7);
    assert!(h.sink.events.contains(&AppEvent::LedCountChanged(7)));
    // The frame rendered in that same iteration already shows 7 pixels.
    assert_eq!(h.hw.lit_count(), 7);
    // And no publish happened regardless of the bright sensor.
    assert!(h.net.published().is_empty());
}

#[test]
fn count_clamps_at_one() {
    let mut h = Harness::new(0);
    h.toggle_mode();

    for _ in 0..20 {
        h.step_count_encoder(true);
    }
    assert_eq!(h.controller.led_count(), 1);
    assert_eq!(h.hw.lit_count(), 1);
}

#[test]
fn count_clamps_at_ring_size() {
    let mut h = Harness::new(0);
    h.toggle_mode();

    for _ in 0..20 {
        h.step_count_encoder(false);
    }
    assert_eq!(h.controller.led_count(), 8);
}

#[test]
fn automatic_mode_ignores_count_encoder() {
    let mut h = Harness::new(0);
    // Stay in automatic; wiggle encoder 1.
    let before = h.controller.led_count();
    h.step_count_encoder(true);
    h.step_count_encoder(true);
    assert_eq!(h.controller.led_count(), before);
}

// ── Hue adjustment ────────────────────────────────────────────

#[test]
fn hue_wraps_below_zero() {
    let mut h = Harness::new(0);
    h.step_hue_encoder(true);
    assert_eq!(h.controller.hue_deg(), 330);
    assert!(h.sink.events.contains(&AppEvent::HueChanged(330)));
}

#[test]
fn hue_wraps_at_360() {
    let mut h = Harness::new(0);
    h.step_hue_encoder(true); // 330
    h.step_hue_encoder(false); // back to 0
    assert_eq!(h.controller.hue_deg(), 0);
}

#[test]
fn hue_applies_in_manual_mode_too() {
    let mut h = Harness::new(0);
    h.toggle_mode();
    h.step_hue_encoder(false);
    assert_eq!(h.controller.hue_deg(), 30);
    // Rendered frame uses the new hue immediately.
    let expected = hue_to_rgb(30);
    assert_eq!(h.hw.last_frame()[0], expected);
}

// ── Render consistency ────────────────────────────────────────

#[test]
fn every_cycle_renders_exactly_one_frame() {
    let mut h = Harness::new(1500);
    h.run_cycles(25);
    assert_eq!(h.hw.frames.len(), 25);
}

#[test]
fn unlit_pixels_are_black() {
    let mut h = Harness::new(3500);
    h.run_cycles(CYCLES_PER_WINDOW);
    let frame = h.hw.last_frame();
    for px in &frame[2..] {
        assert_eq!((px.r, px.g, px.b), (0, 0, 0));
    }
}
