//! Mock hardware, clock, and event sink for integration tests.
//!
//! Records every rendered frame and emitted event so tests can assert on
//! the full cycle history without touching real GPIO or the network.

use luxring::app::events::AppEvent;
use luxring::app::ports::{Clock, ControlInputs, EncoderLines, EventSink, LedStrip, LightSensor};
use smart_leds::RGB8;

// ── Mock board I/O ────────────────────────────────────────────

/// Scriptable board: the test sets pin levels and the raw LDR reading,
/// and reads back every frame the controller rendered.
pub struct MockHardware {
    pub ldr_raw: u16,
    pub enc1: EncoderLines,
    pub enc2: EncoderLines,
    pub button_pressed: bool,
    pub frames: Vec<Vec<RGB8>>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            ldr_raw: 0,
            enc1: EncoderLines::default(),
            enc2: EncoderLines::default(),
            button_pressed: false,
            frames: Vec::new(),
        }
    }

    pub fn last_frame(&self) -> &[RGB8] {
        self.frames.last().expect("no frame rendered")
    }

    /// Number of lit (non-black) pixels in the most recent frame.
    pub fn lit_count(&self) -> usize {
        self.last_frame()
            .iter()
            .filter(|px| px.r != 0 || px.g != 0 || px.b != 0)
            .count()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl LightSensor for MockHardware {
    fn read_raw(&mut self) -> u16 {
        self.ldr_raw
    }
}

impl ControlInputs for MockHardware {
    fn encoder1(&mut self) -> EncoderLines {
        self.enc1
    }

    fn encoder2(&mut self) -> EncoderLines {
        self.enc2
    }

    fn mode_button_pressed(&mut self) -> bool {
        self.button_pressed
    }
}

impl LedStrip for MockHardware {
    fn render(&mut self, frame: &[RGB8]) {
        self.frames.push(frame.to_vec());
    }
}

// ── Fake clock ────────────────────────────────────────────────

/// Deterministic clock: `delay_ms` records the requested hold and
/// advances simulated time instead of sleeping.
pub struct FakeClock {
    pub now: u64,
    pub delays: Vec<u32>,
}

#[allow(dead_code)]
impl FakeClock {
    pub fn new() -> Self {
        Self {
            now: 0,
            delays: Vec::new(),
        }
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
        self.now += u64::from(ms);
    }
}

// ── Recording event sink ──────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count_matching(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
