//! GPIO / peripheral pin assignments for the LuxRing main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// WS2812 LED ring
// ---------------------------------------------------------------------------

/// Data line for the WS2812 ring, driven via the RMT peripheral.
pub const LED_STRIP_GPIO: i32 = 4;
/// Number of pixels on the ring.
pub const NUM_LEDS: usize = 8;

// ---------------------------------------------------------------------------
// Ambient-light sensor (LDR voltage divider)
// ---------------------------------------------------------------------------

/// LDR divider tap — GPIO 36 is ADC1 channel 0 on the ESP32.
pub const LDR_ADC_GPIO: i32 = 36;
/// ADC1 channel number for the LDR pin.
pub const LDR_ADC_CHANNEL: u32 = 0;

// ---------------------------------------------------------------------------
// Rotary encoder 1 — lit-pixel count in manual mode
// ---------------------------------------------------------------------------

pub const ENCODER1_CLK_GPIO: i32 = 21;
pub const ENCODER1_DT_GPIO: i32 = 22;
/// Push switch on encoder 1 — the mode toggle button (active-low,
/// internal pull-up).
pub const ENCODER1_SW_GPIO: i32 = 23;

// ---------------------------------------------------------------------------
// Rotary encoder 2 — hue, active in both modes
// ---------------------------------------------------------------------------

pub const ENCODER2_CLK_GPIO: i32 = 18;
pub const ENCODER2_DT_GPIO: i32 = 19;
/// Push switch on encoder 2 — wired but unused.
pub const ENCODER2_SW_GPIO: i32 = 5;
