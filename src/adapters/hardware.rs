//! Hardware adapter — bridges real peripherals to the domain port traits.
//!
//! Owns the WS2812 driver and reads the LDR and encoder pins through the
//! `hw_init` helpers, exposing everything as [`LightSensor`],
//! [`ControlInputs`], and [`LedStrip`]. This is the only module in the
//! system that touches live pins; on non-espidf targets the underlying
//! helpers read from the `hw_init::sim` injection atomics.

use log::warn;
use smart_leds::RGB8;

use crate::app::ports::{ControlInputs, EncoderLines, LedStrip, LightSensor};
use crate::drivers::hw_init;
use crate::drivers::strip::Ws2812Driver;
use crate::pins;

/// Concrete adapter that combines all board I/O behind port traits.
pub struct HardwareAdapter {
    strip: Ws2812Driver,
}

impl HardwareAdapter {
    pub fn new(strip: Ws2812Driver) -> Self {
        Self { strip }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn strip(&self) -> &Ws2812Driver {
        &self.strip
    }
}

// ── LightSensor implementation ────────────────────────────────

impl LightSensor for HardwareAdapter {
    fn read_raw(&mut self) -> u16 {
        hw_init::adc1_read(pins::LDR_ADC_CHANNEL)
    }
}

// ── ControlInputs implementation ──────────────────────────────

impl ControlInputs for HardwareAdapter {
    fn encoder1(&mut self) -> EncoderLines {
        EncoderLines {
            clk: hw_init::gpio_read(pins::ENCODER1_CLK_GPIO),
            dt: hw_init::gpio_read(pins::ENCODER1_DT_GPIO),
        }
    }

    fn encoder2(&mut self) -> EncoderLines {
        EncoderLines {
            clk: hw_init::gpio_read(pins::ENCODER2_CLK_GPIO),
            dt: hw_init::gpio_read(pins::ENCODER2_DT_GPIO),
        }
    }

    fn mode_button_pressed(&mut self) -> bool {
        // Active-low with internal pull-up: LOW means held.
        !hw_init::gpio_read(pins::ENCODER1_SW_GPIO)
    }
}

// ── LedStrip implementation ───────────────────────────────────

impl LedStrip for HardwareAdapter {
    fn render(&mut self, frame: &[RGB8]) {
        // A failed latch leaves the previous frame on the ring; the next
        // cycle re-renders, so this never propagates.
        if let Err(e) = self.strip.transmit(frame) {
            warn!("LED strip refresh failed: {e}");
        }
    }
}
