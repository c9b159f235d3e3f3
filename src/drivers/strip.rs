//! WS2812 ring driver: frame computation and RMT transmission.
//!
//! The frame math is pure and host-testable; only [`Ws2812Driver`]
//! touches the RMT peripheral, and on non-espidf targets it captures the
//! last frame in memory instead.

use smart_leds::RGB8;
use smart_leds::hsv::{Hsv, hsv2rgb};

use crate::pins::NUM_LEDS;

/// Unlit pixel.
pub const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// Map a hue in degrees [0, 360) onto the 8-bit colour wheel at full
/// saturation and value.
pub fn hue_to_rgb(hue_deg: u16) -> RGB8 {
    let wheel = (u32::from(hue_deg % 360) * 256 / 360) as u8;
    hsv2rgb(Hsv {
        hue: wheel,
        sat: 255,
        val: 255,
    })
}

/// Fill `frame`: pixels below `lit` get the hue colour, the rest are off.
pub fn frame(lit: u8, hue_deg: u16, frame: &mut [RGB8]) {
    let colour = hue_to_rgb(hue_deg);
    for (i, px) in frame.iter_mut().enumerate() {
        *px = if i < usize::from(lit) { colour } else { OFF };
    }
}

// ───────────────────────────────────────────────────────────────
// RMT transmission (espidf) / frame capture (host)
// ───────────────────────────────────────────────────────────────

/// WS2812 timing, nanoseconds. 800 kHz parts (the NEO_KHZ800 class).
#[cfg(target_os = "espidf")]
const T0H_NS: u64 = 350;
#[cfg(target_os = "espidf")]
const T0L_NS: u64 = 800;
#[cfg(target_os = "espidf")]
const T1H_NS: u64 = 700;
#[cfg(target_os = "espidf")]
const T1L_NS: u64 = 600;

#[cfg(target_os = "espidf")]
pub struct Ws2812Driver {
    tx: esp_idf_hal::rmt::TxRmtDriver<'static>,
}

#[cfg(target_os = "espidf")]
impl Ws2812Driver {
    pub fn new(
        channel: impl esp_idf_hal::peripheral::Peripheral<P = impl esp_idf_hal::rmt::RmtChannel>
        + 'static,
        pin: impl esp_idf_hal::peripheral::Peripheral<P = impl esp_idf_hal::gpio::OutputPin>
        + 'static,
    ) -> crate::error::Result<Self> {
        let config = esp_idf_hal::rmt::config::TransmitConfig::new().clock_divider(1);
        let tx = esp_idf_hal::rmt::TxRmtDriver::new(channel, pin, &config)
            .map_err(|_| crate::error::Error::Init("RMT channel init failed"))?;
        Ok(Self { tx })
    }

    /// Shift one frame out on the data line, blocking until the latch.
    pub fn transmit(&mut self, frame: &[RGB8]) -> crate::error::Result<()> {
        use core::time::Duration;
        use esp_idf_hal::rmt::{FixedLengthSignal, PinState, Pulse};

        let err = |_| crate::error::Error::Init("RMT transmit failed");

        let ticks_hz = self.tx.counter_clock().map_err(err)?;
        let t0h = Pulse::new_with_duration(ticks_hz, PinState::High, &Duration::from_nanos(T0H_NS))
            .map_err(err)?;
        let t0l = Pulse::new_with_duration(ticks_hz, PinState::Low, &Duration::from_nanos(T0L_NS))
            .map_err(err)?;
        let t1h = Pulse::new_with_duration(ticks_hz, PinState::High, &Duration::from_nanos(T1H_NS))
            .map_err(err)?;
        let t1l = Pulse::new_with_duration(ticks_hz, PinState::Low, &Duration::from_nanos(T1L_NS))
            .map_err(err)?;

        let mut signal = FixedLengthSignal::<{ NUM_LEDS * 24 }>::new();
        for (i, px) in frame.iter().take(NUM_LEDS).enumerate() {
            // WS2812 shifts green first, MSB first.
            let grb = (u32::from(px.g) << 16) | (u32::from(px.r) << 8) | u32::from(px.b);
            for bit in 0..24usize {
                let one = grb & (1 << (23 - bit)) != 0;
                let pair = if one { (t1h, t1l) } else { (t0h, t0l) };
                signal.set(i * 24 + bit, &pair).map_err(err)?;
            }
        }
        self.tx.start_blocking(&signal).map_err(err)?;
        Ok(())
    }
}

/// Host-side stand-in: remembers the last transmitted frame so tests and
/// simulations can inspect what would have been latched.
#[cfg(not(target_os = "espidf"))]
pub struct Ws2812Driver {
    last_frame: [RGB8; NUM_LEDS],
}

#[cfg(not(target_os = "espidf"))]
impl Ws2812Driver {
    pub fn new() -> crate::error::Result<Self> {
        Ok(Self {
            last_frame: [OFF; NUM_LEDS],
        })
    }

    pub fn transmit(&mut self, frame: &[RGB8]) -> crate::error::Result<()> {
        for (slot, px) in self.last_frame.iter_mut().zip(frame) {
            *slot = *px;
        }
        Ok(())
    }

    pub fn last_frame(&self) -> &[RGB8; NUM_LEDS] {
        &self.last_frame
    }
}
