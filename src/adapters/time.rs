//! Monotonic clock adapter.
//!
//! Implements the [`Clock`] port for the ESP32:
//!
//! - **`target_os = "espidf"`** — wraps `esp_timer_get_time()` (the
//!   high-resolution monotonic timer) and delays via the FreeRTOS
//!   scheduler.
//! - **all other targets** — `std::time::Instant` and `thread::sleep`
//!   for host-side simulation.

use crate::app::ports::Clock;

/// System clock adapter.
pub struct MonotonicClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(target_os = "espidf")]
impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    fn delay_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }
}

#[cfg(not(target_os = "espidf"))]
impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
