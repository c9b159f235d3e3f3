//! Rolling sample buffer for the ambient-light sensor.
//!
//! A fixed-capacity ring: `push` overwrites the oldest slot, `average`
//! is the truncated mean over *all* slots. The buffer is zero-initialised
//! at boot, so the average is well-defined before the first real sample
//! arrives — the first window is biased low by the zero padding, which
//! is accepted boundary behaviour rather than a bug.

/// Number of sensor samples in one averaging window.
pub const SAMPLE_CAPACITY: usize = 10;

/// Fixed-capacity circular buffer of raw ADC readings.
#[derive(Debug, Clone)]
pub struct RollingBuffer<const N: usize = SAMPLE_CAPACITY> {
    slots: [u16; N],
    index: usize,
}

impl<const N: usize> RollingBuffer<N> {
    pub fn new() -> Self {
        Self {
            slots: [0; N],
            index: 0,
        }
    }

    /// Write at the current index and advance mod capacity. Wraps
    /// silently; there is no overflow condition.
    pub fn push(&mut self, sample: u16) {
        self.slots[self.index] = sample;
        self.index = (self.index + 1) % N;
    }

    /// Truncated arithmetic mean over all capacity slots, including any
    /// still-zero cold-start slots.
    pub fn average(&self) -> u16 {
        let sum: u32 = self.slots.iter().map(|&s| u32::from(s)).sum();
        (sum / N as u32) as u16
    }

    pub fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for RollingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
