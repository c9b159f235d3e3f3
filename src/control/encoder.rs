//! Quadrature decoder for a two-line rotary encoder.
//!
//! A step is detected only on a clock-line edge (the level differs from
//! the previously recorded one). Direction comes from the data line
//! sampled at the moment of the edge: if it differs from the current
//! clock level the knob moved clockwise, if it matches it moved
//! counter-clockwise. The 50 ms control-loop cadence is the de facto
//! debounce for rotation.
//!
//! Both encoders on the board (pixel count and hue) share this decoder;
//! only the pin set and the output action differ.

/// Edge-triggered quadrature decoder. Holds the last observed clock
/// level; each instance belongs to exactly one encoder.
#[derive(Debug, Clone, Copy)]
pub struct QuadratureDecoder {
    last_clk: bool,
}

impl QuadratureDecoder {
    /// Latch the boot-time clock level so the first cycle does not see a
    /// phantom edge.
    pub fn new(initial_clk: bool) -> Self {
        Self { last_clk: initial_clk }
    }

    /// Feed the current line levels; returns +1 (clockwise), -1
    /// (counter-clockwise) or 0 (no edge).
    ///
    /// The stored clock level is updated unconditionally, even when no
    /// edge occurred.
    pub fn update(&mut self, clk: bool, dt: bool) -> i8 {
        let step = if clk == self.last_clk {
            0
        } else if dt != clk {
            1
        } else {
            -1
        };
        self.last_clk = clk;
        step
    }
}
