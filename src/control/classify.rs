//! Threshold classifier: averaged light reading → lit-pixel count.
//!
//! Ordered brightness bands, brightest first. The room being bright means
//! few pixels are needed; a dark room lights the whole ring. Thresholds
//! are compile-time constants — there is deliberately no runtime knob.

use crate::pins::NUM_LEDS;

/// Above this average the room is considered bright.
const BRIGHT_THRESHOLD: u16 = 3000;
/// Above this average (and below bright) the room is medium-lit.
const DIM_THRESHOLD: u16 = 1000;

/// Pixels lit in a bright room.
const BRIGHT_COUNT: u8 = 2;
/// Pixels lit in a medium room.
const MEDIUM_COUNT: u8 = 4;

/// Map an averaged ADC reading to a target lit-pixel count.
/// Band boundaries are exclusive: exactly 3000 is still "medium".
pub fn classify(average: u16) -> u8 {
    if average > BRIGHT_THRESHOLD {
        BRIGHT_COUNT
    } else if average > DIM_THRESHOLD {
        MEDIUM_COUNT
    } else {
        NUM_LEDS as u8
    }
}
