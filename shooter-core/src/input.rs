//! Controller and light-gun sampling.
//!
//! Button state is read once per frame. Edges ("just pressed") are derived
//! against the previous frame and shared by every subsystem for that frame.

use serde::{Deserialize, Serialize};

pub const PAD_A: u8 = 0x80;
pub const PAD_B: u8 = 0x40;
pub const PAD_SELECT: u8 = 0x20;
pub const PAD_START: u8 = 0x10;
pub const PAD_UP: u8 = 0x08;
pub const PAD_DOWN: u8 = 0x04;
pub const PAD_LEFT: u8 = 0x02;
pub const PAD_RIGHT: u8 = 0x01;

pub const PAD_CONFIRM: u8 = PAD_START | PAD_A;

/// One frame worth of pooled input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    pub held: u8,
    pub pressed: u8,
    pub trigger_held: bool,
    pub trigger_pressed: bool,
}

impl FrameInput {
    #[inline]
    pub fn is_held(&self, mask: u8) -> bool {
        self.held & mask != 0
    }

    #[inline]
    pub fn is_pressed(&self, mask: u8) -> bool {
        self.pressed & mask != 0
    }

    /// Confirm button or a fresh gun pull; used by every screen transition.
    #[inline]
    pub fn confirm(&self) -> bool {
        self.is_pressed(PAD_CONFIRM) || self.trigger_pressed
    }
}

/// Remembers last frame's raw state to compute edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputLatch {
    prev_held: u8,
    prev_trigger: bool,
}

impl InputLatch {
    pub fn sample(&mut self, held: u8, trigger: bool) -> FrameInput {
        let input = FrameInput {
            held,
            pressed: held & !self.prev_held,
            trigger_held: trigger,
            trigger_pressed: trigger && !self.prev_trigger,
        };
        self.prev_held = held;
        self.prev_trigger = trigger;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_is_an_edge_against_previous_frame() {
        let mut latch = InputLatch::default();
        let first = latch.sample(PAD_START | PAD_LEFT, false);
        assert!(first.is_pressed(PAD_START));
        assert!(first.is_pressed(PAD_LEFT));

        let second = latch.sample(PAD_START | PAD_LEFT | PAD_A, false);
        assert!(!second.is_pressed(PAD_START));
        assert!(second.is_held(PAD_START));
        assert!(second.is_pressed(PAD_A));
    }

    #[test]
    fn trigger_edge_requires_release() {
        let mut latch = InputLatch::default();
        assert!(latch.sample(0, true).trigger_pressed);
        assert!(!latch.sample(0, true).trigger_pressed);
        assert!(!latch.sample(0, false).trigger_pressed);
        assert!(latch.sample(0, true).confirm());
    }
}
