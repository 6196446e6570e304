//! Side-view jump demo with a bouncing backdrop.
//!
//! Uses the shooter's walking constants with its own, older integration: it
//! only accelerates while under the speed limit, so the speed can overshoot
//! by one step and then brakes on the next held frame. Gravity is added while
//! below the limit, with no clamp. It has no enemies, no gun and no state
//! machine.

use serde::{Deserialize, Serialize};

use crate::constants::{PLAYER_ACCEL, PLAYER_BRAKE, PLAYER_SPEED_LIMIT};
use crate::fixed_point::{Fs8_8, Fu8_8};
use crate::input::{PAD_A, PAD_LEFT, PAD_RIGHT};
use crate::motion::brake;
use crate::presentation::{Hardware, Screen, SpriteId};

pub const JUMP_MOMENTUM: Fs8_8 = Fs8_8::lit("3.5");
pub const GRAVITY: Fs8_8 = Fs8_8::lit("0.40");
pub const GRAVITY_LIMIT: Fs8_8 = Fs8_8::lit("4.0");
pub const MIN_AIR_FRAMES: u8 = 5;
pub const MAX_AIR_FRAMES: u8 = 12;
pub const FLOOR_Y: u8 = 200;
pub const START_X: u8 = 120;
pub const WALK_ANIM_MASK: u8 = 0x0f;
pub const SCROLL_FLIP_MASK: u8 = 0x1f;
/// Scroll rows 240..=255 would display the attribute table.
pub const SCROLL_LIMIT: u8 = 240;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpState {
    #[default]
    Grounded,
    Rising,
    Falling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jumper {
    pub x: Fu8_8,
    pub y: Fu8_8,
    pub vel_x: Fs8_8,
    pub vel_y: Fs8_8,
    pub state: JumpState,
    /// Frames since the last jump started.
    pub jump_timer: u8,
    /// A must be let go between jumps.
    pub released_jump: bool,
    pub frame: u8,
    pub anim_counter: u8,
}

impl Default for Jumper {
    fn default() -> Self {
        Self {
            x: Fu8_8::from_int(START_X),
            y: Fu8_8::from_int(FLOOR_Y),
            vel_x: Fs8_8::ZERO,
            vel_y: Fs8_8::ZERO,
            state: JumpState::Grounded,
            jump_timer: 0,
            released_jump: false,
            frame: 0,
            anim_counter: 0,
        }
    }
}

impl Jumper {
    pub fn update(&mut self, held: u8) {
        if held & PAD_LEFT != 0 && self.vel_x > -PLAYER_SPEED_LIMIT {
            self.vel_x -= PLAYER_ACCEL;
        } else if held & PAD_RIGHT != 0 && self.vel_x < PLAYER_SPEED_LIMIT {
            self.vel_x += PLAYER_ACCEL;
        } else {
            self.vel_x = brake(self.vel_x, PLAYER_BRAKE);
        }
        self.x += self.vel_x;

        if held & (PAD_LEFT | PAD_RIGHT) == 0 {
            self.frame = 0;
            self.anim_counter = 0;
        } else {
            self.anim_counter = self.anim_counter.wrapping_add(1);
            if self.anim_counter & WALK_ANIM_MASK == 0 {
                self.frame ^= 1;
            }
        }

        let jump_held = held & PAD_A != 0;
        self.jump_timer = self.jump_timer.wrapping_add(1);
        if jump_held && self.state == JumpState::Grounded && self.released_jump {
            self.state = JumpState::Rising;
            self.vel_y = -JUMP_MOMENTUM;
            self.jump_timer = 0;
            self.released_jump = false;
        }

        match self.state {
            JumpState::Rising => {
                let short_hop = self.jump_timer > MIN_AIR_FRAMES && self.released_jump;
                if short_hop || self.jump_timer >= MAX_AIR_FRAMES {
                    self.state = JumpState::Falling;
                }
            }
            JumpState::Falling => {
                if self.vel_y < GRAVITY_LIMIT {
                    self.vel_y += GRAVITY;
                }
            }
            JumpState::Grounded => {}
        }

        if !jump_held {
            self.released_jump = true;
        }
        if self.state != JumpState::Grounded {
            self.frame = 1;
        }

        self.y += self.vel_y;
        if self.y > Fu8_8::from_int(FLOOR_Y) {
            self.y = Fu8_8::from_int(FLOOR_Y);
            self.vel_y = Fs8_8::ZERO;
            self.state = JumpState::Grounded;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformerDemo {
    pub jumper: Jumper,
    pub scroll_y: u8,
    pub direction: i8,
    pub frame_count: u8,
}

impl PlatformerDemo {
    pub fn power_on<H: Hardware + ?Sized>(hw: &mut H) -> Self {
        hw.show_screen(Screen::Demo);
        hw.set_scroll(0, 0);
        Self {
            jumper: Jumper::default(),
            scroll_y: 0,
            direction: 1,
            frame_count: 0,
        }
    }

    pub fn advance_one_frame<H: Hardware + ?Sized>(&mut self, hw: &mut H) {
        self.frame_count = self.frame_count.wrapping_add(1);
        let held = hw.read_pad();
        hw.clear_sprites();

        self.bounce_scroll();
        hw.set_scroll(0, self.scroll_y);

        self.jumper.update(held);
        hw.draw_metasprite(
            self.jumper.x.as_i(),
            self.jumper.y.as_i(),
            SpriteId::Jumper {
                frame: self.jumper.frame,
            },
        );
    }

    fn bounce_scroll(&mut self) {
        if self.frame_count & SCROLL_FLIP_MASK == 0 {
            self.direction = -self.direction;
        }
        self.scroll_y = self.scroll_y.wrapping_add_signed(self.direction);
        if self.scroll_y >= SCROLL_LIMIT {
            self.scroll_y = if self.direction > 0 { 0 } else { SCROLL_LIMIT - 1 };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::ScriptedConsole;

    fn run(jumper: &mut Jumper, held: u8, frames: usize) {
        for _ in 0..frames {
            jumper.update(held);
        }
    }

    #[test]
    fn gravity_literal_truncates() {
        assert_eq!(GRAVITY.raw(), 102);
        assert_eq!(JUMP_MOMENTUM.raw(), 896);
    }

    #[test]
    fn jump_needs_a_release_first() {
        let mut jumper = Jumper::default();
        run(&mut jumper, PAD_A, 3);
        assert_eq!(jumper.state, JumpState::Grounded);

        jumper.update(0);
        jumper.update(PAD_A);
        assert_eq!(jumper.state, JumpState::Rising);
        assert_eq!(jumper.vel_y, -JUMP_MOMENTUM);
    }

    #[test]
    fn held_jump_rises_for_max_air_time_then_lands() {
        let mut jumper = Jumper::default();
        jumper.update(0);
        jumper.update(PAD_A);

        run(&mut jumper, PAD_A, (MAX_AIR_FRAMES - 1) as usize);
        assert_eq!(jumper.state, JumpState::Rising);
        assert_eq!(jumper.frame, 1);
        jumper.update(PAD_A);
        assert_eq!(jumper.state, JumpState::Falling);

        let apex = jumper.y;
        assert!(apex < Fu8_8::from_int(FLOOR_Y));
        run(&mut jumper, 0, 60);
        assert_eq!(jumper.state, JumpState::Grounded);
        assert_eq!(jumper.y, Fu8_8::from_int(FLOOR_Y));
        assert!(jumper.vel_y.is_zero());
        assert_eq!(jumper.frame, 0);
    }

    #[test]
    fn early_release_cuts_the_jump_after_min_air_time() {
        let mut jumper = Jumper::default();
        jumper.update(0);
        jumper.update(PAD_A);

        run(&mut jumper, 0, MIN_AIR_FRAMES as usize);
        assert_eq!(jumper.state, JumpState::Rising);
        jumper.update(0);
        assert_eq!(jumper.state, JumpState::Falling);
    }

    #[test]
    fn gravity_stops_growing_one_step_past_the_limit() {
        let mut jumper = Jumper::default();
        jumper.y = Fu8_8::from_int(10);
        jumper.state = JumpState::Falling;
        run(&mut jumper, 0, 10);
        assert_eq!(jumper.vel_y.raw(), 1020);
        jumper.update(0);
        assert_eq!(jumper.vel_y.raw(), 1122);
        run(&mut jumper, 0, 10);
        assert_eq!(jumper.vel_y.raw(), 1122);
        assert_eq!(jumper.state, JumpState::Falling);
    }

    #[test]
    fn walking_overshoots_the_limit_then_brakes_while_held() {
        let mut jumper = Jumper::default();
        run(&mut jumper, PAD_RIGHT, 16);
        assert_eq!(jumper.vel_x.raw(), 608);
        jumper.update(PAD_RIGHT);
        assert_eq!(jumper.vel_x.raw(), 646);
        jumper.update(PAD_RIGHT);
        assert_eq!(jumper.vel_x.raw(), 646 - PLAYER_BRAKE.raw());

        let mut leftward = Jumper::default();
        run(&mut leftward, PAD_LEFT, 17);
        assert_eq!(leftward.vel_x.raw(), -646);
        leftward.update(PAD_LEFT);
        assert_eq!(leftward.vel_x.raw(), -646 + PLAYER_BRAKE.raw());
    }

    #[test]
    fn walk_animation_toggles_every_sixteen_frames() {
        let mut jumper = Jumper::default();
        run(&mut jumper, PAD_RIGHT, 15);
        assert_eq!(jumper.frame, 0);
        jumper.update(PAD_RIGHT);
        assert_eq!(jumper.frame, 1);
        jumper.update(0);
        assert_eq!((jumper.frame, jumper.anim_counter), (0, 0));
    }

    #[test]
    fn scroll_bounces_and_skips_attribute_rows() {
        let mut console = ScriptedConsole::default();
        let mut demo = PlatformerDemo::power_on(&mut console);
        let mut seen = alloc::vec::Vec::new();
        for _ in 0..64 {
            demo.advance_one_frame(&mut console);
            seen.push(demo.scroll_y);
        }
        assert_eq!(seen[30], 31);
        assert_eq!(seen[31], 30);
        assert_eq!(seen[61], 0);
        assert_eq!(seen[62], SCROLL_LIMIT - 1);
        assert_eq!(seen[63], 0);
        assert!(seen.iter().all(|&y| y < SCROLL_LIMIT));
    }
}
