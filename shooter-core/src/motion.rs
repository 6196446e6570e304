//! Per-frame velocity integration, braking, walls and animation.

use crate::constants::{
    ANIM_THRESHOLD, ENEMY_ACCEL, ENEMY_BODY_OFFSET, ENEMY_MAX_SPEED, ENEMY_SOFT_MAX_X,
    ENEMY_SOFT_MAX_Y, ENEMY_SOFT_MIN_X, ENEMY_SOFT_MIN_Y, PLAYER_ACCEL, PLAYER_BRAKE,
    PLAYER_MAX_X, PLAYER_MAX_Y, PLAYER_MIN_X, PLAYER_MIN_Y, PLAYER_SPEED_LIMIT,
};
use crate::entity::Entity;
use crate::fixed_point::{Fs8_8, Fu8_8};
use crate::input::{FrameInput, PAD_DOWN, PAD_LEFT, PAD_RIGHT, PAD_UP};

/// Which way one axis is being pushed this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisInput {
    Negative,
    Positive,
    Released,
}

impl AxisInput {
    /// Negative wins when both directions are held.
    pub fn from_pad(input: &FrameInput, negative: u8, positive: u8) -> Self {
        if input.is_held(negative) {
            Self::Negative
        } else if input.is_held(positive) {
            Self::Positive
        } else {
            Self::Released
        }
    }
}

/// Axis tuning for one controllable body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisTuning {
    pub accel: Fs8_8,
    pub speed_limit: Fs8_8,
    pub brake: Fs8_8,
}

pub const PLAYER_TUNING: AxisTuning = AxisTuning {
    accel: PLAYER_ACCEL,
    speed_limit: PLAYER_SPEED_LIMIT,
    brake: PLAYER_BRAKE,
};

/// Closed interval a body's integer position may occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: u8,
    pub max_x: u8,
    pub min_y: u8,
    pub max_y: u8,
}

pub const PLAYER_BOUNDS: Bounds = Bounds {
    min_x: PLAYER_MIN_X,
    max_x: PLAYER_MAX_X,
    min_y: PLAYER_MIN_Y,
    max_y: PLAYER_MAX_Y,
};

#[inline]
pub fn accelerate(velocity: Fs8_8, delta: Fs8_8, limit: Fs8_8) -> Fs8_8 {
    // Widen so a velocity at the limit cannot wrap before clamping.
    let sum = (velocity.raw() as i32 + delta.raw() as i32)
        .clamp(-(limit.raw() as i32), limit.raw() as i32);
    Fs8_8::from_raw(sum as i16)
}

/// Moves a velocity toward zero without crossing it.
#[inline]
pub fn brake(velocity: Fs8_8, force: Fs8_8) -> Fs8_8 {
    if velocity.is_positive() {
        (velocity - force).max(Fs8_8::ZERO)
    } else if velocity.is_negative() {
        (velocity + force).min(Fs8_8::ZERO)
    } else {
        velocity
    }
}

pub fn step_axis_velocity(velocity: Fs8_8, input: AxisInput, tuning: AxisTuning) -> Fs8_8 {
    match input {
        AxisInput::Negative => accelerate(velocity, -tuning.accel, tuning.speed_limit),
        AxisInput::Positive => accelerate(velocity, tuning.accel, tuning.speed_limit),
        AxisInput::Released => brake(velocity, tuning.brake),
    }
}

/// Pins a coordinate inside `[min, max]`, zeroing velocity on contact.
fn clamp_axis(position: &mut Fu8_8, velocity: &mut Fs8_8, min: u8, max: u8) {
    let min_fixed = Fu8_8::from_int(min);
    let max_fixed = Fu8_8::from_int(max);
    if *position < min_fixed {
        *position = min_fixed;
        *velocity = Fs8_8::ZERO;
    } else if *position > max_fixed {
        *position = max_fixed;
        *velocity = Fs8_8::ZERO;
    }
}

/// Advances the animation counter while moving; idle always shows frame 0.
pub fn tick_animation(entity: &mut Entity, moving: bool) {
    if moving {
        entity.anim_counter = entity.anim_counter.wrapping_add(1);
        if entity.anim_counter > ANIM_THRESHOLD {
            entity.anim_counter = 0;
            entity.anim_frame ^= 1;
        }
    } else {
        entity.anim_counter = 0;
        entity.anim_frame = 0;
    }
}

/// Top-down player movement: accelerate, brake, integrate, then hard walls.
pub fn update_player(player: &mut Entity, input: &FrameInput, bounds: Bounds) {
    let horizontal = AxisInput::from_pad(input, PAD_LEFT, PAD_RIGHT);
    let vertical = AxisInput::from_pad(input, PAD_UP, PAD_DOWN);

    player.vel_x = step_axis_velocity(player.vel_x, horizontal, PLAYER_TUNING);
    player.vel_y = step_axis_velocity(player.vel_y, vertical, PLAYER_TUNING);

    match horizontal {
        AxisInput::Negative => player.facing_left = true,
        AxisInput::Positive => player.facing_left = false,
        AxisInput::Released => {}
    }

    player.x += player.vel_x;
    player.y += player.vel_y;

    clamp_axis(&mut player.x, &mut player.vel_x, bounds.min_x, bounds.max_x);
    clamp_axis(&mut player.y, &mut player.vel_y, bounds.min_y, bounds.max_y);

    let moving = horizontal != AxisInput::Released || vertical != AxisInput::Released;
    tick_animation(player, moving);
}

fn chase_axis(position: Fu8_8, target: Fu8_8, velocity: Fs8_8) -> Fs8_8 {
    if position < target {
        accelerate(velocity, ENEMY_ACCEL, ENEMY_MAX_SPEED)
    } else if position > target {
        accelerate(velocity, -ENEMY_ACCEL, ENEMY_MAX_SPEED)
    } else {
        velocity
    }
}

/// Reverses and halves a velocity heading out past a soft border.
fn soft_bounce(position: Fu8_8, velocity: Fs8_8, min: u8, max: u8) -> Fs8_8 {
    let heading_out = (position < Fu8_8::from_int(min) && velocity.is_negative())
        || (position > Fu8_8::from_int(max) && velocity.is_positive());
    if heading_out {
        -velocity.half()
    } else {
        velocity
    }
}

/// Pure pursuit of the player's body region with a soft screen border.
pub fn update_enemy(enemy: &mut Entity, player: &Entity) {
    let target_x = player.x;
    let target_y = player.y + Fs8_8::from_int(ENEMY_BODY_OFFSET as i8);

    enemy.vel_x = chase_axis(enemy.x, target_x, enemy.vel_x);
    enemy.vel_y = chase_axis(enemy.y, target_y, enemy.vel_y);

    enemy.vel_x = soft_bounce(enemy.x, enemy.vel_x, ENEMY_SOFT_MIN_X, ENEMY_SOFT_MAX_X);
    enemy.vel_y = soft_bounce(enemy.y, enemy.vel_y, ENEMY_SOFT_MIN_Y, ENEMY_SOFT_MAX_Y);

    enemy.x += enemy.vel_x;
    enemy.y += enemy.vel_y;

    let moving = !enemy.vel_x.is_zero() || !enemy.vel_y.is_zero();
    tick_animation(enemy, moving);
}
