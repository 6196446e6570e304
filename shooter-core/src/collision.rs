//! Axis-aligned overlap tests on integer screen coordinates.

use crate::constants::{
    ENEMY_HITBOX, PICKUP_SIZE, PLAYER_FEET_OFFSET, PLAYER_HEIGHT, PLAYER_WIDTH,
};
use crate::entity::Entity;

/// Rectangle in screen pixels. Widened to `i16` so edges past 255 don't wrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i16,
    pub y: i16,
    pub w: i16,
    pub h: i16,
}

impl Rect {
    pub const fn new(x: u8, y: u8, w: u8, h: u8) -> Self {
        Self {
            x: x as i16,
            y: y as i16,
            w: w as i16,
            h: h as i16,
        }
    }

    /// Edges that touch count as contact.
    pub fn touches(&self, other: &Rect) -> bool {
        self.x + self.w >= other.x
            && self.x <= other.x + other.w
            && self.y + self.h >= other.y
            && self.y <= other.y + other.h
    }

    /// Strict overlap: not left-of, right-of, above or below.
    pub fn intersects(&self, other: &Rect) -> bool {
        let left_of = self.x + self.w <= other.x;
        let right_of = self.x >= other.x + other.w;
        let above = self.y + self.h <= other.y;
        let below = self.y >= other.y + other.h;
        !(left_of || right_of || above || below)
    }

    pub fn contains_point(&self, px: i16, py: i16) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

/// The 8x8 region below the player's origin that enemies can touch.
pub fn player_feet_box(player: &Entity) -> Rect {
    Rect::new(
        player.screen_x(),
        player.screen_y().wrapping_add(PLAYER_FEET_OFFSET),
        ENEMY_HITBOX,
        ENEMY_HITBOX,
    )
}

pub fn player_body_box(player: &Entity) -> Rect {
    Rect::new(player.screen_x(), player.screen_y(), PLAYER_WIDTH, PLAYER_HEIGHT)
}

pub fn enemy_box(enemy: &Entity) -> Rect {
    Rect::new(enemy.screen_x(), enemy.screen_y(), ENEMY_HITBOX, ENEMY_HITBOX)
}

pub fn pickup_box(pickup: &Entity) -> Rect {
    Rect::new(pickup.screen_x(), pickup.screen_y(), PICKUP_SIZE, PICKUP_SIZE)
}

/// Inclusive test:
/// `p.x+8 >= e.x && p.x <= e.x+8 && p.y+24 >= e.y && p.y+16 <= e.y+8`.
pub fn player_hits_enemy(player: &Entity, enemy: &Entity) -> bool {
    player_feet_box(player).touches(&enemy_box(enemy))
}

pub fn player_collects_pickup(player: &Entity, pickup: &Entity) -> bool {
    player_body_box(player).intersects(&pickup_box(pickup))
}
