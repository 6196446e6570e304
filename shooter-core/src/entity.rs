use serde::{Deserialize, Serialize};

use crate::constants::NUM_ENTITIES;
use crate::fixed_point::{Fs8_8, Fu8_8};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityState {
    #[default]
    Unused,
    Active,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    #[default]
    None,
    Enemy,
    Ammo,
}

/// Generic physical object. The player uses the same record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub x: Fu8_8,
    pub y: Fu8_8,
    pub vel_x: Fs8_8,
    pub vel_y: Fs8_8,
    pub state: EntityState,
    pub kind: EntityKind,
    pub anim_counter: u8,
    pub anim_frame: u8,
    pub facing_left: bool,
}

impl Entity {
    pub const UNUSED: Self = Self {
        x: Fu8_8::ZERO,
        y: Fu8_8::ZERO,
        vel_x: Fs8_8::ZERO,
        vel_y: Fs8_8::ZERO,
        state: EntityState::Unused,
        kind: EntityKind::None,
        anim_counter: 0,
        anim_frame: 0,
        facing_left: false,
    };

    /// Fresh, motionless entity at an integer position.
    pub fn spawned(kind: EntityKind, x: u8, y: u8) -> Self {
        Self {
            x: Fu8_8::from_int(x),
            y: Fu8_8::from_int(y),
            state: EntityState::Active,
            kind,
            ..Self::UNUSED
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == EntityState::Active
    }

    #[inline]
    pub fn is_active_kind(&self, kind: EntityKind) -> bool {
        self.is_active() && self.kind == kind
    }

    #[inline]
    pub fn deactivate(&mut self) {
        self.state = EntityState::Unused;
    }

    #[inline]
    pub fn screen_x(&self) -> u8 {
        self.x.as_i()
    }

    #[inline]
    pub fn screen_y(&self) -> u8 {
        self.y.as_i()
    }
}

/// Fixed-capacity slot pool. Unused slots are tombstones and get reused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityPool {
    slots: [Entity; NUM_ENTITIES],
}

impl Default for EntityPool {
    fn default() -> Self {
        Self {
            slots: [Entity::UNUSED; NUM_ENTITIES],
        }
    }
}

impl EntityPool {
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.deactivate();
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.slots.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.slots.get_mut(index)
    }

    pub fn slots(&self) -> &[Entity] {
        &self.slots
    }

    pub fn count_active(&self, kind: EntityKind) -> usize {
        self.slots
            .iter()
            .filter(|entity| entity.is_active_kind(kind))
            .count()
    }

    /// First active slot of `kind` at or after `start`.
    pub fn next_active(&self, kind: EntityKind, start: usize) -> Option<usize> {
        (start..NUM_ENTITIES).find(|&index| self.slots[index].is_active_kind(kind))
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Entity)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, entity)| entity.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_entity_is_active_and_still() {
        let entity = Entity::spawned(EntityKind::Enemy, 40, 50);
        assert!(entity.is_active_kind(EntityKind::Enemy));
        assert_eq!(entity.screen_x(), 40);
        assert_eq!(entity.screen_y(), 50);
        assert!(entity.vel_x.is_zero() && entity.vel_y.is_zero());
        assert_eq!((entity.anim_counter, entity.anim_frame), (0, 0));
    }

    #[test]
    fn clear_tombstones_every_slot() {
        let mut pool = EntityPool::default();
        for index in 0..3 {
            if let Some(slot) = pool.get_mut(index) {
                *slot = Entity::spawned(EntityKind::Enemy, 10, 10);
            }
        }
        assert_eq!(pool.count_active(EntityKind::Enemy), 3);
        pool.clear();
        assert_eq!(pool.iter_active().count(), 0);
    }

    #[test]
    fn next_active_skips_other_kinds() {
        let mut pool = EntityPool::default();
        if let Some(slot) = pool.get_mut(1) {
            *slot = Entity::spawned(EntityKind::Ammo, 0, 0);
        }
        if let Some(slot) = pool.get_mut(4) {
            *slot = Entity::spawned(EntityKind::Enemy, 0, 0);
        }
        assert_eq!(pool.next_active(EntityKind::Enemy, 0), Some(4));
        assert_eq!(pool.next_active(EntityKind::Enemy, 5), None);
        assert_eq!(pool.next_active(EntityKind::Ammo, 0), Some(1));
    }
}
