//! Deterministic bots that produce tape frames from simulation snapshots.

use genie_shooter_core::constants::{MAX_AMMO, PLAYER_START_X, PLAYER_START_Y};
use genie_shooter_core::entity::Entity;
use genie_shooter_core::gun::HitTest;
use genie_shooter_core::input::{PAD_DOWN, PAD_LEFT, PAD_RIGHT, PAD_START, PAD_UP};
use genie_shooter_core::sim::SlotSnapshot;
use genie_shooter_core::{GameState, SimulationSnapshot};

use crate::config::MIN_FIRE_INTERVAL;
use crate::tape::TapeFrame;

/// Distance under which the player does not bother steering.
const STEER_DEADZONE: i16 = 2;

pub trait AutopilotBot {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn reset(&mut self);
    fn next_frame(&mut self, world: &SimulationSnapshot) -> TapeFrame;
}

pub fn bot_ids() -> Vec<&'static str> {
    vec!["hunter", "dodger"]
}

pub fn create_bot(id: &str, fire_interval: u32) -> Option<Box<dyn AutopilotBot>> {
    match id {
        "hunter" => Some(Box::new(HunterBot::new(fire_interval))),
        "dodger" => Some(Box::new(DodgerBot::default())),
        _ => None,
    }
}

/// Presses START every other frame so each press is a fresh edge.
fn menu_frame(world: &SimulationSnapshot) -> TapeFrame {
    let pad = if world.frame_ticks % 2 == 0 { PAD_START } else { 0 };
    TapeFrame::buttons(pad)
}

fn centre(entity: &Entity) -> (i16, i16) {
    (entity.screen_x() as i16 + 8, entity.screen_y() as i16 + 8)
}

fn distance_sq(a: (i16, i16), b: (i16, i16)) -> i32 {
    let dx = (a.0 - b.0) as i32;
    let dy = (a.1 - b.1) as i32;
    dx * dx + dy * dy
}

/// Pad bits that push the player from `from` toward `to`.
fn steer(from: (i16, i16), to: (i16, i16)) -> u8 {
    let mut pad = 0;
    if to.0 > from.0 + STEER_DEADZONE {
        pad |= PAD_RIGHT;
    } else if to.0 < from.0 - STEER_DEADZONE {
        pad |= PAD_LEFT;
    }
    if to.1 > from.1 + STEER_DEADZONE {
        pad |= PAD_DOWN;
    } else if to.1 < from.1 - STEER_DEADZONE {
        pad |= PAD_UP;
    }
    pad
}

/// Pad bits that push the player directly away from `threat`.
fn flee(from: (i16, i16), threat: (i16, i16)) -> u8 {
    let mirrored = (2 * from.0 - threat.0, 2 * from.1 - threat.1);
    steer(from, mirrored)
}

fn nearest_enemy(world: &SimulationSnapshot) -> Option<&SlotSnapshot> {
    let player = centre(&world.player);
    world
        .enemies()
        .min_by_key(|entry| (distance_sq(player, centre(&entry.entity)), entry.slot))
}

/// Moves toward ammo when it can carry more, otherwise away from the closest
/// enemy, otherwise back to the middle of the arena.
fn movement(world: &SimulationSnapshot) -> u8 {
    let player = centre(&world.player);
    if world.ammo < MAX_AMMO {
        if let Some(pickup) = world.pickups().next() {
            return steer(player, centre(&pickup.entity));
        }
    }
    match nearest_enemy(world) {
        Some(enemy) => flee(player, centre(&enemy.entity)),
        None => steer(player, (PLAYER_START_X as i16 + 8, PLAYER_START_Y as i16 + 8)),
    }
}

/// Shoots the nearest enemy whenever the gun is ready.
#[derive(Clone, Debug)]
pub struct HunterBot {
    fire_interval: u32,
    since_fire: u32,
    target: Option<usize>,
}

impl HunterBot {
    pub fn new(fire_interval: u32) -> Self {
        Self {
            fire_interval: fire_interval.max(MIN_FIRE_INTERVAL),
            since_fire: 0,
            target: None,
        }
    }

    fn aim_at(world: &SimulationSnapshot, slot: usize) -> (u8, u8) {
        world
            .entities
            .iter()
            .find(|entry| entry.slot == slot)
            .map(|entry| {
                (
                    entry.entity.screen_x().saturating_add(8),
                    entry.entity.screen_y().saturating_add(8),
                )
            })
            .unwrap_or((0, 0))
    }
}

impl AutopilotBot for HunterBot {
    fn id(&self) -> &'static str {
        "hunter"
    }

    fn description(&self) -> &'static str {
        "collects ammo, dodges and shoots the nearest enemy"
    }

    fn reset(&mut self) {
        self.since_fire = 0;
        self.target = None;
    }

    fn next_frame(&mut self, world: &SimulationSnapshot) -> TapeFrame {
        if world.game_state != GameState::Gameplay {
            self.reset();
            return menu_frame(world);
        }

        self.since_fire = self.since_fire.saturating_add(1);
        let mut frame = TapeFrame::buttons(movement(world));

        if world.hit_test != HitTest::Idle {
            // Keep the gun on the chosen enemy until the test resolves.
            if let Some(slot) = self.target {
                (frame.aim_x, frame.aim_y) = Self::aim_at(world, slot);
            }
            return frame;
        }

        self.target = None;
        if world.ammo > 0 && self.since_fire >= self.fire_interval {
            if let Some(enemy) = nearest_enemy(world) {
                self.target = Some(enemy.slot);
                self.since_fire = 0;
                frame.trigger = true;
                (frame.aim_x, frame.aim_y) = Self::aim_at(world, enemy.slot);
            }
        }
        frame
    }
}

/// Never fires; only runs from enemies and picks up ammo.
#[derive(Clone, Debug, Default)]
pub struct DodgerBot;

impl AutopilotBot for DodgerBot {
    fn id(&self) -> &'static str {
        "dodger"
    }

    fn description(&self) -> &'static str {
        "never fires, survives as long as it can"
    }

    fn reset(&mut self) {}

    fn next_frame(&mut self, world: &SimulationSnapshot) -> TapeFrame {
        if world.game_state != GameState::Gameplay {
            return menu_frame(world);
        }
        TapeFrame::buttons(movement(world))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steer_respects_deadzone() {
        assert_eq!(steer((100, 100), (101, 99)), 0);
        assert_eq!(steer((100, 100), (120, 80)), PAD_RIGHT | PAD_UP);
        assert_eq!(steer((100, 100), (90, 130)), PAD_LEFT | PAD_DOWN);
    }

    #[test]
    fn flee_points_away_from_threat() {
        assert_eq!(flee((100, 100), (120, 100)), PAD_LEFT);
        assert_eq!(flee((100, 100), (100, 60)), PAD_DOWN);
    }

    #[test]
    fn hunter_keeps_a_released_frame_between_pulls() {
        assert_eq!(HunterBot::new(0).fire_interval, MIN_FIRE_INTERVAL);
        assert_eq!(HunterBot::new(30).fire_interval, 30);
    }

    #[test]
    fn known_bots_are_constructible() {
        for id in bot_ids() {
            let bot = create_bot(id, 10).expect("listed bot");
            assert_eq!(bot.id(), id);
        }
        assert!(create_bot("nobody", 10).is_none());
    }
}
