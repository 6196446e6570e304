use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::collision::{player_collects_pickup, player_hits_enemy};
use crate::constants::{
    AMMO_SPAWN_FRAMES, BRIGHTNESS_NORMAL, ENEMY_SPAWN_FRAMES, GAMEOVER_COOLDOWN_FRAMES,
    HUD_HIGH_SCORE_COLUMN, HUD_ROW, HUD_SCORE_COLUMN, MAX_AMMO, MAX_ENEMIES, NUM_ENTITIES,
    PLAYER_SPEED_LIMIT, PLAYER_START_X, PLAYER_START_Y, SCORE_MAX, STARTING_AMMO,
    TUTORIAL_FLOOR, TUTORIAL_START_X, TUTORIAL_START_Y,
};
use crate::entity::{Entity, EntityKind, EntityPool};
use crate::error::{RuleCode, RuleViolation};
use crate::fixed_point::Fu8_8;
use crate::gun::{HitTest, LightGun};
use crate::input::{FrameInput, InputLatch, PAD_SELECT};
use crate::motion::{update_enemy, update_player, Bounds, PLAYER_BOUNDS};
use crate::presentation::{Hardware, Presentation, Screen, SpriteId};
use crate::rng::SeededRng;
use crate::spawn::{try_spawn, SpawnContext};
use crate::text::{glyphs, score_field, TextWriter};

mod game;

use game::SimulationState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Title,
    Tutorial,
    Gameplay,
    GameOver,
}

impl GameState {
    pub fn screen(self) -> Screen {
        match self {
            Self::Title => Screen::Title,
            Self::Tutorial => Screen::Tutorial,
            Self::Gameplay => Screen::Gameplay,
            Self::GameOver => Screen::GameOver,
        }
    }
}

/// Player bounds while the instruction text is on screen.
pub const TUTORIAL_BOUNDS: Bounds = Bounds {
    min_y: TUTORIAL_FLOOR,
    ..PLAYER_BOUNDS
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSnapshot {
    pub slot: usize,
    pub entity: Entity,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub game_state: GameState,
    pub frame_ticks: u32,
    pub state_ticks: u16,
    pub score: u16,
    pub high_score: u16,
    pub ammo: u8,
    pub enemy_spawn_timer: u16,
    pub ammo_spawn_timer: u16,
    pub rng_state: u32,
    pub hit_test: HitTest,
    pub player: Entity,
    /// Active slots only, in slot order.
    pub entities: Vec<SlotSnapshot>,
}

impl SimulationSnapshot {
    pub fn enemies(&self) -> impl Iterator<Item = &SlotSnapshot> {
        self.entities
            .iter()
            .filter(|entry| entry.entity.kind == EntityKind::Enemy)
    }

    pub fn pickups(&self) -> impl Iterator<Item = &SlotSnapshot> {
        self.entities
            .iter()
            .filter(|entry| entry.entity.kind == EntityKind::Ammo)
    }
}

/// The whole game, advanced one video frame at a time.
pub struct Simulation {
    state: SimulationState,
}

impl Simulation {
    /// Boots into the title screen.
    pub fn power_on<H: Hardware + ?Sized>(hw: &mut H) -> Self {
        let mut state = SimulationState::new();
        state.enter(hw, GameState::Title);
        Self { state }
    }

    #[inline]
    pub fn advance_one_frame<H: Hardware + ?Sized>(&mut self, hw: &mut H) {
        self.state.step(hw);
    }

    /// Advances a frame and then checks every invariant.
    pub fn advance_checked<H: Hardware + ?Sized>(
        &mut self,
        hw: &mut H,
    ) -> Result<(), RuleViolation> {
        self.state.step(hw);
        self.state
            .validate_invariants()
            .map_err(|rule| RuleViolation {
                frame: self.state.frame_ticks(),
                rule,
            })
    }

    /// Writes text through the frame's shared VRAM budget.
    pub fn render_text<P: Presentation + ?Sized>(
        &mut self,
        gfx: &mut P,
        column: u8,
        row: u8,
        text: &str,
    ) {
        self.state.render_text(gfx, column, row, text);
    }

    #[inline]
    pub fn game_state(&self) -> GameState {
        self.state.game_state()
    }

    #[inline]
    pub fn frame_ticks(&self) -> u32 {
        self.state.frame_ticks()
    }

    #[inline]
    pub fn score(&self) -> u16 {
        self.state.score()
    }

    #[inline]
    pub fn high_score(&self) -> u16 {
        self.state.high_score()
    }

    #[inline]
    pub fn ammo(&self) -> u8 {
        self.state.ammo()
    }

    #[inline]
    pub fn snapshot(&self) -> SimulationSnapshot {
        self.state.snapshot()
    }

    #[inline]
    pub fn validate_invariants(&self) -> Result<(), RuleCode> {
        self.state.validate_invariants()
    }
}
