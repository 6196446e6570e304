//! Seams to the rendering and input hardware.
//!
//! The simulation never touches PPU registers, OAM or the VRAM buffer
//! directly; it emits requests through [`Presentation`] and samples the
//! controller and Zapper through [`InputPort`].

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::text::Glyph;

/// Metasprite frames the simulation can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Player { frame: u8, flipped: bool },
    Enemy { frame: u8 },
    AmmoPickup,
    /// Solid 16x16 box drawn over a single enemy for the light-gun test.
    TargetBox,
    /// Jump demo character.
    Jumper { frame: u8 },
}

/// Full-screen backgrounds loaded on state entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Title,
    Tutorial,
    Gameplay,
    GameOver,
    /// Scrolling backdrop of the jump demo.
    Demo,
}

pub trait Presentation {
    fn draw_metasprite(&mut self, x: u8, y: u8, sprite: SpriteId);
    fn clear_sprites(&mut self);
    fn show_screen(&mut self, screen: Screen);
    fn set_scroll(&mut self, x: u8, y: u8);
    fn set_brightness(&mut self, level: u8);
    /// Stages one 2x3 font glyph at a nametable tile coordinate.
    fn draw_glyph(&mut self, column: u8, row: u8, glyph: Glyph);
    fn draw_ammo_slot(&mut self, slot: u8, filled: bool);
    /// Drains staged tile writes, blocking until the next NMI if needed.
    fn flush_pending_draws(&mut self);
}

pub trait InputPort {
    /// Held controller buttons as a `PAD_*` mask.
    fn read_pad(&mut self) -> u8;
    fn read_trigger(&mut self) -> bool;
    /// Whether the Zapper saw light during the frame just displayed.
    fn read_sensor(&mut self) -> bool;
}

/// Everything the simulation drives in one frame.
pub trait Hardware: Presentation + InputPort {}

impl<T: Presentation + InputPort + ?Sized> Hardware for T {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawCommand {
    Sprite { x: u8, y: u8, sprite: SpriteId },
    ClearSprites,
    Screen(Screen),
    Scroll { x: u8, y: u8 },
    Brightness(u8),
    Glyph { column: u8, row: u8, glyph: Glyph },
    AmmoSlot { slot: u8, filled: bool },
    Flush,
}

/// Records draw requests per frame; `present` latches what the TV shows.
#[derive(Clone, Debug, Default)]
pub struct FrameRecorder {
    pending: Vec<DrawCommand>,
    displayed: Vec<DrawCommand>,
}

impl FrameRecorder {
    /// Commands issued since the last `present`.
    pub fn frame(&self) -> &[DrawCommand] {
        &self.pending
    }

    pub fn displayed(&self) -> &[DrawCommand] {
        &self.displayed
    }

    /// Vertical blank: the pending frame becomes the displayed one.
    pub fn present(&mut self) {
        self.displayed.clear();
        self.displayed.append(&mut self.pending);
    }

    /// Sprites still in OAM at the end of the displayed frame.
    pub fn visible_sprites(&self) -> Vec<(u8, u8, SpriteId)> {
        let mut sprites = Vec::new();
        for command in &self.displayed {
            match *command {
                DrawCommand::ClearSprites => sprites.clear(),
                DrawCommand::Sprite { x, y, sprite } => sprites.push((x, y, sprite)),
                _ => {}
            }
        }
        sprites
    }
}

impl Presentation for FrameRecorder {
    fn draw_metasprite(&mut self, x: u8, y: u8, sprite: SpriteId) {
        self.pending.push(DrawCommand::Sprite { x, y, sprite });
    }

    fn clear_sprites(&mut self) {
        self.pending.push(DrawCommand::ClearSprites);
    }

    fn show_screen(&mut self, screen: Screen) {
        self.pending.push(DrawCommand::Screen(screen));
    }

    fn set_scroll(&mut self, x: u8, y: u8) {
        self.pending.push(DrawCommand::Scroll { x, y });
    }

    fn set_brightness(&mut self, level: u8) {
        self.pending.push(DrawCommand::Brightness(level));
    }

    fn draw_glyph(&mut self, column: u8, row: u8, glyph: Glyph) {
        self.pending.push(DrawCommand::Glyph { column, row, glyph });
    }

    fn draw_ammo_slot(&mut self, slot: u8, filled: bool) {
        self.pending.push(DrawCommand::AmmoSlot { slot, filled });
    }

    fn flush_pending_draws(&mut self) {
        self.pending.push(DrawCommand::Flush);
    }
}

/// Console with input set by the caller before each frame.
#[derive(Clone, Debug, Default)]
pub struct ScriptedConsole {
    pub recorder: FrameRecorder,
    pub pad: u8,
    pub trigger: bool,
    pub sensor: bool,
}

impl ScriptedConsole {
    pub fn set_input(&mut self, pad: u8, trigger: bool) {
        self.pad = pad;
        self.trigger = trigger;
    }
}

impl Presentation for ScriptedConsole {
    fn draw_metasprite(&mut self, x: u8, y: u8, sprite: SpriteId) {
        self.recorder.draw_metasprite(x, y, sprite);
    }

    fn clear_sprites(&mut self) {
        self.recorder.clear_sprites();
    }

    fn show_screen(&mut self, screen: Screen) {
        self.recorder.show_screen(screen);
    }

    fn set_scroll(&mut self, x: u8, y: u8) {
        self.recorder.set_scroll(x, y);
    }

    fn set_brightness(&mut self, level: u8) {
        self.recorder.set_brightness(level);
    }

    fn draw_glyph(&mut self, column: u8, row: u8, glyph: Glyph) {
        self.recorder.draw_glyph(column, row, glyph);
    }

    fn draw_ammo_slot(&mut self, slot: u8, filled: bool) {
        self.recorder.draw_ammo_slot(slot, filled);
    }

    fn flush_pending_draws(&mut self) {
        self.recorder.flush_pending_draws();
    }
}

impl InputPort for ScriptedConsole {
    fn read_pad(&mut self) -> u8 {
        self.pad
    }

    fn read_trigger(&mut self) -> bool {
        self.trigger
    }

    fn read_sensor(&mut self) -> bool {
        self.sensor
    }
}
