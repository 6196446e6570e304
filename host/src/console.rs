use genie_shooter_core::collision::Rect;
use genie_shooter_core::constants::TARGET_BOX_SIZE;
use genie_shooter_core::text::Glyph;
use genie_shooter_core::{DrawCommand, FrameRecorder, InputPort, Presentation, Screen, SpriteId};
use serde::Serialize;

use crate::tape::TapeFrame;

/// Totals of everything the simulation asked the PPU to do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DrawStats {
    pub frames: u32,
    pub sprites: u32,
    pub target_boxes: u32,
    pub glyphs: u32,
    pub flushes: u32,
    pub ammo_slot_updates: u32,
    pub screen_switches: u32,
}

impl DrawStats {
    fn tally(&mut self, commands: &[DrawCommand]) {
        self.frames += 1;
        for command in commands {
            match command {
                DrawCommand::Sprite { sprite, .. } => {
                    self.sprites += 1;
                    if *sprite == SpriteId::TargetBox {
                        self.target_boxes += 1;
                    }
                }
                DrawCommand::Glyph { .. } => self.glyphs += 1,
                DrawCommand::Flush => self.flushes += 1,
                DrawCommand::AmmoSlot { .. } => self.ammo_slot_updates += 1,
                DrawCommand::Screen(_) => self.screen_switches += 1,
                DrawCommand::ClearSprites
                | DrawCommand::Scroll { .. }
                | DrawCommand::Brightness(_) => {}
            }
        }
    }
}

/// A console with no screen. The Zapper is emulated against the frame that
/// was last presented.
#[derive(Clone, Debug, Default)]
pub struct HeadlessConsole {
    recorder: FrameRecorder,
    input: TapeFrame,
    stats: DrawStats,
}

impl HeadlessConsole {
    pub fn set_input(&mut self, input: TapeFrame) {
        self.input = input;
    }

    /// Ends the frame: what was drawn becomes what the gun can see.
    pub fn present(&mut self) {
        self.stats.tally(self.recorder.frame());
        self.recorder.present();
    }

    pub fn recorder(&self) -> &FrameRecorder {
        &self.recorder
    }

    pub fn stats(&self) -> DrawStats {
        self.stats
    }

    /// Light reaches the diode only when the lone sprite on screen is a
    /// target box under the aim point.
    fn sensor_sees_light(&self) -> bool {
        let sprites = self.recorder.visible_sprites();
        match sprites.as_slice() {
            [(x, y, SpriteId::TargetBox)] => {
                Rect::new(*x, *y, TARGET_BOX_SIZE, TARGET_BOX_SIZE)
                    .contains_point(self.input.aim_x as i16, self.input.aim_y as i16)
            }
            _ => false,
        }
    }
}

impl Presentation for HeadlessConsole {
    fn draw_metasprite(&mut self, x: u8, y: u8, sprite: SpriteId) {
        self.recorder.draw_metasprite(x, y, sprite);
    }

    fn clear_sprites(&mut self) {
        self.recorder.clear_sprites();
    }

    fn show_screen(&mut self, screen: Screen) {
        tracing::trace!(?screen, "screen switch");
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

impl InputPort for HeadlessConsole {
    fn read_pad(&mut self) -> u8 {
        self.input.pad
    }

    fn read_trigger(&mut self) -> bool {
        self.input.trigger
    }

    fn read_sensor(&mut self) -> bool {
        self.sensor_sees_light()
    }
}
