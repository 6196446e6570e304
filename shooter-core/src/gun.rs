//! Zapper hit test.
//!
//! The light gun only reports whether its photodiode saw a bright area during
//! the frame on screen. A shot therefore blanks the scene, draws a single
//! target box over one enemy, waits for that frame to be displayed, then
//! samples the sensor. Candidates are tried in slot order until one is hit or
//! none remain.
//!
//! Frame accounting for a pull with at least one enemy active:
//!
//! | frame | work |
//! |-------|------|
//! | N     | trigger edge: spend ammo, normal update |
//! | N+1   | draw target box for candidate `i` only |
//! | N+2   | read sensor; on a miss draw candidate `j > i` and repeat |

use serde::{Deserialize, Serialize};

use crate::entity::{EntityKind, EntityPool};
use crate::input::FrameInput;
use crate::presentation::{Hardware, SpriteId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTest {
    #[default]
    Idle,
    /// Next frame shows the target box for the first active enemy at or
    /// after this slot.
    AwaitDrawFrame(usize),
    /// The displayed frame holds the target box for this slot.
    AwaitSensorFrame(usize),
}

/// What the gun did this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GunReport {
    pub fired: bool,
    /// Slot of the enemy that was shot down.
    pub hit: Option<usize>,
    /// The frame showed only a target box; skip the rest of the update.
    pub frame_consumed: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LightGun {
    phase: HitTest,
}

impl LightGun {
    pub fn phase(&self) -> HitTest {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != HitTest::Idle
    }

    pub fn reset(&mut self) {
        self.phase = HitTest::Idle;
    }

    /// Advances the hit test by one frame. Spends one unit of `ammo` on a
    /// fresh trigger pull; an empty gun does nothing.
    pub fn update<H>(
        &mut self,
        hw: &mut H,
        input: &FrameInput,
        pool: &mut EntityPool,
        ammo: &mut u8,
    ) -> GunReport
    where
        H: Hardware + ?Sized,
    {
        let mut report = GunReport::default();
        match self.phase {
            HitTest::Idle => {
                if !input.trigger_pressed || *ammo == 0 {
                    return report;
                }
                *ammo -= 1;
                hw.draw_ammo_slot(*ammo, false);
                report.fired = true;
                if let Some(index) = pool.next_active(EntityKind::Enemy, 0) {
                    self.phase = HitTest::AwaitDrawFrame(index);
                }
                tracing::debug!(ammo = *ammo, phase = ?self.phase, "gun fired");
            }
            HitTest::AwaitDrawFrame(start) => {
                report.frame_consumed = self.draw_candidate(hw, pool, start);
            }
            HitTest::AwaitSensorFrame(index) => {
                if hw.read_sensor() {
                    self.phase = HitTest::Idle;
                    if let Some(enemy) = pool.get_mut(index) {
                        if enemy.is_active_kind(EntityKind::Enemy) {
                            enemy.deactivate();
                            report.hit = Some(index);
                            tracing::debug!(slot = index, "enemy shot");
                        }
                    }
                } else {
                    report.frame_consumed = self.draw_candidate(hw, pool, index + 1);
                }
            }
        }
        report
    }

    fn draw_candidate<H>(&mut self, hw: &mut H, pool: &EntityPool, start: usize) -> bool
    where
        H: Hardware + ?Sized,
    {
        let candidate = pool
            .next_active(EntityKind::Enemy, start)
            .and_then(|index| pool.get(index).map(|enemy| (index, enemy)));
        match candidate {
            Some((index, enemy)) => {
                hw.draw_metasprite(enemy.screen_x(), enemy.screen_y(), SpriteId::TargetBox);
                self.phase = HitTest::AwaitSensorFrame(index);
                true
            }
            None => {
                self.phase = HitTest::Idle;
                false
            }
        }
    }
}
