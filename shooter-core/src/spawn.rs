//! Spawn director: picks a quadrant away from the player and fills a free slot.

use crate::constants::{
    MAX_AMMO, MAX_ENEMIES, NUM_ENTITIES, QUADRANT_HEIGHT, QUADRANT_WIDTH, SPAWN_AREA_HEIGHT,
    SPAWN_AREA_WIDTH, SPAWN_MARGIN,
};
use crate::entity::{Entity, EntityKind, EntityPool};
use crate::rng::SeededRng;

/// Quadrant coordinates on the 2x2 screen grid, `(x_region, y_region)`.
pub type Quadrant = (u8, u8);

/// `[x_region][y_region]` -> the three other quadrants.
pub const SPAWN_REGIONS: [[[Quadrant; 3]; 2]; 2] = [
    [
        [(1, 0), (0, 1), (1, 1)],
        [(0, 0), (1, 0), (1, 1)],
    ],
    [
        [(0, 0), (0, 1), (1, 1)],
        [(0, 0), (1, 0), (0, 1)],
    ],
];

/// Top-left corner of the spawn area inside a quadrant.
pub const fn quadrant_anchor(quadrant: Quadrant) -> (u8, u8) {
    (
        quadrant.0 * QUADRANT_WIDTH + SPAWN_MARGIN / 2,
        quadrant.1 * QUADRANT_HEIGHT + SPAWN_MARGIN / 2,
    )
}

pub fn quadrant_of(x: u8, y: u8) -> Quadrant {
    ((x / QUADRANT_WIDTH).min(1), (y / QUADRANT_HEIGHT).min(1))
}

/// What the director needs to know to apply per-kind caps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnContext {
    pub player_x: u8,
    pub player_y: u8,
    pub ammo: u8,
}

fn cap_allows(kind: EntityKind, active: usize, ammo: u8) -> bool {
    match kind {
        EntityKind::Enemy => active < MAX_ENEMIES as usize,
        EntityKind::Ammo => active == 0 && ammo < MAX_AMMO,
        EntityKind::None => false,
    }
}

/// Picks a spawn point outside the player's quadrant.
pub fn pick_spawn_point(rng: &mut SeededRng, player_x: u8, player_y: u8) -> (Quadrant, u8, u8) {
    let (qx, qy) = quadrant_of(player_x, player_y);
    let choice = rng.next_u8_below(3) as usize;
    let quadrant = SPAWN_REGIONS[qx as usize][qy as usize][choice];
    let (anchor_x, anchor_y) = quadrant_anchor(quadrant);
    let x = anchor_x + rng.next_u8_below(SPAWN_AREA_WIDTH);
    let y = anchor_y + rng.next_u8_below(SPAWN_AREA_HEIGHT);
    (quadrant, x, y)
}

/// Activates one entity of `kind` if a slot is free and the cap allows it.
/// Returns the slot index on success; a refusal is silent.
pub fn try_spawn(
    pool: &mut EntityPool,
    rng: &mut SeededRng,
    kind: EntityKind,
    ctx: SpawnContext,
) -> Option<usize> {
    let mut active = 0usize;
    let mut free_slot = None;
    for index in 0..NUM_ENTITIES {
        let entity = pool.get(index)?;
        if entity.is_active_kind(kind) {
            active += 1;
        } else if !entity.is_active() && free_slot.is_none() {
            free_slot = Some(index);
        }
    }

    let slot = free_slot?;
    if !cap_allows(kind, active, ctx.ammo) {
        return None;
    }

    let (quadrant, x, y) = pick_spawn_point(rng, ctx.player_x, ctx.player_y);
    *pool.get_mut(slot)? = Entity::spawned(kind, x, y);
    tracing::debug!(?kind, slot, x, y, ?quadrant, "spawned entity");
    Some(slot)
}
