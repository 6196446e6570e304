use crate::fixed_point::Fs8_8;

// Screen
pub const SCREEN_WIDTH: u16 = 256;
pub const SCREEN_HEIGHT: u16 = 240;

// Pools and caps
pub const NUM_ENTITIES: usize = 8;
pub const MAX_ENEMIES: u8 = 4;
pub const MAX_AMMO: u8 = 10;
pub const STARTING_AMMO: u8 = 5;
pub const SCORE_MAX: u16 = 999;

// Player physics (shooter)
pub const PLAYER_ACCEL: Fs8_8 = Fs8_8::lit("0.15");
pub const PLAYER_SPEED_LIMIT: Fs8_8 = Fs8_8::lit("2.5");
pub const PLAYER_BRAKE: Fs8_8 = Fs8_8::lit("0.35");

// Player hard walls. The sprite is 16 wide and 32 tall, with a few pixels of
// overhang that the metasprite draws past its origin.
pub const WALL_OFFSET: u8 = 16;
pub const PLAYER_MIN_X: u8 = WALL_OFFSET;
pub const PLAYER_MAX_X: u8 = (SCREEN_WIDTH - WALL_OFFSET as u16 - 16 - 3) as u8;
pub const PLAYER_MIN_Y: u8 = WALL_OFFSET;
pub const PLAYER_MAX_Y: u8 = (SCREEN_HEIGHT - 32 - 8 - 3) as u8;
// Keeps the player below the instruction text while in the tutorial.
pub const TUTORIAL_FLOOR: u8 = 112;

pub const PLAYER_START_X: u8 = 120;
pub const PLAYER_START_Y: u8 = 104;
pub const TUTORIAL_START_X: u8 = 120;
pub const TUTORIAL_START_Y: u8 = 150;

// Enemy pursuit
pub const ENEMY_ACCEL: Fs8_8 = Fs8_8::lit("0.05");
pub const ENEMY_MAX_SPEED: Fs8_8 = Fs8_8::lit("1.0");
// Enemies chase the player's body, not the head at the sprite origin.
pub const ENEMY_BODY_OFFSET: u8 = 16;
pub const ENEMY_SOFT_MIN_X: u8 = 8;
pub const ENEMY_SOFT_MAX_X: u8 = 240;
pub const ENEMY_SOFT_MIN_Y: u8 = 8;
pub const ENEMY_SOFT_MAX_Y: u8 = 224;

// Animation
pub const ANIM_THRESHOLD: u8 = 5;

// Spawning
pub const ENEMY_SPAWN_FRAMES: u16 = 90;
pub const AMMO_SPAWN_FRAMES: u16 = 300;
pub const QUADRANT_WIDTH: u8 = 128;
pub const QUADRANT_HEIGHT: u8 = 120;
pub const SPAWN_MARGIN: u8 = 16;
pub const SPAWN_AREA_WIDTH: u8 = QUADRANT_WIDTH - SPAWN_MARGIN;
pub const SPAWN_AREA_HEIGHT: u8 = QUADRANT_HEIGHT - SPAWN_MARGIN;

// Hitboxes
pub const ENEMY_HITBOX: u8 = 8;
pub const PLAYER_FEET_OFFSET: u8 = 16;
pub const PLAYER_WIDTH: u8 = 16;
pub const PLAYER_HEIGHT: u8 = 32;
pub const PICKUP_SIZE: u8 = 8;
pub const TARGET_BOX_SIZE: u8 = 16;

// State machine
pub const GAMEOVER_COOLDOWN_FRAMES: u16 = 60;
pub const BRIGHTNESS_NORMAL: u8 = 4;

// HUD layout (nametable tile coordinates)
pub const HUD_ROW: u8 = 1;
pub const HUD_SCORE_COLUMN: u8 = 2;
pub const HUD_HIGH_SCORE_COLUMN: u8 = 22;

// VRAM staging buffer shared with the NMI handler
pub const VRAM_BUFFER_SIZE: u8 = 128;
pub const GLYPH_STAGING_BYTES: u8 = 12;
pub const VRAM_FLUSH_THRESHOLD: u8 = VRAM_BUFFER_SIZE - 14;
pub const TEXT_WRAP_COLUMN: u8 = 31;
pub const GLYPH_ROWS: u8 = 3;
