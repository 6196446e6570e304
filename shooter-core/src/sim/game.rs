use super::*;

/// `(column, row, text)` of the instructions; everything sits above the
/// tutorial floor.
const TUTORIAL_TEXT: [(u8, u8, &str); 3] = [
    (2, 3, "MOVE WITH PAD"),
    (2, 6, "SHOOT BATS"),
    (2, 9, "START TO PLAY"),
];

const GAMEOVER_TITLE: (u8, u8, &str) = (11, 8, "GAME OVER");
const GAMEOVER_SCORE: (u8, u8, &str) = (8, 14, "SCORE");

#[derive(Clone, Debug)]
pub(super) struct SimulationState {
    game_state: GameState,
    frame_ticks: u32,
    state_ticks: u16,
    score: u16,
    high_score: u16,
    ammo: u8,
    enemy_spawn_timer: u16,
    ammo_spawn_timer: u16,
    rng: SeededRng,
    latch: InputLatch,
    gun: LightGun,
    text: TextWriter,
    player: Entity,
    entities: EntityPool,
}

impl SimulationState {
    pub(super) fn new() -> Self {
        Self {
            game_state: GameState::Title,
            frame_ticks: 0,
            state_ticks: 0,
            score: 0,
            high_score: 0,
            ammo: 0,
            enemy_spawn_timer: 0,
            ammo_spawn_timer: 0,
            rng: SeededRng::new(0),
            latch: InputLatch::default(),
            gun: LightGun::default(),
            text: TextWriter::default(),
            player: Entity::UNUSED,
            entities: EntityPool::default(),
        }
    }

    #[inline]
    pub(super) fn game_state(&self) -> GameState {
        self.game_state
    }

    #[inline]
    pub(super) fn frame_ticks(&self) -> u32 {
        self.frame_ticks
    }

    #[inline]
    pub(super) fn score(&self) -> u16 {
        self.score
    }

    #[inline]
    pub(super) fn high_score(&self) -> u16 {
        self.high_score
    }

    #[inline]
    pub(super) fn ammo(&self) -> u8 {
        self.ammo
    }

    pub(super) fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            game_state: self.game_state,
            frame_ticks: self.frame_ticks,
            state_ticks: self.state_ticks,
            score: self.score,
            high_score: self.high_score,
            ammo: self.ammo,
            enemy_spawn_timer: self.enemy_spawn_timer,
            ammo_spawn_timer: self.ammo_spawn_timer,
            rng_state: self.rng.state(),
            hit_test: self.gun.phase(),
            player: self.player,
            entities: self
                .entities
                .iter_active()
                .map(|(slot, entity)| SlotSnapshot {
                    slot,
                    entity: *entity,
                })
                .collect(),
        }
    }

    pub(super) fn render_text<P: Presentation + ?Sized>(
        &mut self,
        gfx: &mut P,
        column: u8,
        row: u8,
        text: &str,
    ) {
        self.text.render_str(gfx, column, row, text);
    }

    pub(super) fn step<H: Hardware + ?Sized>(&mut self, hw: &mut H) {
        self.frame_ticks = self.frame_ticks.wrapping_add(1);
        self.state_ticks = self.state_ticks.saturating_add(1);

        let pad = hw.read_pad();
        let trigger = hw.read_trigger();
        let input = self.latch.sample(pad, trigger);

        self.text.begin_frame();
        hw.clear_sprites();

        match self.game_state {
            GameState::Title => self.update_title(hw, &input),
            GameState::Tutorial => self.update_tutorial(hw, &input),
            GameState::Gameplay => self.update_gameplay(hw, &input),
            GameState::GameOver => self.update_game_over(hw, &input),
        }
    }

    pub(super) fn enter<H: Hardware + ?Sized>(&mut self, hw: &mut H, next: GameState) {
        tracing::debug!(
            from = ?self.game_state,
            to = ?next,
            frame = self.frame_ticks,
            score = self.score,
            "state transition"
        );
        self.game_state = next;
        self.state_ticks = 0;

        match next {
            GameState::Title => {
                hw.show_screen(Screen::Title);
                hw.set_scroll(0, 0);
                hw.set_brightness(BRIGHTNESS_NORMAL);
            }
            GameState::Tutorial => {
                hw.show_screen(Screen::Tutorial);
                for (column, row, line) in TUTORIAL_TEXT {
                    self.text.render_str(hw, column, row, line);
                }
                self.player = Entity::spawned(EntityKind::None, TUTORIAL_START_X, TUTORIAL_START_Y);
            }
            GameState::Gameplay => {
                self.rng = SeededRng::new(self.frame_ticks);
                self.score = 0;
                self.ammo = STARTING_AMMO;
                self.enemy_spawn_timer = 0;
                self.ammo_spawn_timer = 0;
                self.entities.clear();
                self.gun.reset();
                self.player = Entity::spawned(EntityKind::None, PLAYER_START_X, PLAYER_START_Y);
                hw.show_screen(Screen::Gameplay);
                self.draw_hud(hw);
            }
            GameState::GameOver => {
                if self.score > self.high_score {
                    self.high_score = self.score;
                }
                self.gun.reset();
                hw.show_screen(Screen::GameOver);
                let (column, row, title) = GAMEOVER_TITLE;
                self.text.render_str(hw, column, row, title);
                let (column, row, label) = GAMEOVER_SCORE;
                self.text
                    .render(hw, column, row, glyphs(label).chain(score_field(self.score)));
            }
        }
    }

    fn update_title<H: Hardware + ?Sized>(&mut self, hw: &mut H, input: &FrameInput) {
        if input.confirm() {
            self.enter(hw, GameState::Tutorial);
        }
    }

    fn update_tutorial<H: Hardware + ?Sized>(&mut self, hw: &mut H, input: &FrameInput) {
        if input.confirm() {
            self.enter(hw, GameState::Gameplay);
            return;
        }
        update_player(&mut self.player, input, TUTORIAL_BOUNDS);
        self.draw_player(hw);
    }

    fn update_gameplay<H: Hardware + ?Sized>(&mut self, hw: &mut H, input: &FrameInput) {
        if input.is_pressed(PAD_SELECT) {
            self.enter(hw, GameState::GameOver);
            return;
        }

        let report = self
            .gun
            .update(hw, input, &mut self.entities, &mut self.ammo);
        if report.hit.is_some() {
            self.score = (self.score + 1).min(SCORE_MAX);
            self.draw_score(hw);
        }
        if report.frame_consumed {
            return;
        }

        update_player(&mut self.player, input, PLAYER_BOUNDS);
        self.tick_spawners();

        for index in 0..NUM_ENTITIES {
            let Some(entity) = self.entities.get_mut(index) else {
                continue;
            };
            if !entity.is_active() {
                continue;
            }
            match entity.kind {
                EntityKind::Enemy => {
                    update_enemy(entity, &self.player);
                    if player_hits_enemy(&self.player, entity) {
                        tracing::debug!(slot = index, "player caught");
                        self.enter(hw, GameState::GameOver);
                        return;
                    }
                }
                EntityKind::Ammo => {
                    if self.ammo < MAX_AMMO && player_collects_pickup(&self.player, entity) {
                        entity.deactivate();
                        hw.draw_ammo_slot(self.ammo, true);
                        self.ammo += 1;
                    }
                }
                EntityKind::None => {}
            }
        }

        self.draw_player(hw);
        self.draw_entities(hw);
    }

    fn update_game_over<H: Hardware + ?Sized>(&mut self, hw: &mut H, input: &FrameInput) {
        if self.state_ticks >= GAMEOVER_COOLDOWN_FRAMES && input.confirm() {
            self.enter(hw, GameState::Title);
        }
    }

    /// Timers restart on expiry whether or not the spawn was granted.
    fn tick_spawners(&mut self) {
        let ctx = SpawnContext {
            player_x: self.player.screen_x(),
            player_y: self.player.screen_y(),
            ammo: self.ammo,
        };

        self.enemy_spawn_timer += 1;
        if self.enemy_spawn_timer >= ENEMY_SPAWN_FRAMES {
            self.enemy_spawn_timer = 0;
            try_spawn(&mut self.entities, &mut self.rng, EntityKind::Enemy, ctx);
        }

        self.ammo_spawn_timer += 1;
        if self.ammo_spawn_timer >= AMMO_SPAWN_FRAMES {
            self.ammo_spawn_timer = 0;
            try_spawn(&mut self.entities, &mut self.rng, EntityKind::Ammo, ctx);
        }
    }

    fn draw_hud<P: Presentation + ?Sized>(&mut self, gfx: &mut P) {
        self.draw_score(gfx);
        self.text.render(
            gfx,
            HUD_HIGH_SCORE_COLUMN,
            HUD_ROW,
            score_field(self.high_score),
        );
        for slot in 0..MAX_AMMO {
            gfx.draw_ammo_slot(slot, slot < self.ammo);
        }
    }

    fn draw_score<P: Presentation + ?Sized>(&mut self, gfx: &mut P) {
        self.text
            .render(gfx, HUD_SCORE_COLUMN, HUD_ROW, score_field(self.score));
    }

    fn draw_player<P: Presentation + ?Sized>(&self, gfx: &mut P) {
        gfx.draw_metasprite(
            self.player.screen_x(),
            self.player.screen_y(),
            SpriteId::Player {
                frame: self.player.anim_frame,
                flipped: self.player.facing_left,
            },
        );
    }

    fn draw_entities<P: Presentation + ?Sized>(&self, gfx: &mut P) {
        for (_, entity) in self.entities.iter_active() {
            let sprite = match entity.kind {
                EntityKind::Enemy => SpriteId::Enemy {
                    frame: entity.anim_frame,
                },
                EntityKind::Ammo => SpriteId::AmmoPickup,
                EntityKind::None => continue,
            };
            gfx.draw_metasprite(entity.screen_x(), entity.screen_y(), sprite);
        }
    }

    pub(super) fn validate_invariants(&self) -> Result<(), RuleCode> {
        if self.ammo > MAX_AMMO {
            return Err(RuleCode::AmmoRange);
        }
        if self.score > SCORE_MAX {
            return Err(RuleCode::ScoreRange);
        }
        if self.high_score > SCORE_MAX {
            return Err(RuleCode::HighScoreRange);
        }

        if self.entities.count_active(EntityKind::Enemy) > MAX_ENEMIES as usize {
            return Err(RuleCode::EnemyCap);
        }
        if self.entities.count_active(EntityKind::Ammo) > 1 {
            return Err(RuleCode::PickupCap);
        }

        let bounds = match self.game_state {
            GameState::Tutorial => Some(TUTORIAL_BOUNDS),
            GameState::Gameplay => Some(PLAYER_BOUNDS),
            GameState::Title | GameState::GameOver => None,
        };
        if let Some(bounds) = bounds {
            let x_ok = self.player.x >= Fu8_8::from_int(bounds.min_x)
                && self.player.x <= Fu8_8::from_int(bounds.max_x);
            let y_ok = self.player.y >= Fu8_8::from_int(bounds.min_y)
                && self.player.y <= Fu8_8::from_int(bounds.max_y);
            if !x_ok || !y_ok {
                return Err(RuleCode::PlayerBounds);
            }
        }

        let limit = PLAYER_SPEED_LIMIT.unsigned_abs();
        if self.player.vel_x.unsigned_abs() > limit || self.player.vel_y.unsigned_abs() > limit {
            return Err(RuleCode::PlayerSpeed);
        }

        let frames_ok = self.player.anim_frame <= 1
            && self
                .entities
                .iter_active()
                .all(|(_, entity)| entity.anim_frame <= 1);
        if !frames_ok {
            return Err(RuleCode::AnimFrameRange);
        }

        if let HitTest::AwaitSensorFrame(slot) = self.gun.phase() {
            let targeted = self
                .entities
                .get(slot)
                .is_some_and(|entity| entity.is_active_kind(EntityKind::Enemy));
            if !targeted {
                return Err(RuleCode::HitTestTarget);
            }
        }

        Ok(())
    }
}
