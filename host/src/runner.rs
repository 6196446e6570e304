use anyhow::{anyhow, Context, Result};
use genie_shooter_core::input::{PAD_A, PAD_LEFT, PAD_RIGHT};
use genie_shooter_core::platformer::{JumpState, PlatformerDemo};
use genie_shooter_core::{GameState, Simulation, SimulationSnapshot};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::autopilot::AutopilotBot;
use crate::console::{DrawStats, HeadlessConsole};
use crate::tape::{serialize_tape, Tape, TapeFrame};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayOptions {
    pub max_frames: u32,
    /// Check invariants every frame and require the footer to match.
    pub strict: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub frames: u32,
    pub final_state: GameState,
    pub score: u16,
    pub high_score: u16,
    pub ammo: u8,
    pub games_started: u32,
    pub claimed_score: Option<u16>,
    pub claimed_high_score: Option<u16>,
    pub footer_matches: Option<bool>,
    pub draws: DrawStats,
    pub final_snapshot: SimulationSnapshot,
}

#[derive(Clone, Debug)]
pub struct RecordedRun {
    pub frames: Vec<TapeFrame>,
    pub tape: Vec<u8>,
    pub summary: RunSummary,
}

/// Drives one simulation with a console, counting games started.
struct Session {
    console: HeadlessConsole,
    sim: Simulation,
    frames: u32,
    games_started: u32,
}

impl Session {
    fn power_on() -> Self {
        let mut console = HeadlessConsole::default();
        let sim = Simulation::power_on(&mut console);
        console.present();
        Self {
            console,
            sim,
            frames: 0,
            games_started: 0,
        }
    }

    fn step(&mut self, input: TapeFrame, strict: bool) -> Result<()> {
        let before = self.sim.game_state();
        self.console.set_input(input);
        if strict {
            self.sim
                .advance_checked(&mut self.console)
                .with_context(|| format!("strict replay failed on tape frame {}", self.frames))?;
        } else {
            self.sim.advance_one_frame(&mut self.console);
        }
        self.console.present();
        self.frames += 1;

        let after = self.sim.game_state();
        if before != after {
            tracing::debug!(frame = self.frames, ?before, ?after, "state changed");
            if after == GameState::Gameplay {
                self.games_started += 1;
            }
        }
        Ok(())
    }

    fn summary(&self, claimed: Option<(u16, u16)>) -> RunSummary {
        let score = self.sim.score();
        let high_score = self.sim.high_score();
        RunSummary {
            frames: self.frames,
            final_state: self.sim.game_state(),
            score,
            high_score,
            ammo: self.sim.ammo(),
            games_started: self.games_started,
            claimed_score: claimed.map(|(claimed, _)| claimed),
            claimed_high_score: claimed.map(|(_, claimed)| claimed),
            footer_matches: claimed.map(|claimed| claimed == (score, high_score)),
            draws: self.console.stats(),
            final_snapshot: self.sim.snapshot(),
        }
    }
}

pub fn play_tape(tape: &Tape, options: PlayOptions) -> Result<RunSummary> {
    if options.max_frames == 0 {
        return Err(anyhow!("max_frames must be > 0"));
    }

    let mut session = Session::power_on();
    let limit = options.max_frames as usize;
    for frame in tape.frames.iter().take(limit) {
        session.step(*frame, options.strict)?;
    }

    let truncated = tape.frames.len() > limit;
    let claimed = (!truncated).then_some((tape.footer.final_score, tape.footer.high_score));
    let summary = session.summary(claimed);

    if options.strict && summary.footer_matches == Some(false) {
        return Err(anyhow!(
            "tape footer mismatch: claimed score={} high={}, computed score={} high={}",
            tape.footer.final_score,
            tape.footer.high_score,
            summary.score,
            summary.high_score
        ));
    }

    tracing::info!(
        frames = summary.frames,
        score = summary.score,
        high_score = summary.high_score,
        truncated,
        "tape replayed"
    );
    Ok(summary)
}

pub fn record_bot(bot: &mut dyn AutopilotBot, frames: u32) -> Result<RecordedRun> {
    if frames == 0 {
        return Err(anyhow!("frames must be > 0"));
    }

    bot.reset();
    let mut session = Session::power_on();
    let mut inputs = Vec::with_capacity(frames as usize);
    for _ in 0..frames {
        let input = bot.next_frame(&session.sim.snapshot());
        inputs.push(input);
        session
            .step(input, true)
            .with_context(|| format!("bot '{}' drove the simulation into a bad state", bot.id()))?;
    }

    let summary = session.summary(None);
    let tape = serialize_tape(&inputs, summary.score, summary.high_score);
    tracing::info!(
        bot = bot.id(),
        frames,
        score = summary.score,
        high_score = summary.high_score,
        games = summary.games_started,
        "recorded autopilot run"
    );

    Ok(RecordedRun {
        frames: inputs,
        tape,
        summary,
    })
}

#[derive(Clone, Debug, Serialize)]
pub struct PlatformerSummary {
    pub frames: u32,
    pub jumps: u32,
    pub landings: u32,
    pub final_demo: PlatformerDemo,
    pub draws: DrawStats,
}

/// Walks back and forth and hops every second.
pub fn platformer_pad(frame: u32) -> u8 {
    let walk = if (frame / 120) % 2 == 0 {
        PAD_RIGHT
    } else {
        PAD_LEFT
    };
    let jump = if frame % 60 < 20 { PAD_A } else { 0 };
    walk | jump
}

pub fn run_platformer(frames: u32) -> Result<PlatformerSummary> {
    if frames == 0 {
        return Err(anyhow!("frames must be > 0"));
    }

    let mut console = HeadlessConsole::default();
    let mut demo = PlatformerDemo::power_on(&mut console);
    console.present();

    let mut jumps = 0;
    let mut landings = 0;
    for frame in 0..frames {
        let before = demo.jumper.state;
        console.set_input(TapeFrame::buttons(platformer_pad(frame)));
        demo.advance_one_frame(&mut console);
        console.present();

        match (before, demo.jumper.state) {
            (JumpState::Grounded, JumpState::Rising) => jumps += 1,
            (JumpState::Rising | JumpState::Falling, JumpState::Grounded) => landings += 1,
            _ => {}
        }
    }

    Ok(PlatformerSummary {
        frames,
        jumps,
        landings,
        final_demo: demo,
        draws: console.stats(),
    })
}

pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("failed writing {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let encoded = serde_json::to_vec_pretty(value)?;
    write_bytes(path, &encoded)
}
