use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use host::autopilot::{bot_ids, create_bot};
use host::runner::{play_tape, record_bot, run_platformer, write_bytes, write_json, PlayOptions};
use host::tape::parse_tape;
use host::RunnerConfig;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "genie-host")]
#[command(about = "Headless runner for the Zapper shooter and the jump demo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available autopilot bots
    ListBots,
    /// Play a bot and write its input tape
    Record {
        #[arg(long, default_value = "hunter")]
        bot: String,
        /// Frames to record (defaults to GENIE_MAX_FRAMES or 36000). Longer
        /// tapes need the same value as `play --max-frames`.
        #[arg(long)]
        frames: Option<u32>,
        /// Frames between trigger pulls (defaults to GENIE_AUTOPILOT_FIRE_INTERVAL or 20)
        #[arg(long)]
        fire_interval: Option<u32>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        summary_out: Option<PathBuf>,
    },
    /// Replay a tape and report the final score
    Play {
        #[arg(long)]
        tape: PathBuf,
        /// Longest tape accepted (defaults to GENIE_MAX_FRAMES or 36000)
        #[arg(long)]
        max_frames: Option<u32>,
        /// Check every invariant each frame and reject footer mismatches
        #[arg(long, default_value_t = false)]
        strict: bool,
        #[arg(long)]
        summary_out: Option<PathBuf>,
    },
    /// Run the jump demo with a scripted pad
    Platformer {
        #[arg(long, default_value_t = 600)]
        frames: u32,
        #[arg(long)]
        summary_out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let Cli { command } = Cli::parse();
    let env_config = RunnerConfig::from_env();

    match command {
        Commands::ListBots => {
            for id in bot_ids() {
                if let Some(bot) = create_bot(id, env_config.fire_interval) {
                    println!("{id:10} {}", bot.description());
                }
            }
        }
        Commands::Record {
            bot,
            frames,
            fire_interval,
            output,
            summary_out,
        } => {
            let config = env_config.with_overrides(frames, fire_interval);
            let mut autopilot = create_bot(&bot, config.fire_interval).ok_or_else(|| {
                let available = bot_ids().join(", ");
                anyhow!("unknown bot '{bot}'. available: {available}")
            })?;

            let run = record_bot(autopilot.as_mut(), config.max_frames)?;
            let output_path = output.unwrap_or_else(|| {
                PathBuf::from(format!(
                    "tapes/{}-score{}-frames{}.ggtape",
                    bot, run.summary.score, run.summary.frames
                ))
            });
            write_bytes(&output_path, &run.tape)?;
            if let Some(path) = &summary_out {
                write_json(path, &run.summary)?;
            }

            println!("bot={bot}");
            println!("fire_interval={}", config.fire_interval);
            println!("frames={}", run.summary.frames);
            println!("games={}", run.summary.games_started);
            println!("score={}", run.summary.score);
            println!("high_score={}", run.summary.high_score);
            println!("output={}", output_path.display());
            if env_config.rejects_tape_of(run.summary.frames) {
                tracing::warn!(
                    frames = run.summary.frames,
                    cap = env_config.max_frames,
                    "tape is longer than the default replay cap"
                );
                println!("play_args=--max-frames {}", run.summary.frames);
            }
        }
        Commands::Play {
            tape,
            max_frames,
            strict,
            summary_out,
        } => {
            let config = env_config.with_overrides(max_frames, None);
            let bytes = fs::read(&tape)
                .with_context(|| format!("failed to read tape: {}", tape.display()))?;
            let parsed = parse_tape(&bytes, config.max_frames)
                .with_context(|| format!("invalid tape: {}", tape.display()))?;
            let summary = play_tape(
                &parsed,
                PlayOptions {
                    max_frames: config.max_frames,
                    strict,
                },
            )?;
            if let Some(path) = &summary_out {
                write_json(path, &summary)?;
            }

            println!("input={}", tape.display());
            println!("frames={}", summary.frames);
            println!("state={:?}", summary.final_state);
            println!("score={}", summary.score);
            println!("high_score={}", summary.high_score);
            println!("ammo={}", summary.ammo);
            println!("target_boxes={}", summary.draws.target_boxes);
            match summary.footer_matches {
                Some(matches) => println!("footer_matches={matches}"),
                None => println!("footer_matches=unchecked"),
            }
        }
        Commands::Platformer {
            frames,
            summary_out,
        } => {
            let summary = run_platformer(frames)?;
            if let Some(path) = &summary_out {
                write_json(path, &summary)?;
            }

            println!("frames={}", summary.frames);
            println!("jumps={}", summary.jumps);
            println!("landings={}", summary.landings);
            println!("x={}", summary.final_demo.jumper.x.as_i());
            println!("y={}", summary.final_demo.jumper.y.as_i());
            println!("scroll_y={}", summary.final_demo.scroll_y);
        }
    }

    Ok(())
}
