pub mod autopilot;
pub mod config;
pub mod console;
pub mod runner;
pub mod tape;

pub use config::RunnerConfig;
pub use console::{DrawStats, HeadlessConsole};
pub use runner::{play_tape, record_bot, run_platformer, PlayOptions, RunSummary};
pub use tape::{parse_tape, serialize_tape, Tape, TapeError, TapeFrame};
