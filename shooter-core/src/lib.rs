#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod collision;
pub mod constants;
pub mod entity;
pub mod error;
pub mod fixed_point;
pub mod gun;
pub mod input;
pub mod motion;
pub mod platformer;
pub mod presentation;
pub mod rng;
pub mod sim;
pub mod spawn;
pub mod text;

pub use error::{RuleCode, RuleViolation};
pub use presentation::{
    DrawCommand, FrameRecorder, Hardware, InputPort, Presentation, Screen, ScriptedConsole,
    SpriteId,
};
pub use sim::{GameState, Simulation, SimulationSnapshot};
