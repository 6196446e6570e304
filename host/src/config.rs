use std::env;

/// Ten minutes at 60 frames per second.
pub const DEFAULT_MAX_FRAMES: u32 = 36_000;
pub const DEFAULT_FIRE_INTERVAL: u32 = 20;
/// The trigger has to be released for a frame between pulls.
pub const MIN_FIRE_INTERVAL: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    pub max_frames: u32,
    pub fire_interval: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_frames: DEFAULT_MAX_FRAMES,
            fire_interval: DEFAULT_FIRE_INTERVAL,
        }
    }
}

impl RunnerConfig {
    pub fn from_env() -> Self {
        let mut fire_interval = read_env_u32("GENIE_AUTOPILOT_FIRE_INTERVAL", DEFAULT_FIRE_INTERVAL);
        if fire_interval < MIN_FIRE_INTERVAL {
            tracing::warn!(
                "GENIE_AUTOPILOT_FIRE_INTERVAL ({}) is below {}. Falling back to {}.",
                fire_interval,
                MIN_FIRE_INTERVAL,
                DEFAULT_FIRE_INTERVAL
            );
            fire_interval = DEFAULT_FIRE_INTERVAL;
        }

        Self {
            max_frames: read_env_u32("GENIE_MAX_FRAMES", DEFAULT_MAX_FRAMES),
            fire_interval,
        }
    }

    /// CLI flags win over the environment.
    pub fn with_overrides(mut self, max_frames: Option<u32>, fire_interval: Option<u32>) -> Self {
        if let Some(max_frames) = max_frames.filter(|value| *value > 0) {
            self.max_frames = max_frames;
        }
        if let Some(fire_interval) = fire_interval {
            self.fire_interval = fire_interval.max(MIN_FIRE_INTERVAL);
        }
        self
    }

    /// A tape longer than this config's cap only replays with an explicit
    /// `--max-frames`.
    pub fn rejects_tape_of(&self, frame_count: u32) -> bool {
        frame_count > self.max_frames
    }
}

pub(crate) fn read_env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let config = RunnerConfig::default().with_overrides(Some(500), Some(1));
        assert_eq!(config.max_frames, 500);
        assert_eq!(config.fire_interval, MIN_FIRE_INTERVAL);

        let untouched = RunnerConfig::default().with_overrides(Some(0), None);
        assert_eq!(untouched, RunnerConfig::default());
    }

    #[test]
    fn long_recordings_exceed_the_default_replay_cap() {
        let config = RunnerConfig::default();
        assert!(!config.rejects_tape_of(DEFAULT_MAX_FRAMES));
        assert!(config.rejects_tape_of(DEFAULT_MAX_FRAMES + 1));
    }

    #[test]
    fn unset_variable_reads_default() {
        assert_eq!(read_env_u32("GENIE_TEST_UNSET_VARIABLE_FOR_CONFIG", 17), 17);
    }
}
