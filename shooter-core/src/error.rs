use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleCode {
    AmmoRange,
    ScoreRange,
    HighScoreRange,
    EnemyCap,
    PickupCap,
    PlayerBounds,
    PlayerSpeed,
    AnimFrameRange,
    HitTestTarget,
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmmoRange => write!(f, "AMMO_RANGE"),
            Self::ScoreRange => write!(f, "SCORE_RANGE"),
            Self::HighScoreRange => write!(f, "HIGH_SCORE_RANGE"),
            Self::EnemyCap => write!(f, "ENEMY_CAP"),
            Self::PickupCap => write!(f, "PICKUP_CAP"),
            Self::PlayerBounds => write!(f, "PLAYER_BOUNDS"),
            Self::PlayerSpeed => write!(f, "PLAYER_SPEED"),
            Self::AnimFrameRange => write!(f, "ANIM_FRAME_RANGE"),
            Self::HitTestTarget => write!(f, "HIT_TEST_TARGET"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RuleCode {}

/// An invariant broken at a specific frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleViolation {
    pub frame: u32,
    pub rule: RuleCode,
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule violation at frame {}: {}", self.frame, self.rule)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RuleViolation {}
