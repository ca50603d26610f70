use std::fmt;

use serde::{Deserialize, Serialize};

/// Streak days needed for `Intermediate`.
pub const INTERMEDIATE_DAYS: u32 = 7;
/// Points that also unlock `Intermediate`.
pub const INTERMEDIATE_POINTS: u32 = 50;
/// Streak days needed for `Pro`.
pub const PRO_DAYS: u32 = 30;
/// Points that also unlock `Pro`.
pub const PRO_POINTS: u32 = 200;

/// Proficiency tier of a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Pro,
}

impl Level {
    /// Plant size in pixels at full bloom.
    pub fn base_size(self) -> f64 {
        match self {
            Level::Beginner => 40.0,
            Level::Intermediate => 60.0,
            Level::Pro => 100.0,
        }
    }

    pub fn next(self) -> Option<Level> {
        match self {
            Level::Beginner => Some(Level::Intermediate),
            Level::Intermediate => Some(Level::Pro),
            Level::Pro => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Pro => "Pro",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tier for a streak and point total. First match wins, so either counter
/// alone can promote.
pub fn derive_level(consecutive_days: u32, total_points: u32) -> Level {
    if consecutive_days >= PRO_DAYS || total_points >= PRO_POINTS {
        Level::Pro
    } else if consecutive_days >= INTERMEDIATE_DAYS || total_points >= INTERMEDIATE_POINTS {
        Level::Intermediate
    } else {
        Level::Beginner
    }
}

/// State of the "progress to next level" bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: Level,
    pub next_level: Option<Level>,
    /// Streak days still missing for the next level.
    pub days_needed: u32,
    /// 0.0 .. 100.0
    pub percent: f64,
}

/// The bar only measures streak days; points can still promote early.
pub fn level_progress(consecutive_days: u32, total_points: u32) -> LevelProgress {
    let level = derive_level(consecutive_days, total_points);
    let target = match level {
        Level::Beginner => INTERMEDIATE_DAYS,
        Level::Intermediate => PRO_DAYS,
        Level::Pro => {
            return LevelProgress {
                level,
                next_level: None,
                days_needed: 0,
                percent: 100.0,
            }
        }
    };

    LevelProgress {
        level,
        next_level: level.next(),
        days_needed: target.saturating_sub(consecutive_days),
        percent: (f64::from(consecutive_days) / f64::from(target) * 100.0).min(100.0),
    }
}
