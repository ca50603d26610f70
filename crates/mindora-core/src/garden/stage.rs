use std::fmt;

use serde::{Deserialize, Serialize};

use super::level::Level;

/// Growth stage of a plant, from seed to full bloom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Seed,
    Sprout,
    Young,
    Developed,
    Mature,
    Bloomed,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Seed,
        Stage::Sprout,
        Stage::Young,
        Stage::Developed,
        Stage::Mature,
        Stage::Bloomed,
    ];

    /// Fraction of the level's base size drawn at this stage.
    pub fn size_multiplier(self) -> f64 {
        match self {
            Stage::Seed => 0.3,
            Stage::Sprout => 0.5,
            Stage::Young => 0.7,
            Stage::Developed => 0.85,
            Stage::Mature => 0.95,
            Stage::Bloomed => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Seed => "Seed",
            Stage::Sprout => "Sprout",
            Stage::Young => "Young",
            Stage::Developed => "Developed",
            Stage::Mature => "Mature",
            Stage::Bloomed => "Bloomed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stage for `days_growing / total_days`.
///
/// Thresholds are inclusive lower bounds (0.1, 0.3, 0.5, 0.8, 1.0) compared
/// in integer arithmetic. A plant with `total_days == 0` is a seed.
pub fn derive_stage(days_growing: u32, total_days: u32) -> Stage {
    if total_days == 0 {
        return Stage::Seed;
    }
    // progress >= n/10  <=>  days * 10 >= total * n
    let days = u64::from(days_growing) * 10;
    let total = u64::from(total_days);
    match days {
        d if d >= total * 10 => Stage::Bloomed,
        d if d >= total * 8 => Stage::Mature,
        d if d >= total * 5 => Stage::Developed,
        d if d >= total * 3 => Stage::Young,
        d if d >= total => Stage::Sprout,
        _ => Stage::Seed,
    }
}

/// Progress ring percentage. Not capped, like the ratio itself.
pub fn growth_pct(days_growing: u32, total_days: u32) -> f64 {
    if total_days == 0 {
        return 0.0;
    }
    f64::from(days_growing) / f64::from(total_days) * 100.0
}

/// Rendered plant size: level base size scaled by the stage.
pub fn visual_size(stage: Stage, level: Level) -> f64 {
    level.base_size() * stage.size_multiplier()
}
