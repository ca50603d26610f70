use serde::{Deserialize, Serialize};

use super::Garden;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    FirstSeed,
    DedicatedGardener,
    PersonalForest,
    GreenStreak100,
    GardenMaster,
}

impl AchievementKind {
    pub const ALL: [AchievementKind; 5] = [
        AchievementKind::FirstSeed,
        AchievementKind::DedicatedGardener,
        AchievementKind::PersonalForest,
        AchievementKind::GreenStreak100,
        AchievementKind::GardenMaster,
    ];

    pub fn title(self) -> &'static str {
        match self {
            AchievementKind::FirstSeed => "First Seed",
            AchievementKind::DedicatedGardener => "Dedicated Gardener",
            AchievementKind::PersonalForest => "Personal Forest",
            AchievementKind::GreenStreak100 => "Green Streak 100",
            AchievementKind::GardenMaster => "Garden Master",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AchievementKind::FirstSeed => "Plant your first seed",
            AchievementKind::DedicatedGardener => "Keep a 7-day streak",
            AchievementKind::PersonalForest => "Grow 3 large trees",
            AchievementKind::GreenStreak100 => "100 consecutive days",
            AchievementKind::GardenMaster => "Reach 1000 points",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            AchievementKind::FirstSeed => "🌱",
            AchievementKind::DedicatedGardener => "🌸",
            AchievementKind::PersonalForest => "🌳",
            AchievementKind::GreenStreak100 => "🔥",
            AchievementKind::GardenMaster => "⭐",
        }
    }

    fn is_unlocked(self, garden: &Garden) -> bool {
        let stats = garden.stats();
        let best_streak = garden
            .habits()
            .iter()
            .map(|h| h.consecutive_days)
            .max()
            .unwrap_or(0);
        match self {
            AchievementKind::FirstSeed => stats.total_plants >= 1,
            AchievementKind::DedicatedGardener => best_streak >= 7,
            AchievementKind::PersonalForest => stats.pro_plants >= 3,
            AchievementKind::GreenStreak100 => best_streak >= 100,
            AchievementKind::GardenMaster => stats.total_points >= 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub kind: AchievementKind,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
}

pub(super) fn evaluate(garden: &Garden) -> Vec<Achievement> {
    AchievementKind::ALL
        .iter()
        .map(|&kind| Achievement {
            kind,
            title: kind.title().to_string(),
            description: kind.description().to_string(),
            icon: kind.icon().to_string(),
            unlocked: kind.is_unlocked(garden),
        })
        .collect()
}
