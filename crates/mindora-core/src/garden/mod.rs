//! Habit garden: streaks and points grow plants.
//!
//! Everything except [`Habit::log_session`] and [`Garden::log_session`] is a
//! pure derivation over the counters, so views never recompute levels or
//! stages on their own.

mod achievements;
mod habit;
mod level;
mod plant;
mod stage;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use achievements::{Achievement, AchievementKind};
pub use habit::{Habit, SESSION_POINTS};
pub use level::{
    derive_level, level_progress, Level, LevelProgress, INTERMEDIATE_DAYS, INTERMEDIATE_POINTS,
    PRO_DAYS, PRO_POINTS,
};
pub use plant::{catalog, find_in_catalog, CatalogEntry, Plant};
pub use stage::{derive_stage, growth_pct, visual_size, Stage};

use crate::error::GardenError;
use crate::events::Event;

/// Aggregate numbers shown in the garden header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GardenStats {
    pub total_points: u32,
    pub total_plants: usize,
    pub pro_plants: usize,
}

/// The habits owned by one garden view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Garden {
    habits: Vec<Habit>,
}

impl Garden {
    pub fn new(habits: Vec<Habit>) -> Self {
        Self { habits }
    }

    /// The three sample habits the garden opens with, last practiced now.
    pub fn demo() -> Self {
        Self::demo_at(Utc::now())
    }

    /// Sample habits last practiced at `now`.
    pub fn demo_at(now: DateTime<Utc>) -> Self {
        let plant = |name: &str, id: &str, days: u32| {
            find_in_catalog(name)
                .map(|entry| entry.plant(id).with_days_growing(days))
        };

        let mut drawing = Habit::new("1", "Drawing", "🎨").with_progress(5, 25);
        let mut reading = Habit::new("2", "Reading", "📚").with_progress(12, 60);
        let mut exercise = Habit::new("3", "Exercise", "🏃").with_progress(35, 210);
        drawing.plants.extend(plant("Daisy", "p1", 3));
        reading.plants.extend(plant("Rose", "p2", 8));
        exercise.plants.extend(plant("Cherry tree", "p3", 28));
        for habit in [&mut drawing, &mut reading, &mut exercise] {
            habit.last_practiced = Some(now);
        }

        Self::new(vec![drawing, reading, exercise])
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Log a practice session for the habit with `habit_id`.
    pub fn log_session(&mut self, habit_id: &str, at: DateTime<Utc>) -> Result<Event, GardenError> {
        let habit = self
            .habits
            .iter_mut()
            .find(|h| h.id == habit_id)
            .ok_or_else(|| {
                tracing::warn!(habit_id, "log for unknown habit");
                GardenError::UnknownHabit(habit_id.to_string())
            })?;
        tracing::debug!(habit_id, "session logged");
        Ok(habit.log_session(at))
    }

    pub fn stats(&self) -> GardenStats {
        let plants = || self.habits.iter().flat_map(|h| h.plants.iter());
        GardenStats {
            total_points: self.habits.iter().map(|h| h.total_points).sum(),
            total_plants: plants().count(),
            pro_plants: plants().filter(|p| p.level == Level::Pro).count(),
        }
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        achievements::evaluate(self)
    }
}
