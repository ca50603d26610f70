use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::level::{derive_level, level_progress, Level, LevelProgress};
use super::plant::Plant;
use crate::events::{Event, PlantGrowth};

/// Points awarded per logged session, to the habit and to each plant.
pub const SESSION_POINTS: u32 = 5;

/// A tracked recurring activity and the plants it grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub consecutive_days: u32,
    pub total_points: u32,
    pub plants: Vec<Plant>,
    #[serde(default)]
    pub last_practiced: Option<DateTime<Utc>>,
}

impl Habit {
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            consecutive_days: 0,
            total_points: 0,
            plants: Vec::new(),
            last_practiced: None,
        }
    }

    pub fn with_progress(mut self, consecutive_days: u32, total_points: u32) -> Self {
        self.consecutive_days = consecutive_days;
        self.total_points = total_points;
        self
    }

    pub fn with_plant(mut self, plant: Plant) -> Self {
        self.plants.push(plant);
        self
    }

    pub fn level(&self) -> Level {
        derive_level(self.consecutive_days, self.total_points)
    }

    pub fn level_progress(&self) -> LevelProgress {
        level_progress(self.consecutive_days, self.total_points)
    }

    /// Record one practice session. Every plant ages in lockstep.
    pub fn log_session(&mut self, at: DateTime<Utc>) -> Event {
        let previous_level = self.level();

        self.consecutive_days += 1;
        self.total_points += SESSION_POINTS;
        self.last_practiced = Some(at);

        let plants = self
            .plants
            .iter_mut()
            .map(|plant| {
                let previous_stage = plant.stage;
                plant.grow(SESSION_POINTS);
                PlantGrowth {
                    plant_id: plant.id.clone(),
                    days_growing: plant.days_growing,
                    total_days: plant.total_days,
                    points: plant.points,
                    previous_stage,
                    stage: plant.stage,
                }
            })
            .collect();

        let level = self.level();
        if level != previous_level {
            tracing::info!(habit = %self.id, %previous_level, %level, "habit levelled up");
        }

        Event::HabitSessionLogged {
            habit_id: self.id.clone(),
            consecutive_days: self.consecutive_days,
            total_points: self.total_points,
            previous_level,
            level,
            plants,
            at,
        }
    }
}
