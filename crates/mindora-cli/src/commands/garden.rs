use chrono::Utc;
use clap::{Subcommand, ValueEnum};
use mindora_core::garden::{catalog, Habit};
use mindora_core::{Garden, Level};
use serde_json::json;

use super::print_line;

#[derive(Clone, Copy, ValueEnum)]
pub enum LevelArg {
    Beginner,
    Intermediate,
    Pro,
}

impl From<LevelArg> for Level {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Beginner => Level::Beginner,
            LevelArg::Intermediate => Level::Intermediate,
            LevelArg::Pro => Level::Pro,
        }
    }
}

#[derive(Subcommand)]
pub enum GardenAction {
    /// Show habits, plants and garden totals
    Show,
    /// Log practice sessions for a habit and print the growth
    Log {
        /// Habit ID
        habit_id: String,
        /// Number of sessions to log
        #[arg(long, default_value_t = 1)]
        times: u32,
    },
    /// List achievements and whether they are unlocked
    Achievements,
    /// List plants that can be sown
    Catalog {
        /// Only show plants of this level
        #[arg(long, value_enum)]
        level: Option<LevelArg>,
    },
}

fn habit_view(habit: &Habit) -> serde_json::Value {
    let plants: Vec<_> = habit
        .plants
        .iter()
        .map(|p| {
            json!({
                "id": p.id,
                "name": p.name,
                "icon": p.icon,
                "level": p.level,
                "stage": p.stage,
                "days_growing": p.days_growing,
                "total_days": p.total_days,
                "points": p.points,
                "growth_pct": p.growth_pct(),
                "visual_size": p.visual_size(),
            })
        })
        .collect();

    json!({
        "id": habit.id,
        "name": habit.name,
        "icon": habit.icon,
        "consecutive_days": habit.consecutive_days,
        "total_points": habit.total_points,
        "level": habit.level(),
        "level_progress": habit.level_progress(),
        "last_practiced": habit.last_practiced,
        "plants": plants,
    })
}

pub fn run(action: GardenAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut garden = Garden::demo();
    match action {
        GardenAction::Show => {
            let view = json!({
                "habits": garden.habits().iter().map(habit_view).collect::<Vec<_>>(),
                "stats": garden.stats(),
            });
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        GardenAction::Log { habit_id, times } => {
            for _ in 0..times {
                print_line(&garden.log_session(&habit_id, Utc::now())?)?;
            }
            if let Some(habit) = garden.habit(&habit_id) {
                print_line(&habit_view(habit))?;
            }
        }
        GardenAction::Achievements => {
            println!("{}", serde_json::to_string_pretty(&garden.achievements())?);
        }
        GardenAction::Catalog { level } => {
            let levels = match level {
                Some(level) => vec![Level::from(level)],
                None => vec![Level::Beginner, Level::Intermediate, Level::Pro],
            };
            let entries: Vec<_> = levels.into_iter().flat_map(catalog).collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}
