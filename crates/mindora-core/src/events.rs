use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::garden::{Level, Stage};
use crate::session::{SessionState, TimerColor};

/// Every state change in the system produces an Event.
/// Views render from them; the CLI prints them as JSON lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        /// `0` for an unlimited session.
        time_limit_minutes: u32,
        unlimited: bool,
        at: DateTime<Utc>,
    },
    /// Remaining time crossed the warning threshold.
    WarningRaised {
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    WarningCleared {
        at: DateTime<Utc>,
    },
    /// First expiry; the extension is on offer.
    TimeUp {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    SessionExtended {
        added_minutes: u32,
        time_limit_minutes: u32,
        at: DateTime<Utc>,
    },
    /// The extension confirmation ended and the countdown continues.
    SessionResumed {
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    /// Expiry after the extension.
    FinalTimeUp {
        elapsed_secs: u64,
        cooldown_secs: u64,
        at: DateTime<Utc>,
    },
    CooldownStarted {
        cooldown_secs: u64,
        at: DateTime<Utc>,
    },
    /// Cooldown reached zero.
    CooldownElapsed {
        returned_to_idle: bool,
        at: DateTime<Utc>,
    },
    CooldownDismissed {
        at: DateTime<Utc>,
    },
    SessionSnapshot {
        state: SessionState,
        time_limit_minutes: u32,
        elapsed_secs: u64,
        remaining_secs: Option<i64>,
        has_extended: bool,
        warning_visible: bool,
        timer_color: Option<TimerColor>,
        progress_pct: f64,
        cooldown_remaining_secs: u64,
        at: DateTime<Utc>,
    },
    HabitSessionLogged {
        habit_id: String,
        consecutive_days: u32,
        total_points: u32,
        previous_level: Level,
        level: Level,
        plants: Vec<PlantGrowth>,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Snake-case name of the variant, as used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::SessionStarted { .. } => "session_started",
            Event::WarningRaised { .. } => "warning_raised",
            Event::WarningCleared { .. } => "warning_cleared",
            Event::TimeUp { .. } => "time_up",
            Event::SessionExtended { .. } => "session_extended",
            Event::SessionResumed { .. } => "session_resumed",
            Event::FinalTimeUp { .. } => "final_time_up",
            Event::CooldownStarted { .. } => "cooldown_started",
            Event::CooldownElapsed { .. } => "cooldown_elapsed",
            Event::CooldownDismissed { .. } => "cooldown_dismissed",
            Event::SessionSnapshot { .. } => "session_snapshot",
            Event::HabitSessionLogged { .. } => "habit_session_logged",
        }
    }
}

/// One plant's state after a logged session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantGrowth {
    pub plant_id: String,
    pub days_growing: u32,
    pub total_days: u32,
    pub points: u32,
    pub previous_stage: Stage,
    pub stage: Stage,
}
