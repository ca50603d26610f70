//! Presentational helpers for the chat header and the cooldown screen.

use serde::{Deserialize, Serialize};

/// Colour bucket of the countdown bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerColor {
    Safe,
    Caution,
    Urgent,
    Critical,
}

impl TimerColor {
    /// Bucket for the whole minutes left.
    pub fn from_remaining_minutes(remaining_minutes: i64) -> Self {
        match remaining_minutes {
            m if m >= 11 => TimerColor::Safe,
            m if m >= 6 => TimerColor::Caution,
            m if m >= 1 => TimerColor::Urgent,
            _ => TimerColor::Critical,
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            TimerColor::Safe => "#2ECC71",
            TimerColor::Caution => "#F1C40F",
            TimerColor::Urgent => "#E67E22",
            TimerColor::Critical => "#E74C3C",
        }
    }
}

/// `"1h 57min"` style rendering of a cooldown.
pub fn format_cooldown(seconds: u64) -> String {
    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    format!("{hours}h {mins}min")
}
