use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Time limit offered when a chat session is configured.
///
/// Serialized as the number of minutes, `0` meaning no limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimeLimit {
    Five,
    Ten,
    Fifteen,
    Twenty,
    Thirty,
    Unlimited,
}

impl TimeLimit {
    /// Every option, in the order the settings screen lists them.
    pub const ALL: [TimeLimit; 6] = [
        TimeLimit::Five,
        TimeLimit::Ten,
        TimeLimit::Fifteen,
        TimeLimit::Twenty,
        TimeLimit::Thirty,
        TimeLimit::Unlimited,
    ];

    pub fn minutes(self) -> u32 {
        match self {
            TimeLimit::Five => 5,
            TimeLimit::Ten => 10,
            TimeLimit::Fifteen => 15,
            TimeLimit::Twenty => 20,
            TimeLimit::Thirty => 30,
            TimeLimit::Unlimited => 0,
        }
    }

    pub fn from_minutes(minutes: u32) -> Result<Self, ValidationError> {
        match minutes {
            5 => Ok(TimeLimit::Five),
            10 => Ok(TimeLimit::Ten),
            15 => Ok(TimeLimit::Fifteen),
            20 => Ok(TimeLimit::Twenty),
            30 => Ok(TimeLimit::Thirty),
            0 => Ok(TimeLimit::Unlimited),
            other => Err(ValidationError::InvalidTimeLimit { minutes: other }),
        }
    }

    pub fn is_unlimited(self) -> bool {
        self == TimeLimit::Unlimited
    }

    /// The option highlighted as recommended.
    pub fn is_recommended(self) -> bool {
        self == TimeLimit::Fifteen
    }

    pub fn label(self) -> String {
        match self {
            TimeLimit::Unlimited => "No limit".to_string(),
            limited => format!("{} minutes", limited.minutes()),
        }
    }
}

impl Default for TimeLimit {
    fn default() -> Self {
        TimeLimit::Fifteen
    }
}

impl TryFrom<u32> for TimeLimit {
    type Error = ValidationError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes)
    }
}

impl From<TimeLimit> for u32 {
    fn from(limit: TimeLimit) -> Self {
        limit.minutes()
    }
}

impl fmt::Display for TimeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// One row of the time-limit picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeLimitOption {
    pub minutes: u32,
    pub label: String,
    pub recommended: bool,
}

impl From<TimeLimit> for TimeLimitOption {
    fn from(limit: TimeLimit) -> Self {
        Self {
            minutes: limit.minutes(),
            label: limit.label(),
            recommended: limit.is_recommended(),
        }
    }
}

/// All picker rows.
pub fn time_limit_options() -> Vec<TimeLimitOption> {
    TimeLimit::ALL.iter().copied().map(Into::into).collect()
}
