use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Minutes added by the one extension a session may receive.
pub const EXTENSION_MINUTES: u32 = 5;

/// Rest period after the final time-up: 1h 57min.
pub const DEFAULT_COOLDOWN_SECS: u64 = 7_020;

/// Dev mode: one tick counts as one minute.
pub const DEV_MODE_MULTIPLIER: u64 = 60;

/// What happens when the cooldown counter reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CooldownExpiry {
    /// Stay in cooldown at zero until the host starts or dismisses.
    #[default]
    Hold,
    /// Go back to idle on the tick that reaches zero.
    ReturnToIdle,
}

/// Tunables of the session timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Seconds added to the elapsed counter per tick.
    pub tick_increment_secs: u64,
    /// Remaining seconds at which the warning is raised.
    pub warning_threshold_secs: u64,
    /// How long the warning stays visible.
    pub warning_display: Duration,
    /// How long the "extended" confirmation shows before resuming.
    pub extension_confirm: Duration,
    pub cooldown_secs: u64,
    pub cooldown_expiry: CooldownExpiry,
}

impl SessionPolicy {
    /// Accelerated policy for demos: every tick is a minute and the warning
    /// fires four seconds before the end.
    pub fn dev() -> Self {
        Self {
            tick_increment_secs: DEV_MODE_MULTIPLIER,
            warning_threshold_secs: 4,
            ..Self::default()
        }
    }
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            tick_increment_secs: 1,
            warning_threshold_secs: 120,
            warning_display: Duration::from_secs(5),
            extension_confirm: Duration::from_secs(3),
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            cooldown_expiry: CooldownExpiry::Hold,
        }
    }
}
