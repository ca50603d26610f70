//! Session time-box controller.
//!
//! The controller is a tick-driven state machine. It does not use internal
//! threads or read the wall clock directly - the host calls `tick()` once per
//! second (usually through a [`Ticker`](crate::ticker::Ticker)) and transient
//! flags are timed against the injected [`Clock`].
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Active -> TimeUp -> Extended -> Active -> FinalTimeUp -> Cooldown -> Idle
//! ```
//!
//! The two-minute warning is a flag on top of `Active`, not a state.
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = SessionTimer::new(SessionPolicy::default(), Arc::new(SystemClock));
//! for event in timer.start_session(TimeLimit::Fifteen)? { render(event) }
//! // Every second:
//! for event in timer.tick() { render(event) }
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::display::TimerColor;
use super::limit::TimeLimit;
use super::policy::{CooldownExpiry, SessionPolicy, EXTENSION_MINUTES};
use crate::error::SessionError;
use crate::events::Event;
use crate::ticker::{Clock, SystemClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No session configured yet.
    Idle,
    /// Counting elapsed time.
    Active,
    /// Showing the extension confirmation; resumes `Active` afterwards.
    Extended,
    /// First expiry. The one extension is on offer.
    TimeUp,
    /// Expiry after the extension. Cooldown starts on the next tick.
    FinalTimeUp,
    /// Rest period before another session.
    Cooldown,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Active => "active",
            SessionState::Extended => "extended",
            SessionState::TimeUp => "time_up",
            SessionState::FinalTimeUp => "final_time_up",
            SessionState::Cooldown => "cooldown",
        };
        f.write_str(name)
    }
}

/// Time-boxed chat session controller.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    policy: SessionPolicy,
    clock: Arc<dyn Clock>,
    state: SessionState,
    time_limit_minutes: u32,
    elapsed_secs: u64,
    has_extended: bool,
    cooldown_remaining_secs: u64,
    /// Clock time at which the visible warning clears.
    warning_until_ms: Option<u64>,
    /// Clock time at which the extension confirmation ends.
    extended_until_ms: Option<u64>,
    cooldown_elapsed_reported: bool,
}

impl SessionTimer {
    pub fn new(policy: SessionPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            clock,
            state: SessionState::Idle,
            time_limit_minutes: 0,
            elapsed_secs: 0,
            has_extended: false,
            cooldown_remaining_secs: 0,
            warning_until_ms: None,
            extended_until_ms: None,
            cooldown_elapsed_reported: false,
        }
    }

    pub fn with_system_clock(policy: SessionPolicy) -> Self {
        Self::new(policy, Arc::new(SystemClock))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    /// Current limit in minutes, including an extension. `0` is unlimited.
    pub fn time_limit_minutes(&self) -> u32 {
        self.time_limit_minutes
    }

    pub fn is_unlimited(&self) -> bool {
        self.time_limit_minutes == 0
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn elapsed_minutes(&self) -> u64 {
        self.elapsed_secs / 60
    }

    pub fn has_extended(&self) -> bool {
        self.has_extended
    }

    pub fn cooldown_remaining_secs(&self) -> u64 {
        self.cooldown_remaining_secs
    }

    fn limit_secs(&self) -> u64 {
        u64::from(self.time_limit_minutes) * 60
    }

    /// Seconds left in the session; negative once a large tick overshoots.
    /// `None` for unlimited sessions.
    pub fn remaining_secs(&self) -> Option<i64> {
        if self.is_unlimited() {
            return None;
        }
        Some(self.limit_secs() as i64 - self.elapsed_secs as i64)
    }

    /// Whole minutes left, rounded down.
    pub fn remaining_minutes(&self) -> Option<i64> {
        self.remaining_secs().map(|secs| secs.div_euclid(60))
    }

    /// 0.0 .. 100.0 fill of the countdown bar.
    pub fn progress_pct(&self) -> f64 {
        let total = self.limit_secs();
        if total == 0 {
            return 0.0;
        }
        (self.elapsed_secs as f64 / total as f64 * 100.0).min(100.0)
    }

    pub fn timer_color(&self) -> Option<TimerColor> {
        self.remaining_minutes()
            .map(TimerColor::from_remaining_minutes)
    }

    pub fn warning_visible(&self) -> bool {
        self.warning_until_ms
            .is_some_and(|until| self.clock.now_ms() < until)
    }

    /// Whether `extend()` would currently succeed.
    pub fn extension_available(&self) -> bool {
        self.state == SessionState::TimeUp && !self.has_extended
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::SessionSnapshot {
            state: self.state,
            time_limit_minutes: self.time_limit_minutes,
            elapsed_secs: self.elapsed_secs,
            remaining_secs: self.remaining_secs(),
            has_extended: self.has_extended,
            warning_visible: self.warning_visible(),
            timer_color: self.timer_color(),
            progress_pct: self.progress_pct(),
            cooldown_remaining_secs: self.cooldown_remaining_secs,
            at: self.now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a fresh session with the given limit.
    ///
    /// Also used by the settings screen to restart a running session with a
    /// new limit. A warning still on screen is cleared first.
    pub fn start_session(&mut self, limit: TimeLimit) -> Result<Vec<Event>, SessionError> {
        match self.state {
            SessionState::Idle | SessionState::Active | SessionState::Extended => {}
            SessionState::Cooldown if self.cooldown_remaining_secs == 0 => {}
            SessionState::Cooldown => {
                tracing::warn!(
                    remaining_secs = self.cooldown_remaining_secs,
                    "start rejected during cooldown"
                );
                return Err(SessionError::CooldownActive {
                    remaining_secs: self.cooldown_remaining_secs,
                });
            }
            SessionState::TimeUp | SessionState::FinalTimeUp => {
                tracing::warn!(state = %self.state, "start rejected");
                return Err(SessionError::InvalidTransition {
                    action: "start a session",
                    state: self.state,
                });
            }
        }

        let mut events = Vec::new();
        if self.warning_visible() {
            events.push(Event::WarningCleared { at: self.now() });
        }

        self.time_limit_minutes = limit.minutes();
        self.elapsed_secs = 0;
        self.has_extended = false;
        self.cooldown_remaining_secs = 0;
        self.cooldown_elapsed_reported = false;
        self.warning_until_ms = None;
        self.extended_until_ms = None;
        self.state = SessionState::Active;

        tracing::info!(limit_minutes = self.time_limit_minutes, "session started");
        events.push(Event::SessionStarted {
            time_limit_minutes: self.time_limit_minutes,
            unlimited: limit.is_unlimited(),
            at: self.now(),
        });
        Ok(events)
    }

    /// Grant the single +5 minute extension. Only offered from `TimeUp`.
    pub fn extend(&mut self) -> Result<Event, SessionError> {
        if !self.extension_available() {
            tracing::warn!(state = %self.state, has_extended = self.has_extended, "extension rejected");
            return Err(SessionError::ExtensionUnavailable { state: self.state });
        }

        self.time_limit_minutes += EXTENSION_MINUTES;
        self.has_extended = true;
        self.state = SessionState::Extended;
        self.extended_until_ms = Some(self.deadline(self.policy.extension_confirm));

        tracing::info!(limit_minutes = self.time_limit_minutes, "session extended");
        Ok(Event::SessionExtended {
            added_minutes: EXTENSION_MINUTES,
            time_limit_minutes: self.time_limit_minutes,
            at: self.now(),
        })
    }

    /// Leave a finished cooldown and return to `Idle`.
    pub fn dismiss_cooldown(&mut self) -> Result<Event, SessionError> {
        match self.state {
            SessionState::Cooldown if self.cooldown_remaining_secs == 0 => {
                self.state = SessionState::Idle;
                tracing::info!("cooldown dismissed");
                Ok(Event::CooldownDismissed { at: self.now() })
            }
            SessionState::Cooldown => Err(SessionError::CooldownActive {
                remaining_secs: self.cooldown_remaining_secs,
            }),
            other => Err(SessionError::InvalidTransition {
                action: "dismiss the cooldown",
                state: other,
            }),
        }
    }

    /// Call once per second. Returns the events produced by this tick, in
    /// order; usually none.
    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();

        if let Some(until) = self.warning_until_ms {
            if self.clock.now_ms() >= until {
                self.warning_until_ms = None;
                events.push(Event::WarningCleared { at: self.now() });
            }
        }

        match self.state {
            SessionState::Idle | SessionState::TimeUp => {}
            SessionState::Active => self.tick_active(&mut events),
            SessionState::Extended => {
                let done = self
                    .extended_until_ms
                    .map_or(true, |until| self.clock.now_ms() >= until);
                if done {
                    self.extended_until_ms = None;
                    self.state = SessionState::Active;
                    tracing::debug!("extension confirmation finished");
                    events.push(Event::SessionResumed {
                        remaining_secs: self.remaining_secs().unwrap_or_default(),
                        at: self.now(),
                    });
                }
            }
            SessionState::FinalTimeUp => {
                self.state = SessionState::Cooldown;
                tracing::info!(cooldown_secs = self.cooldown_remaining_secs, "cooldown started");
                events.push(Event::CooldownStarted {
                    cooldown_secs: self.cooldown_remaining_secs,
                    at: self.now(),
                });
                self.tick_cooldown(&mut events);
            }
            SessionState::Cooldown => self.tick_cooldown(&mut events),
        }

        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn tick_active(&mut self, events: &mut Vec<Event>) {
        if self.is_unlimited() {
            return;
        }

        let increment = self.policy.tick_increment_secs;
        self.elapsed_secs += increment;
        let remaining = self.limit_secs() as i64 - self.elapsed_secs as i64;

        let threshold = self.policy.warning_threshold_secs as i64;
        let in_window = remaining <= threshold && remaining > threshold - increment as i64;
        if in_window && !self.warning_visible() {
            self.warning_until_ms = Some(self.deadline(self.policy.warning_display));
            tracing::debug!(remaining_secs = remaining, "warning raised");
            events.push(Event::WarningRaised {
                remaining_secs: remaining,
                at: self.now(),
            });
        }

        if remaining > 0 {
            return;
        }

        if self.has_extended {
            self.state = SessionState::FinalTimeUp;
            self.cooldown_remaining_secs = self.policy.cooldown_secs;
            self.cooldown_elapsed_reported = false;
            tracing::info!(elapsed_secs = self.elapsed_secs, "final time up");
            events.push(Event::FinalTimeUp {
                elapsed_secs: self.elapsed_secs,
                cooldown_secs: self.cooldown_remaining_secs,
                at: self.now(),
            });
        } else {
            self.state = SessionState::TimeUp;
            tracing::info!(elapsed_secs = self.elapsed_secs, "time up");
            events.push(Event::TimeUp {
                elapsed_secs: self.elapsed_secs,
                at: self.now(),
            });
        }
    }

    fn tick_cooldown(&mut self, events: &mut Vec<Event>) {
        self.cooldown_remaining_secs = self.cooldown_remaining_secs.saturating_sub(1);
        if self.cooldown_remaining_secs > 0 || self.cooldown_elapsed_reported {
            return;
        }

        self.cooldown_elapsed_reported = true;
        let returned_to_idle = self.policy.cooldown_expiry == CooldownExpiry::ReturnToIdle;
        if returned_to_idle {
            self.state = SessionState::Idle;
        }
        tracing::info!(returned_to_idle, "cooldown elapsed");
        events.push(Event::CooldownElapsed {
            returned_to_idle,
            at: self.now(),
        });
    }

    /// Clock time `after` from now, pinned at the end of time.
    fn deadline(&self, after: Duration) -> u64 {
        let after_ms = u64::try_from(after.as_millis()).unwrap_or(u64::MAX);
        self.clock.now_ms().saturating_add(after_ms)
    }

    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.clock.now_ms() as i64).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticker::ManualClock;
    use std::time::Duration;

    fn timer_with(policy: SessionPolicy) -> (SessionTimer, ManualClock) {
        let clock = ManualClock::new(0);
        (SessionTimer::new(policy, Arc::new(clock.clone())), clock)
    }

    /// Tick `n` times, advancing the clock one second before each tick.
    fn run(timer: &mut SessionTimer, clock: &ManualClock, n: u64) -> Vec<Event> {
        let mut events = Vec::new();
        for _ in 0..n {
            clock.advance(Duration::from_secs(1));
            events.extend(timer.tick());
        }
        events
    }

    fn count(events: &[Event], pred: impl Fn(&Event) -> bool) -> usize {
        events.iter().filter(|e| pred(e)).count()
    }

    #[test]
    fn starts_idle() {
        let (timer, _) = timer_with(SessionPolicy::default());
        assert_eq!(timer.state(), SessionState::Idle);
        assert_eq!(timer.remaining_secs(), None);
        assert!(!timer.extension_available());
    }

    #[test]
    fn idle_tick_does_nothing() {
        let (mut timer, clock) = timer_with(SessionPolicy::default());
        assert!(run(&mut timer, &clock, 10).is_empty());
        assert_eq!(timer.elapsed_secs(), 0);
    }

    #[test]
    fn start_resets_counters() {
        let (mut timer, clock) = timer_with(SessionPolicy::default());
        timer.start_session(TimeLimit::Ten).unwrap();
        run(&mut timer, &clock, 30);
        assert_eq!(timer.elapsed_secs(), 30);

        let events = timer.start_session(TimeLimit::Five).unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            Event::SessionStarted { time_limit_minutes: 5, unlimited: false, .. }
        ));
        assert_eq!(timer.elapsed_secs(), 0);
        assert_eq!(timer.remaining_secs(), Some(300));
        assert_eq!(timer.state(), SessionState::Active);
    }

    #[test]
    fn restart_clears_a_visible_warning() {
        let (mut timer, clock) = timer_with(SessionPolicy::default());
        timer.start_session(TimeLimit::Fifteen).unwrap();
        run(&mut timer, &clock, 780);
        assert!(timer.warning_visible());

        let events = timer.start_session(TimeLimit::Twenty).unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Event::WarningCleared { .. }));
        assert!(matches!(events[1], Event::SessionStarted { time_limit_minutes: 20, .. }));
        assert!(!timer.warning_visible());

        // Nothing left to clear on the next tick.
        let next = run(&mut timer, &clock, 10);
        assert_eq!(count(&next, |e| matches!(e, Event::WarningCleared { .. })), 0);
    }

    #[test]
    fn huge_display_durations_saturate() {
        let policy = SessionPolicy {
            warning_display: Duration::from_secs(u64::MAX),
            extension_confirm: Duration::from_secs(u64::MAX),
            ..SessionPolicy::default()
        };
        let (mut timer, clock) = timer_with(policy);
        clock.set_ms(1_000);
        timer.start_session(TimeLimit::Five).unwrap();

        let events = run(&mut timer, &clock, 180);
        assert_eq!(count(&events, |e| matches!(e, Event::WarningRaised { .. })), 1);
        assert!(timer.warning_visible());

        run(&mut timer, &clock, 120);
        assert_eq!(timer.state(), SessionState::TimeUp);
        timer.extend().unwrap();
        run(&mut timer, &clock, 60);
        assert_eq!(timer.state(), SessionState::Extended);
    }

    #[test]
    fn unlimited_session_never_advances() {
        let (mut timer, clock) = timer_with(SessionPolicy::default());
        timer.start_session(TimeLimit::Unlimited).unwrap();
        let events = run(&mut timer, &clock, 10_000);
        assert!(events.is_empty());
        assert_eq!(timer.elapsed_secs(), 0);
        assert_eq!(timer.state(), SessionState::Active);
        assert_eq!(timer.timer_color(), None);
        assert_eq!(timer.progress_pct(), 0.0);
    }

    #[test]
    fn warning_is_raised_once_and_clears() {
        let (mut timer, clock) = timer_with(SessionPolicy::default());
        timer.start_session(TimeLimit::Fifteen).unwrap();

        let before = run(&mut timer, &clock, 779);
        assert_eq!(count(&before, |e| matches!(e, Event::WarningRaised { .. })), 0);

        let at = run(&mut timer, &clock, 1);
        assert_eq!(timer.remaining_secs(), Some(120));
        assert!(matches!(at[..], [Event::WarningRaised { remaining_secs: 120, .. }]));
        assert!(timer.warning_visible());

        let after = run(&mut timer, &clock, 5);
        assert!(!timer.warning_visible());
        assert_eq!(count(&after, |e| matches!(e, Event::WarningCleared { .. })), 1);
        assert_eq!(count(&after, |e| matches!(e, Event::WarningRaised { .. })), 0);
    }

    #[test]
    fn warning_clears_on_wall_clock_not_ticks() {
        let (mut timer, clock) = timer_with(SessionPolicy::default());
        timer.start_session(TimeLimit::Five).unwrap();
        for _ in 0..180 {
            timer.tick();
        }
        assert!(timer.warning_visible());

        // Many ticks without the clock moving keep it visible.
        for _ in 0..10 {
            timer.tick();
        }
        assert!(timer.warning_visible());

        clock.advance(Duration::from_secs(5));
        assert!(!timer.warning_visible());
    }

    #[test]
    fn reaches_time_up_at_limit() {
        let (mut timer, clock) = timer_with(SessionPolicy::default());
        timer.start_session(TimeLimit::Fifteen).unwrap();

        run(&mut timer, &clock, 899);
        assert_eq!(timer.state(), SessionState::Active);

        let events = run(&mut timer, &clock, 1);
        assert_eq!(timer.state(), SessionState::TimeUp);
        assert!(matches!(events[..], [Event::TimeUp { elapsed_secs: 900, .. }]));

        // Stops counting.
        run(&mut timer, &clock, 10);
        assert_eq!(timer.elapsed_secs(), 900);
    }

    #[test]
    fn extension_adds_five_minutes_once() {
        let (mut timer, clock) = timer_with(SessionPolicy::default());
        timer.start_session(TimeLimit::Five).unwrap();
        assert_eq!(
            timer.extend(),
            Err(SessionError::ExtensionUnavailable { state: SessionState::Active })
        );

        run(&mut timer, &clock, 300);
        assert!(timer.extension_available());
        let limit_before = timer.time_limit_minutes();

        let event = timer.extend().unwrap();
        assert!(matches!(
            event,
            Event::SessionExtended { added_minutes: 5, time_limit_minutes: 10, .. }
        ));
        assert_eq!(u64::from(timer.time_limit_minutes() - limit_before) * 60, 300);
        assert!(timer.has_extended());
        assert_eq!(timer.state(), SessionState::Extended);
        assert_eq!(timer.remaining_secs(), Some(300));

        // Cannot extend twice.
        assert!(timer.extend().is_err());
    }

    #[test]
    fn extension_confirmation_resumes_after_three_seconds() {
        let (mut timer, clock) = timer_with(SessionPolicy::default());
        timer.start_session(TimeLimit::Five).unwrap();
        run(&mut timer, &clock, 300);
        timer.extend().unwrap();

        run(&mut timer, &clock, 2);
        assert_eq!(timer.state(), SessionState::Extended);
        assert_eq!(timer.elapsed_secs(), 300);

        let events = run(&mut timer, &clock, 1);
        assert_eq!(timer.state(), SessionState::Active);
        assert!(matches!(events[..], [Event::SessionResumed { remaining_secs: 300, .. }]));
        assert_eq!(timer.elapsed_secs(), 300);
    }

    #[test]
    fn second_expiry_goes_to_final_time_up() {
        let (mut timer, clock) = timer_with(SessionPolicy::default());
        timer.start_session(TimeLimit::Five).unwrap();
        run(&mut timer, &clock, 300);
        timer.extend().unwrap();
        run(&mut timer, &clock, 3);

        let events = run(&mut timer, &clock, 300);
        assert_eq!(timer.state(), SessionState::FinalTimeUp);
        assert_eq!(count(&events, |e| matches!(e, Event::TimeUp { .. })), 0);
        assert_eq!(
            count(&events, |e| matches!(e, Event::FinalTimeUp { cooldown_secs: 7_020, .. })),
            1
        );
        assert_eq!(timer.cooldown_remaining_secs(), 7_020);
        assert_eq!(
            timer.extend(),
            Err(SessionError::ExtensionUnavailable { state: SessionState::FinalTimeUp })
        );
    }

    #[test]
    fn cooldown_counts_down_and_holds_at_zero() {
        let policy = SessionPolicy {
            cooldown_secs: 5,
            ..SessionPolicy::default()
        };
        let (mut timer, clock) = timer_with(policy);
        timer.start_session(TimeLimit::Five).unwrap();
        run(&mut timer, &clock, 300);
        timer.extend().unwrap();
        run(&mut timer, &clock, 303);
        assert_eq!(timer.state(), SessionState::FinalTimeUp);
        let elapsed = timer.elapsed_secs();

        let first = run(&mut timer, &clock, 1);
        assert_eq!(timer.state(), SessionState::Cooldown);
        assert!(matches!(first[0], Event::CooldownStarted { cooldown_secs: 5, .. }));
        assert_eq!(timer.cooldown_remaining_secs(), 4);

        assert_eq!(
            timer.start_session(TimeLimit::Five),
            Err(SessionError::CooldownActive { remaining_secs: 4 })
        );
        assert!(timer.dismiss_cooldown().is_err());

        let rest = run(&mut timer, &clock, 10);
        assert_eq!(timer.cooldown_remaining_secs(), 0);
        assert_eq!(timer.state(), SessionState::Cooldown);
        assert_eq!(
            count(&rest, |e| matches!(e, Event::CooldownElapsed { returned_to_idle: false, .. })),
            1
        );
        // The elapsed counter never moved during cooldown.
        assert_eq!(timer.elapsed_secs(), elapsed);

        timer.dismiss_cooldown().unwrap();
        assert_eq!(timer.state(), SessionState::Idle);
    }

    #[test]
    fn cooldown_can_return_to_idle() {
        let policy = SessionPolicy {
            cooldown_secs: 3,
            cooldown_expiry: CooldownExpiry::ReturnToIdle,
            ..SessionPolicy::default()
        };
        let (mut timer, clock) = timer_with(policy);
        timer.start_session(TimeLimit::Five).unwrap();
        run(&mut timer, &clock, 300);
        timer.extend().unwrap();
        run(&mut timer, &clock, 303 + 3);

        assert_eq!(timer.state(), SessionState::Idle);
        assert_eq!(timer.cooldown_remaining_secs(), 0);
        assert!(timer.start_session(TimeLimit::Ten).is_ok());
    }

    #[test]
    fn new_session_after_cooldown_resets_extension() {
        let policy = SessionPolicy {
            cooldown_secs: 1,
            ..SessionPolicy::default()
        };
        let (mut timer, clock) = timer_with(policy);
        timer.start_session(TimeLimit::Five).unwrap();
        run(&mut timer, &clock, 300);
        timer.extend().unwrap();
        run(&mut timer, &clock, 304);
        assert_eq!(timer.cooldown_remaining_secs(), 0);

        timer.start_session(TimeLimit::Five).unwrap();
        assert!(!timer.has_extended());
        run(&mut timer, &clock, 300);
        assert!(timer.extension_available());
    }

    #[test]
    fn start_rejected_when_time_is_up() {
        let (mut timer, clock) = timer_with(SessionPolicy::default());
        timer.start_session(TimeLimit::Five).unwrap();
        run(&mut timer, &clock, 300);
        assert_eq!(
            timer.start_session(TimeLimit::Ten),
            Err(SessionError::InvalidTransition {
                action: "start a session",
                state: SessionState::TimeUp,
            })
        );
    }

    #[test]
    fn dev_mode_counts_minutes_per_tick() {
        let (mut timer, clock) = timer_with(SessionPolicy::dev());
        timer.start_session(TimeLimit::Five).unwrap();

        let events = run(&mut timer, &clock, 5);
        assert_eq!(timer.elapsed_secs(), 300);
        assert_eq!(timer.state(), SessionState::TimeUp);
        // remaining 0 falls in (4 - 60, 4].
        assert_eq!(count(&events, |e| matches!(e, Event::WarningRaised { .. })), 1);
    }

    #[test]
    fn color_tracks_remaining_minutes() {
        let (mut timer, clock) = timer_with(SessionPolicy::default());
        timer.start_session(TimeLimit::Fifteen).unwrap();
        assert_eq!(timer.timer_color(), Some(TimerColor::Safe));

        run(&mut timer, &clock, 5 * 60);
        assert_eq!(timer.remaining_minutes(), Some(10));
        assert_eq!(timer.timer_color(), Some(TimerColor::Caution));

        run(&mut timer, &clock, 5 * 60);
        assert_eq!(timer.timer_color(), Some(TimerColor::Urgent));

        run(&mut timer, &clock, 4 * 60 + 1);
        assert_eq!(timer.remaining_minutes(), Some(0));
        assert_eq!(timer.timer_color(), Some(TimerColor::Critical));
        assert!(timer.progress_pct() > 93.0 && timer.progress_pct() < 94.0);
    }

    #[test]
    fn snapshot_returns_valid_event() {
        let (mut timer, clock) = timer_with(SessionPolicy::default());
        timer.start_session(TimeLimit::Ten).unwrap();
        run(&mut timer, &clock, 60);

        match timer.snapshot() {
            Event::SessionSnapshot {
                state,
                time_limit_minutes,
                elapsed_secs,
                remaining_secs,
                progress_pct,
                ..
            } => {
                assert_eq!(state, SessionState::Active);
                assert_eq!(time_limit_minutes, 10);
                assert_eq!(elapsed_secs, 60);
                assert_eq!(remaining_secs, Some(540));
                assert!((progress_pct - 10.0).abs() < 1e-9);
            }
            _ => panic!("Expected SessionSnapshot"),
        }
    }
}
