//! Clocks and periodic tick sources.
//!
//! The session timer never reads wall-clock time or owns a thread. The host
//! registers a periodic callback with a [`Ticker`] and keeps the returned
//! [`TickHandle`] for as long as the view lives; dropping the handle
//! unregisters the callback.
//!
//! Two implementations are provided:
//!
//! - [`ManualTicker`] with a [`ManualClock`]: a fake clock that only moves
//!   when [`ManualTicker::advance`] is called. Used by tests and by the CLI
//!   simulator.
//! - [`TokioTicker`] with a [`SystemClock`]: real periodic ticks on the
//!   current tokio runtime.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Source of "now" in milliseconds.
pub trait Clock: fmt::Debug + Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Wall clock, milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Shared fake clock. Clones observe the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn set_ms(&self, ms: u64) {
        self.now_ms.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.now_ms
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// Callback invoked on every tick.
pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

/// Something that can invoke a callback periodically.
pub trait Ticker {
    /// Register `callback` to run every `interval`. The first call happens one
    /// full interval after registration.
    fn on_tick(&self, interval: Duration, callback: TickCallback) -> TickHandle;
}

/// Cancellation handle for a registered tick callback.
///
/// The callback stops when the handle is cancelled or dropped.
#[must_use = "dropping the handle cancels the tick callback"]
pub struct TickHandle {
    cancelled: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl TickHandle {
    fn new(cancelled: Arc<AtomicBool>, task: Option<JoinHandle<()>>) -> Self {
        Self { cancelled, task }
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled.load(Ordering::SeqCst)
    }

    pub fn cancel(self) {
        // Drop does the work.
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

// ── Manual ticker ──────────────────────────────────────────────────

struct Registration {
    interval_ms: u64,
    next_due_ms: u64,
    /// Taken out while the callback runs so the lock is not held.
    callback: Option<TickCallback>,
    cancelled: Arc<AtomicBool>,
}

/// Deterministic ticker driven by a [`ManualClock`].
#[derive(Clone)]
pub struct ManualTicker {
    clock: ManualClock,
    registrations: Arc<Mutex<Vec<Registration>>>,
}

impl ManualTicker {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            registrations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn clock(&self) -> ManualClock {
        self.clock.clone()
    }

    /// Number of callbacks that are still registered.
    pub fn active_callbacks(&self) -> usize {
        self.lock()
            .iter()
            .filter(|r| !r.cancelled.load(Ordering::SeqCst))
            .count()
    }

    /// Move the clock forward by `by`, firing every callback once per interval
    /// boundary crossed, in due-time order.
    pub fn advance(&self, by: Duration) {
        let target = self.clock.now_ms() + by.as_millis() as u64;

        loop {
            let next = {
                let mut regs = self.lock();
                regs.retain(|r| !r.cancelled.load(Ordering::SeqCst));
                let found = regs
                    .iter_mut()
                    .filter(|r| r.next_due_ms <= target && r.callback.is_some())
                    .min_by_key(|r| r.next_due_ms)
                    .map(|r| {
                        let due = r.next_due_ms;
                        r.next_due_ms += r.interval_ms;
                        (due, r.callback.take(), r.cancelled.clone())
                    });
                found
            };

            let Some((due, callback, cancelled)) = next else {
                break;
            };
            self.clock.set_ms(due);

            if let Some(mut callback) = callback {
                callback();
                // Registrations may have been added meanwhile; find ours again.
                let mut regs = self.lock();
                if let Some(reg) = regs
                    .iter_mut()
                    .find(|r| Arc::ptr_eq(&r.cancelled, &cancelled))
                {
                    reg.callback = Some(callback);
                }
            }
        }

        self.clock.set_ms(target);
    }

    /// Advance by whole seconds.
    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Registration>> {
        // A panicking callback leaves the vector itself consistent.
        self.registrations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Ticker for ManualTicker {
    fn on_tick(&self, interval: Duration, callback: TickCallback) -> TickHandle {
        let interval_ms = (interval.as_millis() as u64).max(1);
        let cancelled = Arc::new(AtomicBool::new(false));
        self.lock().push(Registration {
            interval_ms,
            next_due_ms: self.clock.now_ms() + interval_ms,
            callback: Some(callback),
            cancelled: cancelled.clone(),
        });
        TickHandle::new(cancelled, None)
    }
}

impl fmt::Debug for ManualTicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualTicker")
            .field("now_ms", &self.clock.now_ms())
            .field("active_callbacks", &self.active_callbacks())
            .finish()
    }
}

// ── Tokio ticker ───────────────────────────────────────────────────

/// Ticker backed by `tokio::time::interval`.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTicker;

impl Ticker for TokioTicker {
    fn on_tick(&self, interval: Duration, mut callback: TickCallback) -> TickHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        let task = tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            timer.tick().await;
            loop {
                timer.tick().await;
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                callback();
            }
        });
        TickHandle::new(cancelled, Some(task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> (Arc<AtomicU64>, TickCallback) {
        let count = Arc::new(AtomicU64::new(0));
        let c = count.clone();
        (count, Box::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }))
    }

    #[test]
    fn manual_ticker_fires_once_per_interval() {
        let ticker = ManualTicker::new(ManualClock::new(0));
        let (count, cb) = counter();
        let _handle = ticker.on_tick(Duration::from_secs(1), cb);

        ticker.advance(Duration::from_millis(999));
        assert_eq!(count.load(Ordering::SeqCst), 0);

        ticker.advance(Duration::from_millis(1));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        ticker.advance_secs(10);
        assert_eq!(count.load(Ordering::SeqCst), 11);
        assert_eq!(ticker.clock().now_ms(), 11_000);
    }

    #[test]
    fn clock_reads_due_time_inside_callback() {
        let clock = ManualClock::new(500);
        let ticker = ManualTicker::new(clock.clone());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_cb = seen.clone();
        let clock_cb = clock.clone();
        let _handle = ticker.on_tick(
            Duration::from_secs(1),
            Box::new(move || seen_cb.lock().unwrap().push(clock_cb.now_ms())),
        );

        ticker.advance_secs(3);
        assert_eq!(*seen.lock().unwrap(), vec![1_500, 2_500, 3_500]);
    }

    #[test]
    fn dropping_handle_cancels_callback() {
        let ticker = ManualTicker::new(ManualClock::default());
        let (count, cb) = counter();
        let handle = ticker.on_tick(Duration::from_secs(1), cb);

        ticker.advance_secs(2);
        assert!(handle.is_active());
        handle.cancel();

        ticker.advance_secs(5);
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(ticker.active_callbacks(), 0);
    }

    #[test]
    fn interleaves_callbacks_with_different_intervals() {
        let ticker = ManualTicker::new(ManualClock::default());
        let order = Arc::new(Mutex::new(Vec::new()));
        let fast = order.clone();
        let slow = order.clone();
        let _a = ticker.on_tick(
            Duration::from_secs(1),
            Box::new(move || fast.lock().unwrap().push("fast")),
        );
        let _b = ticker.on_tick(
            Duration::from_millis(2_500),
            Box::new(move || slow.lock().unwrap().push("slow")),
        );

        ticker.advance_secs(3);
        assert_eq!(*order.lock().unwrap(), vec!["fast", "fast", "slow", "fast"]);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_ticker_stops_after_cancel() {
        let (count, cb) = counter();
        let handle = TokioTicker.on_tick(Duration::from_secs(1), cb);

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        drop(handle);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }
}
