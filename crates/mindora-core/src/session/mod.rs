mod display;
mod limit;
mod policy;
mod timer;

use std::sync::{Arc, Mutex};
use std::time::Duration;

pub use display::{format_cooldown, TimerColor};
pub use limit::{time_limit_options, TimeLimit, TimeLimitOption};
pub use policy::{
    CooldownExpiry, SessionPolicy, DEFAULT_COOLDOWN_SECS, DEV_MODE_MULTIPLIER, EXTENSION_MINUTES,
};
pub use timer::{SessionState, SessionTimer};

use crate::events::Event;
use crate::ticker::{TickHandle, Ticker};

/// Period of the session tick.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Drive `timer` from `ticker`, forwarding every event it produces.
///
/// The timer keeps ticking until the returned handle is dropped.
pub fn attach_ticker<T, F>(ticker: &T, timer: Arc<Mutex<SessionTimer>>, mut on_event: F) -> TickHandle
where
    T: Ticker + ?Sized,
    F: FnMut(Event) + Send + 'static,
{
    ticker.on_tick(
        TICK_INTERVAL,
        Box::new(move || {
            let events = timer
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .tick();
            for event in events {
                on_event(event);
            }
        }),
    )
}
