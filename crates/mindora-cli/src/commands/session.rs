use std::sync::{mpsc, Arc, Mutex, MutexGuard};

use clap::Subcommand;
use mindora_core::session::{attach_ticker, format_cooldown, time_limit_options};
use mindora_core::{
    Clock, Config, Event, ManualClock, ManualTicker, SessionPolicy, SessionTimer, SystemClock,
    TimeLimit, TokioTicker,
};

use super::print_line;

/// Upper bound for an open-ended simulation.
const MAX_SIMULATED_SECS: u64 = 6 * 60 * 60;

#[derive(Subcommand)]
pub enum SessionAction {
    /// List the time-limit options
    Limits,
    /// Run a session on a simulated clock and print every event
    Simulate {
        /// Time limit in minutes (0 = no limit); defaults to the configured limit
        #[arg(long)]
        limit: Option<u32>,
        /// Simulated seconds to run; by default runs until the session ends
        #[arg(long)]
        seconds: Option<u64>,
        /// Count every tick as a minute
        #[arg(long)]
        dev: bool,
        /// Accept the extension when time is up
        #[arg(long)]
        extend: bool,
    },
    /// Run a live session, printing events as they happen
    Run {
        /// Time limit in minutes (0 = no limit); defaults to the configured limit
        #[arg(long)]
        limit: Option<u32>,
        /// Count every tick as a minute
        #[arg(long)]
        dev: bool,
        /// Accept the extension when time is up
        #[arg(long)]
        extend: bool,
    },
}

fn lock(timer: &Arc<Mutex<SessionTimer>>) -> MutexGuard<'_, SessionTimer> {
    timer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn resolve_limit(
    limit: Option<u32>,
    config: &Config,
) -> Result<TimeLimit, Box<dyn std::error::Error>> {
    match limit {
        Some(minutes) => Ok(TimeLimit::from_minutes(minutes)?),
        None => Ok(config.default_limit()),
    }
}

fn policy(config: &Config, dev: bool) -> SessionPolicy {
    let mut config = config.clone();
    config.session.dev_mode |= dev;
    config.session_policy()
}

/// Whether the session has reached a point where nothing but waiting is left.
fn ends_session(event: &Event) -> bool {
    matches!(event, Event::TimeUp { .. } | Event::CooldownStarted { .. })
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SessionAction::Limits => {
            let options = time_limit_options();
            println!("{}", serde_json::to_string_pretty(&options)?);
            Ok(())
        }
        SessionAction::Simulate {
            limit,
            seconds,
            dev,
            extend,
        } => simulate(limit, seconds, dev, extend),
        SessionAction::Run { limit, dev, extend } => run_live(limit, dev, extend),
    }
}

fn simulate(
    limit: Option<u32>,
    seconds: Option<u64>,
    dev: bool,
    extend: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let limit = resolve_limit(limit, &config)?;

    let clock = ManualClock::new(SystemClock.now_ms());
    let ticker = ManualTicker::new(clock.clone());
    let timer = Arc::new(Mutex::new(SessionTimer::new(
        policy(&config, dev),
        Arc::new(clock),
    )));
    let (tx, rx) = mpsc::channel();
    let _handle = attach_ticker(&ticker, timer.clone(), move |event| {
        let _ = tx.send(event);
    });

    let started = lock(&timer).start_session(limit)?;
    for event in started {
        print_line(&event)?;
    }

    for _ in 0..seconds.unwrap_or(MAX_SIMULATED_SECS) {
        ticker.advance_secs(1);
        let mut finished = false;
        for event in rx.try_iter() {
            print_line(&event)?;
            if extend && matches!(event, Event::TimeUp { .. }) {
                print_line(&lock(&timer).extend()?)?;
            } else if ends_session(&event) {
                finished = seconds.is_none();
            }
        }
        if finished {
            break;
        }
    }

    print_line(&lock(&timer).snapshot())?;
    Ok(())
}

fn run_live(limit: Option<u32>, dev: bool, extend: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let limit = resolve_limit(limit, &config)?;
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async move {
        let timer = Arc::new(Mutex::new(SessionTimer::with_system_clock(policy(
            &config, dev,
        ))));
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let _handle = attach_ticker(&TokioTicker, timer.clone(), move |event| {
            let _ = tx.send(event);
        });

        let started = lock(&timer).start_session(limit)?;
        for event in started {
            print_line(&event)?;
        }

        while let Some(event) = rx.recv().await {
            print_line(&event)?;
            if extend && matches!(event, Event::TimeUp { .. }) {
                print_line(&lock(&timer).extend()?)?;
                continue;
            }
            if let Event::CooldownStarted { cooldown_secs, .. } = event {
                tracing::info!(rest = %format_cooldown(cooldown_secs), "rest period started");
            }
            if ends_session(&event) {
                break;
            }
        }

        print_line(&lock(&timer).snapshot())?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
