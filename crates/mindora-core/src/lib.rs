//! # Mindora Core Library
//!
//! This library provides the logic behind Mindora's time-boxed chats and its
//! habit garden. Both are pure state machines with no I/O; the CLI and any GUI
//! are thin layers that call into them and render the returned events.
//!
//! ## Architecture
//!
//! - **Session Timer**: A tick-driven state machine for time-boxed chat
//!   sessions (warning, one extension, final time-up, cooldown)
//! - **Garden**: Habits whose streaks and points derive a level, and plants
//!   whose growth stage follows the days practiced
//! - **Ticker**: Injectable periodic tick sources and clocks, with a manual
//!   fake clock for tests
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`SessionTimer`]: Core session state machine
//! - [`Garden`]: Habit collection and growth model
//! - [`Ticker`]: Trait for periodic tick sources
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod garden;
pub mod session;
pub mod storage;
pub mod ticker;

pub use error::{ConfigError, CoreError, GardenError, SessionError, ValidationError};
pub use events::{Event, PlantGrowth};
pub use garden::{derive_level, derive_stage, visual_size, Garden, Habit, Level, Plant, Stage};
pub use session::{SessionPolicy, SessionState, SessionTimer, TimeLimit, TimerColor};
pub use storage::Config;
pub use ticker::{Clock, ManualClock, ManualTicker, SystemClock, TickHandle, Ticker, TokioTicker};
