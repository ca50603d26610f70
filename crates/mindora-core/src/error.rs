//! Core error types for mindora-core.
//!
//! This module defines the error hierarchy using thiserror. The state
//! machines themselves are closed arithmetic, so the only failures are
//! rejected transitions, invalid configuration and config file I/O.

use std::path::PathBuf;
use thiserror::Error;

use crate::session::SessionState;

/// Core error type for mindora-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Session controller errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Habit garden errors
    #[error("Garden error: {0}")]
    Garden(#[from] GardenError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A time limit outside the offered options
    #[error("Invalid time limit: {minutes} minutes (expected one of 0, 5, 10, 15, 20, 30)")]
    InvalidTimeLimit { minutes: u32 },
}

/// Errors raised by the session timer controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The requested action is not offered in the current state
    #[error("Cannot {action} while the session is {state}")]
    InvalidTransition {
        action: &'static str,
        state: SessionState,
    },

    /// The rest period has not finished yet
    #[error("Cooldown still active: {remaining_secs}s remaining")]
    CooldownActive { remaining_secs: u64 },

    /// The one extension has been used or time is not up
    #[error("Extension unavailable while the session is {state}")]
    ExtensionUnavailable { state: SessionState },
}

/// Errors raised by the habit garden.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GardenError {
    /// No habit with the given id
    #[error("Unknown habit: {0}")]
    UnknownHabit(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
