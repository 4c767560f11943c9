//! Centralized error types for the wxdash application.
//!
//! This module provides a typed error hierarchy that:
//! - Keeps engine, input and configuration failures distinguishable
//! - Provides user-friendly messages suitable for display
//! - Preserves full error context for debugging/logging

use std::path::PathBuf;
use thiserror::Error;
use wxdash_weather::{BaselineError, CompareError};

/// Top-level application error type.
///
/// Use `user_message()` to get a display-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Comparison error: {0}")]
    Compare(#[from] CompareError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Input(e) => e.user_message(),
            AppError::Compare(e) => compare_user_message(e),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

fn compare_user_message(error: &CompareError) -> &'static str {
    match error {
        CompareError::LengthMismatch { .. } => {
            "Every forecast day needs a matching historical baseline."
        }
        CompareError::InvalidBaseline { source, .. } => match source {
            BaselineError::NonFinite { .. } => "Historical data contains a missing value.",
            BaselineError::NonPositiveSd { .. } => {
                "Historical data has a zero or negative spread."
            }
            BaselineError::UnsortedPercentiles { .. } => {
                "Historical percentiles must be in ascending order."
            }
        },
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Errors reading a comparison request.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed request: {0}")]
    Parse(#[from] serde_json::Error),
}

impl InputError {
    pub fn user_message(&self) -> &'static str {
        match self {
            InputError::Read { .. } => "The request file could not be read.",
            InputError::Parse(_) => "The request file is not a valid comparison request.",
        }
    }
}
