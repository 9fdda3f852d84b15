//! # Error Types
//!
//! This module defines the error type shared by every fallible operation in the
//! engine. All variants are fatal to the current run: the engine never retries
//! internally and never substitutes a default fitness for a failed evaluation.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use gaforge::error::{GeneticError, Result};
//!
//! fn check_rate(rate: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&rate) {
//!         return Err(GeneticError::Configuration(format!("rate {} outside [0, 1]", rate)));
//!     }
//!     Ok(rate)
//! }
//!
//! assert!(check_rate(0.5).is_ok());
//! assert!(check_rate(1.5).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use gaforge::error::{GeneticError, OptionExt};
//!
//! fn first_score(scores: &[f64]) -> gaforge::error::Result<f64> {
//!     scores.first().copied().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert!(first_score(&[]).is_err());
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while running the genetic algorithm.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Invalid strategy or run parameters, reported before any generation runs.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A chromosome operation was called on a state that does not support it.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Statistics or selection were requested on a population with no members.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Fitness could not be computed for at least one individual.
    #[error("Evaluation failure: {0}")]
    EvaluationFailure(String),

    /// Error that occurs when an I/O operation fails, e.g. spawning a worker thread.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for genetic algorithm operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Result to add context to foreign errors.
///
/// ## Examples
///
/// ```rust
/// use gaforge::error::ResultExt;
///
/// fn parse_size(raw: &str) -> gaforge::error::Result<usize> {
///     raw.parse::<usize>().context("Invalid population size")
/// }
///
/// assert!(parse_size("12").is_ok());
/// assert!(parse_size("twelve").is_err());
/// ```
pub trait ResultExt<T, E> {
    /// Converts the error into a `GeneticError::Other` prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| GeneticError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_wraps_foreign_error() {
        let result: Result<u32> = "abc".parse::<u32>().context("Failed to parse seed");
        match result {
            Err(GeneticError::Other(msg)) => assert!(msg.starts_with("Failed to parse seed: ")),
            _ => panic!("Expected Other error"),
        }
    }

    #[test]
    fn test_io_error_converts() {
        fn spawn_like() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no threads left"))?;
            Ok(())
        }

        assert!(matches!(spawn_like(), Err(GeneticError::Io(_))));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            GeneticError::EmptyPopulation.to_string(),
            "Empty population error: Cannot operate on an empty population"
        );
        assert_eq!(
            GeneticError::InvalidOperation("split".to_string()).to_string(),
            "Invalid operation: split"
        );
    }
}
