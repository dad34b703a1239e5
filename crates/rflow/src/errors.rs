//! Error types for the rflow CLI application.
//!
//! A failed page fetch is never fatal to the viewer; the feed controller logs it and stays usable.
//! The errors here are the ones that do end the process: an unusable endpoint, a terminal that
//! cannot be driven, or output that cannot be written.

use thiserror::Error;

/// Errors that can occur during CLI operations.
///
/// This enum wraps the error types of dependencies and the underlying library into a single error
/// type for the CLI application, keeping their original messages.
#[derive(Error, Debug)]
pub enum RflowErrors {
  /// Errors from the underlying researchflow library
  #[error(transparent)]
  Fetch(#[from] researchflow::errors::FetchError),

  /// Terminal and IO operation errors
  #[error(transparent)]
  IO(#[from] std::io::Error),

  /// JSON encoding errors from `list --json`
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// `browse` was started without an interactive terminal
  #[error("`browse` needs an interactive terminal; try `rflow list` instead")]
  NotATerminal,
}
