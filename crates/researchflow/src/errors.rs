//! Error types for the researchflow library.
//!
//! There is a single failure path in this library: fetching a page from the upstream API. All of
//! its failure modes are collected in [`FetchError`]. The feed controller never propagates it
//! further; it logs the error and returns to idle so the same near-end signal can retry later.
//!
//! # Examples
//!
//! ```no_run
//! use researchflow::{
//!   clients::{ArxivClient, Fetcher, PageRequest},
//!   errors::FetchError,
//! };
//!
//! # async fn example() {
//! let client = ArxivClient::new();
//! match client.fetch(&PageRequest::first()).await {
//!   Ok(page) => println!("Fetched {} papers", page.papers.len()),
//!   Err(FetchError::Status(status)) => println!("arXiv answered {status}"),
//!   Err(e) => println!("Fetch failed: {e}"),
//! }
//! # }
//! ```

use thiserror::Error;

/// Errors that can occur while fetching a page of papers.
///
/// No distinction is made between transient and permanent failures; callers decide whether and
/// when to retry.
#[derive(Error, Debug)]
pub enum FetchError {
  /// The HTTP request itself failed.
  ///
  /// This can occur when:
  /// - The network is unavailable
  /// - The server is unreachable
  /// - The connection drops while reading the body
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The API answered with a non-success status code.
  #[error("Upstream returned {0}")]
  Status(reqwest::StatusCode),

  /// The response body was not a readable Atom document.
  ///
  /// The string parameter contains the parser's message for debugging.
  #[error("Failed to parse response: {0}")]
  Parse(String),

  /// The configured endpoint is not a valid URL.
  #[error(transparent)]
  InvalidUrl(#[from] url::ParseError),
}
