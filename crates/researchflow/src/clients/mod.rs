//! Fetching pages of papers from an upstream search API.
//!
//! The feed only needs one operation from its data source: "give me the page at this offset for
//! this topic". That contract is the [`Fetcher`] trait. It returns a [`Page`] carrying the parsed
//! papers, whether more pages might follow, and the offset of the next page.
//!
//! # Supported Sources
//!
//! - [`arxiv`] - Client for the arXiv.org Atom search API
//!
//! # Examples
//!
//! ```no_run
//! use researchflow::clients::{ArxivClient, Fetcher, PageRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArxivClient::new();
//!
//! // First page on a random topic
//! let page = client.fetch(&PageRequest::first()).await?;
//!
//! // Second page on the same topic
//! let topic = page.papers.first().map(|p| p.topic.clone());
//! let next = client.fetch(&PageRequest { offset: page.next_offset, topic }).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use quick_xml::de::from_str;

pub mod arxiv;

pub use arxiv::ArxivClient;

use super::*;

/// What to fetch: a start offset and an optional topic.
///
/// A request without a topic lets the fetcher choose one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
  /// Index of the first result to return
  pub offset: usize,
  /// Search topic, or `None` to pick one at random
  pub topic:  Option<String>,
}

impl PageRequest {
  /// The first page of a fresh feed.
  pub fn first() -> Self { Self::default() }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
  /// Papers in upstream order
  pub papers:      Vec<Paper>,
  /// Whether another page might exist.
  ///
  /// True iff the page came back full. The API reports no total, so this is a heuristic: a full
  /// final page still reports `true`, and only the following empty page settles it.
  pub has_more:    bool,
  /// Offset of the following page; always the request offset plus the page size
  pub next_offset: usize,
}

/// A source of paper pages.
///
/// Implementations issue a single request per call and never retry.
#[async_trait]
pub trait Fetcher: Send + Sync {
  /// Fetches the page described by `request`.
  async fn fetch(&self, request: &PageRequest) -> Result<Page, FetchError>;
}
