//! Infinite-scroll pagination over the arXiv search API.
//!
//! This library provides the two pieces a feed viewer needs to page through recent research
//! papers:
//! - A [`Fetcher`](clients::Fetcher) that requests one page of results for a topic and turns the
//!   Atom response into uniform [`Paper`] records
//! - A [`FeedController`] that holds the growing list of papers, the pagination cursor and the
//!   loading flag, and decides when to fetch, where to scroll and which paper is current
//!
//! The controller never performs I/O itself. Every input signal (mount, scroll, sentinel
//! visibility, navigation) returns [`Effect`]s that the rendering surface executes, and fetch
//! results are fed back through [`FeedController::complete`].
//!
//! # Example
//! ```rust,no_run
//! use researchflow::{clients::ArxivClient, FeedController};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!   let client = ArxivClient::new();
//!   let mut feed = FeedController::new();
//!
//!   if let Some(request) = feed.mount() {
//!     feed.fulfil(&client, request).await;
//!   }
//!
//!   for paper in feed.papers() {
//!     println!("{} ({})", paper.title, paper.topic);
//!   }
//!   Ok(())
//! }
//! ```

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
#[cfg(test)] use tracing_test::traced_test;

pub mod clients;
pub mod config;
pub mod cursor;
pub mod errors;
pub mod feed;
pub mod layout;
pub mod paper;
pub mod topics;

use clients::{Fetcher, Page, PageRequest};
use config::ClientConfig;
use cursor::PageCursor;
use errors::FetchError;
pub use feed::{Effect, FeedController, FeedStatus, ScrollBehavior, ScrollTo};
use layout::{Layout, ScrollAnchor};
pub use paper::Paper;
