//! Client implementation for paging through arXiv search results.
//!
//! This module queries arXiv's Atom feed API (http://export.arxiv.org/api/query) for the most
//! recently submitted papers matching a topic, one fixed-size page at a time, and converts the
//! entries to the common [`Paper`] format.
//!
//! Every request asks intermediaries not to cache the response, so each page reflects live
//! upstream state.
//!
//! # Examples
//!
//! ```no_run
//! use researchflow::clients::{ArxivClient, Fetcher, PageRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArxivClient::new();
//! let page = client
//!   .fetch(&PageRequest { offset: 0, topic: Some("quantum computing".into()) })
//!   .await?;
//!
//! for paper in &page.papers {
//!   println!("{}", paper.title);
//! }
//! # Ok(())
//! # }
//! ```

use reqwest::header::{CACHE_CONTROL, EXPIRES, PRAGMA, USER_AGENT};
use url::Url;

use super::*;
use crate::{config, topics};

/// Internal representation of the arXiv API's Atom feed response.
#[derive(Debug, Deserialize)]
struct Feed {
  /// A `Feed` from arXiv may contain any number of `Entry`s, including none
  #[serde(rename = "entry", default)]
  entries: Vec<Entry>,
}

/// Internal representation of a paper entry from arXiv's API response.
///
/// Both fields are optional so a malformed entry degrades to placeholder text instead of failing
/// the whole page.
#[derive(Debug, Deserialize)]
struct Entry {
  /// Paper title (may contain LaTeX markup and line breaks)
  #[serde(default)]
  title:   Option<String>,
  /// Paper abstract (may contain LaTeX markup and line breaks)
  #[serde(default)]
  summary: Option<String>,
}

/// Client for paging through the arXiv API.
///
/// The client is cheap to clone; clones share the underlying connection pool, so a viewer can
/// hand one to each spawned fetch task.
///
/// # Examples
///
/// ```no_run
/// # use researchflow::{clients::ArxivClient, config::ClientConfig};
/// // Against the public endpoint
/// let client = ArxivClient::new();
///
/// // Against a local mirror
/// let client = ArxivClient::with_config(ClientConfig::with_base_url("http://localhost:8080/api"));
/// ```
#[derive(Debug, Clone)]
pub struct ArxivClient {
  /// Internal web client used to connect to the API.
  client: reqwest::Client,
  /// Endpoint and page size.
  config: ClientConfig,
}

impl ArxivClient {
  /// Creates a client for the public arXiv endpoint.
  pub fn new() -> Self { Self::with_config(ClientConfig::default()) }

  /// Creates a client with explicit settings.
  pub fn with_config(config: ClientConfig) -> Self {
    Self { client: reqwest::Client::new(), config }
  }

  /// Creates a client with explicit settings, rejecting an unusable endpoint up front.
  ///
  /// # Errors
  ///
  /// Returns [`FetchError::InvalidUrl`] if `config.base_url` does not parse as a URL.
  pub fn try_with_config(config: ClientConfig) -> Result<Self, FetchError> {
    Url::parse(&config.base_url)?;
    Ok(Self::with_config(config))
  }

  /// The settings this client was built with.
  pub fn config(&self) -> &ClientConfig { &self.config }

  /// Builds the query URL for one page.
  ///
  /// Results are sorted by submission date, newest first, so paging walks backwards through
  /// recent submissions.
  fn query_url(&self, topic: &str, offset: usize) -> Result<Url, FetchError> {
    let url = Url::parse_with_params(&self.config.base_url, &[
      ("search_query", format!("all:{topic}")),
      ("start", offset.to_string()),
      ("max_results", self.config.page_size.to_string()),
      ("sortBy", "submittedDate".to_string()),
      ("sortOrder", "descending".to_string()),
    ])?;
    Ok(url)
  }

  /// Turns an Atom document into a page.
  ///
  /// # Errors
  ///
  /// Returns [`FetchError::Parse`] if the body is not a readable feed document.
  fn parse_page(&self, body: &str, topic: &str, offset: usize) -> Result<Page, FetchError> {
    let feed: Feed = from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let papers: Vec<Paper> = feed
      .entries
      .iter()
      .map(|entry| Paper::from_parts(entry.title.as_deref(), entry.summary.as_deref(), topic))
      .collect();

    Ok(Page {
      has_more: papers.len() == self.config.page_size,
      next_offset: offset + self.config.page_size,
      papers,
    })
  }
}

#[async_trait]
impl Fetcher for ArxivClient {
  /// Fetches one page of the most recent papers on `request.topic`.
  ///
  /// When no topic is given one is drawn from [`topics::TOPICS`]; every returned paper carries the
  /// topic that was actually queried.
  ///
  /// # Errors
  ///
  /// This function will return an error if:
  /// - The network request fails
  /// - The API answers with a non-success status
  /// - The response cannot be parsed
  async fn fetch(&self, request: &PageRequest) -> Result<Page, FetchError> {
    let topic = match &request.topic {
      Some(topic) => topic.clone(),
      None => topics::random_topic().to_string(),
    };
    let url = self.query_url(&topic, request.offset)?;

    debug!("Fetching from arXiv via: {url}");

    let response = self
      .client
      .get(url)
      .header(USER_AGENT, config::USER_AGENT)
      .header(CACHE_CONTROL, "no-cache, no-store, must-revalidate")
      .header(PRAGMA, "no-cache")
      .header(EXPIRES, "0")
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      return Err(FetchError::Status(status));
    }

    let body = response.text().await?;
    trace!("arXiv response: {body}");

    let page = self.parse_page(&body, &topic, request.offset)?;
    debug!(
      "Fetched {} papers on {topic:?} at offset {} (has_more: {})",
      page.papers.len(),
      request.offset,
      page.has_more
    );
    Ok(page)
  }
}

impl Default for ArxivClient {
  fn default() -> Self { Self::new() }
}
