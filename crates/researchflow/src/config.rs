//! Fixed settings for talking to the arXiv API.
//!
//! The viewer has no runtime configuration file. Page size, endpoint and topic vocabulary are
//! compile-time constants; [`ClientConfig`] only exists so the endpoint can be pointed somewhere
//! else (a mock server in tests, or `--base-url` on the command line).

/// Number of papers requested per page.
pub const PAGE_SIZE: usize = 5;

/// The arXiv Atom query endpoint.
pub const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("researchflow/", env!("CARGO_PKG_VERSION"));

/// Connection settings for an [`ArxivClient`](crate::clients::ArxivClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
  /// Query endpoint, without any query string
  pub base_url:  String,
  /// Papers requested per page; also the threshold for the `has_more` heuristic
  pub page_size: usize,
}

impl ClientConfig {
  /// Default settings with a different endpoint.
  pub fn with_base_url(base_url: impl Into<String>) -> Self {
    Self { base_url: base_url.into(), ..Self::default() }
  }
}

impl Default for ClientConfig {
  fn default() -> Self { Self { base_url: ARXIV_API_URL.to_string(), page_size: PAGE_SIZE } }
}
