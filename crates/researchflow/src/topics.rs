//! The fixed vocabulary of search topics.
//!
//! When a feed starts without a topic the fetcher draws one of these uniformly at random. The
//! topic of the first page is then pinned in the [`PageCursor`](crate::cursor::PageCursor) so
//! the rest of the feed stays on the same subject.

use rand::seq::SliceRandom;

/// Topics a fresh feed may start on.
pub const TOPICS: [&str; 10] = [
  "artificial intelligence",
  "machine learning",
  "computer vision",
  "natural language processing",
  "cybersecurity",
  "blockchain",
  "quantum computing",
  "computer graphics",
  "software engineering",
  "human-computer interaction",
];

/// Picks a topic uniformly at random from [`TOPICS`].
pub fn random_topic() -> &'static str {
  TOPICS.choose(&mut rand::thread_rng()).copied().unwrap_or(TOPICS[0])
}
