//! Pagination position for a feed.
//!
//! The cursor is the only place the feed remembers *where* it is in the upstream result set: an
//! offset that advances by a full page after every successful fetch, and the topic that was
//! observed on the first paper of the latest page. Keeping the topic here makes the pinning
//! explicit; without it every page would draw a new random topic.

use super::*;

/// Offset plus pinned topic, used to build the next [`PageRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCursor {
  /// Offset of the next page to request
  pub offset: usize,
  /// Topic pinned from the most recent non-empty page, if any
  pub topic:  Option<String>,
}

impl PageCursor {
  /// A cursor at `offset` with an already-chosen topic.
  pub fn new(offset: usize, topic: Option<String>) -> Self { Self { offset, topic } }

  /// The request for the page this cursor points at.
  pub fn request(&self) -> PageRequest {
    PageRequest { offset: self.offset, topic: self.topic.clone() }
  }

  /// Moves past a successfully fetched page.
  ///
  /// The offset always becomes `page.next_offset`, even for short pages. The topic is re-pinned
  /// to the first paper's topic; an empty page leaves the previous pin in place.
  pub fn advance(&mut self, page: &Page) {
    self.offset = page.next_offset;
    if let Some(first) = page.papers.first() {
      self.topic = Some(first.topic.clone());
    }
    trace!("Cursor advanced to offset {} with topic {:?}", self.offset, self.topic);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::PAGE_SIZE;

  fn page(topic: &str, len: usize, next_offset: usize) -> Page {
    Page {
      papers: (0..len).map(|i| Paper::from_parts(Some(&format!("#{i}")), None, topic)).collect(),
      has_more: len == PAGE_SIZE,
      next_offset,
    }
  }

  #[test]
  fn test_fresh_cursor_requests_first_page_without_topic() {
    let cursor = PageCursor::default();
    assert_eq!(cursor.request(), PageRequest { offset: 0, topic: None });
  }

  #[test]
  fn test_advance_pins_first_topic() {
    let mut cursor = PageCursor::default();
    cursor.advance(&page("quantum computing", 5, 5));
    assert_eq!(cursor.offset, 5);
    assert_eq!(cursor.topic.as_deref(), Some("quantum computing"));
    assert_eq!(cursor.request(), PageRequest {
      offset: 5,
      topic:  Some("quantum computing".to_string()),
    });
  }

  #[test]
  fn test_empty_page_keeps_pin_but_moves_offset() {
    let mut cursor = PageCursor::new(5, Some("blockchain".to_string()));
    cursor.advance(&page("unused", 0, 10));
    assert_eq!(cursor.offset, 10);
    assert_eq!(cursor.topic.as_deref(), Some("blockchain"));
  }
}
