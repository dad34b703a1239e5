//! Geometry of the rendered feed.
//!
//! The rendering surface reports how tall each card is (its *extent*), the gap between cards, and
//! the viewport height. From that, [`Layout`] precomputes:
//! - the start offset of every card, and
//! - the scroll offsets at which the "current" card changes.
//!
//! The current card is the one whose center is closest to the viewport center. Because card
//! centers increase monotonically, the scroll axis splits into contiguous ranges, one per card,
//! separated by the midpoints between neighbouring centers. Looking up the current card is then a
//! binary search instead of a scan over every card on every scroll tick. The thresholds are only
//! rebuilt when a new layout is reported.
//!
//! [`ScrollAnchor`] implements scroll preservation across a list mutation as two explicit steps:
//! [`Layout::anchor`] before the change, [`Layout::restore`] against the layout after it.

/// Precomputed card positions for one render of the feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
  /// Offset of each card's top edge from the top of the scroll content
  starts:     Vec<f64>,
  /// Height of each card
  extents:    Vec<f64>,
  /// `thresholds[i]` is the smallest scroll offset at which card `i + 1` becomes current
  thresholds: Vec<f64>,
  /// Height of the viewport
  viewport:   f64,
}

/// The card a viewport was looking at, and how far past its top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnchor {
  /// Index of the anchor card
  pub index: usize,
  /// Scroll offset minus the anchor card's start offset
  pub delta: f64,
}

impl Layout {
  /// Lays out cards of the given extents top to bottom with `gap` between neighbours.
  ///
  /// Negative extents and gaps are treated as zero.
  pub fn new(extents: Vec<f64>, gap: f64, viewport: f64) -> Self {
    let gap = gap.max(0.0);
    let extents: Vec<f64> = extents.into_iter().map(|e| e.max(0.0)).collect();

    let mut starts = Vec::with_capacity(extents.len());
    let mut next = 0.0;
    for extent in &extents {
      starts.push(next);
      next += extent + gap;
    }

    let half_viewport = viewport.max(0.0) / 2.0;
    let thresholds = starts
      .iter()
      .zip(&extents)
      .map(|(start, extent)| start + extent / 2.0)
      .collect::<Vec<_>>()
      .windows(2)
      .map(|centers| (centers[0] + centers[1]) / 2.0 - half_viewport)
      .collect();

    Self { starts, extents, thresholds, viewport: viewport.max(0.0) }
  }

  /// Lays out `count` cards of equal `extent` with no gap.
  pub fn uniform(count: usize, extent: f64, viewport: f64) -> Self {
    Self::new(vec![extent; count], 0.0, viewport)
  }

  /// Number of cards laid out.
  pub fn len(&self) -> usize { self.starts.len() }

  /// Whether no cards are laid out.
  pub fn is_empty(&self) -> bool { self.starts.is_empty() }

  /// Height of the viewport this layout was computed for.
  pub fn viewport(&self) -> f64 { self.viewport }

  /// Offset of a card's top edge, if the card is laid out.
  pub fn start_of(&self, index: usize) -> Option<f64> { self.starts.get(index).copied() }

  /// Height of a card, if the card is laid out.
  pub fn extent_of(&self, index: usize) -> Option<f64> { self.extents.get(index).copied() }

  /// The card whose center is closest to the viewport center at `scroll_offset`.
  ///
  /// Exact ties go to the earlier card. Returns `None` for an empty layout.
  pub fn index_at(&self, scroll_offset: f64) -> Option<usize> {
    if self.is_empty() {
      return None;
    }
    Some(self.thresholds.partition_point(|threshold| *threshold < scroll_offset))
  }

  /// Snapshots the current card and the viewport's distance past its top edge.
  pub fn anchor(&self, scroll_offset: f64) -> Option<ScrollAnchor> {
    let index = self.index_at(scroll_offset)?;
    let start = self.start_of(index)?;
    Some(ScrollAnchor { index, delta: scroll_offset - start })
  }

  /// The scroll offset that puts `anchor` back where it was, clamped at zero.
  ///
  /// Returns `None` if the anchor card is not part of this layout.
  pub fn restore(&self, anchor: &ScrollAnchor) -> Option<f64> {
    self.start_of(anchor.index).map(|start| (start + anchor.delta).max(0.0))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// The straightforward O(n) scan the threshold search replaces.
  fn closest_center(layout: &Layout, scroll_offset: f64) -> Option<usize> {
    let target = scroll_offset + layout.viewport() / 2.0;
    let mut best: Option<(usize, f64)> = None;
    for index in 0..layout.len() {
      let center = layout.start_of(index)? + layout.extent_of(index)? / 2.0;
      let distance = (center - target).abs();
      if best.map_or(true, |(_, d)| distance < d) {
        best = Some((index, distance));
      }
    }
    best.map(|(index, _)| index)
  }

  #[test]
  fn test_starts_include_gaps() {
    let layout = Layout::new(vec![100.0, 50.0, 200.0], 10.0, 300.0);
    assert_eq!(layout.start_of(0), Some(0.0));
    assert_eq!(layout.start_of(1), Some(110.0));
    assert_eq!(layout.start_of(2), Some(170.0));
    assert_eq!(layout.start_of(3), None);
  }

  #[test]
  fn test_empty_layout_has_no_current() {
    let layout = Layout::default();
    assert_eq!(layout.index_at(0.0), None);
    assert_eq!(layout.anchor(0.0), None);
  }

  #[test]
  fn test_uniform_cards_switch_at_half_card() {
    let layout = Layout::uniform(4, 100.0, 100.0);
    assert_eq!(layout.index_at(0.0), Some(0));
    assert_eq!(layout.index_at(49.0), Some(0));
    assert_eq!(layout.index_at(50.0), Some(0));
    assert_eq!(layout.index_at(51.0), Some(1));
    assert_eq!(layout.index_at(250.0), Some(2));
    assert_eq!(layout.index_at(10_000.0), Some(3));
    assert_eq!(layout.index_at(-500.0), Some(0));
  }

  #[test]
  fn test_index_matches_closest_center_scan() {
    let layout = Layout::new(vec![320.0, 80.0, 640.0, 45.5, 300.0, 900.0, 12.0], 16.0, 480.0);
    let mut offset = -100.0;
    while offset < 3_000.0 {
      assert_eq!(layout.index_at(offset), closest_center(&layout, offset), "offset {offset}");
      offset += 7.25;
    }
  }

  #[test]
  fn test_anchor_survives_append() {
    let before = Layout::uniform(5, 100.0, 100.0);
    let anchor = before.anchor(420.0).unwrap();
    assert_eq!(anchor, ScrollAnchor { index: 4, delta: 20.0 });

    let after = Layout::uniform(8, 100.0, 100.0);
    assert_eq!(after.restore(&anchor), Some(420.0));
  }

  #[test]
  fn test_anchor_follows_card_when_earlier_cards_resize() {
    let before = Layout::new(vec![100.0, 100.0, 100.0], 0.0, 100.0);
    let anchor = before.anchor(210.0).unwrap();

    // The first card grew once its abstract was measured.
    let after = Layout::new(vec![180.0, 100.0, 100.0, 100.0], 0.0, 100.0);
    assert_eq!(after.restore(&anchor), Some(290.0));
  }

  #[test]
  fn test_restore_missing_card() {
    let layout = Layout::uniform(2, 100.0, 100.0);
    assert_eq!(layout.restore(&ScrollAnchor { index: 5, delta: 0.0 }), None);
  }
}
