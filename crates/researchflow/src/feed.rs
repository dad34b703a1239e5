//! The feed controller: pagination state machine and scroll tracking.
//!
//! [`FeedController`] owns the list of loaded papers, the [`PageCursor`], and the two flags that
//! drive infinite scrolling: `loading` and `has_more`. It is a plain synchronous state machine
//! over `{idle, loading}`:
//!
//! - **idle → loading** happens in [`mount`](FeedController::mount), in
//!   [`on_sentinel`](FeedController::on_sentinel) once the initial load has settled, and in
//!   [`next`](FeedController::next) at the last loaded paper. Each of these only starts a fetch
//!   when more pages may exist and no fetch is already in flight.
//! - **loading → idle** happens in [`complete`](FeedController::complete), for success and
//!   failure alike.
//!
//! The controller performs no I/O. Signals return [`Effect`]s describing the fetch to start or the
//! scroll to perform, and the rendering surface executes them. Since the only shared state is the
//! `loading` flag and every signal is handled on one task, no locking is needed.
//!
//! # Examples
//!
//! ```no_run
//! use researchflow::{clients::ArxivClient, layout::Layout, Effect, FeedController};
//!
//! # async fn example() {
//! let client = ArxivClient::new();
//! let mut feed = FeedController::new();
//!
//! // Initial load
//! if let Some(request) = feed.mount() {
//!   feed.fulfil(&client, request).await;
//! }
//!
//! // The renderer measured the cards
//! feed.on_layout(Layout::uniform(feed.papers().len(), 600.0, 600.0));
//!
//! // The user reached the bottom
//! for effect in feed.on_sentinel(true) {
//!   if let Effect::Fetch(request) = effect {
//!     feed.fulfil(&client, request).await;
//!   }
//! }
//! # }
//! ```

use super::*;

/// How a scroll should be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
  /// Jump without animation; used to undo layout shifts
  Instant,
  /// Animate; used for user navigation
  Smooth,
}

/// A scroll the rendering surface should perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTo {
  /// The paper being scrolled to
  pub index:    usize,
  /// Target scroll offset
  pub offset:   f64,
  /// Animation style
  pub behavior: ScrollBehavior,
}

/// Work the controller asks its rendering surface to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
  /// Fetch this page and report back through [`FeedController::complete`]
  Fetch(PageRequest),
  /// Scroll the viewport
  Scroll(ScrollTo),
}

/// What the sentinel below the last card should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
  /// A fetch is in flight
  Loading,
  /// More pages may exist
  HasMore,
  /// The last page came back short
  Exhausted,
}

impl std::fmt::Display for FeedStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      FeedStatus::Loading => write!(f, "Loading more papers..."),
      FeedStatus::HasMore => write!(f, "Scroll for more"),
      FeedStatus::Exhausted => write!(f, "No more papers to load"),
    }
  }
}

/// Pagination and scroll state for one feed.
#[derive(Debug)]
pub struct FeedController {
  /// Papers loaded so far, in fetch order
  papers:          Vec<Paper>,
  /// Where the next page starts, and its pinned topic
  cursor:          PageCursor,
  /// A fetch is in flight
  loading:         bool,
  /// The most recent page came back full
  has_more:        bool,
  /// `mount` has already run
  mounted:         bool,
  /// The first fetch has completed, successfully or not
  initial_settled: bool,
  /// Index of the paper closest to the viewport center
  current:         usize,
  /// Last scroll offset reported by the renderer
  scroll_offset:   f64,
  /// Card geometry from the last render
  layout:          Layout,
  /// Anchor captured before the last append, waiting for the new layout
  pending_anchor:  Option<ScrollAnchor>,
  /// Paper to scroll to once it has been fetched and rendered
  pending_target:  Option<usize>,
}

impl FeedController {
  /// An empty feed that will start on a random topic.
  pub fn new() -> Self { Self::with_cursor(PageCursor::default()) }

  /// An empty feed that starts paginating from `cursor`.
  pub fn with_cursor(cursor: PageCursor) -> Self {
    Self {
      papers: Vec::new(),
      cursor,
      loading: false,
      has_more: true,
      mounted: false,
      initial_settled: false,
      current: 0,
      scroll_offset: 0.0,
      layout: Layout::default(),
      pending_anchor: None,
      pending_target: None,
    }
  }

  /// Papers loaded so far.
  pub fn papers(&self) -> &[Paper] { &self.papers }

  /// The pagination cursor.
  pub fn cursor(&self) -> &PageCursor { &self.cursor }

  /// Whether a fetch is in flight.
  pub fn is_loading(&self) -> bool { self.loading }

  /// Whether more pages may exist.
  pub fn has_more(&self) -> bool { self.has_more }

  /// Index of the current paper.
  pub fn current(&self) -> usize { self.current }

  /// Last scroll offset the controller knows about.
  pub fn scroll_offset(&self) -> f64 { self.scroll_offset }

  /// What the sentinel should display.
  pub fn status(&self) -> FeedStatus {
    if self.loading {
      FeedStatus::Loading
    } else if self.has_more {
      FeedStatus::HasMore
    } else {
      FeedStatus::Exhausted
    }
  }

  /// Starts the initial load. Only the first call has any effect.
  pub fn mount(&mut self) -> Option<PageRequest> {
    if self.mounted {
      return None;
    }
    self.mounted = true;
    self.begin_fetch()
  }

  /// The sentinel after the last card changed visibility.
  ///
  /// Becoming visible starts a fetch, unless the initial load has not settled yet (the sentinel
  /// is briefly on screen before any card is rendered) or the fetch guard refuses.
  pub fn on_sentinel(&mut self, visible: bool) -> Vec<Effect> {
    if !visible || !self.initial_settled {
      return Vec::new();
    }
    self.begin_fetch().map(Effect::Fetch).into_iter().collect()
  }

  /// The viewport scrolled to `offset`.
  pub fn on_scroll(&mut self, offset: f64) {
    self.scroll_offset = offset;
    if let Some(index) = self.layout.index_at(offset) {
      self.current = index;
    }
  }

  /// The renderer laid the cards out anew.
  ///
  /// Re-applies the anchor captured before the last append, then resolves any navigation that
  /// was waiting for its target card to render.
  pub fn on_layout(&mut self, layout: Layout) -> Vec<Effect> {
    self.layout = layout;
    let mut effects = Vec::new();

    if let Some(anchor) = self.pending_anchor.take() {
      if let Some(offset) = self.layout.restore(&anchor) {
        if (offset - self.scroll_offset).abs() > f64::EPSILON {
          debug!("Restoring anchor {} at offset {offset}", anchor.index);
          effects.push(Effect::Scroll(ScrollTo {
            index: anchor.index,
            offset,
            behavior: ScrollBehavior::Instant,
          }));
        }
        self.scroll_offset = offset;
      }
    }

    if let Some(target) = self.pending_target {
      if let Some(offset) = self.layout.start_of(target) {
        self.pending_target = None;
        self.current = target;
        self.scroll_offset = offset;
        effects.push(Effect::Scroll(ScrollTo {
          index: target,
          offset,
          behavior: ScrollBehavior::Smooth,
        }));
        return effects;
      }
    }

    if let Some(index) = self.layout.index_at(self.scroll_offset) {
      self.current = index;
    }
    effects
  }

  /// Moves to the next paper.
  ///
  /// At the last loaded paper this fetches the next page instead (if there may be one) and
  /// scrolls to its first paper once it renders.
  pub fn next(&mut self) -> Vec<Effect> {
    let target = if self.papers.is_empty() { 0 } else { self.current + 1 };
    if target < self.papers.len() {
      return self.scroll_to(target);
    }
    if !self.has_more {
      return Vec::new();
    }

    self.pending_target = Some(target);
    self.begin_fetch().map(Effect::Fetch).into_iter().collect()
  }

  /// Moves to the previous paper.
  pub fn previous(&mut self) -> Vec<Effect> {
    match self.current.checked_sub(1) {
      Some(target) => self.scroll_to(target),
      None => Vec::new(),
    }
  }

  /// Scrolls to a loaded paper.
  ///
  /// If the paper is loaded but not yet rendered, the scroll happens on the next
  /// [`on_layout`](Self::on_layout). Indices past the loaded papers are ignored.
  pub fn scroll_to(&mut self, index: usize) -> Vec<Effect> {
    if index >= self.papers.len() {
      return Vec::new();
    }
    match self.layout.start_of(index) {
      Some(offset) => {
        self.current = index;
        self.scroll_offset = offset;
        vec![Effect::Scroll(ScrollTo { index, offset, behavior: ScrollBehavior::Smooth })]
      },
      None => {
        self.pending_target = Some(index);
        Vec::new()
      },
    }
  }

  /// Applies the outcome of a fetch started by one of the signals above.
  ///
  /// On success the page is appended: the scroll anchor is snapshotted first, the papers and
  /// cursor are updated, and the anchor waits for the next layout to be re-applied. On failure
  /// the error is logged and everything except `loading` is left untouched, so the same near-end
  /// signal retries later.
  ///
  /// A completion that arrives while no fetch is in flight is ignored.
  pub fn complete(&mut self, result: Result<Page, FetchError>) {
    if !self.loading {
      trace!("No fetch in flight, dropping completion");
      return;
    }
    self.loading = false;
    self.initial_settled = true;

    let page = match result {
      Ok(page) => page,
      Err(e) => {
        warn!("Error loading papers: {e}");
        self.pending_target = None;
        return;
      },
    };

    self.pending_anchor = self.layout.anchor(self.scroll_offset);
    self.cursor.advance(&page);
    self.has_more = page.has_more;
    self.papers.extend(page.papers);

    if self.pending_target.is_some_and(|target| target >= self.papers.len()) {
      self.pending_target = None;
    }

    debug!(
      "Feed holds {} papers; next offset {}, has_more: {}",
      self.papers.len(),
      self.cursor.offset,
      self.has_more
    );
  }

  /// Runs `request` on `fetcher` and applies the result.
  pub async fn fulfil<F: Fetcher + ?Sized>(&mut self, fetcher: &F, request: PageRequest) {
    let result = fetcher.fetch(&request).await;
    self.complete(result);
  }

  /// Flips to loading and hands out the next request, if allowed.
  fn begin_fetch(&mut self) -> Option<PageRequest> {
    if self.loading {
      trace!("Fetch already in flight, ignoring signal");
      return None;
    }
    if !self.has_more {
      trace!("Feed exhausted, ignoring signal");
      return None;
    }
    self.loading = true;
    let request = self.cursor.request();
    debug!("Requesting page at offset {} (topic: {:?})", request.offset, request.topic);
    Some(request)
  }
}

impl Default for FeedController {
  fn default() -> Self { Self::new() }
}
