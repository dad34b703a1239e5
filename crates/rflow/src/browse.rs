//! The interactive swipe-through viewer.
//!
//! The terminal shows one card per screen, so the layout handed to the controller is one unit per
//! card and the scroll offset is simply the index of the card on screen. The sentinel counts as
//! visible while the last loaded card is shown.
//!
//! Keys are read on a plain OS thread (reading a key blocks) and fetches run as spawned tasks;
//! both report into one channel, and only this loop touches the [`FeedController`].

use console::{Key, Term};
use researchflow::{
  clients::{ArxivClient, Fetcher, Page, PageRequest},
  errors::FetchError,
  layout::Layout,
  Effect, FeedController,
};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::{errors::RflowErrors, view};

/// Something the viewer loop has to react to.
enum Event {
  /// A key was pressed
  Key(Key),
  /// A fetch finished
  Loaded(Result<Page, FetchError>),
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
  Next,
  Previous,
  First,
  Quit,
}

/// Maps a key to a viewer command.
fn command_for(key: &Key) -> Option<Command> {
  match key {
    Key::ArrowDown | Key::Enter | Key::Char('j') | Key::Char(' ') => Some(Command::Next),
    Key::ArrowUp | Key::Char('k') => Some(Command::Previous),
    Key::Home | Key::Char('g') => Some(Command::First),
    Key::Escape | Key::Char('q') => Some(Command::Quit),
    _ => None,
  }
}

/// Card geometry for a one-card-per-screen terminal.
fn terminal_layout(cards: usize) -> Layout { Layout::uniform(cards, 1.0, 1.0) }

/// Whether the sentinel below the last card is on screen with card `current` of `cards` shown.
fn sentinel_visible(current: usize, cards: usize) -> bool { cards == 0 || current + 1 >= cards }

/// The visibility to report, if it differs from what was last reported.
fn sentinel_change(reported: bool, visible: bool) -> Option<bool> {
  (reported != visible).then_some(visible)
}

/// Runs the viewer until the user quits.
pub async fn run(client: ArxivClient) -> Result<(), RflowErrors> {
  let term = Term::stdout();
  if !term.is_term() {
    return Err(RflowErrors::NotATerminal);
  }

  let (tx, mut rx) = mpsc::channel::<Event>(16);
  spawn_key_reader(term.clone(), tx.clone());

  let mut viewer = Viewer { feed: FeedController::new(), client, tx, sentinel_visible: false };
  if let Some(request) = viewer.feed.mount() {
    viewer.spawn_fetch(request);
  }

  term.hide_cursor()?;
  view::draw(&term, &viewer.feed)?;

  while let Some(event) = rx.recv().await {
    let effects = match event {
      Event::Key(key) => match command_for(&key) {
        Some(Command::Quit) => break,
        Some(Command::Next) => viewer.feed.next(),
        Some(Command::Previous) => viewer.feed.previous(),
        Some(Command::First) => viewer.feed.scroll_to(0),
        None => {
          trace!("Ignoring key {key:?}");
          Vec::new()
        },
      },
      Event::Loaded(result) => {
        viewer.feed.complete(result);
        let cards = viewer.feed.papers().len();
        viewer.feed.on_layout(terminal_layout(cards))
      },
    };
    viewer.apply(effects);
    viewer.update_sentinel();
    view::draw(&term, &viewer.feed)?;
  }

  term.show_cursor()?;
  term.clear_screen()?;
  Ok(())
}

/// The controller plus what is needed to execute its effects.
struct Viewer {
  /// Pagination and scroll state
  feed:             FeedController,
  /// Shared HTTP client, cloned into each fetch task
  client:           ArxivClient,
  /// Where fetch tasks report back
  tx:               mpsc::Sender<Event>,
  /// Last sentinel visibility reported to the controller
  sentinel_visible: bool,
}

impl Viewer {
  /// Carries out controller effects.
  fn apply(&mut self, effects: Vec<Effect>) {
    for effect in effects {
      match effect {
        Effect::Fetch(request) => self.spawn_fetch(request),
        // Terminal "scrolling" is instant: the card at the target index is drawn next.
        Effect::Scroll(scroll) => self.feed.on_scroll(scroll.offset),
      }
    }
  }

  /// Reports sentinel visibility changes, the way an intersection observer would.
  fn update_sentinel(&mut self) {
    let visible = sentinel_visible(self.feed.current(), self.feed.papers().len());
    if let Some(visible) = sentinel_change(self.sentinel_visible, visible) {
      self.sentinel_visible = visible;
      let effects = self.feed.on_sentinel(visible);
      self.apply(effects);
    }
  }

  /// Runs a fetch in the background; the result comes back as [`Event::Loaded`].
  fn spawn_fetch(&self, request: PageRequest) {
    debug!("Spawning fetch for offset {}", request.offset);
    let client = self.client.clone();
    let tx = self.tx.clone();
    tokio::spawn(async move {
      let result = client.fetch(&request).await;
      // The receiver only goes away when the viewer has quit.
      let _ = tx.send(Event::Loaded(result)).await;
    });
  }
}

/// Forwards key presses into the event channel from a dedicated thread.
fn spawn_key_reader(term: Term, tx: mpsc::Sender<Event>) {
  std::thread::spawn(move || loop {
    match term.read_key() {
      Ok(key) =>
        if tx.blocking_send(Event::Key(key)).is_err() {
          break;
        },
      Err(e) => {
        debug!("Key reader stopped: {e}");
        let _ = tx.blocking_send(Event::Key(Key::Escape));
        break;
      },
    }
  });
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_key_bindings() {
    assert_eq!(command_for(&Key::Char('j')), Some(Command::Next));
    assert_eq!(command_for(&Key::ArrowDown), Some(Command::Next));
    assert_eq!(command_for(&Key::Char(' ')), Some(Command::Next));
    assert_eq!(command_for(&Key::ArrowUp), Some(Command::Previous));
    assert_eq!(command_for(&Key::Char('g')), Some(Command::First));
    assert_eq!(command_for(&Key::Char('q')), Some(Command::Quit));
    assert_eq!(command_for(&Key::Char('x')), None);
  }

  #[test]
  fn test_terminal_layout_maps_index_to_offset() {
    let layout = terminal_layout(7);
    for index in 0..7 {
      assert_eq!(layout.start_of(index), Some(index as f64));
      assert_eq!(layout.index_at(index as f64), Some(index));
    }
  }

  #[test]
  fn test_sentinel_visible_on_last_card() {
    assert!(sentinel_visible(0, 0));
    assert!(!sentinel_visible(0, 5));
    assert!(!sentinel_visible(3, 5));
    assert!(sentinel_visible(4, 5));
    // Appending a page moves the sentinel off screen again.
    assert!(!sentinel_visible(4, 10));
  }

  #[test]
  fn test_sentinel_reports_edges_only() {
    assert_eq!(sentinel_change(false, true), Some(true));
    assert_eq!(sentinel_change(true, true), None);
    assert_eq!(sentinel_change(true, false), Some(false));
    assert_eq!(sentinel_change(false, false), None);
  }
}
