//! Drawing papers as terminal cards.

use console::{measure_text_width, style, Emoji, Term};
use researchflow::{FeedController, FeedStatus, Paper};

static BOOK: Emoji<'_, '_> = Emoji("📖 ", "");
static DOWN: Emoji<'_, '_> = Emoji("⬇️  ", "");
static DONE: Emoji<'_, '_> = Emoji("✨ ", "");
static HOURGLASS: Emoji<'_, '_> = Emoji("⏳ ", "");

/// Columns used when the terminal width is unknown.
const FALLBACK_WIDTH: usize = 80;

/// Breaks `text` into lines of at most `width` columns at whitespace.
///
/// Words longer than `width` get a line of their own. Runs of whitespace, including the line
/// breaks arXiv puts inside abstracts, collapse to single spaces.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
  let width = width.max(1);
  let mut lines = Vec::new();
  let mut line = String::new();

  for word in text.split_whitespace() {
    if !line.is_empty() && measure_text_width(&line) + 1 + measure_text_width(word) > width {
      lines.push(std::mem::take(&mut line));
    }
    if !line.is_empty() {
      line.push(' ');
    }
    line.push_str(word);
  }
  if !line.is_empty() {
    lines.push(line);
  }
  lines
}

/// Renders one paper as a block of styled lines.
pub fn card(paper: &Paper, position: usize, total: usize, width: usize) -> Vec<String> {
  let mut lines = Vec::new();
  let title = paper.title.split_whitespace().collect::<Vec<_>>().join(" ");

  lines.push(format!(
    "{} {}",
    style(format!("[{}/{}]", position + 1, total)).dim(),
    style(title).white().bold()
  ));
  lines.push(format!("{} {}", style("Topic:").green(), style(&paper.topic).cyan()));
  lines.push(String::new());
  lines.push(style("Abstract:").green().bold().to_string());
  lines.extend(wrap(&paper.abstract_text, width));
  lines
}

/// The sentinel line shown below the last card.
pub fn status_line(status: FeedStatus) -> String {
  match status {
    FeedStatus::Loading => format!("{}{}", HOURGLASS, style(status).yellow()),
    FeedStatus::HasMore => format!("{}{}", DOWN, style(status).dim()),
    FeedStatus::Exhausted => format!("{}{}", DONE, style(status).dim()),
  }
}

/// Redraws the interactive viewer: header, current card, sentinel and key help.
pub fn draw(term: &Term, feed: &FeedController) -> std::io::Result<()> {
  let width =
    term.size_checked().map_or(FALLBACK_WIDTH, |(_, cols)| usize::from(cols)).min(100);

  term.clear_screen()?;
  term.write_line(&format!("{}{}", BOOK, style("ResearchFlow").cyan().bold()))?;
  term.write_line(
    &style("Recent computer science research, one card at a time").dim().to_string(),
  )?;
  term.write_line("")?;

  match feed.papers().get(feed.current()) {
    Some(paper) => {
      for line in card(paper, feed.current(), feed.papers().len(), width) {
        term.write_line(&line)?;
      }
    },
    None => term.write_line(&style("No papers loaded yet").dim().to_string())?,
  }

  term.write_line("")?;
  if feed.papers().is_empty() || feed.current() + 1 >= feed.papers().len() {
    term.write_line(&status_line(feed.status()))?;
  }
  term.write_line(
    &style("j/↓ next · k/↑ previous · g first · q quit").dim().italic().to_string(),
  )?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_wrap_breaks_on_words() {
    assert_eq!(wrap("the quick brown fox jumps", 10), vec!["the quick", "brown fox", "jumps"]);
  }

  #[test]
  fn test_wrap_collapses_whitespace() {
    assert_eq!(wrap("  line one\n    line two  ", 80), vec!["line one line two"]);
  }

  #[test]
  fn test_wrap_keeps_long_words_whole() {
    assert_eq!(wrap("a supercalifragilistic b", 5), vec!["a", "supercalifragilistic", "b"]);
  }

  #[test]
  fn test_wrap_empty() {
    assert!(wrap("   ", 10).is_empty());
  }

  #[test]
  fn test_card_contains_fields() {
    let paper = Paper::from_parts(Some("A\n   Title"), Some("Short abstract."), "blockchain");
    let text = console::strip_ansi_codes(&card(&paper, 0, 3, 40).join("\n")).to_string();
    assert!(text.contains("[1/3] A Title"));
    assert!(text.contains("Topic: blockchain"));
    assert!(text.contains("Short abstract."));
  }
}
