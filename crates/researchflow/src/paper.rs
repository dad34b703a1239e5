//! The paper record shown on each card.

use super::*;

/// Title used when an entry has no `<title>` element.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Abstract used when an entry has no `<summary>` element.
pub const NO_ABSTRACT: &str = "No abstract available.";

/// A research paper as displayed in the feed.
///
/// Papers have no identity beyond their position in the feed; two papers with the same title are
/// both kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
  /// The paper's title
  pub title:         String,
  /// The paper's abstract text
  #[serde(rename = "abstract")]
  pub abstract_text: String,
  /// The search topic this paper was fetched for
  pub topic:         String,
}

impl Paper {
  /// Builds a paper from possibly-missing fields, substituting placeholders and trimming the
  /// surrounding whitespace arXiv leaves in its text nodes.
  pub fn from_parts(title: Option<&str>, abstract_text: Option<&str>, topic: &str) -> Self {
    Self {
      title:         title.map_or_else(|| UNKNOWN_TITLE.to_string(), |t| t.trim().to_string()),
      abstract_text: abstract_text
        .map_or_else(|| NO_ABSTRACT.to_string(), |a| a.trim().to_string()),
      topic:         topic.to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_fields_get_placeholders() {
    let paper = Paper::from_parts(None, None, "blockchain");
    assert_eq!(paper.title, "Unknown Title");
    assert_eq!(paper.abstract_text, "No abstract available.");
    assert_eq!(paper.topic, "blockchain");
  }

  #[test]
  fn test_present_fields_are_trimmed() {
    let paper = Paper::from_parts(Some("\n  A Title  \n"), Some("  Body.\n"), "cybersecurity");
    assert_eq!(paper.title, "A Title");
    assert_eq!(paper.abstract_text, "Body.");
  }
}
