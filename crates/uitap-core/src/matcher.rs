//! Keyword matching against tree nodes.

use crate::tree::UiNode;

/// A set of case-insensitive substring keywords.
///
/// Keywords are lower-cased once at construction; empty keywords are
/// dropped (an empty substring would match every node). A node matches
/// when it has resolvable bounds and any keyword occurs in its text or
/// its content description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// Convenience constructor for the common single-keyword search.
    pub fn single(keyword: &str) -> Self {
        Self::new([keyword])
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Does this node qualify as a match target?
    ///
    /// A node with no bounds never matches: it has no coordinate to act
    /// on. Text and content description are checked independently; a hit
    /// on either qualifies.
    #[must_use]
    pub fn matches(&self, node: &UiNode) -> bool {
        if node.bounds.is_none() {
            return false;
        }
        let text = node.text.to_lowercase();
        let desc = node.content_desc.to_lowercase();
        self.keywords
            .iter()
            .any(|k| text.contains(k.as_str()) || desc.contains(k.as_str()))
    }
}
