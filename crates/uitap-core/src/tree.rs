//! Accessibility-tree snapshot decoding.
//!
//! A snapshot is the XML document produced by `uiautomator dump`: one
//! element per on-screen node, carrying `text`, `content-desc`, and
//! `bounds` attributes. Decoding is deliberately permissive about
//! attributes (missing `text` is an empty string, an unparsable `bounds`
//! is no geometry) but strict about well-formedness: a truncated or
//! corrupt document is a [`SnapshotError`], which callers treat as a
//! transient condition — the dump may have been captured mid-transition.
//!
//! The resulting tree is owned by a single locate/scan pass and is never
//! cached across snapshots; the screen is assumed to have changed by the
//! time the next pass runs.

use thiserror::Error;

use crate::geometry::{parse_bounds, Rect};

/// A snapshot that could not be decoded.
#[derive(Debug, Error)]
#[error("malformed snapshot: {0}")]
pub struct SnapshotError(#[from] roxmltree::Error);

/// One element in the accessibility tree.
///
/// Children are kept in document order; that order decides which of two
/// equally good matches wins a search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UiNode {
    pub text: String,
    pub content_desc: String,
    /// Screen rectangle, absent for nodes that are not laid out. A node
    /// without bounds is never a tap target.
    pub bounds: Option<Rect>,
    pub children: Vec<UiNode>,
}

impl UiNode {
    /// The human-readable label of this node: its text, or its content
    /// description when the text is empty.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.text.is_empty() {
            &self.content_desc
        } else {
            &self.text
        }
    }
}

/// Decode a serialized snapshot into a node tree.
///
/// Unknown attributes are ignored; missing `text`/`content-desc` default
/// to the empty string.
pub fn parse_snapshot(raw: &str) -> Result<UiNode, SnapshotError> {
    let doc = roxmltree::Document::parse(raw)?;
    Ok(build(doc.root_element()))
}

fn build(node: roxmltree::Node<'_, '_>) -> UiNode {
    UiNode {
        text: node.attribute("text").unwrap_or_default().to_string(),
        content_desc: node.attribute("content-desc").unwrap_or_default().to_string(),
        bounds: node.attribute("bounds").and_then(parse_bounds),
        children: node
            .children()
            .filter(roxmltree::Node::is_element)
            .map(build)
            .collect(),
    }
}
