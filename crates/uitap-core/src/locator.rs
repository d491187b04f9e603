//! Element location: first-match pre-order search over a snapshot tree.

use crate::geometry::Point;
use crate::matcher::KeywordSet;
use crate::tree::UiNode;

/// Find the first node matching the keyword set.
///
/// Traversal is deterministic pre-order: the parent is visited before its
/// children, children in document order. When several nodes qualify (a
/// label and its icon both carrying the keyword, say) the one appearing
/// earliest in document order wins. `None` means nothing matched; that is
/// a valid outcome, not an error.
#[must_use]
pub fn locate<'t>(root: &'t UiNode, keywords: &KeywordSet) -> Option<&'t UiNode> {
    if keywords.matches(root) {
        return Some(root);
    }
    root.children.iter().find_map(|child| locate(child, keywords))
}

/// Locate a match and resolve it to its center tap point.
#[must_use]
pub fn locate_point(root: &UiNode, keywords: &KeywordSet) -> Option<Point> {
    locate(root, keywords)
        .and_then(|node| node.bounds)
        .map(|rect| rect.center())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::parse_bounds;

    fn leaf(text: &str, bounds: Option<&str>) -> UiNode {
        UiNode {
            text: text.into(),
            bounds: bounds.and_then(parse_bounds),
            ..UiNode::default()
        }
    }

    fn branch(children: Vec<UiNode>) -> UiNode {
        UiNode {
            children,
            ..UiNode::default()
        }
    }

    #[test]
    fn first_match_in_document_order_wins() {
        let root = branch(vec![
            leaf("Start A", Some("[0,0][10,10]")),
            leaf("Start B", Some("[0,20][10,30]")),
        ]);
        let found = locate(&root, &KeywordSet::single("start")).unwrap();
        assert_eq!(found.text, "Start A");
    }

    #[test]
    fn parent_wins_over_its_children() {
        let mut parent = leaf("Start", Some("[0,0][100,100]"));
        parent.children.push(leaf("Start", Some("[10,10][20,20]")));
        let found = locate(&parent, &KeywordSet::single("start")).unwrap();
        assert_eq!(found.bounds, parse_bounds("[0,0][100,100]"));
    }

    #[test]
    fn earlier_subtree_beats_later_sibling() {
        let root = branch(vec![
            branch(vec![leaf("deep start", Some("[0,0][10,10]"))]),
            leaf("shallow start", Some("[0,20][10,30]")),
        ]);
        let found = locate(&root, &KeywordSet::single("start")).unwrap();
        assert_eq!(found.text, "deep start");
    }

    #[test]
    fn boundless_match_is_skipped_for_a_later_bounded_one() {
        let root = branch(vec![
            leaf("Start", None),
            leaf("Start", Some("[0,20][10,30]")),
        ]);
        let found = locate(&root, &KeywordSet::single("start")).unwrap();
        assert!(found.bounds.is_some());
    }

    #[test]
    fn no_qualifying_node_is_none() {
        let root = branch(vec![leaf("Start", None), leaf("Stop", Some("[0,0][10,10]"))]);
        assert!(locate(&root, &KeywordSet::single("start")).is_none());
        assert!(locate_point(&root, &KeywordSet::single("start")).is_none());
    }

    #[test]
    fn locate_point_resolves_center() {
        let root = branch(vec![leaf("Start", Some("[100,200][300,260]"))]);
        let point = locate_point(&root, &KeywordSet::single("start")).unwrap();
        assert_eq!(point, Point { x: 200, y: 230 });
    }
}
