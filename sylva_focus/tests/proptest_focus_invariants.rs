// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for focus and sibling navigation.
//!
//! 1. While focused on `n`, the visible set is exactly `{n} ∪ descendants(n)`.
//! 2. Only the focused node's direct parent is drawn outside that set, and
//!    never at zero opacity.
//! 3. Visible edges have both endpoints in the visible set.
//! 4. Stepping `next` from the last sibling and `prev` from the first yields
//!    nothing; stepping through all siblings visits each once.
//! 5. The breadcrumb runs from the root to the focused node.

use kurbo::Size;
use proptest::prelude::*;
use sylva_focus::{Camera, FocusController, Navigation, NodeRole, SiblingNavigator, Viewport};
use sylva_layout::{DetailMode, Layout, LayoutBuilder, NodeId, TreeNode};

// ── Helpers ─────────────────────────────────────────────────────────────

fn tree_strategy() -> impl Strategy<Value = TreeNode> {
    let leaf = "[a-z]{1,4}".prop_map(TreeNode::new);
    leaf.prop_recursive(4, 40, 5, |inner| {
        ("[a-z]{1,4}", prop::collection::vec(inner, 0..5))
            .prop_map(|(title, children)| TreeNode::new(title).with_children(children))
    })
}

/// A layout plus one of its node ids.
fn layout_and_node() -> impl Strategy<Value = (Layout, NodeId)> {
    tree_strategy().prop_flat_map(|tree| {
        let layout = LayoutBuilder::default().build(&tree, DetailMode::Summary);
        #[allow(clippy::cast_possible_truncation, reason = "Generated trees are tiny.")]
        let n = layout.geometries().len() as u32;
        (Just(layout), (0..n).prop_map(NodeId::new))
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Visibility
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn focus_visibility((layout, target) in layout_and_node(), zoom in 0.2f64..2.0) {
        let index = layout.index();
        let mut cam = Camera::new(Size::new(1024.0, 768.0));
        let mut focus = FocusController::default();
        focus.click(index, target, &mut cam).unwrap();
        cam.set_view(zoom, cam.pan());

        let visible = focus.visible_ids(index);
        let node = index.get(target).unwrap();
        prop_assert_eq!(visible.len(), node.descendants.len() + 1);

        for geom in index.iter() {
            let style = focus.style(index, geom.id, cam.zoom()).unwrap();
            let expected = geom.id == target || node.descendants.contains(geom.id);
            prop_assert_eq!(visible.contains(&geom.id), expected);
            if expected {
                prop_assert_eq!(style.opacity, 1.0);
            } else if node.parent == Some(geom.id) {
                prop_assert_eq!(style.role, NodeRole::Context);
                prop_assert!(style.opacity > 0.0 && style.opacity < 1.0);
            } else {
                prop_assert_eq!(style.opacity, 0.0);
            }
        }

        for edge in focus.visible_edges(index, layout.edges()) {
            prop_assert!(visible.contains(&edge.source) && visible.contains(&edge.target));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Sibling boundaries
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sibling_walk_visits_each_once((layout, target) in layout_and_node()) {
        let index = layout.index();
        let nav = SiblingNavigator;
        let siblings = nav.siblings_of(index, target);
        if index.get(target).unwrap().is_root() {
            prop_assert!(siblings.is_empty());
            return Ok(());
        }
        let first = siblings[0];
        let last = *siblings.last().unwrap();
        prop_assert_eq!(nav.previous(index, first), None);
        prop_assert_eq!(nav.next(index, last), None);

        let mut walked = vec![first];
        let mut cursor = first;
        while let Some(next) = nav.step(index, cursor, Navigation::Next) {
            walked.push(next);
            cursor = next;
        }
        prop_assert_eq!(walked, siblings);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Breadcrumb
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn breadcrumb_is_root_path((layout, target) in layout_and_node()) {
        let index = layout.index();
        let mut cam = Camera::new(Size::new(800.0, 600.0));
        let mut focus = FocusController::default();
        focus.click(index, target, &mut cam).unwrap();
        let crumbs = focus.breadcrumb(index);
        prop_assert_eq!(crumbs.len(), index.get(target).unwrap().depth + 1);
        prop_assert!(crumbs[0].is_root());
        prop_assert_eq!(crumbs.last().unwrap().id, target);
        for pair in crumbs.windows(2) {
            prop_assert_eq!(pair[1].parent, Some(pair[0].id));
        }
    }
}
