// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Previous/next stepping among a node's siblings.

use alloc::vec::Vec;

use sylva_layout::{GeometryIndex, NodeId};

/// Direction of sibling navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// The sibling to the left.
    Prev,
    /// The sibling to the right.
    Next,
}

/// Orders siblings left to right and steps through them without wrapping.
///
/// Nothing is cached: each call reads current positions from the index, so
/// dragged nodes are navigated in their new visual order.
///
/// ```rust
/// use sylva_focus::{Navigation, SiblingNavigator};
/// use sylva_layout::{DetailMode, LayoutBuilder, TreeNode};
///
/// let tree = TreeNode::new("root")
///     .with_child(TreeNode::new("a"))
///     .with_child(TreeNode::new("b"));
/// let layout = LayoutBuilder::default().build(&tree, DetailMode::Minimal);
/// let index = layout.index();
/// let kids = index.children_of(index.root().unwrap().id);
/// let (a, b) = (kids[0], kids[1]);
///
/// let nav = SiblingNavigator;
/// assert_eq!(nav.step(index, a, Navigation::Next), Some(b));
/// assert_eq!(nav.step(index, b, Navigation::Next), None);
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct SiblingNavigator;

impl SiblingNavigator {
    /// Siblings of `id` (including `id`) by ascending x, ties by id. Empty for
    /// the root and for unknown ids.
    pub fn siblings_of(&self, index: &GeometryIndex, id: NodeId) -> Vec<NodeId> {
        index.siblings_of(id)
    }

    /// Zero-based position of `id` among its siblings, with the sibling count.
    pub fn position(&self, index: &GeometryIndex, id: NodeId) -> Option<(usize, usize)> {
        let siblings = index.siblings_of(id);
        let pos = siblings.iter().position(|s| *s == id)?;
        Some((pos, siblings.len()))
    }

    /// The sibling to the left of `id`, if any.
    pub fn previous(&self, index: &GeometryIndex, id: NodeId) -> Option<NodeId> {
        self.step(index, id, Navigation::Prev)
    }

    /// The sibling to the right of `id`, if any.
    pub fn next(&self, index: &GeometryIndex, id: NodeId) -> Option<NodeId> {
        self.step(index, id, Navigation::Next)
    }

    /// Step from `id` in `direction`. `None` at either end.
    pub fn step(&self, index: &GeometryIndex, id: NodeId, direction: Navigation) -> Option<NodeId> {
        let siblings = index.siblings_of(id);
        let pos = siblings.iter().position(|s| *s == id)?;
        match direction {
            Navigation::Next => siblings.get(pos + 1).copied(),
            Navigation::Prev => pos.checked_sub(1).and_then(|p| siblings.get(p).copied()),
        }
    }
}
