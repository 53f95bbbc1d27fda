// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Id-indexed lookup over laid-out geometries.

use alloc::vec::Vec;
use core::cmp::Ordering;

use kurbo::{Point, Rect};

use crate::types::{Descendants, NodeGeometry, NodeId, NodePath};

/// Flat arena of [`NodeGeometry`] records indexed by [`NodeId`].
///
/// Parent, children, and descendant relations are plain id arrays; nothing
/// points back into the input tree. Descendant sets are computed once, when
/// the index is built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryIndex {
    nodes: Vec<NodeGeometry>,
}

impl GeometryIndex {
    /// Build the index and fill every node's `descendants`.
    ///
    /// `nodes` must be in pre-order with `nodes[i].id == i`.
    pub(crate) fn new(mut nodes: Vec<NodeGeometry>) -> Self {
        debug_assert!(
            nodes.iter().enumerate().all(|(i, n)| n.id.idx() == i),
            "geometries must be stored in id order"
        );
        // Pass 1: every subtree starts out as just the node itself.
        let mut ends: Vec<u32> = nodes.iter().map(|n| n.id.get() + 1).collect();
        // Pass 2: children carry larger ids than their parent, so walking ids
        // backwards folds each finished subtree into its parent.
        for i in (0..nodes.len()).rev() {
            if let Some(parent) = nodes[i].parent {
                let p = parent.idx();
                ends[p] = ends[p].max(ends[i]);
            }
        }
        for (node, end) in nodes.iter_mut().zip(ends) {
            node.descendants = Descendants {
                start: node.id.get() + 1,
                end,
            };
        }
        Self { nodes }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the index holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root geometry.
    pub fn root(&self) -> Option<&NodeGeometry> {
        self.nodes.first()
    }

    /// Whether `id` names a node in this index.
    pub fn contains(&self, id: NodeId) -> bool {
        id.idx() < self.nodes.len()
    }

    /// Geometry for `id`.
    pub fn get(&self, id: NodeId) -> Option<&NodeGeometry> {
        self.nodes.get(id.idx())
    }

    /// All geometries in id order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeGeometry> {
        self.nodes.iter()
    }

    /// All geometries as a slice, in id order.
    pub fn as_slice(&self) -> &[NodeGeometry] {
        &self.nodes
    }

    /// Parent of `id`, `None` for the root or an unknown id.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Children of `id` in tree order; empty for leaves and unknown ids.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Geometries of every transitive descendant of `id`, in pre-order.
    pub fn descendants_of(&self, id: NodeId) -> &[NodeGeometry] {
        match self.get(id) {
            Some(n) => &self.nodes[n.descendants.start as usize..n.descendants.end as usize],
            None => &[],
        }
    }

    /// Nodes sharing `id`'s parent, including `id`, ordered left to right.
    ///
    /// Ordering uses the current x position (so manual overrides are
    /// honored), with ties broken by id. The root has no siblings and yields
    /// an empty list.
    pub fn siblings_of(&self, id: NodeId) -> Vec<NodeId> {
        let Some(parent) = self.parent_of(id) else {
            return Vec::new();
        };
        let mut siblings: Vec<NodeId> = self.children_of(parent).to_vec();
        siblings.sort_by(|a, b| {
            let ax = self.nodes[a.idx()].origin.x;
            let bx = self.nodes[b.idx()].origin.x;
            ax.partial_cmp(&bx)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.cmp(b))
        });
        siblings
    }

    /// Ancestors of `id`, nearest first. Excludes `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        core::iter::successors(self.parent_of(id), |&p| self.parent_of(p))
    }

    /// Ancestor chain from the root down to and including `id`.
    ///
    /// Returns an empty list for unknown ids.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cursor = self.get(id).map(|n| n.id);
        while let Some(current) = cursor {
            chain.push(current);
            cursor = self.parent_of(current);
        }
        chain.reverse();
        chain
    }

    /// Child-index path from the root to `id`.
    pub fn path_of(&self, id: NodeId) -> Option<NodePath> {
        let mut path = NodePath::new();
        let mut current = self.get(id)?;
        while let Some(parent) = current.parent {
            let parent = self.get(parent)?;
            let slot = parent.children.iter().position(|c| *c == current.id)?;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Child counts fit in u32 because ids do."
            )]
            path.push(slot as u32);
            current = parent;
        }
        path.reverse();
        Some(path)
    }

    /// Node reached by following `path` from the root.
    pub fn resolve_path(&self, path: &[u32]) -> Option<NodeId> {
        let mut current = self.root()?.id;
        for &slot in path {
            current = *self.children_of(current).get(slot as usize)?;
        }
        Some(current)
    }

    /// Union of `id`'s box and every descendant box.
    pub fn subtree_bounds(&self, id: NodeId) -> Option<Rect> {
        let node = self.get(id)?;
        Some(
            self.descendants_of(id)
                .iter()
                .fold(node.rect(), |acc, d| acc.union(d.rect())),
        )
    }

    /// Union of every box, or [`Rect::ZERO`] when empty.
    pub fn bounds(&self) -> Rect {
        let mut it = self.nodes.iter().map(NodeGeometry::rect);
        match it.next() {
            Some(first) => it.fold(first, |acc, r| acc.union(r)),
            None => Rect::ZERO,
        }
    }

    /// Topmost node whose box contains the model-space `point`.
    ///
    /// Later ids are painted over earlier ones, so they win ties.
    pub fn node_at(&self, point: Point) -> Option<NodeId> {
        self.nodes
            .iter()
            .rev()
            .find(|n| n.rect().contains(point))
            .map(|n| n.id)
    }

    /// Move a node's box without touching any other node.
    pub(crate) fn set_origin(&mut self, id: NodeId, origin: Point) -> bool {
        match self.nodes.get_mut(id.idx()) {
            Some(node) => {
                node.origin = origin;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DetailMode, LayoutBuilder, TreeNode};

    fn sample() -> GeometryIndex {
        // 0 root
        // ├─ 1 a
        // │  ├─ 2 a1
        // │  └─ 3 a2
        // │     └─ 4 a2x
        // └─ 5 b
        let tree = TreeNode::new("root")
            .with_child(
                TreeNode::new("a")
                    .with_child(TreeNode::new("a1"))
                    .with_child(TreeNode::new("a2").with_child(TreeNode::new("a2x"))),
            )
            .with_child(TreeNode::new("b"));
        LayoutBuilder::default()
            .build(&tree, DetailMode::Minimal)
            .into_index()
    }

    fn ids(raw: &[u32]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId::new).collect()
    }

    #[test]
    fn descendants_match_reachability() {
        let index = sample();
        let reach = |id: NodeId| -> Vec<NodeId> {
            let mut out = Vec::new();
            let mut stack = index.children_of(id).to_vec();
            while let Some(n) = stack.pop() {
                out.push(n);
                stack.extend_from_slice(index.children_of(n));
            }
            out.sort();
            out
        };
        for node in index.iter() {
            let got: Vec<NodeId> = node.descendants.iter().collect();
            assert_eq!(got, reach(node.id), "descendants of {}", node.id);
        }
        assert_eq!(index.get(NodeId::new(1)).unwrap().descendants.len(), 3);
        assert!(index.get(NodeId::new(5)).unwrap().descendants.is_empty());
    }

    #[test]
    fn parents_and_children() {
        let index = sample();
        assert_eq!(index.parent_of(NodeId::new(0)), None);
        assert_eq!(index.parent_of(NodeId::new(4)), Some(NodeId::new(3)));
        let up: Vec<NodeId> = index.ancestors(NodeId::new(4)).collect();
        assert_eq!(up, ids(&[3, 1, 0]));
        assert_eq!(index.ancestors(NodeId::new(0)).count(), 0);
        assert_eq!(index.children_of(NodeId::new(1)), ids(&[2, 3]).as_slice());
        assert!(index.children_of(NodeId::new(99)).is_empty());
        assert!(index.descendants_of(NodeId::new(99)).is_empty());
    }

    #[test]
    fn siblings_follow_x_order() {
        let mut index = sample();
        assert_eq!(index.siblings_of(NodeId::new(2)), ids(&[2, 3]));
        assert!(index.siblings_of(NodeId::new(0)).is_empty());

        // Dragging a2 to the far left flips the order.
        index.set_origin(NodeId::new(3), Point::new(-1000.0, 0.0));
        assert_eq!(index.siblings_of(NodeId::new(2)), ids(&[3, 2]));
    }

    #[test]
    fn paths_round_trip() {
        let index = sample();
        for node in index.iter() {
            let path = index.path_of(node.id).expect("known id");
            assert_eq!(index.resolve_path(&path), Some(node.id));
        }
        assert_eq!(index.path_of(NodeId::new(4)).unwrap().as_slice(), &[0, 1, 0]);
        assert_eq!(index.resolve_path(&[2]), None);
        assert_eq!(index.path_to(NodeId::new(4)), ids(&[0, 1, 3, 4]));
        assert!(index.path_to(NodeId::new(42)).is_empty());
    }

    #[test]
    fn subtree_bounds_cover_descendants() {
        let index = sample();
        let bounds = index.subtree_bounds(NodeId::new(1)).unwrap();
        for id in [1, 2, 3, 4] {
            let r = index.get(NodeId::new(id)).unwrap().rect();
            assert_eq!(bounds.union(r), bounds);
        }
        let b = index.get(NodeId::new(5)).unwrap().rect();
        assert_ne!(bounds.union(b), bounds);
    }

    #[test]
    fn node_at_hits_boxes() {
        let index = sample();
        let a2x = index.get(NodeId::new(4)).unwrap();
        assert_eq!(index.node_at(a2x.center()), Some(a2x.id));
        assert_eq!(index.node_at(Point::new(-1.0e6, -1.0e6)), None);
    }
}
