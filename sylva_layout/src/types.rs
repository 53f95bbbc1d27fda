// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public layout types: identifiers, spans, geometries, and edges.

use alloc::string::String;
use core::fmt;

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

/// Identifier of a laid-out node.
///
/// Ids are assigned in pre-order traversal of the input tree. They are stable
/// for a given tree and detail mode, but not across changes to the tree's
/// content; use [`GeometryIndex::path_of`](crate::GeometryIndex::path_of) and
/// [`GeometryIndex::resolve_path`](crate::GeometryIndex::resolve_path) to carry
/// a node across rebuilds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Wrap a raw pre-order index.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw pre-order index.
    pub const fn get(self) -> u32 {
        self.0
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_idx(idx: usize) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Layouts larger than u32::MAX nodes are not supported."
        )]
        Self(idx as u32)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Identifier of an emitted edge, in emission order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub u32);

/// Child-index path from the root to a node. The root's path is empty.
pub type NodePath = SmallVec<[u32; 8]>;

/// Horizontal interval reserved for a node's subtree, in model space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Span {
    /// Left edge.
    pub x0: f64,
    /// Right edge.
    pub x1: f64,
}

impl Span {
    /// Create a span from its left edge and width.
    pub fn from_width(x0: f64, width: f64) -> Self {
        Self { x0, x1: x0 + width }
    }

    /// Width of the span.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Horizontal center of the span.
    pub fn center(&self) -> f64 {
        (self.x0 + self.x1) * 0.5
    }

    /// Whether `other` lies inside this span, allowing `eps` of slack.
    pub fn contains_span(&self, other: &Self, eps: f64) -> bool {
        other.x0 >= self.x0 - eps && other.x1 <= self.x1 + eps
    }

    /// Whether the two spans share any interior.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1
    }
}

/// Side of a node box where a connector attaches.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Middle of the top edge.
    Top,
    /// Middle of the right edge.
    Right,
    /// Middle of the bottom edge.
    Bottom,
    /// Middle of the left edge.
    Left,
}

impl Anchor {
    /// The side facing this one.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// The attachment point on `rect`.
    pub fn point_on(self, rect: Rect) -> Point {
        let c = rect.center();
        match self {
            Self::Top => Point::new(c.x, rect.y0),
            Self::Right => Point::new(rect.x1, c.y),
            Self::Bottom => Point::new(c.x, rect.y1),
            Self::Left => Point::new(rect.x0, c.y),
        }
    }
}

/// Set of a node's transitive descendants.
///
/// Pre-order ids make every subtree a contiguous id range, so the set is
/// stored as `[start, end)` and membership is O(1).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Descendants {
    pub(crate) start: u32,
    pub(crate) end: u32,
}

impl Descendants {
    /// Number of descendants.
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    /// Whether the node is a leaf.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `id` is a descendant.
    pub fn contains(&self, id: NodeId) -> bool {
        (self.start..self.end).contains(&id.get())
    }

    /// Iterate the descendant ids in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        (self.start..self.end).map(NodeId::new)
    }
}

/// Computed geometry and structure for one node.
///
/// Geometries are created by the [`LayoutBuilder`](crate::LayoutBuilder) and
/// replaced wholesale on every rebuild. The only mutation afterwards is a
/// manual position override (see [`PositionOverrides`](crate::PositionOverrides)).
#[derive(Clone, Debug, PartialEq)]
pub struct NodeGeometry {
    /// Pre-order identifier.
    pub id: NodeId,
    /// Title copied from the tree.
    pub title: String,
    /// Body text for the active detail mode, if any.
    pub body: Option<String>,
    /// Depth in the tree; the root is 0.
    pub depth: usize,
    /// Layout row. Equal to `depth` unless a pinned row shifted it.
    pub row: usize,
    /// Parent, `None` only for the root.
    pub parent: Option<NodeId>,
    /// Top-left corner in model space.
    pub origin: Point,
    /// Box size.
    pub size: Size,
    /// Horizontal interval reserved for this node's subtree.
    pub span: Span,
    /// Children in tree order.
    pub children: SmallVec<[NodeId; 4]>,
    /// All transitive children.
    pub descendants: Descendants,
}

impl NodeGeometry {
    /// Box in model space.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Center of the box in model space.
    pub fn center(&self) -> Point {
        self.rect().center()
    }

    /// Whether this is the root geometry.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A connector to draw between two nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Identifier in emission order.
    pub id: EdgeId,
    /// Upstream node.
    pub source: NodeId,
    /// Downstream node.
    pub target: NodeId,
    /// Where the connector leaves `source`.
    pub source_anchor: Anchor,
    /// Where the connector enters `target`.
    pub target_anchor: Anchor,
}
