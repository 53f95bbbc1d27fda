// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Manual position overrides.

use hashbrown::HashMap;
use kurbo::Point;

use crate::builder::Layout;
use crate::types::NodeId;

/// User-dragged node positions, kept across rebuilds.
///
/// An override replaces a single node's top-left corner; no other node moves.
/// After every rebuild call [`PositionOverrides::apply`]: overrides whose id
/// still exists are re-applied, the rest are discarded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionOverrides {
    origins: HashMap<NodeId, Point>,
}

impl PositionOverrides {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an override without touching any layout.
    pub fn set(&mut self, id: NodeId, origin: Point) {
        self.origins.insert(id, origin);
    }

    /// The override for `id`, if any.
    pub fn get(&self, id: NodeId) -> Option<Point> {
        self.origins.get(&id).copied()
    }

    /// Forget the override for `id`. Returns the removed origin.
    pub fn remove(&mut self, id: NodeId) -> Option<Point> {
        self.origins.remove(&id)
    }

    /// Forget every override.
    pub fn clear(&mut self) {
        self.origins.clear();
    }

    /// Number of overrides.
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Whether there are no overrides.
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Iterate `(id, origin)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
        self.origins.iter().map(|(id, p)| (*id, *p))
    }

    /// Record an override for `id` and move it in `layout` immediately.
    ///
    /// Returns `false`, recording nothing, if `id` is not in `layout`.
    pub fn place(&mut self, layout: &mut Layout, id: NodeId, origin: Point) -> bool {
        if !layout.index_mut().set_origin(id, origin) {
            return false;
        }
        self.origins.insert(id, origin);
        true
    }

    /// Re-apply overrides to a freshly built `layout`.
    ///
    /// Overrides for ids the layout does not contain are dropped. Returns the
    /// number of overrides discarded.
    pub fn apply(&mut self, layout: &mut Layout) -> usize {
        let before = self.origins.len();
        let index = layout.index_mut();
        self.origins
            .retain(|id, origin| index.set_origin(*id, *origin));
        let discarded = before - self.origins.len();

        #[cfg(feature = "tracing")]
        if discarded > 0 {
            tracing::debug!(discarded, kept = self.origins.len(), "stale overrides discarded");
        }

        discarded
    }
}
