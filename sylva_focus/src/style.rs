// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node presentation derived from focus state.

use sylva_layout::{GeometryIndex, NodeId};

use crate::controller::FocusState;

/// Lowest opacity the faded parent can reach.
pub const MIN_CONTEXT_OPACITY: f64 = 0.05;

/// Why a node looks the way it does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Nothing is focused.
    Normal,
    /// The focused node.
    Focused,
    /// Inside the focused subtree.
    Descendant,
    /// Direct parent of the focused node, shown faded for orientation.
    Context,
    /// Outside the focused subtree. Kept in the layout, drawn fully transparent.
    Hidden,
}

/// Presentation of one node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeStyle {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Whether anything is drawn (`opacity > 0`).
    pub visible: bool,
    /// Whether pointer input reaches the node.
    pub pickable: bool,
    /// Role behind the style.
    pub role: NodeRole,
}

impl NodeStyle {
    const fn with_opacity(role: NodeRole, opacity: f64) -> Self {
        let on = opacity > 0.0;
        Self {
            opacity,
            visible: on,
            pickable: on,
            role,
        }
    }
}

/// How the focused node's parent fades with zoom.
///
/// Opacity is `max_opacity` at or below `far_zoom` (zoomed out) and
/// `min_opacity` at or above `near_zoom` (zoomed in), linear in between.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParentFade {
    /// Zoom at which the parent is faintest.
    pub near_zoom: f64,
    /// Zoom at which the parent is strongest.
    pub far_zoom: f64,
    /// Opacity when zoomed in. Never below [`MIN_CONTEXT_OPACITY`].
    pub min_opacity: f64,
    /// Opacity when zoomed out.
    pub max_opacity: f64,
}

impl Default for ParentFade {
    fn default() -> Self {
        Self {
            near_zoom: 2.0,
            far_zoom: 0.5,
            min_opacity: 0.15,
            max_opacity: 0.6,
        }
    }
}

impl ParentFade {
    /// Parent opacity at `zoom`.
    pub fn opacity(&self, zoom: f64) -> f64 {
        let lo = self.min_opacity.max(MIN_CONTEXT_OPACITY).min(1.0);
        let hi = self.max_opacity.max(lo).min(1.0);
        let span = self.near_zoom - self.far_zoom;
        if span.is_nan() || span <= 0.0 || zoom.is_nan() {
            return hi;
        }
        let t = ((self.near_zoom - zoom) / span).clamp(0.0, 1.0);
        lo + (hi - lo) * t
    }
}

/// Style for `id` given `focus` and the current viewport `zoom`.
///
/// Returns `None` if `id` is not in `index`.
pub fn node_style(
    index: &GeometryIndex,
    focus: FocusState,
    id: NodeId,
    zoom: f64,
    fade: &ParentFade,
) -> Option<NodeStyle> {
    index.get(id)?;
    let FocusState::Focused(focused) = focus else {
        return Some(NodeStyle::with_opacity(NodeRole::Normal, 1.0));
    };
    let focused = index.get(focused)?;
    Some(if id == focused.id {
        NodeStyle::with_opacity(NodeRole::Focused, 1.0)
    } else if focused.descendants.contains(id) {
        NodeStyle::with_opacity(NodeRole::Descendant, 1.0)
    } else if focused.parent == Some(id) {
        NodeStyle::with_opacity(NodeRole::Context, fade.opacity(zoom))
    } else {
        NodeStyle::with_opacity(NodeRole::Hidden, 0.0)
    })
}
