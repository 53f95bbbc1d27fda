// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The focus state machine.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;
use kurbo::{Insets, Rect};
use sylva_layout::{Edge, GeometryIndex, NodeGeometry, NodeId};

use crate::siblings::{Navigation, SiblingNavigator};
use crate::style::{NodeStyle, ParentFade, node_style};
use crate::viewport::{Viewport, ViewportCommand};

/// Which node, if any, is focused.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FocusState {
    /// The whole diagram is shown.
    #[default]
    Unfocused,
    /// One subtree is shown, the rest faded out.
    Focused(NodeId),
}

impl FocusState {
    /// The focused id, if any.
    pub fn focused(self) -> Option<NodeId> {
        match self {
            Self::Unfocused => None,
            Self::Focused(id) => Some(id),
        }
    }
}

/// What a focus operation did.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusTransition {
    /// `Unfocused` to `Focused(id)`.
    Entered(NodeId),
    /// `Focused(from)` to `Focused(to)`, with no unfocused step in between.
    Switched {
        /// Previously focused node.
        from: NodeId,
        /// Newly focused node.
        to: NodeId,
    },
    /// `Focused(id)` to `Unfocused`.
    Exited(NodeId),
    /// Nothing changed.
    Unchanged,
}

/// A rejected focus request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusError {
    /// The id is not part of the current layout.
    UnknownNode(NodeId),
}

impl fmt::Display for FocusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "no node {id} in the current layout"),
        }
    }
}

impl core::error::Error for FocusError {}

/// Focus behavior parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FocusConfig {
    /// Model-space margin added around a framed subtree.
    pub padding: f64,
    /// Upper bound on zoom when framing a subtree.
    pub max_zoom: f64,
    /// Suggested camera animation length.
    pub duration_ms: u32,
    /// Opacity curve for the focused node's parent.
    pub parent_fade: ParentFade,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            padding: 40.0,
            max_zoom: 1.5,
            duration_ms: 400,
            parent_fade: ParentFade::default(),
        }
    }
}

/// Drives `Unfocused | Focused(id)` and commands the viewport.
///
/// The controller stores only the focused id. Breadcrumbs, visible sets and
/// styles are derived on demand from the [`GeometryIndex`] passed in, so they
/// always reflect the current layout.
///
/// ```rust
/// use kurbo::Size;
/// use sylva_focus::{Camera, FocusController, FocusState, FocusTransition};
/// use sylva_layout::{DetailMode, LayoutBuilder, NodeId, TreeNode};
///
/// let tree = TreeNode::new("root").with_child(TreeNode::new("leaf"));
/// let layout = LayoutBuilder::default().build(&tree, DetailMode::Summary);
/// let mut camera = Camera::new(Size::new(800.0, 600.0));
/// let mut focus = FocusController::default();
///
/// let leaf = NodeId::new(1);
/// let t = focus.click(layout.index(), leaf, &mut camera).unwrap();
/// assert_eq!(t, FocusTransition::Entered(leaf));
/// assert_eq!(focus.state(), FocusState::Focused(leaf));
///
/// // Clicking the focused node again returns to the overview.
/// focus.click(layout.index(), leaf, &mut camera).unwrap();
/// assert_eq!(focus.state(), FocusState::Unfocused);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FocusController {
    state: FocusState,
    config: FocusConfig,
}

impl FocusController {
    /// An unfocused controller.
    pub fn new(config: FocusConfig) -> Self {
        Self {
            state: FocusState::Unfocused,
            config,
        }
    }

    /// Current state.
    pub fn state(&self) -> FocusState {
        self.state
    }

    /// The focused id, if any.
    pub fn focused(&self) -> Option<NodeId> {
        self.state.focused()
    }

    /// Parameters.
    pub fn config(&self) -> &FocusConfig {
        &self.config
    }

    /// Replace the parameters. Takes effect on the next command.
    pub fn set_config(&mut self, config: FocusConfig) {
        self.config = config;
    }

    /// Toggle focus on `id`: focus it, switch to it, or (if already focused)
    /// return to the overview.
    pub fn click<V: Viewport + ?Sized>(
        &mut self,
        index: &GeometryIndex,
        id: NodeId,
        viewport: &mut V,
    ) -> Result<FocusTransition, FocusError> {
        if !index.contains(id) {
            return Err(self.reject(id));
        }
        if self.state == FocusState::Focused(id) {
            Ok(self.unfocus(index, viewport))
        } else {
            self.focus(index, id, viewport)
        }
    }

    /// Focus `id` and frame its subtree. Focusing the already-focused node
    /// reframes it and reports [`FocusTransition::Unchanged`].
    pub fn focus<V: Viewport + ?Sized>(
        &mut self,
        index: &GeometryIndex,
        id: NodeId,
        viewport: &mut V,
    ) -> Result<FocusTransition, FocusError> {
        let Some(rect) = self.frame_for(index, id) else {
            return Err(self.reject(id));
        };
        viewport.apply(ViewportCommand::Frame {
            rect,
            max_zoom: self.config.max_zoom,
            duration_ms: self.config.duration_ms,
        });
        let transition = match self.state {
            FocusState::Unfocused => FocusTransition::Entered(id),
            FocusState::Focused(from) if from == id => FocusTransition::Unchanged,
            FocusState::Focused(from) => FocusTransition::Switched { from, to: id },
        };
        self.state = FocusState::Focused(id);

        #[cfg(feature = "tracing")]
        tracing::debug!(?transition, "focus changed");

        Ok(transition)
    }

    /// Return to the overview and fit the whole diagram.
    pub fn unfocus<V: Viewport + ?Sized>(
        &mut self,
        index: &GeometryIndex,
        viewport: &mut V,
    ) -> FocusTransition {
        let FocusState::Focused(from) = self.state else {
            return FocusTransition::Unchanged;
        };
        self.state = FocusState::Unfocused;
        viewport.apply(ViewportCommand::FitAll {
            rect: self.pad(index.bounds()),
            duration_ms: self.config.duration_ms,
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(from = %from, "focus cleared");

        FocusTransition::Exited(from)
    }

    /// Move focus to the previous or next sibling of the focused node.
    ///
    /// At either end, or when unfocused, nothing happens.
    pub fn navigate<V: Viewport + ?Sized>(
        &mut self,
        index: &GeometryIndex,
        direction: Navigation,
        viewport: &mut V,
    ) -> FocusTransition {
        let Some(current) = self.focused() else {
            return FocusTransition::Unchanged;
        };
        match SiblingNavigator.step(index, current, direction) {
            Some(target) => self
                .focus(index, target, viewport)
                .unwrap_or(FocusTransition::Unchanged),
            None => FocusTransition::Unchanged,
        }
    }

    /// Drop focus without commanding the viewport.
    ///
    /// Used when the layout the focus referred to no longer exists.
    pub fn reset(&mut self) {
        self.state = FocusState::Unfocused;
    }

    /// Padded bounds of `id` and all its descendants.
    pub fn frame_for(&self, index: &GeometryIndex, id: NodeId) -> Option<Rect> {
        index.subtree_bounds(id).map(|r| self.pad(r))
    }

    fn pad(&self, rect: Rect) -> Rect {
        rect + Insets::uniform(self.config.padding.max(0.0))
    }

    fn reject(&self, id: NodeId) -> FocusError {
        #[cfg(feature = "tracing")]
        tracing::warn!(node = %id, state = ?self.state, "focus request for unknown node rejected");
        FocusError::UnknownNode(id)
    }

    /// Root-to-focused chain. Empty when unfocused.
    pub fn breadcrumb<'a>(&self, index: &'a GeometryIndex) -> Vec<&'a NodeGeometry> {
        match self.state {
            FocusState::Unfocused => Vec::new(),
            FocusState::Focused(id) => index
                .path_to(id)
                .into_iter()
                .filter_map(|n| index.get(n))
                .collect(),
        }
    }

    /// Whether `id` is in the visible set: the focused node and its
    /// descendants, or every node when unfocused.
    pub fn is_visible(&self, index: &GeometryIndex, id: NodeId) -> bool {
        match self.state {
            FocusState::Unfocused => index.contains(id),
            FocusState::Focused(f) => {
                f == id || index.get(f).is_some_and(|n| n.descendants.contains(id))
            }
        }
    }

    /// The visible set.
    pub fn visible_ids(&self, index: &GeometryIndex) -> HashSet<NodeId> {
        match self.state {
            FocusState::Unfocused => index.iter().map(|n| n.id).collect(),
            FocusState::Focused(f) => match index.get(f) {
                Some(n) => core::iter::once(f).chain(n.descendants.iter()).collect(),
                None => HashSet::new(),
            },
        }
    }

    /// Edges whose endpoints are both visible.
    pub fn visible_edges<'e>(
        &self,
        index: &GeometryIndex,
        edges: &'e [Edge],
    ) -> impl Iterator<Item = &'e Edge> + use<'e> {
        let visible = self.visible_ids(index);
        edges
            .iter()
            .filter(move |e| visible.contains(&e.source) && visible.contains(&e.target))
    }

    /// Style for `id` at the given viewport zoom.
    pub fn style(&self, index: &GeometryIndex, id: NodeId, zoom: f64) -> Option<NodeStyle> {
        node_style(index, self.state, id, zoom, &self.config.parent_fade)
    }
}
