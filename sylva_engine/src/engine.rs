// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine state and its operations.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};
use palette::Srgb;
use sylva_annotate::{Overlay, OverlayConfig, OverlayResponse, Tool};
use sylva_focus::{
    FocusConfig, FocusController, FocusError, FocusState, FocusTransition, Navigation, NodeStyle,
    SiblingNavigator, Viewport, ViewportCommand,
};
use sylva_layout::{
    DetailMode, Edge, GeometryIndex, Layout, LayoutBuilder, LayoutConfig, LayoutHooks,
    NodeGeometry, NodeId, NoHooks, PositionOverrides, SizePolicy, TreeNode,
};

use crate::gesture::{GestureState, PressEnd, PressMove};
use crate::theme::Theme;

/// Engine parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Layout style, origin and gaps.
    pub layout: LayoutConfig,
    /// Box sizes by depth and detail mode.
    pub sizes: SizePolicy,
    /// Framing and fade behavior.
    pub focus: FocusConfig,
    /// Eraser and sampling parameters.
    pub overlay: OverlayConfig,
    /// Screen pixels a press on a node may travel before it becomes a drag.
    pub drag_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            sizes: SizePolicy::default(),
            focus: FocusConfig::default(),
            overlay: OverlayConfig::default(),
            drag_threshold: 4.0,
        }
    }
}

/// What a pointer event did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerOutcome {
    /// Nothing was hit or nothing changed.
    Ignored,
    /// A press landed on a node; it becomes a click or a drag later.
    Pressed(NodeId),
    /// A click changed (or kept) the focus.
    Focus(FocusTransition),
    /// A press turned into a drag of this node.
    DragStarted(NodeId),
    /// The dragged node moved.
    Dragged(NodeId),
    /// The drag ended; the node keeps its new position.
    Dropped(NodeId),
    /// The annotation overlay consumed the event.
    Overlay(OverlayResponse),
}

/// The complete state of one knowledge-map view.
///
/// The engine owns the input tree, the current layout, manual position
/// overrides, focus, annotations, and the in-flight pointer gesture. The
/// camera stays outside: operations that may move it take a [`Viewport`].
///
/// ```rust
/// use kurbo::Size;
/// use sylva_engine::{Engine, EngineConfig, ThemeKind};
/// use sylva_focus::{Camera, FocusState};
/// use sylva_layout::{DetailMode, NodeId, TreeNode};
///
/// let tree = TreeNode::new("Biology")
///     .with_child(TreeNode::new("Cells"))
///     .with_child(TreeNode::new("Genetics").with_child(TreeNode::new("DNA")));
/// let mut camera = Camera::new(Size::new(1280.0, 720.0));
/// let mut engine = Engine::new(tree, EngineConfig::default());
///
/// let genetics = NodeId::new(2);
/// engine.click(genetics, &mut camera).unwrap();
/// assert_eq!(engine.focus_state(), FocusState::Focused(genetics));
///
/// // Changing density rebuilds the layout but keeps the focus.
/// engine.set_detail_mode(DetailMode::Full, &mut camera);
/// assert_eq!(engine.focus_state(), FocusState::Focused(genetics));
///
/// // Themes only restyle.
/// let before = engine.layout().clone();
/// engine.set_theme(ThemeKind::Orange.theme());
/// assert_eq!(engine.layout(), &before);
/// ```
#[derive(Clone, Debug)]
pub struct Engine<H = NoHooks> {
    tree: TreeNode,
    mode: DetailMode,
    theme: Theme,
    hooks: H,
    builder: LayoutBuilder,
    layout: Layout,
    overrides: PositionOverrides,
    focus: FocusController,
    overlay: Overlay,
    gesture: GestureState<NodeId>,
    /// Model-space offset from the pointer to the dragged node's origin.
    grab: Vec2,
}

impl Engine<NoHooks> {
    /// An engine without layout hooks, in summary mode with the default theme.
    pub fn new(tree: TreeNode, config: EngineConfig) -> Self {
        Self::with_hooks(tree, config, NoHooks)
    }
}

impl<H: LayoutHooks> Engine<H> {
    /// An engine whose layouts consult `hooks`.
    pub fn with_hooks(tree: TreeNode, config: EngineConfig, hooks: H) -> Self {
        let mode = DetailMode::default();
        let builder = LayoutBuilder::new(config.layout, config.sizes);
        let layout = builder.build_with(&tree, mode, &hooks);
        Self {
            tree,
            mode,
            theme: Theme::default(),
            hooks,
            builder,
            layout,
            overrides: PositionOverrides::new(),
            focus: FocusController::new(config.focus),
            overlay: Overlay::new(config.overlay),
            gesture: GestureState::new(config.drag_threshold),
            grab: Vec2::ZERO,
        }
    }

    // --- state -----------------------------------------------------------

    /// The input tree.
    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    /// The current layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The current geometry index.
    pub fn index(&self) -> &GeometryIndex {
        self.layout.index()
    }

    /// Active detail mode.
    pub fn detail_mode(&self) -> DetailMode {
        self.mode
    }

    /// Active palette.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Layout hooks.
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Manual position overrides.
    pub fn overrides(&self) -> &PositionOverrides {
        &self.overrides
    }

    /// Focus state.
    pub fn focus_state(&self) -> FocusState {
        self.focus.state()
    }

    /// The focus controller.
    pub fn focus(&self) -> &FocusController {
        &self.focus
    }

    /// The annotation overlay.
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Mutable access to the annotation overlay, for ink, clearing and undo.
    pub fn overlay_mut(&mut self) -> &mut Overlay {
        &mut self.overlay
    }

    /// Active tool.
    pub fn tool(&self) -> Tool {
        self.overlay.tool()
    }

    // --- inputs ----------------------------------------------------------

    /// Replace the tree and rebuild.
    ///
    /// The focused node is carried over by its child-index path; if that path
    /// no longer exists the engine returns to the overview. Overrides are
    /// re-applied to ids that still exist.
    pub fn set_tree<V: Viewport + ?Sized>(&mut self, tree: TreeNode, viewport: &mut V) {
        self.tree = tree;
        self.gesture.cancel();
        self.rebuild(viewport);
    }

    /// Change the detail mode and rebuild. Focus is kept and reframed.
    pub fn set_detail_mode<V: Viewport + ?Sized>(&mut self, mode: DetailMode, viewport: &mut V) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.rebuild(viewport);
    }

    /// Change the palette. Geometry is untouched.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Switch tools. Any stroke in progress is committed and any node press
    /// is abandoned.
    pub fn set_tool(&mut self, tool: Tool) {
        self.overlay.set_tool(tool);
        self.gesture.cancel();
    }

    /// Command `viewport` to show the whole diagram.
    pub fn fit_view<V: Viewport + ?Sized>(&self, viewport: &mut V) {
        let padding = self.focus.config().padding.max(0.0);
        viewport.apply(ViewportCommand::FitAll {
            rect: self.layout.bounds().inflate(padding, padding),
            duration_ms: self.focus.config().duration_ms,
        });
    }

    // --- focus -----------------------------------------------------------

    /// Toggle focus on `id`.
    ///
    /// While a node drag is in progress the click is suppressed and reports
    /// [`FocusTransition::Unchanged`].
    pub fn click<V: Viewport + ?Sized>(
        &mut self,
        id: NodeId,
        viewport: &mut V,
    ) -> Result<FocusTransition, FocusError> {
        if self.gesture.is_dragging() {
            #[cfg(feature = "tracing")]
            tracing::debug!(node = %id, "click suppressed during drag");
            return Ok(FocusTransition::Unchanged);
        }
        self.focus.click(self.layout.index(), id, viewport)
    }

    /// Step focus to a sibling. No-op at the ends and when unfocused.
    pub fn navigate<V: Viewport + ?Sized>(
        &mut self,
        direction: Navigation,
        viewport: &mut V,
    ) -> FocusTransition {
        self.focus.navigate(self.layout.index(), direction, viewport)
    }

    /// Leave focus and fit the whole diagram.
    pub fn unfocus<V: Viewport + ?Sized>(&mut self, viewport: &mut V) -> FocusTransition {
        self.focus.unfocus(self.layout.index(), viewport)
    }

    // --- manual positions ------------------------------------------------

    /// Move `id`'s box to `origin` and remember it across rebuilds.
    ///
    /// Returns `false` if `id` is not in the layout.
    pub fn drag_node(&mut self, id: NodeId, origin: Point) -> bool {
        self.overrides.place(&mut self.layout, id, origin)
    }

    /// Return `id` to its computed position.
    pub fn clear_override(&mut self, id: NodeId) -> bool {
        if self.overrides.remove(id).is_none() {
            return false;
        }
        self.relayout();
        true
    }

    /// Return every node to its computed position.
    pub fn clear_overrides(&mut self) {
        if self.overrides.is_empty() {
            return;
        }
        self.overrides.clear();
        self.relayout();
    }

    // --- pointer routing -------------------------------------------------

    /// Press at `screen`.
    ///
    /// With the pointer tool a press on a drawn node starts a gesture and a
    /// press on empty canvas is ignored; with other tools the overlay
    /// takes it.
    pub fn pointer_down<V: Viewport + ?Sized>(&mut self, screen: Point, viewport: &V) -> PointerOutcome {
        if self.overlay.is_active() {
            let response = self.overlay.pointer_down(screen, viewport.view_transform());
            return PointerOutcome::Overlay(response);
        }
        let model = viewport.screen_to_model(screen);
        let Some((id, origin)) = self.pick(model, viewport.zoom()).map(|n| (n.id, n.origin)) else {
            return PointerOutcome::Ignored;
        };
        self.grab = origin - model;
        self.gesture.on_down(id, screen);
        PointerOutcome::Pressed(id)
    }

    /// Pointer moved to `screen`.
    pub fn pointer_move<V: Viewport + ?Sized>(&mut self, screen: Point, viewport: &V) -> PointerOutcome {
        if self.overlay.is_active() {
            let response = self.overlay.pointer_move(screen, viewport.view_transform());
            return PointerOutcome::Overlay(response);
        }
        match self.gesture.on_move(screen) {
            PressMove::Idle | PressMove::Pending => PointerOutcome::Ignored,
            PressMove::DragStarted(id) => {
                self.follow(id, screen, viewport);
                PointerOutcome::DragStarted(id)
            }
            PressMove::Dragging(id) => {
                self.follow(id, screen, viewport);
                PointerOutcome::Dragged(id)
            }
        }
    }

    /// Release at `screen`. A press that never became a drag is a click.
    pub fn pointer_up<V: Viewport + ?Sized>(&mut self, screen: Point, viewport: &mut V) -> PointerOutcome {
        if self.overlay.is_active() {
            let response = self.overlay.pointer_up(screen, viewport.view_transform());
            return PointerOutcome::Overlay(response);
        }
        match self.gesture.on_up(screen) {
            PressEnd::Click(id) => match self.click(id, viewport) {
                Ok(transition) => PointerOutcome::Focus(transition),
                Err(_) => PointerOutcome::Ignored,
            },
            PressEnd::DragEnded(id) => {
                self.follow(id, screen, &*viewport);
                PointerOutcome::Dropped(id)
            }
            PressEnd::Suppressed => PointerOutcome::Ignored,
        }
    }

    // --- presentation ----------------------------------------------------

    /// Style for `id` at the viewport's `zoom`.
    pub fn node_style(&self, id: NodeId, zoom: f64) -> Option<NodeStyle> {
        self.focus.style(self.layout.index(), id, zoom)
    }

    /// Fill color for `id` from the active theme.
    pub fn node_fill(&self, id: NodeId) -> Option<Srgb<u8>> {
        self.layout.get(id).map(|n| self.theme.fill(n.depth))
    }

    /// Edges to draw under the current focus.
    pub fn visible_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.focus
            .visible_edges(self.layout.index(), self.layout.edges())
    }

    /// Connector color for `edge`: the band of its source's depth.
    pub fn edge_color(&self, edge: &Edge) -> Option<Srgb<u8>> {
        self.layout
            .get(edge.source)
            .map(|n| self.theme.edge(n.depth))
    }

    /// Root-to-focused chain. Empty when unfocused.
    pub fn breadcrumb(&self) -> Vec<&NodeGeometry> {
        self.focus.breadcrumb(self.layout.index())
    }

    /// Siblings of the focused node in visual order. Empty when unfocused or
    /// when the root is focused.
    pub fn siblings(&self) -> Vec<NodeId> {
        self.focus.focused().map_or_else(Vec::new, |id| {
            SiblingNavigator.siblings_of(self.layout.index(), id)
        })
    }

    // --- internals -------------------------------------------------------

    /// Topmost pickable node under the model-space `point`.
    fn pick(&self, point: Point, zoom: f64) -> Option<&NodeGeometry> {
        self.layout.geometries().iter().rev().find(|n| {
            n.rect().contains(point)
                && self
                    .focus
                    .style(self.layout.index(), n.id, zoom)
                    .is_some_and(|s| s.pickable)
        })
    }

    fn follow<V: Viewport + ?Sized>(&mut self, id: NodeId, screen: Point, viewport: &V) {
        let origin = viewport.screen_to_model(screen) + self.grab;
        self.overrides.place(&mut self.layout, id, origin);
    }

    /// Build, then re-apply overrides. Ids are unchanged when the tree and
    /// mode are, so focus needs no fixing up.
    fn relayout(&mut self) {
        let mut layout = self.builder.build_with(&self.tree, self.mode, &self.hooks);
        self.overrides.apply(&mut layout);
        self.layout = layout;
    }

    fn rebuild<V: Viewport + ?Sized>(&mut self, viewport: &mut V) {
        let focus_path = self
            .focus
            .focused()
            .and_then(|id| self.layout.index().path_of(id));
        self.relayout();
        let Some(path) = focus_path else {
            return;
        };
        match self.layout.index().resolve_path(&path) {
            Some(id) => {
                if self.focus.focus(self.layout.index(), id, viewport).is_err() {
                    self.focus.reset();
                }
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(path = ?path.as_slice(), "focused node vanished on rebuild");
                self.focus.unfocus(self.layout.index(), viewport);
            }
        }
    }
}
