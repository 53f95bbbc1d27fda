// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout builder: width reservation, position assignment, edge emission.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;

use crate::detail::DetailMode;
use crate::index::GeometryIndex;
use crate::size::SizePolicy;
use crate::tree::TreeNode;
use crate::types::{Anchor, Descendants, Edge, EdgeId, NodeGeometry, NodeId, Span};

/// Overall arrangement of the diagram.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutStyle {
    /// Strict layered tree: rows top to bottom, subtrees side by side.
    #[default]
    Tree,
    /// Children placed on a circle around their parent.
    Radial,
}

/// Parameters for [`LayoutStyle::Radial`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RadialConfig {
    /// Distance from the root's center to its children's centers.
    pub base_radius: f64,
    /// Extra distance per parent depth.
    pub radius_step: f64,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            base_radius: 280.0,
            radius_step: 40.0,
        }
    }
}

/// Layout parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Tree or radial arrangement.
    pub style: LayoutStyle,
    /// For [`LayoutStyle::Tree`], `x` is the root's horizontal center and `y`
    /// the top of the first row. For [`LayoutStyle::Radial`], the root's center.
    pub origin: Point,
    /// Horizontal gap between adjacent sibling subtrees.
    pub sibling_gap: f64,
    /// Vertical gap between the bottom of one row and the top of the next.
    pub level_gap: f64,
    /// Radial parameters; ignored by the tree style.
    pub radial: RadialConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            style: LayoutStyle::Tree,
            origin: Point::new(400.0, 50.0),
            sibling_gap: 80.0,
            level_gap: 60.0,
            radial: RadialConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Defaults for the radial style.
    pub fn radial() -> Self {
        Self {
            style: LayoutStyle::Radial,
            origin: Point::new(600.0, 400.0),
            ..Self::default()
        }
    }
}

/// How the connector into a node is drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeRule {
    /// Draw an edge from the parent.
    #[default]
    Direct,
    /// Draw nothing into this node; its children hang off its nearest drawn
    /// ancestor instead.
    Aggregator,
}

/// Presentation hooks consulted during a build.
///
/// Hooks never change width reservation for ordinary subtrees or the set of
/// geometries produced; they only decide where a pinned subtree goes and
/// which connectors are drawn.
pub trait LayoutHooks {
    /// Whether `child` of the root gets its own row band between the root and
    /// the remaining children. Only the first matching root child is pinned.
    fn pin_row(&self, child: &TreeNode) -> bool {
        let _ = child;
        false
    }

    /// Edge policy for a non-root `node` at `depth`.
    fn edge_rule(&self, node: &TreeNode, depth: usize) -> EdgeRule {
        let _ = (node, depth);
        EdgeRule::Direct
    }
}

/// No pinned rows, every edge drawn.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoHooks;

impl LayoutHooks for NoHooks {}

/// Pins the first root child whose title contains a needle, ignoring case.
///
/// ```rust
/// use sylva_layout::{DetailMode, LayoutBuilder, PinTitle, TreeNode};
///
/// let tree = TreeNode::new("Course")
///     .with_child(TreeNode::new("Part A"))
///     .with_child(TreeNode::new("Introduction"));
/// let layout = LayoutBuilder::default().build_with(
///     &tree,
///     DetailMode::Minimal,
///     &PinTitle::new("introduction"),
/// );
/// let intro = layout.index().iter().find(|n| n.title == "Introduction").unwrap();
/// let part = layout.index().iter().find(|n| n.title == "Part A").unwrap();
/// assert!(intro.origin.y < part.origin.y);
/// ```
#[derive(Clone, Debug)]
pub struct PinTitle {
    needle: String,
}

impl PinTitle {
    /// Match titles containing `needle`.
    pub fn new(needle: &str) -> Self {
        Self {
            needle: needle.to_lowercase(),
        }
    }
}

impl LayoutHooks for PinTitle {
    fn pin_row(&self, child: &TreeNode) -> bool {
        !self.needle.is_empty() && child.title.to_lowercase().contains(&self.needle)
    }
}

/// Result of a build: the geometry index plus the edges to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    index: GeometryIndex,
    edges: Vec<Edge>,
    mode: DetailMode,
    style: LayoutStyle,
}

impl Layout {
    /// The geometry index.
    pub fn index(&self) -> &GeometryIndex {
        &self.index
    }

    pub(crate) fn index_mut(&mut self) -> &mut GeometryIndex {
        &mut self.index
    }

    /// Consume the layout, keeping only its index.
    pub fn into_index(self) -> GeometryIndex {
        self.index
    }

    /// Geometry for `id`.
    pub fn get(&self, id: NodeId) -> Option<&NodeGeometry> {
        self.index.get(id)
    }

    /// Every geometry in id order.
    pub fn geometries(&self) -> &[NodeGeometry] {
        self.index.as_slice()
    }

    /// Edges in emission order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Detail mode this layout was built for.
    pub fn detail_mode(&self) -> DetailMode {
        self.mode
    }

    /// Style this layout was built with.
    pub fn style(&self) -> LayoutStyle {
        self.style
    }

    /// Union of every node box, including overridden positions.
    pub fn bounds(&self) -> Rect {
        self.index.bounds()
    }

    /// Connector endpoints for `edge`, or `None` if it names an unknown node.
    pub fn edge_endpoints(&self, edge: &Edge) -> Option<(Point, Point)> {
        let source = self.index.get(edge.source)?;
        let target = self.index.get(edge.target)?;
        Some((
            edge.source_anchor.point_on(source.rect()),
            edge.target_anchor.point_on(target.rect()),
        ))
    }
}

/// Computes a [`Layout`] from a [`TreeNode`].
///
/// Builds are pure: the same tree, detail mode, and hooks always produce the
/// same layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutBuilder {
    config: LayoutConfig,
    sizes: SizePolicy,
}

/// Per-node scratch record. Slots are stored in pre-order.
#[derive(Debug)]
struct Slot<'t> {
    node: &'t TreeNode,
    parent: Option<usize>,
    depth: usize,
    children: SmallVec<[usize; 4]>,
    size: Size,
    reserved: f64,
    row: usize,
    span: Span,
    origin: Point,
    /// Direction from the parent, radial style only.
    angle: f64,
}

impl LayoutBuilder {
    /// Create a builder.
    pub fn new(config: LayoutConfig, sizes: SizePolicy) -> Self {
        Self { config, sizes }
    }

    /// Layout parameters.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Size policy.
    pub fn sizes(&self) -> &SizePolicy {
        &self.sizes
    }

    /// Build without hooks.
    pub fn build(&self, root: &TreeNode, mode: DetailMode) -> Layout {
        self.build_with(root, mode, &NoHooks)
    }

    /// Build, consulting `hooks` for pinned rows and edge rules.
    pub fn build_with<H: LayoutHooks + ?Sized>(
        &self,
        root: &TreeNode,
        mode: DetailMode,
        hooks: &H,
    ) -> Layout {
        let mut slots = self.flatten(root, mode);
        match self.config.style {
            LayoutStyle::Tree => {
                let pinned = slots[0]
                    .children
                    .iter()
                    .copied()
                    .find(|&c| hooks.pin_row(slots[c].node));
                self.reserve_widths(&mut slots, pinned);
                self.assign_rows(&mut slots, pinned);
                self.place_tree(&mut slots, pinned);
            }
            LayoutStyle::Radial => self.place_radial(&mut slots),
        }
        let edges = self.emit_edges(&slots, hooks);

        let nodes: Vec<NodeGeometry> = slots
            .iter()
            .enumerate()
            .map(|(i, s)| NodeGeometry {
                id: NodeId::from_idx(i),
                title: s.node.title.clone(),
                body: mode.excerpt(s.node.body_text()),
                depth: s.depth,
                row: s.row,
                parent: s.parent.map(NodeId::from_idx),
                origin: s.origin,
                size: s.size,
                span: s.span,
                children: s.children.iter().copied().map(NodeId::from_idx).collect(),
                descendants: Descendants::default(),
            })
            .collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            style = ?self.config.style,
            mode = ?mode,
            nodes = nodes.len(),
            edges = edges.len(),
            "layout built"
        );

        Layout {
            index: GeometryIndex::new(nodes),
            edges,
            mode,
            style: self.config.style,
        }
    }

    /// Pre-order walk assigning ids, parents, depths, and sizes.
    fn flatten<'t>(&self, root: &'t TreeNode, mode: DetailMode) -> Vec<Slot<'t>> {
        let mut slots: Vec<Slot<'t>> = Vec::with_capacity(root.len());
        let mut stack: Vec<(&'t TreeNode, Option<usize>, usize)> = vec![(root, None, 0)];
        while let Some((node, parent, depth)) = stack.pop() {
            let id = slots.len();
            if let Some(p) = parent {
                slots[p].children.push(id);
            }
            slots.push(Slot {
                node,
                parent,
                depth,
                children: SmallVec::new(),
                size: self.sizes.size(depth, mode),
                reserved: 0.0,
                row: depth,
                span: Span::default(),
                origin: Point::ZERO,
                angle: 0.0,
            });
            // Reversed so the leftmost child is popped (and numbered) first.
            for child in node.children.iter().rev() {
                stack.push((child, Some(id), depth + 1));
            }
        }
        slots
    }

    /// Total width of a left-to-right block of sibling subtrees.
    fn block_width<'a>(&self, slots: &[Slot<'_>], members: impl Iterator<Item = &'a usize>) -> f64 {
        let mut total = 0.0;
        let mut count = 0_usize;
        for &m in members {
            total += slots[m].reserved;
            count += 1;
        }
        if count > 1 {
            #[allow(
                clippy::cast_precision_loss,
                reason = "Sibling counts are far below f64's exact integer range."
            )]
            let gaps = (count - 1) as f64;
            total += gaps * self.config.sibling_gap;
        }
        total
    }

    /// Bottom-up width reservation.
    fn reserve_widths(&self, slots: &mut [Slot<'_>], pinned: Option<usize>) {
        for i in (0..slots.len()).rev() {
            let own = slots[i].size.width;
            let block = self.block_width(
                slots,
                slots[i].children.iter().filter(|&&c| Some(c) != pinned),
            );
            let mut reserved = own.max(block);
            if i == 0
                && let Some(p) = pinned
            {
                reserved = reserved.max(slots[p].reserved);
            }
            slots[i].reserved = reserved;
        }
    }

    /// Rows equal depth, except that everything outside a pinned subtree is
    /// pushed below the pinned band.
    fn assign_rows(&self, slots: &mut [Slot<'_>], pinned: Option<usize>) {
        let Some(p) = pinned else {
            return;
        };
        let mut in_band = vec![false; slots.len()];
        let mut band = 0;
        for i in 0..slots.len() {
            in_band[i] = i == p || slots[i].parent.is_some_and(|parent| in_band[parent]);
            if in_band[i] {
                band = band.max(slots[i].depth);
            }
        }
        for i in 1..slots.len() {
            if !in_band[i] {
                slots[i].row = slots[i].depth + band;
            }
        }
    }

    /// Top-down placement for the tree style.
    fn place_tree(&self, slots: &mut [Slot<'_>], pinned: Option<usize>) {
        let rows = slots.iter().map(|s| s.row).max().unwrap_or(0) + 1;
        let mut row_heights = vec![0.0_f64; rows];
        for s in slots.iter() {
            row_heights[s.row] = row_heights[s.row].max(s.size.height);
        }
        let mut row_tops = Vec::with_capacity(rows);
        let mut y = self.config.origin.y;
        for h in &row_heights {
            row_tops.push(y);
            y += h + self.config.level_gap;
        }

        let root_width = slots[0].reserved;
        slots[0].span = Span::from_width(self.config.origin.x - root_width * 0.5, root_width);

        for i in 0..slots.len() {
            let span = slots[i].span;
            let size = slots[i].size;
            slots[i].origin = Point::new(
                span.x0 + (span.width() - size.width) * 0.5,
                row_tops[slots[i].row],
            );

            let children = slots[i].children.clone();
            let block = self.block_width(slots, children.iter().filter(|&&c| Some(c) != pinned));
            let mut cursor = span.x0 + (span.width() - block) * 0.5;
            for &c in &children {
                let width = slots[c].reserved;
                if Some(c) == pinned {
                    slots[c].span = Span::from_width(span.center() - width * 0.5, width);
                } else {
                    slots[c].span = Span::from_width(cursor, width);
                    cursor += width + self.config.sibling_gap;
                }
            }
        }
    }

    /// Top-down placement for the radial style.
    fn place_radial(&self, slots: &mut [Slot<'_>]) {
        let origin = self.config.origin;
        let mut centers = vec![origin; slots.len()];
        for i in 0..slots.len() {
            let center = centers[i];
            let size = slots[i].size;
            slots[i].origin = center - Vec2::new(size.width * 0.5, size.height * 0.5);
            slots[i].span = Span::from_width(slots[i].origin.x, size.width);

            #[allow(
                clippy::cast_precision_loss,
                reason = "Depths and sibling counts are far below f64's exact integer range."
            )]
            let (count, radius) = (
                slots[i].children.len() as f64,
                self.config.radial.base_radius
                    + slots[i].depth as f64 * self.config.radial.radius_step,
            );
            let children = slots[i].children.clone();
            for (k, &c) in children.iter().enumerate() {
                #[allow(
                    clippy::cast_precision_loss,
                    reason = "Sibling indices are far below f64's exact integer range."
                )]
                let angle = k as f64 / count * TAU - FRAC_PI_2;
                slots[c].angle = angle;
                centers[c] = center + Vec2::from_angle(angle) * radius;
            }
        }
    }

    /// Connector sides for an edge into `target`.
    fn anchors(&self, target: &Slot<'_>) -> (Anchor, Anchor) {
        match self.config.style {
            LayoutStyle::Tree => (Anchor::Bottom, Anchor::Top),
            LayoutStyle::Radial => {
                // Angles lie in [-π/2, 3π/2).
                let a = target.angle;
                let source = if (-FRAC_PI_4..FRAC_PI_4).contains(&a) {
                    Anchor::Right
                } else if (FRAC_PI_4..3.0 * FRAC_PI_4).contains(&a) {
                    Anchor::Bottom
                } else if (3.0 * FRAC_PI_4..5.0 * FRAC_PI_4).contains(&a) {
                    Anchor::Left
                } else {
                    Anchor::Top
                };
                (source, source.opposite())
            }
        }
    }

    fn emit_edges<H: LayoutHooks + ?Sized>(&self, slots: &[Slot<'_>], hooks: &H) -> Vec<Edge> {
        // Nearest ancestor (or self) that receives a drawn edge; the root
        // always counts as drawn.
        let mut drawn_anchor: Vec<usize> = Vec::with_capacity(slots.len());
        let mut edges = Vec::with_capacity(slots.len().saturating_sub(1));
        for (i, slot) in slots.iter().enumerate() {
            let Some(parent) = slot.parent else {
                drawn_anchor.push(i);
                continue;
            };
            match hooks.edge_rule(slot.node, slot.depth) {
                EdgeRule::Direct => {
                    let (source_anchor, target_anchor) = self.anchors(slot);
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "Edge counts are bounded by node counts, which fit in u32."
                    )]
                    let id = EdgeId(edges.len() as u32);
                    edges.push(Edge {
                        id,
                        source: NodeId::from_idx(drawn_anchor[parent]),
                        target: NodeId::from_idx(i),
                        source_anchor,
                        target_anchor,
                    });
                    drawn_anchor.push(i);
                }
                EdgeRule::Aggregator => drawn_anchor.push(drawn_anchor[parent]),
            }
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn biology() -> TreeNode {
        TreeNode::new("Biology")
            .with_child(TreeNode::new("Cells"))
            .with_child(TreeNode::new("Genetics").with_child(TreeNode::new("DNA")))
    }

    fn by_title<'a>(layout: &'a Layout, title: &str) -> &'a NodeGeometry {
        layout
            .geometries()
            .iter()
            .find(|n| n.title == title)
            .expect("title present")
    }

    #[test]
    fn biology_scenario() {
        let layout = LayoutBuilder::default().build(&biology(), DetailMode::Summary);
        assert_eq!(layout.geometries().len(), 4);
        assert_eq!(layout.edges().len(), 3);

        let biology = by_title(&layout, "Biology");
        let cells = by_title(&layout, "Cells");
        let genetics = by_title(&layout, "Genetics");
        let dna = by_title(&layout, "DNA");

        // Biology is centered above the block formed by both children.
        let block_center = (cells.rect().x0 + genetics.rect().x1) * 0.5;
        assert!((biology.center().x - block_center).abs() < EPS);
        assert!((biology.center().x - 400.0).abs() < EPS);
        assert!((genetics.center().x - dna.center().x).abs() < EPS);

        assert!(biology.origin.y < cells.origin.y);
        assert_eq!(cells.origin.y, genetics.origin.y);
        assert!(genetics.origin.y < dna.origin.y);
        assert!(cells.rect().x1 + 80.0 <= genetics.rect().x0 + EPS);

        // Reserved widths: 250 + 80 + 250 for the root.
        assert!((biology.span.width() - 580.0).abs() < EPS);
    }

    #[test]
    fn ids_follow_pre_order() {
        let layout = LayoutBuilder::default().build(&biology(), DetailMode::Minimal);
        let titles: Vec<&str> = layout
            .geometries()
            .iter()
            .map(|n| n.title.as_str())
            .collect();
        assert_eq!(titles, ["Biology", "Cells", "Genetics", "DNA"]);
        let edge_pairs: Vec<(u32, u32)> = layout
            .edges()
            .iter()
            .map(|e| (e.source.get(), e.target.get()))
            .collect();
        assert_eq!(edge_pairs, [(0, 1), (0, 2), (2, 3)]);
    }

    #[test]
    fn single_node_is_centered_leaf() {
        let layout = LayoutBuilder::default().build(&TreeNode::default(), DetailMode::Full);
        assert_eq!(layout.geometries().len(), 1);
        assert!(layout.edges().is_empty());
        let root = &layout.geometries()[0];
        assert_eq!(root.title, "");
        assert!((root.center().x - 400.0).abs() < EPS);
        assert_eq!(root.origin.y, 50.0);
    }

    #[test]
    fn rows_stack_by_tallest_box() {
        let layout = LayoutBuilder::default().build(&biology(), DetailMode::Full);
        let biology = by_title(&layout, "Biology");
        let cells = by_title(&layout, "Cells");
        assert!((cells.origin.y - (biology.rect().y1 + 60.0)).abs() < EPS);
    }

    #[test]
    fn body_follows_detail_mode() {
        let tree = TreeNode::new("root").with_body("Some body text");
        let min = LayoutBuilder::default().build(&tree, DetailMode::Minimal);
        let full = LayoutBuilder::default().build(&tree, DetailMode::Full);
        assert_eq!(min.geometries()[0].body, None);
        assert_eq!(full.geometries()[0].body.as_deref(), Some("Some body text"));
    }

    #[test]
    fn blank_bodies_are_dropped_in_every_mode() {
        let tree = TreeNode::new("root").with_body("  \n\t");
        for mode in DetailMode::ALL {
            let layout = LayoutBuilder::default().build(&tree, mode);
            assert_eq!(layout.geometries()[0].body, None, "{mode:?}");
        }
    }

    #[test]
    fn pinned_child_gets_its_own_band() {
        let tree = TreeNode::new("Course")
            .with_child(TreeNode::new("Chapter 1").with_child(TreeNode::new("1.1")))
            .with_child(
                TreeNode::new("Introduction to the course")
                    .with_child(TreeNode::new("Goals")),
            )
            .with_child(TreeNode::new("Chapter 2"));
        let layout =
            LayoutBuilder::default().build_with(&tree, DetailMode::Minimal, &PinTitle::new("INTRO"));

        let root = by_title(&layout, "Course");
        let intro = by_title(&layout, "Introduction to the course");
        let goals = by_title(&layout, "Goals");
        let ch1 = by_title(&layout, "Chapter 1");
        let ch2 = by_title(&layout, "Chapter 2");
        let sub = by_title(&layout, "1.1");

        assert_eq!((intro.row, goals.row), (1, 2));
        assert_eq!((ch1.row, ch2.row, sub.row), (3, 3, 4));
        assert!(intro.origin.y < goals.origin.y && goals.origin.y < ch1.origin.y);
        assert!((intro.center().x - root.center().x).abs() < EPS);
        let block_center = (ch1.span.x0 + ch2.span.x1) * 0.5;
        assert!((block_center - root.center().x).abs() < EPS);
        // Depths are untouched by the band.
        assert_eq!((intro.depth, ch1.depth, sub.depth), (1, 1, 2));
        assert_eq!(layout.edges().len(), 5);
    }

    #[test]
    fn empty_pin_needle_pins_nothing() {
        let layout =
            LayoutBuilder::default().build_with(&biology(), DetailMode::Minimal, &PinTitle::new(""));
        assert!(layout.geometries().iter().all(|n| n.row == n.depth));
    }

    struct SkipDepthOne;

    impl LayoutHooks for SkipDepthOne {
        fn edge_rule(&self, _node: &TreeNode, depth: usize) -> EdgeRule {
            if depth == 1 {
                EdgeRule::Aggregator
            } else {
                EdgeRule::Direct
            }
        }
    }

    #[test]
    fn aggregators_keep_geometry_and_reroute_edges() {
        let plain = LayoutBuilder::default().build(&biology(), DetailMode::Summary);
        let hooked = LayoutBuilder::default().build_with(&biology(), DetailMode::Summary, &SkipDepthOne);

        assert_eq!(plain.geometries(), hooked.geometries());
        let pairs: Vec<(u32, u32)> = hooked
            .edges()
            .iter()
            .map(|e| (e.source.get(), e.target.get()))
            .collect();
        // DNA hangs off Biology; nothing points at Cells or Genetics.
        assert_eq!(pairs, [(0, 3)]);
    }

    #[test]
    fn radial_places_children_on_a_circle() {
        let builder = LayoutBuilder::new(LayoutConfig::radial(), SizePolicy::default());
        let layout = builder.build(&biology(), DetailMode::Minimal);
        assert_eq!(layout.style(), LayoutStyle::Radial);

        let root = by_title(&layout, "Biology");
        let cells = by_title(&layout, "Cells");
        let genetics = by_title(&layout, "Genetics");
        let dna = by_title(&layout, "DNA");

        assert!((root.center() - Point::new(600.0, 400.0)).hypot() < EPS);
        assert!(((cells.center() - root.center()).hypot() - 280.0).abs() < 1e-6);
        assert!(((genetics.center() - root.center()).hypot() - 280.0).abs() < 1e-6);
        assert!(((dna.center() - genetics.center()).hypot() - 320.0).abs() < 1e-6);
        // First child straight up, second straight down.
        assert!(cells.center().y < root.center().y);
        assert!(genetics.center().y > root.center().y);

        let into_cells = layout.edges().iter().find(|e| e.target == cells.id).unwrap();
        assert_eq!(into_cells.source_anchor, Anchor::Top);
        assert_eq!(into_cells.target_anchor, Anchor::Bottom);
        let into_genetics = layout.edges().iter().find(|e| e.target == genetics.id).unwrap();
        assert_eq!(into_genetics.source_anchor, Anchor::Bottom);
    }

    #[test]
    fn edge_endpoints_attach_to_boxes() {
        let layout = LayoutBuilder::default().build(&biology(), DetailMode::Summary);
        let edge = layout.edges()[0];
        let (from, to) = layout.edge_endpoints(&edge).expect("known ids");
        let source = layout.get(edge.source).unwrap().rect();
        let target = layout.get(edge.target).unwrap().rect();
        assert_eq!(from.y, source.y1);
        assert_eq!(to.y, target.y0);

        let dangling = Edge {
            target: NodeId::new(77),
            ..edge
        };
        assert_eq!(layout.edge_endpoints(&dangling), None);
    }

    #[test]
    fn rebuild_is_idempotent() {
        let builder = LayoutBuilder::default();
        let a = builder.build(&biology(), DetailMode::Full);
        let b = builder.build(&biology(), DetailMode::Full);
        assert_eq!(a, b);
    }
}
