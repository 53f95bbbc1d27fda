// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sylva Layout: layered tree layout for knowledge-map diagrams.
//!
//! This crate turns a rooted, labeled tree into positioned boxes and the
//! connectors between them:
//! - A **tree model** ([`TreeNode`]) produced by some external collaborator.
//! - A **size policy** ([`SizePolicy`]) mapping `(depth, detail mode)` to a box size.
//! - A **layout builder** ([`LayoutBuilder`]) that reserves a horizontal span for
//!   every subtree bottom-up, then places rows top-down so each parent is
//!   centered over its children.
//! - A **geometry index** ([`GeometryIndex`]) for the queries interactive
//!   features need: parents, children, precomputed descendant sets, siblings
//!   in visual order, and node paths that survive rebuilds.
//!
//! Presentation tweaks that are not part of the core algorithm (a pinned
//! introduction row, aggregator nodes that receive no connector) are opt-in
//! through [`LayoutHooks`].
//!
//! ## Minimal example
//!
//! ```rust
//! use sylva_layout::{DetailMode, LayoutBuilder, TreeNode};
//!
//! let tree = TreeNode::new("Biology")
//!     .with_child(TreeNode::new("Cells"))
//!     .with_child(TreeNode::new("Genetics").with_child(TreeNode::new("DNA")));
//!
//! let layout = LayoutBuilder::default().build(&tree, DetailMode::Summary);
//! assert_eq!(layout.geometries().len(), 4);
//! assert_eq!(layout.edges().len(), 3);
//!
//! let index = layout.index();
//! let root = index.root().unwrap();
//! let genetics = index.children_of(root.id)[1];
//! let dna = index.children_of(genetics)[0];
//! assert!(root.descendants.contains(dna));
//! assert_eq!(index.path_of(dna).unwrap().as_slice(), &[1, 0]);
//! ```
//!
//! ## Manual positions
//!
//! Dragged nodes keep their position through rebuilds via
//! [`PositionOverrides`]; overrides for nodes that no longer exist are
//! dropped on the next [`PositionOverrides::apply`].
//!
//! ## Features
//!
//! - `std` (default): use `std` float math in `kurbo`. Disable and enable
//!   `libm` for `no_std` targets.
//! - `serde`: decode [`TreeNode`] and [`DetailMode`].
//! - `tracing`: emit `debug` events for builds and discarded overrides.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod builder;
mod detail;
mod index;
mod overrides;
mod size;
mod tree;
mod types;

pub use builder::{
    EdgeRule, Layout, LayoutBuilder, LayoutConfig, LayoutHooks, LayoutStyle, NoHooks, PinTitle,
    RadialConfig,
};
pub use detail::{DetailMode, SUMMARY_EXCERPT_CHARS};
pub use index::GeometryIndex;
pub use overrides::PositionOverrides;
pub use size::SizePolicy;
pub use tree::TreeNode;
pub use types::{Anchor, Descendants, Edge, EdgeId, NodeGeometry, NodeId, NodePath, Span};
