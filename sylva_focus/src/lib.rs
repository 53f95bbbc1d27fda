// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sylva Focus: zoom-into-a-subtree navigation for knowledge-map diagrams.
//!
//! This crate layers interaction state on top of a [`sylva_layout`] geometry index:
//! - A **focus state machine** ([`FocusController`]) with two states,
//!   `Unfocused` and `Focused(id)`. Clicking a node frames it and its
//!   descendants; clicking it again returns to the overview.
//! - **Sibling navigation** ([`SiblingNavigator`]) in visual left-to-right
//!   order, without wrapping.
//! - **Derived styles** ([`node_style`]): the focused subtree is opaque, the
//!   direct parent is faded by zoom, everything else is transparent but kept.
//! - A **viewport seam** ([`Viewport`], [`ViewportCommand`]) through which the
//!   controller commands an external camera. [`Camera`] is a headless
//!   reference implementation.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Size;
//! use sylva_focus::{Camera, FocusController, Navigation, NodeRole, Viewport};
//! use sylva_layout::{DetailMode, LayoutBuilder, NodeId, TreeNode};
//!
//! let tree = TreeNode::new("Biology")
//!     .with_child(TreeNode::new("Cells"))
//!     .with_child(TreeNode::new("Genetics").with_child(TreeNode::new("DNA")));
//! let layout = LayoutBuilder::default().build(&tree, DetailMode::Summary);
//! let index = layout.index();
//!
//! let mut camera = Camera::new(Size::new(1280.0, 720.0));
//! let mut focus = FocusController::default();
//! let (biology, cells, genetics) = (NodeId::new(0), NodeId::new(1), NodeId::new(2));
//!
//! focus.click(index, cells, &mut camera).unwrap();
//! focus.navigate(index, Navigation::Next, &mut camera);
//! assert_eq!(focus.focused(), Some(genetics));
//!
//! let parent = focus.style(index, biology, camera.zoom()).unwrap();
//! assert_eq!(parent.role, NodeRole::Context);
//! assert!(parent.opacity > 0.0);
//! ```
//!
//! Focus requests for ids outside the index are rejected with
//! [`FocusError::UnknownNode`] and leave the state untouched.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod siblings;
mod style;
mod viewport;

pub use controller::{FocusConfig, FocusController, FocusError, FocusState, FocusTransition};
pub use siblings::{Navigation, SiblingNavigator};
pub use style::{MIN_CONTEXT_OPACITY, NodeRole, NodeStyle, ParentFade, node_style};
pub use viewport::{Camera, Viewport, ViewportCommand};
