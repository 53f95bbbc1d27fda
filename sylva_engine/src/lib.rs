// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sylva Engine: one explicit state object for an interactive knowledge map.
//!
//! [`Engine`] ties the pieces together:
//! - [`sylva_layout`] builds geometry from the tree for the active
//!   [`DetailMode`](sylva_layout::DetailMode), and re-applies manual node
//!   positions after every rebuild.
//! - [`sylva_focus`] tracks the focused subtree, commands the external
//!   [`Viewport`](sylva_focus::Viewport), and derives per-node styles.
//! - [`sylva_annotate`] holds free-hand strokes drawn over the diagram.
//! - [`Theme`] colors nodes and connectors by depth.
//!
//! Pointer events are routed by the active [`Tool`](sylva_annotate::Tool):
//! with the pointer tool, presses on nodes are arbitrated by
//! [`gesture::GestureState`] into clicks (focus) or drags (manual
//! positions); with the draw and erase tools, the overlay takes them.
//!
//! Everything is synchronous and single-threaded. Rebuilds are idempotent and
//! theme changes never rebuild.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod engine;
pub mod gesture;
mod theme;

pub use engine::{Engine, EngineConfig, PointerOutcome};
pub use theme::{Theme, ThemeKind};
