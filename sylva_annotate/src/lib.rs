// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sylva Annotate: a free-hand annotation layer for pan/zoom canvases.
//!
//! The [`Overlay`] turns screen-space pointer events into [`Stroke`]s stored in
//! model space, so ink stays attached to the diagram while the camera moves.
//! Three [`Tool`]s select its behavior:
//!
//! - [`Tool::Pointer`]: the overlay is painted but inert ([`OverlayFlags::VISIBLE`]).
//! - [`Tool::Draw`]: press starts a stroke, moves append samples, release commits.
//! - [`Tool::Erase`]: every sample under the eraser removes whole strokes.
//!
//! Strokes expose [`Stroke::to_path`] and [`Stroke::bounds`] for renderers.
//! The overlay never touches the diagram; it only needs the current
//! model-to-screen [`kurbo::Affine`] with each event.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod overlay;
mod stroke;

pub use overlay::{Overlay, OverlayConfig, OverlayFlags, OverlayResponse, Tool};
pub use stroke::{Stroke, StrokeId, StrokeKind, StrokeStyle};
