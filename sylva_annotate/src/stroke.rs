// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strokes and their styles.

use alloc::vec::Vec;

use kurbo::{Affine, BezPath, Point, Rect};
use palette::Srgba;

/// Identifier of a stroke, unique within one [`Overlay`](crate::Overlay).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StrokeId(pub u32);

/// Pen behavior.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum StrokeKind {
    /// Opaque ink.
    #[default]
    Pen,
    /// Wide translucent ink, meant to be painted under text.
    Highlighter,
}

/// Ink used for new strokes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Ink color, alpha included.
    pub color: Srgba<u8>,
    /// Line width in model units.
    pub width: f64,
    /// Pen behavior.
    pub kind: StrokeKind,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::pen(Srgba::new(0x63, 0x66, 0xf1, 0xff))
    }
}

impl StrokeStyle {
    /// A 3-unit opaque pen.
    pub fn pen(color: Srgba<u8>) -> Self {
        Self {
            color,
            width: 3.0,
            kind: StrokeKind::Pen,
        }
    }

    /// A 16-unit highlighter at roughly 40% alpha.
    pub fn highlighter(color: Srgba<u8>) -> Self {
        Self {
            color: Srgba::new(color.red, color.green, color.blue, 0x66),
            width: 16.0,
            kind: StrokeKind::Highlighter,
        }
    }
}

/// A free-hand polyline in model space.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Identifier.
    pub id: StrokeId,
    /// Samples in model space, in drawing order. Never empty.
    pub points: Vec<Point>,
    /// Ink.
    pub style: StrokeStyle,
}

impl Stroke {
    /// Polyline through the samples. A single sample yields a zero-length
    /// segment so round caps still paint a dot.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.points.iter().copied();
        if let Some(first) = points.next() {
            path.move_to(first);
            let mut any = false;
            for p in points {
                path.line_to(p);
                any = true;
            }
            if !any {
                path.line_to(first);
            }
        }
        path
    }

    /// Bounds of the samples grown by half the line width.
    pub fn bounds(&self) -> Rect {
        let mut points = self.points.iter().copied();
        let Some(first) = points.next() else {
            return Rect::ZERO;
        };
        let hull = points.fold(Rect::from_points(first, first), |r, p| r.union_pt(p));
        hull.inflate(self.style.width * 0.5, self.style.width * 0.5)
    }

    /// Whether any sample lies within `radius` of `screen_point`, measured in
    /// screen space after applying `view`.
    pub fn hit_screen(&self, screen_point: Point, radius: f64, view: Affine) -> bool {
        let r2 = radius * radius;
        self.points
            .iter()
            .any(|p| ((view * *p) - screen_point).hypot2() <= r2)
    }
}
