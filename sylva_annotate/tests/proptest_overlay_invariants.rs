// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for the annotation overlay.
//!
//! 1. Stored samples map back to the screen positions that produced them.
//! 2. Consecutive kept samples are at least `min_sample_spacing` apart on screen.
//! 3. The eraser removes exactly the strokes with a sample within its radius.

use kurbo::{Affine, Point, Vec2};
use proptest::prelude::*;
use sylva_annotate::{Overlay, OverlayConfig, OverlayResponse, Tool};

// ── Helpers ─────────────────────────────────────────────────────────────

fn view_strategy() -> impl Strategy<Value = Affine> {
    (0.2f64..4.0, -500.0f64..500.0, -500.0f64..500.0)
        .prop_map(|(zoom, tx, ty)| Affine::translate(Vec2::new(tx, ty)) * Affine::scale(zoom))
}

fn path_strategy() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((0.0f64..800.0, 0.0f64..600.0), 1..30)
        .prop_map(|pts| pts.into_iter().map(Point::from).collect())
}

fn draw(overlay: &mut Overlay, path: &[Point], view: Affine) {
    overlay.pointer_down(path[0], view);
    for p in &path[1..] {
        overlay.pointer_move(*p, view);
    }
    overlay.pointer_up(path[path.len() - 1], view);
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Drawing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn samples_round_trip_and_are_spaced(view in view_strategy(), path in path_strategy()) {
        let config = OverlayConfig::default();
        let mut overlay = Overlay::new(config);
        overlay.set_tool(Tool::Draw);
        draw(&mut overlay, &path, view);

        prop_assert_eq!(overlay.strokes().len(), 1);
        let stroke = &overlay.strokes()[0];
        prop_assert_eq!(stroke.points[0], view.inverse() * path[0]);
        for p in &stroke.points {
            let screen = view * *p;
            prop_assert!(path.iter().any(|q| (*q - screen).hypot() < 1e-6));
        }
        for pair in stroke.points.windows(2) {
            let d = ((view * pair[1]) - (view * pair[0])).hypot();
            prop_assert!(d + 1e-9 >= config.min_sample_spacing, "samples {} apart", d);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Erasing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn eraser_hits_exactly_nearby_strokes(
        view in view_strategy(),
        paths in prop::collection::vec(path_strategy(), 1..6),
        probe in (0.0f64..800.0, 0.0f64..600.0).prop_map(Point::from),
    ) {
        let mut overlay = Overlay::default();
        overlay.set_tool(Tool::Draw);
        for path in &paths {
            draw(&mut overlay, path, view);
        }
        let radius = overlay.config().eraser_radius;
        let expected = overlay
            .strokes()
            .iter()
            .filter(|s| s.points.iter().any(|p| ((view * *p) - probe).hypot2() <= radius * radius))
            .count();
        let total = overlay.strokes().len();

        overlay.set_tool(Tool::Erase);
        prop_assert_eq!(overlay.pointer_down(probe, view), OverlayResponse::Erased(expected));
        prop_assert_eq!(overlay.strokes().len(), total - expected);
        for s in overlay.strokes() {
            prop_assert!(!s.hit_screen(probe, radius, view));
        }
    }
}
