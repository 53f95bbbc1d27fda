// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The annotation layer and its pointer handling.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Affine, Point};

use crate::stroke::{Stroke, StrokeId, StrokeStyle};

/// Active canvas tool.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tool {
    /// Pointer input goes to the diagram; the overlay is inert.
    #[default]
    Pointer,
    /// Pointer input draws strokes.
    Draw,
    /// Pointer input erases whole strokes.
    Erase,
}

bitflags::bitflags! {
    /// How the host should treat the overlay layer.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct OverlayFlags: u8 {
        /// Strokes are painted.
        const VISIBLE     = 0b0000_0001;
        /// The layer receives pointer input before the diagram.
        const PICKABLE    = 0b0000_0010;
        /// The layer is painted above node boxes.
        const ABOVE_NODES = 0b0000_0100;
    }
}

impl OverlayFlags {
    /// Flags for `tool`.
    pub fn for_tool(tool: Tool) -> Self {
        match tool {
            Tool::Pointer => Self::VISIBLE,
            Tool::Draw | Tool::Erase => Self::VISIBLE | Self::PICKABLE | Self::ABOVE_NODES,
        }
    }
}

/// Overlay tuning.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    /// Eraser reach in screen pixels.
    pub eraser_radius: f64,
    /// Draw samples closer than this many screen pixels to the previous
    /// sample are dropped.
    pub min_sample_spacing: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            eraser_radius: 12.0,
            min_sample_spacing: 2.0,
        }
    }
}

/// What a pointer event did to the overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OverlayResponse {
    /// The overlay did not consume the event.
    Ignored,
    /// A new stroke was started.
    Started(StrokeId),
    /// The stroke in progress changed (or the sample was too close to keep).
    Extended,
    /// The stroke in progress was finished.
    Committed(StrokeId),
    /// This many strokes were removed by the eraser (possibly zero).
    Erased(usize),
}

/// Free-hand strokes drawn over the diagram, stored in model space.
///
/// Pointer positions arrive in screen space together with the current
/// model-to-screen transform; they are stored through its inverse so strokes
/// stay attached to the diagram as the viewport pans and zooms. Strokes have
/// no link to the tree and survive every rebuild.
///
/// ```rust
/// use kurbo::{Affine, Point};
/// use sylva_annotate::{Overlay, OverlayResponse, Tool};
///
/// let mut overlay = Overlay::default();
/// let view = Affine::scale(2.0);
/// overlay.set_tool(Tool::Draw);
/// overlay.pointer_down(Point::new(10.0, 10.0), view);
/// overlay.pointer_move(Point::new(40.0, 10.0), view);
/// assert!(matches!(overlay.pointer_up(Point::new(40.0, 10.0), view), OverlayResponse::Committed(_)));
/// assert_eq!(overlay.strokes()[0].points, [Point::new(5.0, 5.0), Point::new(20.0, 5.0)]);
///
/// overlay.set_tool(Tool::Erase);
/// assert_eq!(overlay.pointer_down(Point::new(12.0, 12.0), view), OverlayResponse::Erased(1));
/// assert!(overlay.strokes().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlay {
    tool: Tool,
    style: StrokeStyle,
    config: OverlayConfig,
    strokes: Vec<Stroke>,
    active: Option<Stroke>,
    pressed: bool,
    next_id: u32,
}

impl Overlay {
    /// An empty overlay with the pointer tool selected.
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Active tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools, committing any stroke in progress.
    ///
    /// Returns the committed stroke's id, if there was one.
    pub fn set_tool(&mut self, tool: Tool) -> Option<StrokeId> {
        let committed = self.commit();
        self.tool = tool;
        self.pressed = false;
        committed
    }

    /// Layer flags for the active tool.
    pub fn flags(&self) -> OverlayFlags {
        OverlayFlags::for_tool(self.tool)
    }

    /// Whether the overlay currently intercepts pointer input.
    pub fn is_active(&self) -> bool {
        self.flags().contains(OverlayFlags::PICKABLE)
    }

    /// Ink for new strokes.
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Change the ink for new strokes. Existing strokes keep theirs.
    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    /// Tuning.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Committed strokes, oldest first.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// The stroke being drawn, if any.
    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }

    /// Press at `screen`. Starts a stroke when drawing, erases when erasing.
    pub fn pointer_down(&mut self, screen: Point, view: Affine) -> OverlayResponse {
        match self.tool {
            Tool::Pointer => OverlayResponse::Ignored,
            Tool::Draw => {
                let Some(model) = to_model(view, screen) else {
                    return OverlayResponse::Ignored;
                };
                self.commit();
                let id = StrokeId(self.next_id);
                self.next_id = self.next_id.wrapping_add(1);
                self.active = Some(Stroke {
                    id,
                    points: vec![model],
                    style: self.style,
                });
                self.pressed = true;
                OverlayResponse::Started(id)
            }
            Tool::Erase => {
                self.pressed = true;
                OverlayResponse::Erased(self.erase_at(screen, view))
            }
        }
    }

    /// Move to `screen`. Extends the active stroke, or erases while the
    /// eraser is pressed.
    pub fn pointer_move(&mut self, screen: Point, view: Affine) -> OverlayResponse {
        if !self.pressed {
            return OverlayResponse::Ignored;
        }
        match self.tool {
            Tool::Pointer => OverlayResponse::Ignored,
            Tool::Draw => {
                let spacing = self.config.min_sample_spacing;
                let Some(stroke) = self.active.as_mut() else {
                    return OverlayResponse::Ignored;
                };
                let Some(model) = to_model(view, screen) else {
                    return OverlayResponse::Ignored;
                };
                let too_close = stroke
                    .points
                    .last()
                    .is_some_and(|last| ((view * *last) - screen).hypot2() < spacing * spacing);
                if !too_close {
                    stroke.points.push(model);
                }
                OverlayResponse::Extended
            }
            Tool::Erase => OverlayResponse::Erased(self.erase_at(screen, view)),
        }
    }

    /// Release at `screen`. Commits the active stroke.
    pub fn pointer_up(&mut self, screen: Point, view: Affine) -> OverlayResponse {
        if !self.pressed {
            return OverlayResponse::Ignored;
        }
        let response = match self.tool {
            Tool::Pointer => OverlayResponse::Ignored,
            Tool::Draw => {
                self.pointer_move(screen, view);
                match self.commit() {
                    Some(id) => OverlayResponse::Committed(id),
                    None => OverlayResponse::Ignored,
                }
            }
            Tool::Erase => OverlayResponse::Erased(0),
        };
        self.pressed = false;
        response
    }

    /// Finish the stroke in progress, if any.
    pub fn commit(&mut self) -> Option<StrokeId> {
        let stroke = self.active.take()?;
        let id = stroke.id;

        #[cfg(feature = "tracing")]
        tracing::debug!(stroke = id.0, points = stroke.points.len(), "stroke committed");

        self.strokes.push(stroke);
        Some(id)
    }

    /// Remove every committed stroke with a sample within the eraser radius
    /// of `screen`. Returns how many were removed.
    pub fn erase_at(&mut self, screen: Point, view: Affine) -> usize {
        let radius = self.config.eraser_radius;
        let before = self.strokes.len();
        self.strokes
            .retain(|s| !s.hit_screen(screen, radius, view));
        let erased = before - self.strokes.len();

        #[cfg(feature = "tracing")]
        if erased > 0 {
            tracing::debug!(erased, "strokes erased");
        }

        erased
    }

    /// Remove a stroke by id.
    pub fn remove(&mut self, id: StrokeId) -> Option<Stroke> {
        let pos = self.strokes.iter().position(|s| s.id == id)?;
        Some(self.strokes.remove(pos))
    }

    /// Remove the most recent committed stroke.
    pub fn undo(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    /// Remove every stroke, including one in progress. Returns how many
    /// committed strokes were removed.
    pub fn clear(&mut self) -> usize {
        let n = self.strokes.len();
        self.strokes.clear();
        self.active = None;
        self.pressed = false;

        #[cfg(feature = "tracing")]
        tracing::debug!(cleared = n, "overlay cleared");

        n
    }
}

/// Screen to model through the inverse of `view`; `None` if `view` cannot be
/// inverted.
fn to_model(view: Affine, screen: Point) -> Option<Point> {
    let det = view.determinant();
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    let model = view.inverse() * screen;
    (model.x.is_finite() && model.y.is_finite()).then_some(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    fn view() -> Affine {
        Affine::translate(Vec2::new(100.0, 50.0)) * Affine::scale(0.5)
    }

    fn draw(overlay: &mut Overlay, pts: &[(f64, f64)]) -> StrokeId {
        let v = view();
        let (first, rest) = pts.split_first().expect("non-empty");
        overlay.pointer_down(Point::new(first.0, first.1), v);
        for p in rest {
            overlay.pointer_move(Point::new(p.0, p.1), v);
        }
        let last = pts[pts.len() - 1];
        match overlay.pointer_up(Point::new(last.0, last.1), v) {
            OverlayResponse::Committed(id) => id,
            other => panic!("expected commit, got {other:?}"),
        }
    }

    #[test]
    fn pointer_tool_is_inert() {
        let mut overlay = Overlay::default();
        assert_eq!(overlay.flags(), OverlayFlags::VISIBLE);
        assert!(!overlay.is_active());
        assert_eq!(
            overlay.pointer_down(Point::ZERO, view()),
            OverlayResponse::Ignored
        );
        assert!(overlay.strokes().is_empty());
    }

    #[test]
    fn draw_flags_and_model_space_points() {
        let mut overlay = Overlay::default();
        overlay.set_tool(Tool::Draw);
        assert!(overlay.flags().contains(OverlayFlags::ABOVE_NODES | OverlayFlags::PICKABLE));
        draw(&mut overlay, &[(100.0, 50.0), (110.0, 50.0)]);
        assert_eq!(
            overlay.strokes()[0].points,
            [Point::new(0.0, 0.0), Point::new(20.0, 0.0)]
        );
    }

    #[test]
    fn close_samples_are_skipped() {
        let mut overlay = Overlay::default();
        overlay.set_tool(Tool::Draw);
        draw(
            &mut overlay,
            &[(0.0, 0.0), (0.5, 0.0), (1.0, 0.0), (5.0, 0.0), (5.5, 0.5)],
        );
        assert_eq!(overlay.strokes()[0].points.len(), 2);
    }

    #[test]
    fn new_stroke_or_tool_switch_commits() {
        let mut overlay = Overlay::default();
        overlay.set_tool(Tool::Draw);
        let v = view();
        overlay.pointer_down(Point::new(0.0, 0.0), v);
        // A second press without a release starts a fresh stroke.
        overlay.pointer_down(Point::new(50.0, 0.0), v);
        assert_eq!(overlay.strokes().len(), 1);
        assert!(overlay.active_stroke().is_some());
        assert!(overlay.set_tool(Tool::Pointer).is_some());
        assert_eq!(overlay.strokes().len(), 2);
        assert!(overlay.active_stroke().is_none());
    }

    #[test]
    fn eraser_removes_whole_strokes_within_radius() {
        let mut overlay = Overlay::default();
        overlay.set_tool(Tool::Draw);
        let near = draw(&mut overlay, &[(0.0, 0.0), (200.0, 0.0)]);
        let far = draw(&mut overlay, &[(0.0, 300.0), (200.0, 300.0)]);

        overlay.set_tool(Tool::Erase);
        let v = view();
        assert_eq!(
            overlay.pointer_down(Point::new(205.0, 5.0), v),
            OverlayResponse::Erased(1)
        );
        assert!(overlay.strokes().iter().all(|s| s.id != near));
        // Dragging the eraser keeps erasing.
        assert_eq!(
            overlay.pointer_move(Point::new(0.0, 290.0), v),
            OverlayResponse::Erased(1)
        );
        assert!(overlay.strokes().iter().all(|s| s.id != far));
        overlay.pointer_up(Point::ZERO, v);
        assert_eq!(
            overlay.pointer_move(Point::ZERO, v),
            OverlayResponse::Ignored
        );
    }

    #[test]
    fn clear_and_undo() {
        let mut overlay = Overlay::default();
        overlay.set_tool(Tool::Draw);
        let a = draw(&mut overlay, &[(0.0, 0.0)]);
        let b = draw(&mut overlay, &[(10.0, 10.0)]);
        assert_ne!(a, b);
        assert_eq!(overlay.undo().map(|s| s.id), Some(b));
        overlay.pointer_down(Point::new(1.0, 1.0), view());
        assert_eq!(overlay.clear(), 1);
        assert!(overlay.strokes().is_empty());
        assert!(overlay.active_stroke().is_none());
        assert_eq!(overlay.undo(), None);
    }

    #[test]
    fn remove_by_id() {
        let mut overlay = Overlay::default();
        overlay.set_tool(Tool::Draw);
        let a = draw(&mut overlay, &[(0.0, 0.0)]);
        assert_eq!(overlay.remove(a).map(|s| s.id), Some(a));
        assert_eq!(overlay.remove(a), None);
    }

    #[test]
    fn singular_view_is_ignored() {
        let mut overlay = Overlay::default();
        overlay.set_tool(Tool::Draw);
        assert_eq!(
            overlay.pointer_down(Point::ZERO, Affine::scale(0.0)),
            OverlayResponse::Ignored
        );
    }
}
