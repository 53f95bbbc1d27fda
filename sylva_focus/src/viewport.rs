// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The viewport seam: commands out, view transform in.

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// A camera request issued by the focus controller.
///
/// Commands are fire-and-forget: the controller never waits for an animation
/// to finish and a later command simply supersedes an earlier one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ViewportCommand {
    /// Show `rect` as large as possible without exceeding `max_zoom`.
    Frame {
        /// Model-space rectangle to frame, padding included.
        rect: Rect,
        /// Upper bound on the resulting zoom.
        max_zoom: f64,
        /// Suggested animation length.
        duration_ms: u32,
    },
    /// Show the whole diagram.
    FitAll {
        /// Model-space bounds of every node, padding included.
        rect: Rect,
        /// Suggested animation length.
        duration_ms: u32,
    },
}

impl ViewportCommand {
    /// The model-space rectangle the command targets.
    pub fn rect(&self) -> Rect {
        match *self {
            Self::Frame { rect, .. } | Self::FitAll { rect, .. } => rect,
        }
    }
}

/// External pan/zoom camera.
///
/// The focus controller only issues [`ViewportCommand`]s and reads back the
/// zoom for its fade computation. Annotation input reads
/// [`Viewport::view_transform`] to map screen positions into model space.
pub trait Viewport {
    /// Model-to-screen transform.
    fn view_transform(&self) -> Affine;

    /// Current zoom factor (screen pixels per model unit).
    fn zoom(&self) -> f64;

    /// Carry out `command`, immediately or animated.
    fn apply(&mut self, command: ViewportCommand);

    /// Map a screen position into model space.
    fn screen_to_model(&self, point: Point) -> Point {
        self.view_transform().inverse() * point
    }
}

/// A headless reference [`Viewport`] that jumps straight to each target.
///
/// Zoom is clamped to `[min_zoom, max_zoom]`, matching the bounds a canvas
/// widget would impose.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    screen: Size,
    zoom: f64,
    pan: Vec2,
    min_zoom: f64,
    max_zoom: f64,
    last: Option<ViewportCommand>,
}

impl Camera {
    /// Default lower zoom bound.
    pub const MIN_ZOOM: f64 = 0.2;
    /// Default upper zoom bound.
    pub const MAX_ZOOM: f64 = 2.0;

    /// An identity camera over a `screen`-sized surface.
    pub fn new(screen: Size) -> Self {
        Self {
            screen,
            zoom: 1.0,
            pan: Vec2::ZERO,
            min_zoom: Self::MIN_ZOOM,
            max_zoom: Self::MAX_ZOOM,
            last: None,
        }
    }

    /// Set the zoom bounds. `min` is raised to a small positive value and
    /// `max` to at least `min`.
    #[must_use]
    pub fn with_zoom_range(mut self, min: f64, max: f64) -> Self {
        self.min_zoom = min.max(1e-3);
        self.max_zoom = max.max(self.min_zoom);
        self.zoom = self.zoom.clamp(self.min_zoom, self.max_zoom);
        self
    }

    /// Size of the screen surface.
    pub fn screen(&self) -> Size {
        self.screen
    }

    /// Resize the screen surface. The current transform is kept.
    pub fn set_screen(&mut self, screen: Size) {
        self.screen = screen;
    }

    /// Screen-space translation applied after zooming.
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Set zoom and pan directly, as a user scroll or pinch would.
    pub fn set_view(&mut self, zoom: f64, pan: Vec2) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.pan = pan;
    }

    /// The most recent command applied.
    pub fn last_command(&self) -> Option<ViewportCommand> {
        self.last
    }

    /// The model-space rectangle currently on screen.
    pub fn visible_rect(&self) -> Rect {
        let inv = self.view_transform().inverse();
        inv.transform_rect_bbox(self.screen.to_rect())
    }

    fn fit(&mut self, rect: Rect, max_zoom: f64) {
        let upper = max_zoom.min(self.max_zoom);
        let zoom = if rect.width() > 0.0 && rect.height() > 0.0 {
            (self.screen.width / rect.width()).min(self.screen.height / rect.height())
        } else {
            upper
        };
        self.zoom = zoom.min(upper).max(self.min_zoom);
        let screen_center = self.screen.to_rect().center();
        self.pan = screen_center.to_vec2() - rect.center().to_vec2() * self.zoom;
    }
}

impl Viewport for Camera {
    fn view_transform(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.zoom)
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn apply(&mut self, command: ViewportCommand) {
        match command {
            ViewportCommand::Frame { rect, max_zoom, .. } => self.fit(rect, max_zoom),
            ViewportCommand::FitAll { rect, .. } => self.fit(rect, self.max_zoom),
        }
        self.last = Some(command);
    }
}
