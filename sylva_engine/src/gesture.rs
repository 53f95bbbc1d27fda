// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click versus drag arbitration for presses on nodes.
//!
//! A press on a target stays a click candidate until the pointer travels more
//! than the drag threshold from where it went down. Past that point the press
//! is a drag for the rest of its life: it reports movement on every move and
//! its release never produces a click.
//!
//! ```
//! use kurbo::Point;
//! use sylva_engine::gesture::{GestureState, PressEnd, PressMove};
//!
//! let mut state: GestureState<u32> = GestureState::new(4.0);
//! state.on_down(7, Point::new(10.0, 10.0));
//! assert_eq!(state.on_move(Point::new(12.0, 11.0)), PressMove::Pending);
//! assert_eq!(state.on_up(Point::new(12.0, 11.0)), PressEnd::Click(7));
//!
//! state.on_down(7, Point::new(10.0, 10.0));
//! assert_eq!(state.on_move(Point::new(30.0, 10.0)), PressMove::DragStarted(7));
//! assert_eq!(state.on_up(Point::new(31.0, 10.0)), PressEnd::DragEnded(7));
//! ```

use kurbo::{Point, Vec2};

/// An active press.
#[derive(Clone, Debug, PartialEq)]
pub struct Press<K> {
    /// What was pressed.
    pub target: K,
    /// Screen position at press time.
    pub down_position: Point,
    /// Latest screen position.
    pub position: Point,
    /// Whether the drag threshold has been exceeded.
    pub dragging: bool,
}

impl<K> Press<K> {
    /// Screen-space travel since the press.
    pub fn travel(&self) -> Vec2 {
        self.position - self.down_position
    }
}

/// Result of a pointer move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PressMove<K> {
    /// No press is active.
    Idle,
    /// Still within the threshold; may yet become a click.
    Pending,
    /// This move crossed the threshold.
    DragStarted(K),
    /// An ongoing drag moved.
    Dragging(K),
}

/// Result of a pointer release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PressEnd<K> {
    /// Released within the threshold: a click on the pressed target.
    Click(K),
    /// A drag finished on the pressed target.
    DragEnded(K),
    /// No press was active.
    Suppressed,
}

/// Single-pointer press tracker.
#[derive(Clone, Debug)]
pub struct GestureState<K> {
    press: Option<Press<K>>,
    /// Screen pixels of travel after which a press becomes a drag.
    pub drag_threshold: f64,
}

impl<K: Clone> Default for GestureState<K> {
    fn default() -> Self {
        Self::new(4.0)
    }
}

impl<K: Clone> GestureState<K> {
    /// A tracker with the given threshold.
    pub fn new(drag_threshold: f64) -> Self {
        Self {
            press: None,
            drag_threshold,
        }
    }

    /// Start a press on `target`, replacing any press in progress.
    pub fn on_down(&mut self, target: K, position: Point) {
        self.press = Some(Press {
            target,
            down_position: position,
            position,
            dragging: false,
        });
    }

    /// Track pointer movement.
    pub fn on_move(&mut self, position: Point) -> PressMove<K> {
        let threshold = self.drag_threshold;
        let Some(press) = self.press.as_mut() else {
            return PressMove::Idle;
        };
        press.position = position;
        if press.dragging {
            return PressMove::Dragging(press.target.clone());
        }
        if press.travel().hypot2() > threshold * threshold {
            press.dragging = true;
            PressMove::DragStarted(press.target.clone())
        } else {
            PressMove::Pending
        }
    }

    /// Finish the press.
    pub fn on_up(&mut self, position: Point) -> PressEnd<K> {
        if matches!(self.on_move(position), PressMove::Idle) {
            return PressEnd::Suppressed;
        }
        match self.press.take() {
            Some(press) if press.dragging => PressEnd::DragEnded(press.target),
            Some(press) => PressEnd::Click(press.target),
            None => PressEnd::Suppressed,
        }
    }

    /// Abandon the press without a result.
    pub fn cancel(&mut self) {
        self.press = None;
    }

    /// The active press, if any.
    pub fn press(&self) -> Option<&Press<K>> {
        self.press.as_ref()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.press.as_ref().is_some_and(|p| p.dragging)
    }
}
