// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Box sizes by depth and detail mode.

use kurbo::Size;
use smallvec::SmallVec;

use crate::detail::DetailMode;

type SizeTable = SmallVec<[Size; 4]>;

const MINIMAL: [Size; 4] = [
    Size::new(180.0, 56.0),
    Size::new(150.0, 48.0),
    Size::new(130.0, 44.0),
    Size::new(120.0, 40.0),
];

const SUMMARY: [Size; 4] = [
    Size::new(280.0, 120.0),
    Size::new(250.0, 104.0),
    Size::new(220.0, 96.0),
    Size::new(200.0, 88.0),
];

const FULL: [Size; 4] = [
    Size::new(380.0, 220.0),
    Size::new(350.0, 200.0),
    Size::new(320.0, 180.0),
    Size::new(300.0, 170.0),
];

/// Maps `(depth, detail mode)` to a fixed box size.
///
/// Each mode owns a table indexed by depth. Lookups are total: depths past
/// [`SizePolicy::max_depth`] or past the end of a table reuse the last
/// applicable entry, so sizes never shrink towards zero on deep trees.
/// Tables are kept non-increasing in both dimensions.
///
/// ```rust
/// use sylva_layout::{DetailMode, SizePolicy};
///
/// let sizes = SizePolicy::default();
/// let root = sizes.size(0, DetailMode::Summary);
/// let deep = sizes.size(40, DetailMode::Summary);
/// assert!(deep.width <= root.width);
/// assert_eq!(deep, sizes.size(41, DetailMode::Summary));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SizePolicy {
    minimal: SizeTable,
    summary: SizeTable,
    full: SizeTable,
    max_depth: usize,
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self {
            minimal: SizeTable::from_slice(&MINIMAL),
            summary: SizeTable::from_slice(&SUMMARY),
            full: SizeTable::from_slice(&FULL),
            max_depth: 3,
        }
    }
}

impl SizePolicy {
    /// Box size for a node at `depth` rendered in `mode`.
    pub fn size(&self, depth: usize, mode: DetailMode) -> Size {
        let table = self.table(mode);
        let last = table.len().saturating_sub(1);
        table
            .get(depth.min(self.max_depth).min(last))
            .copied()
            .unwrap_or(Size::new(1.0, 1.0))
    }

    /// Depth after which sizes stay constant.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Set the depth after which sizes stay constant.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    /// The size table for `mode`, indexed by depth.
    pub fn table(&self, mode: DetailMode) -> &[Size] {
        match mode {
            DetailMode::Minimal => &self.minimal,
            DetailMode::Summary => &self.summary,
            DetailMode::Full => &self.full,
        }
    }

    /// Replace the table for `mode`.
    ///
    /// Entries are normalized so each is no larger than the one before it and
    /// no smaller than 1x1. An empty `sizes` leaves the table unchanged and
    /// returns `false`.
    pub fn set_table(&mut self, mode: DetailMode, sizes: impl IntoIterator<Item = Size>) -> bool {
        let mut table = SizeTable::new();
        for size in sizes {
            let mut w = if size.width >= 1.0 { size.width } else { 1.0 };
            let mut h = if size.height >= 1.0 { size.height } else { 1.0 };
            if let Some(prev) = table.last() {
                w = w.min(prev.width);
                h = h.min(prev.height);
            }
            table.push(Size::new(w, h));
        }
        if table.is_empty() {
            return false;
        }
        match mode {
            DetailMode::Minimal => self.minimal = table,
            DetailMode::Summary => self.summary = table,
            DetailMode::Full => self.full = table,
        }
        true
    }
}
