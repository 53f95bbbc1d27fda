// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-depth color palettes.

use palette::Srgb;
use smallvec::SmallVec;

/// Built-in palettes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemeKind {
    /// Indigo shades.
    #[default]
    Indigo,
    /// Red shades.
    Red,
    /// Green shades.
    Green,
    /// Orange shades.
    Orange,
    /// Violet shades.
    Violet,
}

impl ThemeKind {
    /// Every built-in palette.
    pub const ALL: [Self; 5] = [
        Self::Indigo,
        Self::Red,
        Self::Green,
        Self::Orange,
        Self::Violet,
    ];

    fn bands(self) -> [u32; 5] {
        match self {
            Self::Indigo => [0x6366f1, 0x818cf8, 0xa5b4fc, 0xc7d2fe, 0xe0e7ff],
            Self::Red => [0xef4444, 0xf87171, 0xfca5a5, 0xfecaca, 0xfee2e2],
            Self::Green => [0x10b981, 0x34d399, 0x6ee7b7, 0xa7f3d0, 0xd1fae5],
            Self::Orange => [0xf59e0b, 0xfbbf24, 0xfcd34d, 0xfde68a, 0xfef3c7],
            Self::Violet => [0x8b5cf6, 0xa78bfa, 0xc4b5fd, 0xddd6fe, 0xede9fe],
        }
    }

    /// The palette for this kind.
    pub fn theme(self) -> Theme {
        Theme {
            bands: self.bands().into_iter().map(hex).collect(),
        }
    }
}

/// An ordered palette, one color per depth band.
///
/// Depths past the last band reuse it. The first band doubles as the accent
/// used for node borders.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    bands: SmallVec<[Srgb<u8>; 5]>,
}

impl Default for Theme {
    fn default() -> Self {
        ThemeKind::default().theme()
    }
}

impl Theme {
    /// A custom palette. `None` if `bands` is empty.
    pub fn new(bands: impl IntoIterator<Item = Srgb<u8>>) -> Option<Self> {
        let bands: SmallVec<[Srgb<u8>; 5]> = bands.into_iter().collect();
        (!bands.is_empty()).then_some(Self { bands })
    }

    /// The bands, shallowest first.
    pub fn bands(&self) -> &[Srgb<u8>] {
        &self.bands
    }

    /// Fill color for a node at `depth`.
    pub fn fill(&self, depth: usize) -> Srgb<u8> {
        let last = self.bands.len().saturating_sub(1);
        self.bands
            .get(depth.min(last))
            .copied()
            .unwrap_or(Srgb::new(0, 0, 0))
    }

    /// Connector color for an edge leaving a node at `source_depth`.
    pub fn edge(&self, source_depth: usize) -> Srgb<u8> {
        self.fill(source_depth)
    }

    /// Border color shared by every node.
    pub fn accent(&self) -> Srgb<u8> {
        self.fill(0)
    }

    /// Text color that reads on [`Theme::fill`] at `depth`.
    pub fn text(&self, depth: usize) -> Srgb<u8> {
        if depth == 0 {
            Srgb::new(0xff, 0xff, 0xff)
        } else {
            hex(0x1f2937)
        }
    }
}

fn hex(rgb: u32) -> Srgb<u8> {
    let [_, r, g, b] = rgb.to_be_bytes();
    Srgb::new(r, g, b)
}
