// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display detail modes and body excerpts.

use alloc::string::String;

/// Number of body characters kept by [`DetailMode::Summary`].
pub const SUMMARY_EXCERPT_CHARS: usize = 80;

/// Rendering density selected by the host.
///
/// The same tree can be rendered compactly (titles only) or richly (titles
/// plus body text) without re-deriving the tree. Detail mode feeds both the
/// [`SizePolicy`](crate::SizePolicy) and [`DetailMode::excerpt`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DetailMode {
    /// Titles only.
    #[cfg_attr(feature = "serde", serde(alias = "light"))]
    Minimal,
    /// Titles plus a truncated body.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "semi"))]
    Summary,
    /// Titles plus the whole body.
    Full,
}

impl DetailMode {
    /// All modes, from most compact to richest.
    pub const ALL: [Self; 3] = [Self::Minimal, Self::Summary, Self::Full];

    /// The body text a node shows in this mode, if any.
    ///
    /// `body` is expected to be pre-filtered by [`TreeNode::body_text`]. In
    /// [`DetailMode::Summary`] the text is cut after [`SUMMARY_EXCERPT_CHARS`]
    /// characters and an ellipsis is appended only when something was
    /// actually cut.
    ///
    /// [`TreeNode::body_text`]: crate::TreeNode::body_text
    pub fn excerpt(self, body: Option<&str>) -> Option<String> {
        let body = body?;
        match self {
            Self::Minimal => None,
            Self::Full => Some(String::from(body)),
            Self::Summary => match body.char_indices().nth(SUMMARY_EXCERPT_CHARS) {
                Some((cut, _)) => {
                    let mut out = String::with_capacity(cut + 3);
                    out.push_str(body[..cut].trim_end());
                    out.push_str("...");
                    Some(out)
                }
                None => Some(String::from(body)),
            },
        }
    }
}
