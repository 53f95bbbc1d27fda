// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The input tree model.

use alloc::string::String;
use alloc::vec::Vec;

/// One node of the input knowledge map.
///
/// Trees are produced by an external collaborator and are only read by the
/// layout engine. Depth is positional (the root is depth 0) and is not
/// stored on the node.
///
/// With the `serde` feature, missing fields decode to their defaults and the
/// producer's field names (`titre`, `contenu`, `enfants`) are accepted as
/// aliases.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNode {
    /// Node title. Missing titles render as an empty string.
    #[cfg_attr(feature = "serde", serde(default, alias = "titre"))]
    pub title: String,
    /// Optional body text.
    #[cfg_attr(
        feature = "serde",
        serde(default, alias = "contenu", skip_serializing_if = "Option::is_none")
    )]
    pub body: Option<String>,
    /// Ordered children.
    #[cfg_attr(
        feature = "serde",
        serde(default, alias = "enfants", skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a leaf with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
            children: Vec::new(),
        }
    }

    /// Set the body text.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Append one child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children, in order.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Body text, treating empty or whitespace-only bodies as missing.
    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.trim().is_empty())
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Self> = Vec::from([self]);
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Always `false`: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_len() {
        let tree = TreeNode::new("Biology")
            .with_child(TreeNode::new("Cells"))
            .with_child(TreeNode::new("Genetics").with_child(TreeNode::new("DNA")));
        assert_eq!(tree.len(), 4);
        assert!(!tree.is_leaf());
        assert!(tree.children[0].is_leaf());
    }

    #[test]
    fn blank_body_is_missing() {
        let node = TreeNode::new("x").with_body("   ");
        assert_eq!(node.body_text(), None);
        let node = TreeNode::new("x").with_body("text");
        assert_eq!(node.body_text(), Some("text"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn decodes_producer_field_names() {
        let json = r#"{
            "titre": "Biologie",
            "contenu": "Intro",
            "enfants": [
                { "titre": "Cellules" },
                { "title": "Genetics", "children": [ {} ] }
            ]
        }"#;
        let tree: TreeNode = serde_json::from_str(json).expect("valid tree json");
        assert_eq!(tree.title, "Biologie");
        assert_eq!(tree.body.as_deref(), Some("Intro"));
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[1].children[0].title, "");
        assert_eq!(tree.len(), 4);
    }
}
