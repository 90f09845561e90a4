//! Mapping trees.
//!
//! A mapping node is either a leaf type descriptor or a `nested` node with
//! named child properties, mirroring the document store's nesting
//! semantics. Built once per schema and cacheable; `to_json` renders the
//! exact JSON the document-store client submits at index creation.

use crate::path::DocumentPath;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

///
/// MappingNode
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MappingNode {
    /// Leaf type descriptor, at minimum `{"type": "<store type>"}`.
    /// Leaf adapters may carry extra store-specific settings.
    Leaf { properties: Map<String, Value> },

    /// `{"type": "nested", "properties": {...}}`
    Nested {
        properties: BTreeMap<String, MappingNode>,
    },
}

impl MappingNode {
    /// Plain leaf descriptor for a document-store type name.
    #[must_use]
    pub fn store_type(store_type: &str) -> Self {
        let mut properties = Map::new();
        properties.insert("type".to_string(), Value::String(store_type.to_string()));

        Self::Leaf { properties }
    }

    #[must_use]
    pub const fn nested(properties: BTreeMap<String, Self>) -> Self {
        Self::Nested { properties }
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Leaf { properties } => Value::Object(properties.clone()),

            Self::Nested { properties } => {
                let children: Map<String, Value> = properties
                    .iter()
                    .map(|(name, node)| (name.clone(), node.to_json()))
                    .collect();

                json!({
                    "type": "nested",
                    "properties": children,
                })
            }
        }
    }

    /// Every leaf path reachable from this node, rooted at `base`.
    /// Used by callers (and tests) to check the mapping/query path
    /// correspondence.
    #[must_use]
    pub fn leaf_paths(&self, base: &DocumentPath) -> Vec<DocumentPath> {
        let mut out = Vec::new();
        self.collect_leaf_paths(base, &mut out);

        out
    }

    fn collect_leaf_paths(&self, base: &DocumentPath, out: &mut Vec<DocumentPath>) {
        match self {
            Self::Leaf { .. } => out.push(base.clone()),

            Self::Nested { properties } => {
                for (name, node) in properties {
                    node.collect_leaf_paths(&base.join(name), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_renders_its_properties() {
        let node = MappingNode::store_type("keyword");

        assert_eq!(node.to_json(), json!({"type": "keyword"}));
    }

    #[test]
    fn nested_renders_type_and_properties() {
        let mut children = BTreeMap::new();
        children.insert("caption".to_string(), MappingNode::store_type("keyword"));
        let node = MappingNode::nested(children);

        assert_eq!(
            node.to_json(),
            json!({
                "type": "nested",
                "properties": {"caption": {"type": "keyword"}},
            })
        );
    }

    #[test]
    fn leaf_paths_walk_the_tree() {
        let mut photo = BTreeMap::new();
        photo.insert("caption".to_string(), MappingNode::store_type("keyword"));
        let mut properties = BTreeMap::new();
        properties.insert("photo".to_string(), MappingNode::nested(photo));
        let node = MappingNode::nested(properties);

        let paths = node.leaf_paths(&DocumentPath::root().join("images"));
        let dotted: Vec<String> = paths.iter().map(DocumentPath::dotted).collect();

        assert_eq!(dotted, vec!["images.photo.caption"]);
    }
}
