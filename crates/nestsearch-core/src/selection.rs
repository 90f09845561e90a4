//! Selectable-field descriptors for the search-building UI.

use serde::Serialize;
use serde_json::{Map, Value};

///
/// FieldSelection
///
/// Flat description of one selectable field: display data plus a
/// type-specific context blob (allowed types, languages, sub type, ...).
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldSelection {
    pub name: String,
    pub title: String,
    pub field_type: String,
    pub context: Map<String, Value>,
}

impl FieldSelection {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        field_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            field_type: field_type.into(),
            context: Map::new(),
        }
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_context() {
        let selection = FieldSelection::new("images", "Images", "collection")
            .with_context("allowedTypes", json!([["photo"], ["scan"]]));

        let value = serde_json::to_value(&selection).expect("selection should serialize");
        assert_eq!(value["field_type"], "collection");
        assert_eq!(value["context"]["allowedTypes"][1][0], "scan");
    }
}
