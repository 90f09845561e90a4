//! Nestsearch umbrella crate.
//!
//! ## Crate layout
//! - `schema`: field-definition tree, sub-schema registry, languages, and
//!   schema validation.
//! - `core`: document paths, mapping and query-fragment trees, the filter
//!   model, adapter dispatch, and the field adapters.
//!
//! The `prelude` module mirrors the surface a search endpoint uses.

pub use nestsearch_core as core;
pub use nestsearch_schema as schema;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        accessor::{InheritanceMode, ObjectAccessor},
        adapter::FieldAdapter,
        dispatch::DispatchService,
        error::AdapterError,
        filter::{
            FilterOperand, FilterOperator, FilterSpec, LocalizedFilter, QueryFilter,
            TypedItemFilter,
        },
        mapping::MappingNode,
        path::DocumentPath,
        query::{CombineOp, QueryFragment},
        selection::FieldSelection,
    };
    pub use crate::schema::{
        language::{Language, LanguageRegistry, StaticLanguages},
        node::{ContainerKind, FieldDefinition, FieldKind, FieldList, SubSchema},
        registry::{MemoryRegistry, SchemaRegistry},
        validate::validate_fields,
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use serde_json::json;

    // the facade exposes enough surface to run the whole pipeline
    #[test]
    fn prelude_builds_a_mapping_end_to_end() {
        let mut registry = MemoryRegistry::new();
        registry.register(
            ContainerKind::Collection,
            SubSchema::new("photo", vec![FieldDefinition::leaf("caption", "Caption", "text")]),
        );

        let service = DispatchService::new(
            Box::new(registry),
            Box::new(StaticLanguages::new(["en"])),
        );
        let field = FieldDefinition::collection("images", "Images", vec!["photo".into()]);

        let (name, node) = service
            .resolve_adapter(&field, false)
            .expect("adapter should resolve")
            .build_mapping()
            .expect("mapping should build");

        assert_eq!(name, "images");
        assert_eq!(
            node.to_json()["properties"]["photo"]["properties"]["caption"],
            json!({"type": "keyword"})
        );
    }

    #[test]
    fn version_is_exported() {
        assert!(!crate::VERSION.is_empty());
    }
}
