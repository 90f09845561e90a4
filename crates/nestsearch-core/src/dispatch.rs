//! Adapter dispatch.
//!
//! Maps a field definition to the adapter implementing the core contract
//! and threads itself into every adapter so composites can recursively
//! dispatch on children. Resolution is deterministic and side-effect-free;
//! the service is injected, never looked up through ambient state.

use crate::{
    adapter::{BrickAdapter, CollectionAdapter, FieldAdapter, LocalizedAdapter, scalar},
    error::AdapterError,
    filter::{FilterEntry, FilterError, FilterOperand, FilterSpec},
};
use nestsearch_schema::{
    language::{Language, LanguageRegistry},
    node::{FieldDefinition, FieldKind},
    registry::SchemaRegistry,
};
use std::collections::BTreeMap;

///
/// AdapterFactory
///
/// Constructor for leaf adapters, registered per leaf type tag. Keeps the
/// leaf type set open: new tags plug in without touching the core.
///

pub trait AdapterFactory: Send + Sync {
    fn create<'s>(
        &self,
        field: &'s FieldDefinition,
        service: &'s DispatchService,
        consider_inheritance: bool,
    ) -> Box<dyn FieldAdapter + 's>;
}

///
/// DispatchService
///

pub struct DispatchService {
    schema_registry: Box<dyn SchemaRegistry + Send + Sync>,
    languages: Box<dyn LanguageRegistry + Send + Sync>,
    leaf_factories: BTreeMap<String, Box<dyn AdapterFactory>>,
}

impl DispatchService {
    /// Build a service over the given registries with the default scalar
    /// leaf adapters registered.
    #[must_use]
    pub fn new(
        schema_registry: Box<dyn SchemaRegistry + Send + Sync>,
        languages: Box<dyn LanguageRegistry + Send + Sync>,
    ) -> Self {
        let mut service = Self {
            schema_registry,
            languages,
            leaf_factories: BTreeMap::new(),
        };
        scalar::register_default_leaves(&mut service);

        service
    }

    /// Register (or override) the leaf adapter factory for a type tag.
    pub fn register_leaf(&mut self, tag: impl Into<String>, factory: Box<dyn AdapterFactory>) {
        self.leaf_factories.insert(tag.into(), factory);
    }

    /// Resolve the adapter for a field definition.
    ///
    /// `consider_inheritance` configures brick adapters and is forwarded to
    /// leaf factories; repeated calls with equal inputs yield behaviorally
    /// equivalent adapters.
    pub fn resolve_adapter<'s>(
        &'s self,
        field: &'s FieldDefinition,
        consider_inheritance: bool,
    ) -> Result<Box<dyn FieldAdapter + 's>, AdapterError> {
        match &field.kind {
            FieldKind::Leaf { type_tag } => self
                .leaf_factories
                .get(type_tag)
                .map(|factory| factory.create(field, self, consider_inheritance))
                .ok_or_else(|| AdapterError::UnknownAdapterKind(type_tag.clone())),

            FieldKind::Collection { allowed_types } => {
                Ok(Box::new(CollectionAdapter::new(field, allowed_types, self)))
            }

            FieldKind::Localized { children } => {
                Ok(Box::new(LocalizedAdapter::new(field, children, self)))
            }

            FieldKind::Bricks { allowed_types } => Ok(Box::new(BrickAdapter::new(
                field,
                allowed_types,
                self,
                consider_inheritance,
            ))),
        }
    }

    /// Normalize a raw filter spec into a filter entry.
    pub fn build_filter_entry(&self, spec: &FilterSpec) -> Result<FilterEntry, FilterError> {
        if !spec.operand.is_raw() && spec.field_name.is_empty() {
            return Err(FilterError::EmptyFieldName);
        }

        if let FilterOperand::Value(value) = &spec.operand
            && value.is_null()
            && !spec.operator.is_existence()
        {
            return Err(FilterError::MissingValue {
                operator: spec.operator,
            });
        }

        Ok(FilterEntry {
            field_name: spec.field_name.clone(),
            operator: spec.operator,
            operand: spec.operand.clone(),
            combine: spec.combine,
            ignore_inheritance: spec.ignore_inheritance,
        })
    }

    #[must_use]
    pub fn schema_registry(&self) -> &(dyn SchemaRegistry + Send + Sync) {
        self.schema_registry.as_ref()
    }

    #[must_use]
    pub fn languages(&self) -> &[Language] {
        self.languages.languages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterOperator;
    use nestsearch_schema::{language::StaticLanguages, registry::MemoryRegistry};
    use serde_json::json;

    fn service() -> DispatchService {
        DispatchService::new(
            Box::new(MemoryRegistry::new()),
            Box::new(StaticLanguages::new(["en"])),
        )
    }

    #[test]
    fn unknown_leaf_tag_is_rejected() {
        let service = service();
        let field = FieldDefinition::leaf("video", "Video", "video_embed");

        match service.resolve_adapter(&field, false) {
            Err(AdapterError::UnknownAdapterKind(tag)) => assert_eq!(tag, "video_embed"),
            other => panic!("expected UnknownAdapterKind, got {other:?}"),
        }
    }

    #[test]
    fn default_leaves_are_registered() {
        let service = service();
        for tag in ["text", "number", "float", "boolean", "date"] {
            let field = FieldDefinition::leaf("f", "F", tag);
            assert!(service.resolve_adapter(&field, false).is_ok(), "tag {tag}");
        }
    }

    #[test]
    fn filter_entry_requires_field_name_unless_raw() {
        let service = service();

        let err = service
            .build_filter_entry(&FilterSpec::eq("", json!(1)))
            .expect_err("empty field name should fail");
        assert_eq!(err, FilterError::EmptyFieldName);

        let entry = service
            .build_filter_entry(&FilterSpec::raw(json!({"term": {"x": 1}})))
            .expect("raw spec needs no field name");
        assert!(entry.operand.is_raw());
    }

    #[test]
    fn comparison_without_value_is_rejected() {
        let service = service();
        let spec = FilterSpec::new(
            "caption",
            FilterOperator::Gt,
            FilterOperand::Value(json!(null)),
        );

        let err = service
            .build_filter_entry(&spec)
            .expect_err("null comparison value should fail");
        assert_eq!(
            err,
            FilterError::MissingValue {
                operator: FilterOperator::Gt
            }
        );
    }

    #[test]
    fn existence_spec_needs_no_value() {
        let service = service();
        let entry = service
            .build_filter_entry(&FilterSpec::not_exists("caption"))
            .expect("existence spec should normalize");

        assert_eq!(entry.operator, FilterOperator::NotExists);
    }
}
