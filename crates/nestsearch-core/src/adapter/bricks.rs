//! Brick container adapter.
//!
//! Structural twin of the collection adapter with two differences: the
//! allowed set is always explicit (no registry fallback), and inheritance
//! is never forced off — the adapter's `consider_inheritance`
//! configuration threads into every recursive child resolution, and each
//! filter entry's `ignore_inheritance` flag threads into child calls.

use crate::{
    accessor::{AccessorError, FieldValue, InheritanceMode, ObjectAccessor},
    adapter::FieldAdapter,
    dispatch::DispatchService,
    error::AdapterError,
    filter::{FilterEntry, FilterError, FilterOperand, QueryFilter},
    mapping::MappingNode,
    obs::{self, MetricsEvent},
    path::DocumentPath,
    query::{BoolQuery, QueryFragment},
    selection::FieldSelection,
};
use nestsearch_schema::node::{ContainerKind, FieldDefinition, SubSchema};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

///
/// BrickAdapter
///

pub struct BrickAdapter<'s> {
    field: &'s FieldDefinition,
    allowed_types: &'s [String],
    service: &'s DispatchService,
    consider_inheritance: bool,
}

impl<'s> BrickAdapter<'s> {
    pub(crate) const fn new(
        field: &'s FieldDefinition,
        allowed_types: &'s [String],
        service: &'s DispatchService,
        consider_inheritance: bool,
    ) -> Self {
        Self {
            field,
            allowed_types,
            service,
            consider_inheritance,
        }
    }

    fn sub_schema(&self, key: &str) -> Result<&'s SubSchema, AdapterError> {
        self.service
            .schema_registry()
            .get(ContainerKind::Brick, key)
            .ok_or_else(|| AdapterError::unknown_key(ContainerKind::Brick, key))
    }
}

impl FieldAdapter for BrickAdapter<'_> {
    fn build_mapping(&self) -> Result<(String, MappingNode), AdapterError> {
        obs::record(MetricsEvent::MappingBuilt);

        let mut properties = BTreeMap::new();

        for key in self.allowed_types {
            let sub_schema = self.sub_schema(key)?;

            let mut child_properties = BTreeMap::new();
            for child in &sub_schema.fields {
                let adapter = self
                    .service
                    .resolve_adapter(child, self.consider_inheritance)?;
                let (name, node) = adapter.build_mapping()?;
                child_properties.insert(name, node);
            }

            properties.insert(sub_schema.key.clone(), MappingNode::nested(child_properties));
        }

        Ok((self.field.name.clone(), MappingNode::nested(properties)))
    }

    fn build_query(
        &self,
        filter: &QueryFilter,
        _ignore_inheritance: bool,
        path: &DocumentPath,
    ) -> Result<QueryFragment, AdapterError> {
        obs::record(MetricsEvent::QueryBuilt);

        let QueryFilter::TypedItem(item_filter) = filter else {
            return Err(FilterError::Shape {
                field: self.field.name.clone(),
                expected: "typed item",
            }
            .into());
        };

        let entry = self.service.build_filter_entry(&item_filter.condition)?;

        let outer_path = path.join(&self.field.name);
        let inner_path = outer_path.join(&item_filter.type_key);

        let mut inner_bool = BoolQuery::new();

        match &entry.operand {
            // escape hatch: embed without any further processing
            FilterOperand::Raw(raw) => {
                inner_bool.add(entry.combine, QueryFragment::Raw(raw.clone()));
            }

            FilterOperand::Value(_) => {
                let sub_schema = self.sub_schema(&item_filter.type_key)?;
                let child = sub_schema
                    .fields
                    .get(&entry.field_name)
                    .ok_or_else(|| {
                        AdapterError::unknown_field(&sub_schema.key, &entry.field_name)
                    })?;
                let adapter = self
                    .service
                    .resolve_adapter(child, self.consider_inheritance)?;

                // the entry's own inheritance flag threads through
                let fragment = if entry.operator.is_existence() {
                    adapter.build_exists_filter(&entry, entry.ignore_inheritance, &inner_path)?
                } else {
                    adapter.build_query(
                        &QueryFilter::Entry(entry.clone()),
                        entry.ignore_inheritance,
                        &inner_path,
                    )?
                };

                inner_bool.add(entry.combine, fragment);
            }
        }

        // two nesting levels: container, then typed brick
        Ok(QueryFragment::nested(
            outer_path,
            QueryFragment::nested(inner_path, inner_bool.into_fragment()),
        ))
    }

    fn build_exists_filter(
        &self,
        entry: &FilterEntry,
        _ignore_inheritance: bool,
        path: &DocumentPath,
    ) -> Result<QueryFragment, AdapterError> {
        super::existence_fragment(entry, path.join(&self.field.name)).map_err(Into::into)
    }

    fn extract_index_data(
        &self,
        object: &dyn ObjectAccessor,
        mode: InheritanceMode,
    ) -> Result<Value, AdapterError> {
        let Some(value) = object.field(&self.field.name, mode)? else {
            obs::record(MetricsEvent::ExtractRun { items: 0 });
            return Ok(Value::Object(Map::new()));
        };

        let FieldValue::Items(container) = value else {
            return Err(AccessorError::wrong_shape(
                &self.field.name,
                "item container",
                value.shape(),
            )
            .into());
        };

        let items = container.items();
        obs::record(MetricsEvent::ExtractRun {
            items: items.len() as u64,
        });

        let mut data: Map<String, Value> = Map::new();

        for item in items {
            let sub_schema = self.sub_schema(item.type_key())?;

            let mut record = Map::new();
            for child in &sub_schema.fields {
                let adapter = self
                    .service
                    .resolve_adapter(child, self.consider_inheritance)?;
                // inheritance handling is the children's business: the
                // incoming mode passes through unchanged
                record.insert(
                    child.name.clone(),
                    adapter.extract_index_data(item.accessor(), mode)?,
                );
            }

            let bucket = data
                .entry(item.type_key().to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(records) = bucket {
                records.push(Value::Object(record));
            }
        }

        Ok(Value::Object(data))
    }

    fn selectable_fields(&self) -> Result<Vec<FieldSelection>, AdapterError> {
        let allowed: Vec<Value> = self
            .allowed_types
            .iter()
            .map(|key| json!([key]))
            .collect();

        Ok(vec![
            FieldSelection::new(&self.field.name, &self.field.title, "bricks")
                .with_context("allowedTypes", Value::Array(allowed)),
        ])
    }
}
