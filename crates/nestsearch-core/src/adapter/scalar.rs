//! Default scalar leaf adapter.
//!
//! Leaf field families beyond these defaults are external; they implement
//! `FieldAdapter` and register through `DispatchService::register_leaf`.

use crate::{
    accessor::{AccessorError, FieldValue, InheritanceMode, ObjectAccessor},
    adapter::{FieldAdapter, existence_fragment},
    dispatch::{AdapterFactory, DispatchService},
    error::AdapterError,
    filter::{FilterEntry, FilterError, FilterOperand, FilterOperator, QueryFilter},
    mapping::MappingNode,
    path::DocumentPath,
    query::QueryFragment,
    selection::FieldSelection,
};
use nestsearch_schema::node::FieldDefinition;
use serde_json::{Map, Value};

/// Default leaf tag → document-store type registrations.
const DEFAULT_LEAVES: &[(&str, &str)] = &[
    ("boolean", "boolean"),
    ("date", "date"),
    ("float", "double"),
    ("number", "long"),
    ("text", "keyword"),
];

pub(crate) fn register_default_leaves(service: &mut DispatchService) {
    for (tag, store_type) in DEFAULT_LEAVES {
        service.register_leaf(*tag, Box::new(ScalarFactory::new(tag, store_type)));
    }
}

///
/// ScalarFactory
///

#[derive(Clone, Copy, Debug)]
pub struct ScalarFactory {
    type_tag: &'static str,
    store_type: &'static str,
}

impl ScalarFactory {
    #[must_use]
    pub const fn new(type_tag: &'static str, store_type: &'static str) -> Self {
        Self {
            type_tag,
            store_type,
        }
    }
}

impl AdapterFactory for ScalarFactory {
    fn create<'s>(
        &self,
        field: &'s FieldDefinition,
        _service: &'s DispatchService,
        _consider_inheritance: bool,
    ) -> Box<dyn FieldAdapter + 's> {
        Box::new(ScalarAdapter::new(field, self.store_type, self.type_tag))
    }
}

///
/// ScalarAdapter
///

pub struct ScalarAdapter<'s> {
    field: &'s FieldDefinition,
    store_type: &'static str,
    type_tag: &'static str,
}

impl<'s> ScalarAdapter<'s> {
    #[must_use]
    pub const fn new(
        field: &'s FieldDefinition,
        store_type: &'static str,
        type_tag: &'static str,
    ) -> Self {
        Self {
            field,
            store_type,
            type_tag,
        }
    }

    fn comparison_fragment(
        &self,
        entry: &FilterEntry,
        path: &DocumentPath,
    ) -> Result<QueryFragment, AdapterError> {
        let field = path.join(&self.field.name);

        let value = match &entry.operand {
            FilterOperand::Raw(raw) => return Ok(QueryFragment::Raw(raw.clone())),
            FilterOperand::Value(value) => value.clone(),
        };

        let fragment = match entry.operator {
            FilterOperator::Eq => QueryFragment::Term { field, value },
            FilterOperator::Like => QueryFragment::Match { field, value },

            FilterOperator::Gt | FilterOperator::Gte | FilterOperator::Lt | FilterOperator::Lte => {
                let bound = match entry.operator {
                    FilterOperator::Gt => "gt",
                    FilterOperator::Gte => "gte",
                    FilterOperator::Lt => "lt",
                    _ => "lte",
                };
                let mut bounds = Map::new();
                bounds.insert(bound.to_string(), value);

                QueryFragment::Range { field, bounds }
            }

            FilterOperator::Exists | FilterOperator::NotExists => {
                return existence_fragment(entry, field).map_err(Into::into);
            }
        };

        Ok(fragment)
    }
}

impl FieldAdapter for ScalarAdapter<'_> {
    fn build_mapping(&self) -> Result<(String, MappingNode), AdapterError> {
        Ok((
            self.field.name.clone(),
            MappingNode::store_type(self.store_type),
        ))
    }

    fn build_query(
        &self,
        filter: &QueryFilter,
        _ignore_inheritance: bool,
        path: &DocumentPath,
    ) -> Result<QueryFragment, AdapterError> {
        let QueryFilter::Entry(entry) = filter else {
            return Err(FilterError::Shape {
                field: self.field.name.clone(),
                expected: "leaf",
            }
            .into());
        };

        self.comparison_fragment(entry, path)
    }

    fn build_exists_filter(
        &self,
        entry: &FilterEntry,
        _ignore_inheritance: bool,
        path: &DocumentPath,
    ) -> Result<QueryFragment, AdapterError> {
        existence_fragment(entry, path.join(&self.field.name)).map_err(Into::into)
    }

    fn extract_index_data(
        &self,
        object: &dyn ObjectAccessor,
        mode: InheritanceMode,
    ) -> Result<Value, AdapterError> {
        match object.field(&self.field.name, mode)? {
            None => Ok(Value::Null),
            Some(FieldValue::Scalar(value)) => Ok(value.clone()),
            Some(other) => Err(AccessorError::wrong_shape(
                &self.field.name,
                "scalar",
                other.shape(),
            )
            .into()),
        }
    }

    fn selectable_fields(&self) -> Result<Vec<FieldSelection>, AdapterError> {
        Ok(vec![FieldSelection::new(
            &self.field.name,
            &self.field.title,
            self.type_tag,
        )])
    }
}
