//! Field adapters.
//!
//! One adapter per schema node, bound to its field definition and to the
//! dispatch service. Composites recurse through the service; the mapping
//! path and the query path for a logical field are built from the same
//! segments so they can never drift apart.

mod bricks;
mod collection;
mod localized;
pub(crate) mod scalar;


pub use bricks::BrickAdapter;
pub use collection::CollectionAdapter;
pub use localized::LocalizedAdapter;
pub use scalar::{ScalarAdapter, ScalarFactory};

use crate::{
    accessor::{InheritanceMode, ObjectAccessor},
    error::AdapterError,
    filter::{FilterEntry, FilterError, FilterOperator, QueryFilter},
    mapping::MappingNode,
    path::DocumentPath,
    query::{BoolClause, BoolQuery, QueryFragment},
    selection::FieldSelection,
};
use serde_json::Value;

///
/// FieldAdapter
///
/// The four search-side operations plus the existence-filter hook the
/// composites dispatch into. Implementations are stateless per call.
///

pub trait FieldAdapter {
    /// Mapping fragment for this field: `(name, node)`, composed bottom-up
    /// into the parent's `nested` properties.
    fn build_mapping(&self) -> Result<(String, MappingNode), AdapterError>;

    /// Query fragment for a filter against this field. `path` is the
    /// accumulated document path of the enclosing containers.
    fn build_query(
        &self,
        filter: &QueryFilter,
        ignore_inheritance: bool,
        path: &DocumentPath,
    ) -> Result<QueryFragment, AdapterError>;

    /// Existence filter for this field at `path`.
    fn build_exists_filter(
        &self,
        entry: &FilterEntry,
        ignore_inheritance: bool,
        path: &DocumentPath,
    ) -> Result<QueryFragment, AdapterError>;

    /// Index-time data for this field, read through the object accessor
    /// contract. An absent optional container folds to an empty value.
    fn extract_index_data(
        &self,
        object: &dyn ObjectAccessor,
        mode: InheritanceMode,
    ) -> Result<Value, AdapterError>;

    /// Flat descriptors for the search-building UI.
    fn selectable_fields(&self) -> Result<Vec<FieldSelection>, AdapterError>;
}

impl std::fmt::Debug for dyn FieldAdapter + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FieldAdapter")
    }
}

/// Default existence fragment: `exists` on the field, or `must_not exists`
/// for the negated operator.
pub(crate) fn existence_fragment(
    entry: &FilterEntry,
    field: DocumentPath,
) -> Result<QueryFragment, FilterError> {
    match entry.operator {
        FilterOperator::Exists => Ok(QueryFragment::Exists { field }),

        FilterOperator::NotExists => {
            let mut bool_query = BoolQuery::new();
            bool_query.add(BoolClause::MustNot, QueryFragment::Exists { field });

            Ok(bool_query.into_fragment())
        }

        operator => Err(FilterError::NotExistence { operator }),
    }
}
