//! Core adapter framework for nestsearch: document paths, mapping and
//! query-fragment trees, the filter model, the adapter dispatch service,
//! and the three composite field adapters.

// public exports are one module level down
pub mod accessor;
pub mod adapter;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod mapping;
pub mod obs;
pub mod path;
pub mod query;
pub mod selection;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Domain vocabulary only; no fixtures or helpers.
///

pub mod prelude {
    pub use crate::{
        accessor::{InheritanceMode, ObjectAccessor},
        adapter::FieldAdapter,
        dispatch::DispatchService,
        error::AdapterError,
        filter::{FilterEntry, FilterSpec, QueryFilter},
        mapping::MappingNode,
        path::DocumentPath,
        query::{CombineOp, QueryFragment},
        selection::FieldSelection,
    };
}
