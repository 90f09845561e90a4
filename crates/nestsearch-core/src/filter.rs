//! Filter model.
//!
//! A raw `FilterSpec` (as parsed from a search request) is normalized into
//! a `FilterEntry` at the dispatch boundary; adapters only ever consume
//! entries. `QueryFilter` is the adapter-facing input shape: the variant
//! must match the adapter kind, anything else is a malformed filter.

use crate::query::CombineOp;
use nestsearch_schema::language::Language;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// FilterOperator
///
/// Composite adapters branch on `Exists`/`NotExists` only; the comparison
/// operators are interpreted by leaf adapters.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[remain::sorted]
pub enum FilterOperator {
    Eq,
    Exists,
    Gt,
    Gte,
    Like,
    Lt,
    Lte,
    NotExists,
}

impl FilterOperator {
    #[must_use]
    pub const fn is_existence(self) -> bool {
        matches!(self, Self::Exists | Self::NotExists)
    }
}

///
/// FilterOperand
///
/// Tagged so composite branching stays explicit: a leaf comparison value,
/// or the escape hatch — a pre-built query fragment that bypasses any
/// further interpretation by the core.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperand {
    Value(Value),
    Raw(Value),
}

impl FilterOperand {
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

impl Default for FilterOperand {
    fn default() -> Self {
        Self::Value(Value::Null)
    }
}

///
/// FilterSpec
///
/// Raw, wire-shaped filter instruction. Normalized by
/// `DispatchService::build_filter_entry` before any query is built.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FilterSpec {
    pub field_name: String,

    #[serde(default = "default_operator")]
    pub operator: FilterOperator,

    #[serde(default)]
    pub operand: FilterOperand,

    #[serde(default)]
    pub combine: CombineOp,

    #[serde(default)]
    pub ignore_inheritance: bool,
}

const fn default_operator() -> FilterOperator {
    FilterOperator::Eq
}

impl FilterSpec {
    #[must_use]
    pub fn new(field_name: impl Into<String>, operator: FilterOperator, operand: FilterOperand) -> Self {
        Self {
            field_name: field_name.into(),
            operator,
            operand,
            combine: CombineOp::default(),
            ignore_inheritance: false,
        }
    }

    #[must_use]
    pub fn eq(field_name: impl Into<String>, value: Value) -> Self {
        Self::new(field_name, FilterOperator::Eq, FilterOperand::Value(value))
    }

    #[must_use]
    pub fn exists(field_name: impl Into<String>) -> Self {
        Self::new(
            field_name,
            FilterOperator::Exists,
            FilterOperand::default(),
        )
    }

    #[must_use]
    pub fn not_exists(field_name: impl Into<String>) -> Self {
        Self::new(
            field_name,
            FilterOperator::NotExists,
            FilterOperand::default(),
        )
    }

    /// Escape-hatch spec carrying a pre-built fragment.
    #[must_use]
    pub fn raw(fragment: Value) -> Self {
        Self::new(String::new(), FilterOperator::Eq, FilterOperand::Raw(fragment))
    }

    #[must_use]
    pub const fn combined_with(mut self, combine: CombineOp) -> Self {
        self.combine = combine;
        self
    }

    #[must_use]
    pub const fn ignoring_inheritance(mut self) -> Self {
        self.ignore_inheritance = true;
        self
    }
}

///
/// FilterEntry
///
/// Normalized filter instruction. Constructed fresh per evaluation and
/// never persisted.
///

#[derive(Clone, Debug, PartialEq)]
pub struct FilterEntry {
    pub field_name: String,
    pub operator: FilterOperator,
    pub operand: FilterOperand,
    pub combine: CombineOp,
    pub ignore_inheritance: bool,
}

///
/// QueryFilter
///
/// Adapter-facing filter input. Each adapter accepts exactly one variant.
///

#[derive(Clone, Debug, PartialEq)]
pub enum QueryFilter {
    /// Leaf-level instruction, already normalized.
    Entry(FilterEntry),

    /// Collection / brick filter: one discriminator, one condition.
    TypedItem(TypedItemFilter),

    /// Localized filter: ordered condition lists keyed by language.
    Localized(LocalizedFilter),
}

///
/// TypedItemFilter
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TypedItemFilter {
    pub type_key: String,
    pub condition: FilterSpec,
}

impl TypedItemFilter {
    #[must_use]
    pub fn new(type_key: impl Into<String>, condition: FilterSpec) -> Self {
        Self {
            type_key: type_key.into(),
            condition,
        }
    }
}

///
/// LocalizedFilter
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LocalizedFilter {
    pub languages: BTreeMap<Language, Vec<FilterSpec>>,
}

impl LocalizedFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, language: impl Into<Language>, specs: Vec<FilterSpec>) -> Self {
        self.languages.insert(language.into(), specs);
        self
    }
}

///
/// FilterError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum FilterError {
    #[error("filter field name is empty")]
    EmptyFieldName,

    #[error("operator {operator:?} requires a comparison value")]
    MissingValue { operator: FilterOperator },

    #[error("operator {operator:?} is not an existence operator")]
    NotExistence { operator: FilterOperator },

    #[error("adapter for field '{field}' expected a {expected} filter")]
    Shape { field: String, expected: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn spec_deserializes_with_defaults() {
        let spec: FilterSpec = serde_json::from_value(json!({
            "field_name": "caption",
            "operand": {"value": "sunset"},
        }))
        .expect("spec should deserialize");

        assert_eq!(spec.operator, FilterOperator::Eq);
        assert_eq!(spec.combine, CombineOp::And);
        assert!(!spec.ignore_inheritance);
        assert_eq!(spec.operand, FilterOperand::Value(json!("sunset")));
    }

    #[test]
    fn raw_operand_round_trips_tagged() {
        let spec = FilterSpec::raw(json!({"term": {"x": 1}}));
        let value = serde_json::to_value(&spec).expect("spec should serialize");

        assert!(value["operand"]["raw"].is_object());
        let back: FilterSpec = serde_json::from_value(value).expect("spec should deserialize");
        assert!(back.operand.is_raw());
    }

    #[test]
    fn existence_operators_are_flagged() {
        assert!(FilterOperator::Exists.is_existence());
        assert!(FilterOperator::NotExists.is_existence());
        assert!(!FilterOperator::Like.is_existence());
    }

    #[test]
    fn localized_filter_orders_languages() {
        let filter = LocalizedFilter::new()
            .with("de", vec![FilterSpec::exists("text")])
            .with("en", vec![FilterSpec::exists("text")]);

        let languages: Vec<&str> = filter.languages.keys().map(Language::as_str).collect();
        assert_eq!(languages, vec!["de", "en"]);
    }
}
