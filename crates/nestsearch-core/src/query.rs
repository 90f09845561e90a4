//! Query fragments.
//!
//! Recursive boolean structure built fresh per search request and never
//! mutated after construction. `to_json` renders the document-store query
//! DSL; nesting nodes scope matches to one nested-object instance so
//! fields never leak across sibling items.

use crate::path::DocumentPath;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

///
/// CombineOp
///
/// How a filter entry joins its siblings inside a boolean fragment.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineOp {
    #[default]
    And,
    Or,
}

///
/// BoolClause
///
/// Clause bucket of a boolean query.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BoolClause {
    Must,
    Should,
    MustNot,
}

impl BoolClause {
    const fn bucket(self) -> &'static str {
        match self {
            Self::Must => "must",
            Self::Should => "should",
            Self::MustNot => "must_not",
        }
    }
}

impl From<CombineOp> for BoolClause {
    fn from(op: CombineOp) -> Self {
        match op {
            CombineOp::And => Self::Must,
            CombineOp::Or => Self::Should,
        }
    }
}

///
/// QueryFragment
///

#[derive(Clone, Debug, PartialEq)]
pub enum QueryFragment {
    Bool(BoolQuery),

    /// Scope `query` to a single nested-object instance at `path`.
    Nested {
        path: DocumentPath,
        query: Box<QueryFragment>,
    },

    Exists {
        field: DocumentPath,
    },

    // leaf-level fragments
    Term {
        field: DocumentPath,
        value: Value,
    },
    Match {
        field: DocumentPath,
        value: Value,
    },
    Range {
        field: DocumentPath,
        bounds: Map<String, Value>,
    },

    /// Escape hatch: a pre-built fragment embedded verbatim.
    Raw(Value),
}

impl QueryFragment {
    #[must_use]
    pub fn nested(path: DocumentPath, query: Self) -> Self {
        Self::Nested {
            path,
            query: Box::new(query),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(bool_query) => bool_query.to_json(),

            Self::Nested { path, query } => json!({
                "nested": {
                    "path": path.dotted(),
                    "query": query.to_json(),
                }
            }),

            Self::Exists { field } => json!({
                "exists": {"field": field.dotted()}
            }),

            Self::Term { field, value } => json!({
                "term": {field.dotted(): value}
            }),

            Self::Match { field, value } => json!({
                "match": {field.dotted(): value}
            }),

            Self::Range { field, bounds } => json!({
                "range": {field.dotted(): bounds}
            }),

            Self::Raw(value) => value.clone(),
        }
    }
}

///
/// BoolQuery
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoolQuery {
    clauses: Vec<(BoolClause, QueryFragment)>,
}

impl BoolQuery {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    /// Append a fragment under a clause bucket, preserving insertion order
    /// within the bucket.
    pub fn add(&mut self, clause: impl Into<BoolClause>, fragment: QueryFragment) {
        self.clauses.push((clause.into(), fragment));
    }

    #[must_use]
    pub fn clauses(&self) -> &[(BoolClause, QueryFragment)] {
        &self.clauses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    #[must_use]
    pub fn into_fragment(self) -> QueryFragment {
        QueryFragment::Bool(self)
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut buckets: Map<String, Value> = Map::new();

        for clause in [BoolClause::Must, BoolClause::Should, BoolClause::MustNot] {
            let fragments: Vec<Value> = self
                .clauses
                .iter()
                .filter(|(c, _)| *c == clause)
                .map(|(_, f)| f.to_json())
                .collect();

            if !fragments.is_empty() {
                buckets.insert(clause.bucket().to_string(), Value::Array(fragments));
            }
        }

        json!({"bool": buckets})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exists(path: &[&str]) -> QueryFragment {
        QueryFragment::Exists {
            field: DocumentPath::from_segments(path.iter().copied()),
        }
    }

    #[test]
    fn combine_op_maps_to_clause_buckets() {
        assert_eq!(BoolClause::from(CombineOp::And), BoolClause::Must);
        assert_eq!(BoolClause::from(CombineOp::Or), BoolClause::Should);
    }

    #[test]
    fn bool_query_renders_only_populated_buckets() {
        let mut bool_query = BoolQuery::new();
        bool_query.add(CombineOp::And, exists(&["a"]));
        bool_query.add(BoolClause::MustNot, exists(&["b"]));

        assert_eq!(
            bool_query.to_json(),
            json!({
                "bool": {
                    "must": [{"exists": {"field": "a"}}],
                    "must_not": [{"exists": {"field": "b"}}],
                }
            })
        );
    }

    #[test]
    fn nested_renders_dotted_path() {
        let fragment = QueryFragment::nested(
            DocumentPath::from_segments(["images", "photo"]),
            exists(&["images", "photo", "caption"]),
        );

        assert_eq!(
            fragment.to_json(),
            json!({
                "nested": {
                    "path": "images.photo",
                    "query": {"exists": {"field": "images.photo.caption"}},
                }
            })
        );
    }

    #[test]
    fn raw_fragment_is_embedded_verbatim() {
        let raw = json!({"term": {"anything": 1}});
        assert_eq!(QueryFragment::Raw(raw.clone()).to_json(), raw);
    }
}
