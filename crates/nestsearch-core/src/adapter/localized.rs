//! Localized container adapter.
//!
//! One shared child schema, stored once per registered language. Note the
//! deliberate path asymmetry: per-language query paths are rooted at
//! `<name>.<language>` and discard the incoming base path, while the typed
//! container adapters append to it. This mirrors the document layout the
//! store actually produces for localized fields; do not unify the two.

use crate::{
    accessor::{AccessorError, FieldValue, InheritanceMode, ObjectAccessor},
    adapter::FieldAdapter,
    dispatch::DispatchService,
    error::AdapterError,
    filter::{FilterEntry, FilterError, FilterOperand, QueryFilter},
    mapping::MappingNode,
    obs::{self, MetricsEvent},
    path::DocumentPath,
    query::{BoolClause, BoolQuery, QueryFragment},
    selection::FieldSelection,
};
use nestsearch_schema::node::{FieldDefinition, FieldList};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

///
/// LocalizedAdapter
///

pub struct LocalizedAdapter<'s> {
    field: &'s FieldDefinition,
    children: &'s FieldList,
    service: &'s DispatchService,
}

impl<'s> LocalizedAdapter<'s> {
    pub(crate) const fn new(
        field: &'s FieldDefinition,
        children: &'s FieldList,
        service: &'s DispatchService,
    ) -> Self {
        Self {
            field,
            children,
            service,
        }
    }
}

impl FieldAdapter for LocalizedAdapter<'_> {
    fn build_mapping(&self) -> Result<(String, MappingNode), AdapterError> {
        obs::record(MetricsEvent::MappingBuilt);

        // children are shared across languages: build them once
        let mut child_properties = BTreeMap::new();
        for child in self.children {
            let adapter = self.service.resolve_adapter(child, false)?;
            let (name, node) = adapter.build_mapping()?;
            child_properties.insert(name, node);
        }

        let mut properties = BTreeMap::new();
        for language in self.service.languages() {
            properties.insert(
                language.as_str().to_string(),
                MappingNode::nested(child_properties.clone()),
            );
        }

        Ok((self.field.name.clone(), MappingNode::nested(properties)))
    }

    fn build_query(
        &self,
        filter: &QueryFilter,
        _ignore_inheritance: bool,
        _path: &DocumentPath,
    ) -> Result<QueryFragment, AdapterError> {
        obs::record(MetricsEvent::QueryBuilt);

        let QueryFilter::Localized(localized) = filter else {
            return Err(FilterError::Shape {
                field: self.field.name.clone(),
                expected: "localized",
            }
            .into());
        };

        let mut language_queries = Vec::new();

        for (language, specs) in &localized.languages {
            // per-language path, rooted at the field (base path discarded)
            let language_path = DocumentPath::root()
                .join(&self.field.name)
                .join(language.as_str());

            let mut language_bool = BoolQuery::new();

            for spec in specs {
                let entry = self.service.build_filter_entry(spec)?;

                match &entry.operand {
                    // escape hatch: embed without any further processing
                    FilterOperand::Raw(raw) => {
                        language_bool.add(entry.combine, QueryFragment::Raw(raw.clone()));
                    }

                    FilterOperand::Value(_) => {
                        let child = self.children.get(&entry.field_name).ok_or_else(|| {
                            AdapterError::unknown_field(&self.field.name, &entry.field_name)
                        })?;
                        let adapter = self.service.resolve_adapter(child, false)?;

                        let fragment = if entry.operator.is_existence() {
                            adapter.build_exists_filter(
                                &entry,
                                entry.ignore_inheritance,
                                &language_path,
                            )?
                        } else {
                            adapter.build_query(
                                &QueryFilter::Entry(entry.clone()),
                                entry.ignore_inheritance,
                                &language_path,
                            )?
                        };

                        language_bool.add(entry.combine, fragment);
                    }
                }
            }

            language_queries.push(QueryFragment::nested(
                language_path,
                language_bool.into_fragment(),
            ));
        }

        // a single filtered language stays unwrapped
        if language_queries.len() == 1 {
            return Ok(language_queries.remove(0));
        }

        let mut bool_query = BoolQuery::new();
        for query in language_queries {
            bool_query.add(BoolClause::Must, query);
        }

        Ok(bool_query.into_fragment())
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

        let FieldValue::Localized(entries) = value else {
            return Err(AccessorError::wrong_shape(
                &self.field.name,
                "localized",
                value.shape(),
            )
            .into());
        };

        obs::record(MetricsEvent::ExtractRun {
            items: entries.len() as u64,
        });

        let mut data: Map<String, Value> = Map::new();

        for entry in entries {
            let bucket = data
                .entry(entry.language.as_str().to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(fields) = bucket {
                fields.insert(entry.name.clone(), entry.value.clone());
            }
        }

        Ok(Value::Object(data))
    }

    fn selectable_fields(&self) -> Result<Vec<FieldSelection>, AdapterError> {
        let languages = json!(
            self.service
                .languages()
                .iter()
                .map(nestsearch_schema::language::Language::as_str)
                .collect::<Vec<_>>()
        );

        let mut entries = Vec::new();

        for child in self.children {
            let adapter = self.service.resolve_adapter(child, false)?;

            for mut entry in adapter.selectable_fields()? {
                // keep the child's own type identity as metadata
                let sub_type =
                    std::mem::replace(&mut entry.field_type, "localizedfields".to_string());
                entry.context.insert("subType".to_string(), Value::String(sub_type));
                entry
                    .context
                    .insert("languages".to_string(), languages.clone());

                entries.push(entry);
            }
        }

        Ok(entries)
    }
}
