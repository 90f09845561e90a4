//! In-memory object fixtures for adapter tests.

use crate::accessor::{
    AccessorError, ContainerItem, FieldValue, InheritanceMode, ItemContainer, LocalizedValue,
    ObjectAccessor,
};
use serde_json::Value;
use std::collections::BTreeMap;

///
/// MemoryValue
///

pub(crate) enum MemoryValue {
    /// Field is known but unset.
    Absent,
    Scalar(Value),
    Container(MemoryContainer),
    Localized(Vec<LocalizedValue>),
}

///
/// MemoryObject
///
/// Two layers: values set directly on the instance and values only
/// reachable through the hierarchy. `Inherit` mode falls back to the
/// second layer; a name present in neither is a schema mismatch.
///

#[derive(Default)]
pub(crate) struct MemoryObject {
    direct: BTreeMap<String, MemoryValue>,
    inherited: BTreeMap<String, MemoryValue>,
}

impl MemoryObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scalar(mut self, name: &str, value: Value) -> Self {
        self.direct.insert(name.to_string(), MemoryValue::Scalar(value));
        self
    }

    pub fn with_absent(mut self, name: &str) -> Self {
        self.direct.insert(name.to_string(), MemoryValue::Absent);
        self
    }

    pub fn with_items(mut self, name: &str, container: MemoryContainer) -> Self {
        self.direct
            .insert(name.to_string(), MemoryValue::Container(container));
        self
    }

    pub fn with_localized(mut self, name: &str, entries: Vec<LocalizedValue>) -> Self {
        self.direct
            .insert(name.to_string(), MemoryValue::Localized(entries));
        self
    }

    pub fn with_inherited_scalar(mut self, name: &str, value: Value) -> Self {
        self.inherited
            .insert(name.to_string(), MemoryValue::Scalar(value));
        self
    }

    fn lookup(&self, name: &str, mode: InheritanceMode) -> Option<&MemoryValue> {
        self.direct.get(name).or_else(|| {
            if mode.inherits() {
                self.inherited.get(name)
            } else {
                None
            }
        })
    }
}

impl ObjectAccessor for MemoryObject {
    fn field(
        &self,
        name: &str,
        mode: InheritanceMode,
    ) -> Result<Option<FieldValue<'_>>, AccessorError> {
        // Direct mode must not see the name through the inherited layer
        // either, so the mismatch check always spans both.
        let known = self.direct.contains_key(name) || self.inherited.contains_key(name);
        if !known {
            return Err(AccessorError::missing(name));
        }

        Ok(match self.lookup(name, mode) {
            None | Some(MemoryValue::Absent) => None,
            Some(MemoryValue::Scalar(value)) => Some(FieldValue::Scalar(value)),
            Some(MemoryValue::Container(container)) => Some(FieldValue::Items(container)),
            Some(MemoryValue::Localized(entries)) => Some(FieldValue::Localized(entries)),
        })
    }
}

///
/// MemoryContainer
///

#[derive(Default)]
pub(crate) struct MemoryContainer {
    items: Vec<MemoryItem>,
}

impl MemoryContainer {
    pub fn new(items: Vec<MemoryItem>) -> Self {
        Self { items }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl ItemContainer for MemoryContainer {
    fn items(&self) -> Vec<&dyn ContainerItem> {
        self.items
            .iter()
            .map(|item| item as &dyn ContainerItem)
            .collect()
    }
}

///
/// MemoryItem
///

pub(crate) struct MemoryItem {
    type_key: String,
    object: MemoryObject,
}

impl MemoryItem {
    pub fn new(type_key: &str, object: MemoryObject) -> Self {
        Self {
            type_key: type_key.to_string(),
            object,
        }
    }
}

impl ContainerItem for MemoryItem {
    fn type_key(&self) -> &str {
        &self.type_key
    }

    fn accessor(&self) -> &dyn ObjectAccessor {
        &self.object
    }
}
