//! Sub-schema registry.
//!
//! Single source of truth for discriminator resolution. Key enumeration is
//! deterministic (BTreeMap order) so mapping construction is idempotent.

use crate::node::{ContainerKind, SubSchema};
use std::collections::BTreeMap;

///
/// SchemaRegistry
///
/// Resolves a discriminator key to its sub-schema and enumerates every
/// registered key of a container kind.
///

pub trait SchemaRegistry {
    fn get(&self, kind: ContainerKind, key: &str) -> Option<&SubSchema>;

    /// All registered keys for `kind`, in stable order.
    fn keys(&self, kind: ContainerKind) -> Vec<String>;
}

///
/// MemoryRegistry
///

#[derive(Debug, Default)]
pub struct MemoryRegistry {
    collections: BTreeMap<String, SubSchema>,
    bricks: BTreeMap<String, SubSchema>,
}

impl MemoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sub-schema under its key, returning any replaced entry.
    pub fn register(&mut self, kind: ContainerKind, sub_schema: SubSchema) -> Option<SubSchema> {
        self.table_mut(kind)
            .insert(sub_schema.key.clone(), sub_schema)
    }

    const fn table(&self, kind: ContainerKind) -> &BTreeMap<String, SubSchema> {
        match kind {
            ContainerKind::Collection => &self.collections,
            ContainerKind::Brick => &self.bricks,
        }
    }

    const fn table_mut(&mut self, kind: ContainerKind) -> &mut BTreeMap<String, SubSchema> {
        match kind {
            ContainerKind::Collection => &mut self.collections,
            ContainerKind::Brick => &mut self.bricks,
        }
    }
}

impl SchemaRegistry for MemoryRegistry {
    fn get(&self, kind: ContainerKind, key: &str) -> Option<&SubSchema> {
        self.table(kind).get(key)
    }

    fn keys(&self, kind: ContainerKind) -> Vec<String> {
        self.table(kind).keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{FieldDefinition, FieldList};

    fn sub(key: &str) -> SubSchema {
        SubSchema::new(
            key,
            FieldList::from(vec![FieldDefinition::leaf("caption", "Caption", "text")]),
        )
    }

    #[test]
    fn namespaces_are_independent() {
        let mut registry = MemoryRegistry::new();
        registry.register(ContainerKind::Collection, sub("photo"));
        registry.register(ContainerKind::Brick, sub("dimensions"));

        assert!(registry.get(ContainerKind::Collection, "photo").is_some());
        assert!(registry.get(ContainerKind::Brick, "photo").is_none());
        assert_eq!(registry.keys(ContainerKind::Brick), vec!["dimensions"]);
    }

    #[test]
    fn keys_are_sorted_and_stable() {
        let mut registry = MemoryRegistry::new();
        registry.register(ContainerKind::Collection, sub("scan"));
        registry.register(ContainerKind::Collection, sub("photo"));

        assert_eq!(registry.keys(ContainerKind::Collection), vec!["photo", "scan"]);
        assert_eq!(
            registry.keys(ContainerKind::Collection),
            registry.keys(ContainerKind::Collection)
        );
    }

    #[test]
    fn register_replaces_existing_entry() {
        let mut registry = MemoryRegistry::new();
        assert!(
            registry
                .register(ContainerKind::Collection, sub("photo"))
                .is_none()
        );
        assert!(
            registry
                .register(ContainerKind::Collection, sub("photo"))
                .is_some()
        );
    }
}
