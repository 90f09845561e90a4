use crate::prelude::*;

///
/// FieldList
///
/// Ordered sibling list of a composite field or sub-schema.
/// Order is preserved for UI listings; lookups are by name.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FieldList {
    pub fields: Vec<FieldDefinition>,
}

impl FieldList {
    #[must_use]
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    // get
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Vec<FieldDefinition>> for FieldList {
    fn from(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a FieldDefinition;
    type IntoIter = std::slice::Iter<'a, FieldDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

///
/// FieldDefinition
///
/// One node of the schema tree. `name` must be unique among siblings and
/// never contains a dot; document paths are built by joining names.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FieldDefinition {
    pub name: String,
    pub title: String,
    pub kind: FieldKind,
}

impl FieldDefinition {
    #[must_use]
    pub fn leaf(name: impl Into<String>, title: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            kind: FieldKind::Leaf {
                type_tag: tag.into(),
            },
        }
    }

    #[must_use]
    pub fn collection(
        name: impl Into<String>,
        title: impl Into<String>,
        allowed_types: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            kind: FieldKind::Collection { allowed_types },
        }
    }

    #[must_use]
    pub fn localized(
        name: impl Into<String>,
        title: impl Into<String>,
        children: impl Into<FieldList>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            kind: FieldKind::Localized {
                children: children.into(),
            },
        }
    }

    #[must_use]
    pub fn bricks(
        name: impl Into<String>,
        title: impl Into<String>,
        allowed_types: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            kind: FieldKind::Bricks { allowed_types },
        }
    }
}

///
/// FieldKind
///
/// Discriminates leaf fields from the three composite container kinds.
/// Leaf types are open: the tag is resolved against the adapter factory
/// table at dispatch time, not compiled in here.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[remain::sorted]
pub enum FieldKind {
    /// Typed brick instances. The allowed set is always explicit.
    Bricks {
        allowed_types: Vec<String>,
    },

    /// Heterogeneous typed items, no inheritance across items.
    /// An empty allowed list means "every registered collection type".
    Collection {
        allowed_types: Vec<String>,
    },

    Leaf {
        type_tag: String,
    },

    /// One shared child schema, stored once per registered language.
    Localized {
        children: FieldList,
    },
}

impl FieldKind {
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        !matches!(self, Self::Leaf { .. })
    }
}
