//! Object accessor contract.
//!
//! Index-time reads go through these traits instead of name-derived getter
//! reflection. `Ok(None)` is a genuinely absent optional field and folds
//! into an empty record; a missing accessor is a schema/object mismatch
//! and is surfaced as an error, never defaulted.

use nestsearch_schema::language::Language;
use serde_json::Value;
use thiserror::Error as ThisError;

///
/// InheritanceMode
///
/// Explicit replacement for the document layer's process-wide inheritance
/// toggle: the mode is threaded through every extraction call, so
/// concurrent extractions can never interfere.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InheritanceMode {
    /// Resolve values through the object hierarchy.
    Inherit,
    /// Read only values set directly on the instance.
    Direct,
}

impl InheritanceMode {
    #[must_use]
    pub const fn inherits(self) -> bool {
        matches!(self, Self::Inherit)
    }
}

///
/// FieldValue
///
/// Shape of a single field read. Adapters check the shape they expect and
/// surface a `WrongShape` error otherwise.
///

pub enum FieldValue<'a> {
    Scalar(&'a Value),
    Items(&'a dyn ItemContainer),
    Localized(&'a [LocalizedValue]),
}

impl FieldValue<'_> {
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Items(_) => "item container",
            Self::Localized(_) => "localized",
        }
    }
}

///
/// ObjectAccessor
///

pub trait ObjectAccessor {
    /// Read one field's current value.
    fn field(
        &self,
        name: &str,
        mode: InheritanceMode,
    ) -> Result<Option<FieldValue<'_>>, AccessorError>;
}

///
/// ItemContainer
///
/// Ordered container of typed items (collection entries, brick slots).
///

pub trait ItemContainer {
    fn items(&self) -> Vec<&dyn ContainerItem>;
}

///
/// ContainerItem
///

pub trait ContainerItem {
    /// Discriminator key selecting this item's sub-schema.
    fn type_key(&self) -> &str;

    /// Accessor over the item's own fields.
    fn accessor(&self) -> &dyn ObjectAccessor;
}

///
/// LocalizedValue
///
/// One export triple of a localized container.
///

#[derive(Clone, Debug, PartialEq)]
pub struct LocalizedValue {
    pub language: Language,
    pub name: String,
    pub value: Value,
}

impl LocalizedValue {
    #[must_use]
    pub fn new(language: impl Into<Language>, name: impl Into<String>, value: Value) -> Self {
        Self {
            language: language.into(),
            name: name.into(),
            value,
        }
    }
}

///
/// AccessorError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum AccessorError {
    #[error("object has no accessor for field '{field}'")]
    MissingAccessor { field: String },

    #[error("field '{field}' returned a {got} value, expected {expected}")]
    WrongShape {
        field: String,
        expected: &'static str,
        got: &'static str,
    },
}

impl AccessorError {
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingAccessor {
            field: field.into(),
        }
    }

    #[must_use]
    pub fn wrong_shape(field: impl Into<String>, expected: &'static str, got: &'static str) -> Self {
        Self::WrongShape {
            field: field.into(),
            expected,
            got,
        }
    }
}
