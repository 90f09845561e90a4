use crate::{accessor::AccessorError, filter::FilterError};
use nestsearch_schema::node::ContainerKind;
use thiserror::Error as ThisError;

///
/// AdapterError
///
/// Structural / configuration errors surfaced by adapter operations.
/// These are not transient: they are propagated immediately, never
/// retried, and never swallowed into an empty or default result.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum AdapterError {
    #[error(transparent)]
    Accessor(#[from] AccessorError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("no adapter registered for leaf kind '{0}'")]
    UnknownAdapterKind(String),

    #[error("unknown field '{field}' in sub-schema '{schema}'")]
    UnknownFieldName { schema: String, field: String },

    #[error("unknown {kind} sub-schema key '{key}'")]
    UnknownSchemaKey { kind: ContainerKind, key: String },
}

impl AdapterError {
    #[must_use]
    pub fn unknown_key(kind: ContainerKind, key: impl Into<String>) -> Self {
        Self::UnknownSchemaKey {
            kind,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn unknown_field(schema: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownFieldName {
            schema: schema.into(),
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_key() {
        let err = AdapterError::unknown_key(ContainerKind::Brick, "unknownBrick");
        assert_eq!(err.to_string(), "unknown brick sub-schema key 'unknownBrick'");

        let err = AdapterError::unknown_field("photo", "capton");
        assert_eq!(err.to_string(), "unknown field 'capton' in sub-schema 'photo'");
    }
}
