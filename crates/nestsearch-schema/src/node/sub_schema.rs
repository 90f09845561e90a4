use crate::prelude::*;
use derive_more::Display;

///
/// ContainerKind
///
/// Registry namespace for sub-schemas. Collection item types and brick
/// types live in separate namespaces and may reuse keys.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    #[display("collection")]
    Collection,

    #[display("brick")]
    Brick,
}

///
/// SubSchema
///
/// A named field-definition tree describing one variant of a typed
/// container's contents. Shared by reference across every object instance
/// using that variant; never owned by a single FieldDefinition.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SubSchema {
    pub key: String,
    pub fields: FieldList,
}

impl SubSchema {
    #[must_use]
    pub fn new(key: impl Into<String>, fields: impl Into<FieldList>) -> Self {
        Self {
            key: key.into(),
            fields: fields.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_kind_display_is_lowercase() {
        assert_eq!(ContainerKind::Collection.to_string(), "collection");
        assert_eq!(ContainerKind::Brick.to_string(), "brick");
    }
}
