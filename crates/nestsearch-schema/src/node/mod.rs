mod field;
mod sub_schema;

pub use field::{FieldDefinition, FieldKind, FieldList};
pub use sub_schema::{ContainerKind, SubSchema};
