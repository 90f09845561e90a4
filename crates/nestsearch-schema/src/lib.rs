pub mod language;
pub mod node;
pub mod registry;
pub mod validate;

/// Maximum length for field identifiers.
pub const MAX_FIELD_NAME_LEN: usize = 64;

/// Maximum length for sub-schema discriminator keys.
pub const MAX_SCHEMA_KEY_LEN: usize = 64;

use crate::validate::ValidateError;
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        language::{Language, LanguageRegistry},
        node::*,
        registry::SchemaRegistry,
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    ValidateError(#[from] ValidateError),
}
