mod naming;

pub use naming::check_fields;

use crate::node::FieldList;
use std::fmt;
use thiserror::Error as ThisError;

///
/// Violation
///
/// One validation finding, keyed by the slash-joined schema path of the
/// offending node.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

///
/// ValidateError
///

#[derive(Debug, ThisError)]
#[error("schema validation failed with {} violation(s)", violations.len())]
pub struct ValidateError {
    pub violations: Vec<Violation>,
}

/// Validate a loaded schema tree. Collects every violation rather than
/// stopping at the first, so one pass reports the whole schema.
pub fn validate_fields(fields: &FieldList) -> Result<(), ValidateError> {
    let mut violations = Vec::new();
    check_fields(&mut violations, "", fields);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidateError { violations })
    }
}
