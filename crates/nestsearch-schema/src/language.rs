use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Language
///
/// Locale code used as a per-language mapping/query path segment
/// (e.g. "en", "de", "pt_br").
///

#[derive(
    Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Language {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

///
/// LanguageRegistry
///
/// Enumerates the registered languages a localized container fans out to.
/// Order is significant: mapping properties follow it.
///

pub trait LanguageRegistry {
    fn languages(&self) -> &[Language];
}

///
/// StaticLanguages
///

#[derive(Debug, Default)]
pub struct StaticLanguages {
    languages: Vec<Language>,
}

impl StaticLanguages {
    pub fn new<I>(codes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Language>,
    {
        Self {
            languages: codes.into_iter().map(Into::into).collect(),
        }
    }
}

impl LanguageRegistry for StaticLanguages {
    fn languages(&self) -> &[Language] {
        &self.languages
    }
}
