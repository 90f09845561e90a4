//! Document paths.
//!
//! Invariants:
//! - A path is an ordered list of non-empty name segments.
//! - The dotted rendering of a mapping leaf path and of the query path for
//!   the same logical field are identical strings. This is the core
//!   correctness invariant of the whole system; paths are therefore built
//!   structurally (segment joins) and only rendered at the query boundary.

use derive_more::Display;

///
/// DocumentPath
///

#[derive(Clone, Debug, Default, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{}", segments.join("."))]
pub struct DocumentPath {
    segments: Vec<String>,
}

impl DocumentPath {
    /// The empty path, i.e. the document root.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Return a new path with `segment` appended.
    #[must_use]
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());

        Self { segments }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Dotted rendering used in mapping and query JSON.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }

    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}
