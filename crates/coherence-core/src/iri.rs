use std::fmt;

use crate::error::{Error, Result};

/// The type-membership predicate.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// A label that is safe to embed in a SPARQL `IRIREF` (`<...>`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Iri(String);

impl Iri {
    /// Validate a raw label.
    ///
    /// SPARQL has no escape for characters excluded from `IRIREF`, so labels
    /// carrying them are rejected instead of being spliced into query text.
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(Error::InvalidLabel("empty IRI".to_string()));
        }
        if let Some(bad) = value.chars().find(|ch| is_forbidden(*ch)) {
            return Err(Error::InvalidLabel(format!(
                "{value:?} contains {bad:?}, which is not allowed inside <...>"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Render as an `IRIREF` token.
    pub fn to_sparql(&self) -> String {
        format!("<{}>", self.0)
    }

    pub fn is_rdf_type(&self) -> bool {
        self.0 == RDF_TYPE
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_forbidden(ch: char) -> bool {
    ch <= '\u{20}' || matches!(ch, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
}
