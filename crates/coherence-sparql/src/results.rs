use std::collections::BTreeMap;

use serde::Deserialize;

use coherence_core::{Error, Result};

/// Media type of the SPARQL 1.1 Query Results JSON format.
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// A single RDF term bound in a result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Iri(String),
    BlankNode(String),
    Literal {
        value: String,
        datatype: Option<String>,
        lang: Option<String>,
    },
}

impl Term {
    /// Read an integer-convertible literal as a non-negative count.
    pub fn as_count(&self) -> Result<u64> {
        match self {
            Term::Literal { value, .. } => value.trim().parse::<u64>().map_err(|_| {
                Error::MalformedResponse(format!("expected a non-negative integer, got {value:?}"))
            }),
            other => Err(Error::MalformedResponse(format!(
                "expected a count literal, got {other:?}"
            ))),
        }
    }
}

/// One result row: variable name to bound term. Unbound variables are absent.
pub type Row = BTreeMap<String, Term>;

/// Tabular result of a `SELECT` query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    pub vars: Vec<String>,
    pub rows: Vec<Row>,
}

impl ResultSet {
    pub fn new(vars: Vec<String>, rows: Vec<Row>) -> Self {
        Self { vars, rows }
    }

    /// Parse a SPARQL 1.1 Query Results JSON document.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let raw: RawResults = serde_json::from_slice(body)
            .map_err(|err| Error::MalformedResponse(err.to_string()))?;
        let Some(results) = raw.results else {
            return Err(Error::MalformedResponse(
                "response has no `results` section (not a SELECT result)".to_string(),
            ));
        };

        let rows = results
            .bindings
            .into_iter()
            .map(|binding| {
                binding
                    .into_iter()
                    .map(|(name, term)| (name, term.into()))
                    .collect()
            })
            .collect();

        Ok(Self {
            vars: raw.head.vars,
            rows,
        })
    }

    /// Terms bound to `var`, in row order, skipping rows where it is unbound.
    pub fn column<'a>(&'a self, var: &'a str) -> impl Iterator<Item = &'a Term> + 'a {
        self.rows.iter().filter_map(move |row| row.get(var))
    }
}

#[derive(Deserialize)]
struct RawResults {
    #[serde(default)]
    head: RawHead,
    results: Option<RawBindings>,
}

#[derive(Deserialize, Default)]
struct RawHead {
    #[serde(default)]
    vars: Vec<String>,
}

#[derive(Deserialize)]
struct RawBindings {
    bindings: Vec<BTreeMap<String, RawTerm>>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum RawTerm {
    Uri {
        value: String,
    },
    Bnode {
        value: String,
    },
    Literal {
        value: String,
        datatype: Option<String>,
        #[serde(rename = "xml:lang")]
        lang: Option<String>,
    },
    // Emitted by older Virtuoso releases.
    TypedLiteral {
        value: String,
        datatype: Option<String>,
    },
}

impl From<RawTerm> for Term {
    fn from(raw: RawTerm) -> Self {
        match raw {
            RawTerm::Uri { value } => Term::Iri(value),
            RawTerm::Bnode { value } => Term::BlankNode(value),
            RawTerm::Literal {
                value,
                datatype,
                lang,
            } => Term::Literal {
                value,
                datatype,
                lang,
            },
            RawTerm::TypedLiteral { value, datatype } => Term::Literal {
                value,
                datatype,
                lang: None,
            },
        }
    }
}
