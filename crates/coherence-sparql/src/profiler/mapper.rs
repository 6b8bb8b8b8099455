use std::collections::BTreeSet;

use coherence_core::{Error, Iri, Result};

use crate::results::{ResultSet, Term};

/// Split discovered type values into queryable IRIs and skipped raw values.
pub fn map_types(results: &ResultSet, var: &str) -> Result<(BTreeSet<Iri>, Vec<String>)> {
    let mut types = BTreeSet::new();
    let mut skipped = BTreeSet::new();

    for term in results.column(var) {
        match term {
            Term::Iri(value) => {
                types.insert(Iri::parse(value.as_str())?);
            }
            Term::BlankNode(value) => {
                skipped.insert(format!("_:{value}"));
            }
            Term::Literal { value, .. } => {
                skipped.insert(format!("{value:?}"));
            }
        }
    }

    Ok((types, skipped.into_iter().collect()))
}

/// Distinct predicate IRIs, excluding the type-membership predicate.
pub fn map_predicates(results: &ResultSet, var: &str) -> Result<BTreeSet<Iri>> {
    let mut predicates = BTreeSet::new();
    for term in results.column(var) {
        let Term::Iri(value) = term else {
            return Err(Error::MalformedResponse(format!(
                "predicate binding is not an IRI: {term:?}"
            )));
        };
        let predicate = Iri::parse(value.as_str())?;
        if !predicate.is_rdf_type() {
            predicates.insert(predicate);
        }
    }
    Ok(predicates)
}

/// Read a single count. An empty result reads as zero.
pub fn map_count(results: &ResultSet, var: &str) -> Result<u64> {
    let Some(row) = results.rows.first() else {
        return Ok(0);
    };
    let term = row
        .get(var)
        .ok_or_else(|| Error::MalformedResponse(format!("count variable ?{var} is unbound")))?;
    term.as_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::Row;

    fn row(var: &str, term: Term) -> Row {
        Row::from([(var.to_string(), term)])
    }

    fn iri(value: &str) -> Term {
        Term::Iri(value.to_string())
    }

    #[test]
    fn type_mapping_skips_blank_nodes_and_literals() {
        let results = ResultSet::new(
            vec!["type".to_string()],
            vec![
                row("type", iri("http://ex.org/A")),
                row("type", Term::BlankNode("r1".to_string())),
                row("type", iri("http://ex.org/A")),
                row(
                    "type",
                    Term::Literal {
                        value: "Person".to_string(),
                        datatype: None,
                        lang: None,
                    },
                ),
            ],
        );

        let (types, skipped) = map_types(&results, "type").expect("map types");
        assert_eq!(types.len(), 1);
        assert_eq!(skipped, vec!["\"Person\"".to_string(), "_:r1".to_string()]);
    }

    #[test]
    fn predicate_mapping_drops_rdf_type() {
        let results = ResultSet::new(
            vec!["typePred".to_string()],
            vec![
                row("typePred", iri(coherence_core::RDF_TYPE)),
                row("typePred", iri("http://ex.org/name")),
            ],
        );
        let predicates = map_predicates(&results, "typePred").expect("map predicates");
        let labels: Vec<&str> = predicates.iter().map(Iri::as_str).collect();
        assert_eq!(labels, vec!["http://ex.org/name"]);
    }

    #[test]
    fn missing_count_row_reads_as_zero() {
        assert_eq!(map_count(&ResultSet::default(), "cnt").expect("count"), 0);

        let unbound = ResultSet::new(vec!["cnt".to_string()], vec![Row::new()]);
        assert!(matches!(
            map_count(&unbound, "cnt"),
            Err(Error::MalformedResponse(_))
        ));
    }
}
