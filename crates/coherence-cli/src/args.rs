use std::ffi::OsString;

/// Map the single-dash flag spellings (`-named`, `-file`, `-help`) onto
/// their `--` forms so that existing scripts keep working.
pub fn normalize_legacy_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-named") => OsString::from("--named"),
            Some("-file") => OsString::from("--file"),
            Some("-help") => OsString::from("--help"),
            _ => arg,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(args: &[&str]) -> Vec<String> {
        normalize_legacy_args(args.iter().map(OsString::from))
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn rewrites_single_dash_flags_only() {
        let legacy = ["coherence", "-file", "out.tsv", "-named", "http://g", "http://e/sparql"];
        let modern = ["coherence", "--file", "out.tsv", "--named", "http://g", "http://e/sparql"];
        assert_eq!(normalize(&legacy), modern);
        assert_eq!(normalize(&["coherence", "-help"]), vec!["coherence", "--help"]);
        assert_eq!(
            normalize(&["coherence", "--named", "-named-graph"]),
            vec!["coherence", "--named", "-named-graph"]
        );
    }
}
