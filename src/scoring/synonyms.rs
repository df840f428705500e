//! Canonical skill terms and their surface-form aliases

/// Canonical term followed by every alias considered equivalent to it.
const SYNONYM_TABLE: &[(&str, &[&str])] = &[
    ("ms-sql", &["ms-sql", "mssql", "sql server", "t-sql", "transact-sql"]),
    ("power bi", &["power bi", "powerbi"]),
    ("time series", &["time series", "time-series", "timeseries"]),
    ("api", &["api", "rest", "restful", "json"]),
    ("c#", &["c#", "c sharp"]),
    ("r", &["r", "r-lang"]),
    ("sas", &["sas"]),
    ("eviews", &["eviews"]),
    ("javascript", &["javascript", "js"]),
    ("typescript", &["typescript", "ts"]),
    ("aws", &["aws", "amazon web services"]),
    ("gcp", &["gcp", "google cloud", "google cloud platform"]),
    ("docker", &["docker"]),
    ("kubernetes", &["kubernetes", "k8s"]),
    ("terraform", &["terraform"]),
    ("postgres", &["postgres", "postgresql"]),
    ("mysql", &["mysql"]),
    ("oracle", &["oracle", "oracle db"]),
    ("mongodb", &["mongodb", "mongo"]),
    ("kafka", &["kafka", "apache kafka"]),
    ("rabbitmq", &["rabbitmq"]),
    ("tableau", &["tableau"]),
    ("dbt", &["dbt", "data build tool"]),
    ("airflow", &["airflow", "apache airflow"]),
    ("pandas", &["pandas"]),
    ("numpy", &["numpy"]),
    ("scikit", &["scikit-learn", "sklearn", "scikit"]),
    ("excel", &["excel", "microsoft excel"]),
    ("react", &["react", "reactjs", "react.js"]),
    ("vue", &["vue", "vuejs", "vue.js"]),
    ("angular", &["angular", "angularjs"]),
    ("node", &["node", "nodejs", "node.js"]),
    ("express", &["express", "express.js"]),
    ("java", &["java"]),
    ("spring", &["spring", "spring boot", "springboot"]),
    (".net", &[".net", "dotnet"]),
];

/// Expand a term into its alias set.
///
/// Lookup is case-insensitive. Terms without a table entry expand to
/// themselves (lowercased), so callers can treat every term uniformly.
pub fn synonymize(term: &str) -> Vec<String> {
    let key = term.trim().to_lowercase();

    match SYNONYM_TABLE.iter().find(|(canonical, _)| *canonical == key) {
        Some((_, aliases)) => aliases.iter().map(|a| a.to_string()).collect(),
        None => vec![key],
    }
}

/// Number of canonical terms known to the resolver.
pub fn canonical_count() -> usize {
    SYNONYM_TABLE.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_term_expands() {
        let aliases = synonymize("MS-SQL");
        assert_eq!(
            aliases,
            vec!["ms-sql", "mssql", "sql server", "t-sql", "transact-sql"]
        );
    }

    #[test]
    fn test_unknown_term_returns_itself_lowercased() {
        assert_eq!(synonymize("Rust"), vec!["rust".to_string()]);
    }

    #[test]
    fn test_alias_is_not_a_lookup_key() {
        // Only canonical terms expand; an alias on its own stays a single term.
        assert_eq!(synonymize("k8s"), vec!["k8s".to_string()]);
    }

    #[test]
    fn test_table_has_no_duplicate_canonicals() {
        let mut keys: Vec<&str> = SYNONYM_TABLE.iter().map(|(k, _)| *k).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), canonical_count());
    }
}
