//! Rule set loading.

use std::path::Path;

use charsmith_domain::RuleSet;

use crate::config::ConfigError;

/// Load the rule set from a JSON file, or the built-in SRD subset when no path is given.
pub fn load_rule_set(path: Option<&Path>) -> Result<RuleSet, ConfigError> {
    let Some(path) = path else {
        tracing::info!("Using built-in SRD rule set");
        return Ok(RuleSet::srd());
    };

    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rules = RuleSet::from_json_str(&json)?;
    tracing::info!(path = %path.display(), "Loaded rule set");
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use charsmith_domain::{Edition, RuleLookup};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PROFICIENCY: &str = "[2,2,2,2,3,3,3,3,4,4,4,4,5,5,5,5,6,6,6,6]";

    fn write_json(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_to_srd() {
        let rules = load_rule_set(None).unwrap();
        assert!(rules.race("dwarf").is_some());
        assert!(rules.class("wizard", Edition::E2014).is_some());
    }

    #[test]
    fn file_replaces_builtin_data() {
        let file = write_json(&format!(r#"{{"proficiencyBonusByLevel": {PROFICIENCY}}}"#));

        let rules = load_rule_set(Some(file.path())).unwrap();

        assert!(rules.race("dwarf").is_none());
        assert_eq!(rules.proficiency_bonus(5), Some(3));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_rule_set(Some(&dir.path().join("missing.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn short_proficiency_table_is_rejected() {
        let file = write_json(r#"{"proficiencyBonusByLevel": [2, 2, 2]}"#);
        let err = load_rule_set(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::RuleSet(_)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let file = write_json("{ not json");
        let err = load_rule_set(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::RuleSet(_)));
    }
}
