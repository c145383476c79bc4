//! JSON interchange for characters
//!
//! The exported document is a plain array of serialized characters. Import
//! gives every record a fresh id so a file can be loaded next to the
//! characters it was exported from. Records that break a character
//! invariant reject the whole file.

use charsmith_domain::{Character, CharacterId, DomainError};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to serialize characters: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Invalid character export: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("Character {index} in the export is invalid: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: DomainError,
    },
}

/// Serialize characters as a pretty-printed JSON array.
pub fn export_characters(characters: &[Character]) -> Result<String, ExportError> {
    serde_json::to_string_pretty(characters).map_err(ExportError::Serialize)
}

/// Parse an exported array, assigning each character a new id.
pub fn import_characters(json: &str) -> Result<Vec<Character>, ExportError> {
    let characters: Vec<Character> = serde_json::from_str(json).map_err(ExportError::Deserialize)?;
    characters
        .into_iter()
        .enumerate()
        .map(|(index, c)| {
            c.validate()
                .map_err(|source| ExportError::Invalid { index, source })?;
            Ok(c.with_id(CharacterId::new()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use charsmith_domain::game_systems::{add_item, derive, equip, level_up};
    use charsmith_domain::{CreationInput, RuleSet};

    fn party() -> Vec<Character> {
        let rules = RuleSet::srd();
        let wizard = derive(
            &CreationInput {
                name: "Ysolde".to_string(),
                race: "elf".to_string(),
                class: "wizard".to_string(),
                level: 3,
                ..Default::default()
            },
            &rules,
        )
        .unwrap();
        let fighter = derive(
            &CreationInput {
                name: "Brakka".to_string(),
                race: "dwarf".to_string(),
                class: "fighter".to_string(),
                level: 1,
                ..Default::default()
            },
            &rules,
        )
        .unwrap();
        let (fighter, _) = level_up(&fighter, &rules).unwrap();
        let (fighter, _) = add_item(&fighter, &rules, "shield", 1);
        let (fighter, _) = equip(&fighter, &rules, "shield");
        vec![wizard, fighter]
    }

    #[test]
    fn import_keeps_every_field_but_the_id() {
        let original = party();
        let json = export_characters(&original).unwrap();

        let imported = import_characters(&json).unwrap();

        assert_eq!(imported.len(), original.len());
        for (before, after) in original.iter().zip(&imported) {
            assert_ne!(before.id(), after.id());
            assert_eq!(&after.clone().with_id(before.id()), before);
        }
    }

    #[test]
    fn export_is_a_json_array() {
        let json = export_characters(&party()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[0]["name"], "Ysolde");
    }

    #[test]
    fn empty_export_round_trips() {
        let json = export_characters(&[]).unwrap();
        assert!(import_characters(&json).unwrap().is_empty());
    }

    #[test]
    fn rejects_non_array_documents() {
        assert!(matches!(
            import_characters(r#"{"name": "Solo"}"#),
            Err(ExportError::Deserialize(_))
        ));
    }

    #[test]
    fn rejects_records_with_overspent_spell_slots() {
        let json = export_characters(&party()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value[0]["spellcasting"]["usedSpellSlots"][0] = serde_json::json!(9);

        let err = import_characters(&value.to_string()).unwrap_err();
        assert!(matches!(
            err,
            ExportError::Invalid {
                index: 0,
                source: DomainError::Validation(_)
            }
        ));
    }

    #[test]
    fn rejects_records_with_hit_points_above_maximum() {
        let json = export_characters(&party()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let max = value[1]["maxHitPoints"].as_i64().unwrap();
        value[1]["hitPoints"] = serde_json::json!(max + 5);

        assert!(matches!(
            import_characters(&value.to_string()),
            Err(ExportError::Invalid { index: 1, .. })
        ));
    }
}
