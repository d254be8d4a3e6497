//! Character record and its field set.

use lorebook_core::record::Record;
use lorebook_core::types::RecordId;
use serde::{Deserialize, Serialize};

use super::{take_field, take_id, Extra};

/// A character entry from the characters file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Extra")]
pub struct Character {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: CharacterFields,
    /// Keys read from the file that do not fit [`CharacterFields`].
    #[serde(flatten)]
    pub extra: Extra,
}

impl TryFrom<Extra> for Character {
    type Error = String;

    fn try_from(mut map: Extra) -> Result<Self, Self::Error> {
        let id = take_id(&mut map)?;
        let fields = CharacterFields {
            name: take_field(&mut map, "name"),
            kind: take_field(&mut map, "type"),
            role: take_field(&mut map, "role"),
            place: take_field(&mut map, "place"),
            description: take_field(&mut map, "description"),
            family: take_field(&mut map, "family"),
        };
        Ok(Character {
            id,
            fields,
            extra: map,
        })
    }
}

/// Payload for creating or editing a character.
///
/// Absent fields stay absent in the stored record. Unknown keys are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Free-text place name. Not checked against the places file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

impl CharacterFields {
    /// Field names accepted as text parts of a multipart create request.
    pub const NAMES: [&'static str; 6] = ["name", "type", "role", "place", "description", "family"];

    /// Set a field by its wire name. Returns `false` for unknown names.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "name" => &mut self.name,
            "type" => &mut self.kind,
            "role" => &mut self.role,
            "place" => &mut self.place,
            "description" => &mut self.description,
            "family" => &mut self.family,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

impl Record for Character {
    type Fields = CharacterFields;
    const ENTITY: &'static str = "Character";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_fields(id: RecordId, fields: CharacterFields) -> Self {
        Character {
            id,
            fields,
            extra: Extra::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_flat_with_type_key() {
        let character = Character::from_fields(
            3,
            CharacterFields {
                name: Some("Alice".into()),
                kind: Some("human".into()),
                ..Default::default()
            },
        );
        let value = serde_json::to_value(&character).unwrap();
        assert_eq!(value, json!({"id": 3, "name": "Alice", "type": "human"}));
    }

    #[test]
    fn payload_drops_unknown_keys() {
        let fields: CharacterFields = serde_json::from_value(json!({
            "name": "Bob",
            "role": "villain",
            "id": 99,
            "favouriteColour": "green"
        }))
        .unwrap();
        assert_eq!(fields.name.as_deref(), Some("Bob"));
        assert_eq!(fields.role.as_deref(), Some("villain"));
        assert!(fields.kind.is_none());
    }

    #[test]
    fn null_payload_fields_are_absent() {
        let fields: CharacterFields =
            serde_json::from_value(json!({"name": null, "family": "Doe"})).unwrap();
        assert!(fields.name.is_none());
        assert_eq!(fields.family.as_deref(), Some("Doe"));
    }

    #[test]
    fn set_accepts_wire_names_only() {
        let mut fields = CharacterFields::default();
        for name in CharacterFields::NAMES {
            assert!(fields.set(name, format!("{name}-value")));
        }
        assert_eq!(fields.kind.as_deref(), Some("type-value"));
        assert!(!fields.set("kind", "x".into()));
        assert!(!fields.set("profile", "x".into()));
    }

    #[test]
    fn stored_record_keeps_unknown_keys_and_odd_values() {
        let stored = json!({"id": 1, "name": 7, "role": "smith", "age": 30, "family": null});
        let character: Character = serde_json::from_value(stored.clone()).unwrap();

        assert_eq!(character.id, 1);
        assert_eq!(character.fields.role.as_deref(), Some("smith"));
        assert!(character.fields.name.is_none());
        assert_eq!(character.extra["age"], json!(30));
        assert_eq!(serde_json::to_value(&character).unwrap(), stored);
    }

    #[test]
    fn stored_record_without_id_is_rejected() {
        let result = serde_json::from_value::<Character>(json!({"name": "Ghost"}));
        assert!(result.is_err());
    }
}
