//! Place record and its field set.

use lorebook_core::record::Record;
use lorebook_core::types::RecordId;
use serde::{Deserialize, Serialize};

use super::{take_field, take_id, Extra};

/// A place entry from the places file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Extra")]
pub struct Place {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: PlaceFields,
    /// Keys read from the file that do not fit [`PlaceFields`].
    #[serde(flatten)]
    pub extra: Extra,
}

impl TryFrom<Extra> for Place {
    type Error = String;

    fn try_from(mut map: Extra) -> Result<Self, Self::Error> {
        let id = take_id(&mut map)?;
        let fields = PlaceFields {
            name: take_field(&mut map, "name"),
            chapters: take_field(&mut map, "chapters"),
        };
        Ok(Place {
            id,
            fields,
            extra: map,
        })
    }
}

/// Payload for creating or editing a place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Chapters the place appears in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapters: Option<Vec<Chapter>>,
}

/// A chapter reference: either a chapter number or a chapter name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Chapter {
    Number(i64),
    Name(String),
}

impl Record for Place {
    type Fields = PlaceFields;
    const ENTITY: &'static str = "Place";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_fields(id: RecordId, fields: PlaceFields) -> Self {
        Place {
            id,
            fields,
            extra: Extra::new(),
        }
    }
}
