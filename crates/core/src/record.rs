//! The [`Record`] trait and the in-memory operations every store shares.
//!
//! A resource file is an ordered sequence of records. These helpers perform
//! the mutate-in-memory step of each read-modify-write cycle; the caller is
//! responsible for loading and persisting the sequence around them.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::RecordId;

/// A persisted resource keyed by a store-assigned integer id.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The declared non-id field set, used as the payload for create and edit.
    type Fields: DeserializeOwned + Send + Sync + 'static;

    /// Human-readable entity name used in error messages and logs.
    const ENTITY: &'static str;

    fn id(&self) -> RecordId;

    /// Assemble a record from an id and exactly the declared field set.
    fn from_fields(id: RecordId, fields: Self::Fields) -> Self;
}

/// A record found by [`find_by_id`], together with its position.
#[derive(Debug)]
pub struct Located<'a, R> {
    pub index: usize,
    pub record: &'a R,
}

/// Linear scan for the first record whose id equals `id`.
///
/// Does not assume the sequence is ordered by id.
pub fn find_by_id<R: Record>(records: &[R], id: RecordId) -> Option<Located<'_, R>> {
    records
        .iter()
        .enumerate()
        .find(|(_, record)| record.id() == id)
        .map(|(index, record)| Located { index, record })
}

/// The id the next inserted record receives: one past the largest existing
/// id, or `0` for an empty sequence.
///
/// Ids freed by deletion are never handed out again while a larger id is
/// still present.
pub fn next_id<R: Record>(records: &[R]) -> Result<RecordId, CoreError> {
    match records.iter().map(Record::id).max() {
        None => Ok(0),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| CoreError::Internal(format!("{} id space exhausted", R::ENTITY))),
    }
}

/// Append a new record built from `fields` and return a copy of it.
pub fn insert<R: Record>(records: &mut Vec<R>, fields: R::Fields) -> Result<R, CoreError> {
    let id = next_id(records)?;
    let record = R::from_fields(id, fields);
    records.push(record.clone());
    Ok(record)
}

/// Replace the record with `id` in place, keeping its id and position.
///
/// Returns `false` if no record has that id.
pub fn replace<R: Record>(records: &mut [R], id: RecordId, fields: R::Fields) -> bool {
    let Some(index) = find_by_id(records, id).map(|found| found.index) else {
        return false;
    };
    records[index] = R::from_fields(id, fields);
    true
}

/// Remove the record with `id`, shifting later records down by one.
pub fn remove<R: Record>(records: &mut Vec<R>, id: RecordId) -> Option<R> {
    let index = find_by_id(records, id)?.index;
    Some(records.remove(index))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: RecordId,
        text: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    struct NoteFields {
        text: Option<String>,
    }

    impl Record for Note {
        type Fields = NoteFields;
        const ENTITY: &'static str = "Note";

        fn id(&self) -> RecordId {
            self.id
        }

        fn from_fields(id: RecordId, fields: NoteFields) -> Self {
            Note {
                id,
                text: fields.text,
            }
        }
    }

    fn note(id: RecordId) -> Note {
        Note {
            id,
            text: Some(format!("note {id}")),
        }
    }

    fn fields(text: &str) -> NoteFields {
        NoteFields {
            text: Some(text.to_string()),
        }
    }

    fn ids(records: &[Note]) -> Vec<RecordId> {
        records.iter().map(|n| n.id).collect()
    }

    #[test]
    fn next_id_is_zero_for_empty_sequence() {
        let records: Vec<Note> = Vec::new();
        assert_eq!(next_id(&records).unwrap(), 0);
    }

    #[test]
    fn next_id_follows_largest_id_not_last_element() {
        let records = vec![note(4), note(9), note(2)];
        assert_eq!(next_id(&records).unwrap(), 10);
    }

    #[test]
    fn next_id_reports_exhausted_id_space() {
        let records = vec![note(RecordId::MAX)];
        let err = next_id(&records).unwrap_err();
        assert_eq!(err.to_string(), "Internal error: Note id space exhausted");
    }

    #[test]
    fn find_by_id_returns_first_match_with_index() {
        let records = vec![note(3), note(1), note(7)];
        let found = find_by_id(&records, 1).unwrap();
        assert_eq!(found.index, 1);
        assert_eq!(found.record, &records[1]);
    }

    #[test]
    fn find_by_id_missing_returns_none() {
        let records = vec![note(0), note(1)];
        assert!(find_by_id(&records, 5).is_none());
    }

    #[test]
    fn find_by_id_is_idempotent() {
        let records = vec![note(0), note(1), note(2)];
        let first = find_by_id(&records, 2).map(|f| f.record.clone());
        let second = find_by_id(&records, 2).map(|f| f.record.clone());
        assert_eq!(first, second);
    }

    #[test]
    fn insert_appends_with_next_id() {
        let mut records = vec![note(0), note(1)];
        let created = insert(&mut records, fields("fresh")).unwrap();
        assert_eq!(created.id, 2);
        assert_eq!(ids(&records), vec![0, 1, 2]);
        assert_eq!(records[2].text.as_deref(), Some("fresh"));
    }

    #[test]
    fn insert_does_not_reuse_deleted_tail_gap() {
        let mut records = vec![note(0), note(5)];
        remove(&mut records, 0);
        let created = insert(&mut records, fields("after")).unwrap();
        assert_eq!(created.id, 6);
    }

    #[test]
    fn replace_keeps_id_and_position() {
        let mut records = vec![note(0), note(1), note(2)];
        assert!(replace(&mut records, 1, fields("changed")));
        assert_eq!(ids(&records), vec![0, 1, 2]);
        assert_eq!(records[1].text.as_deref(), Some("changed"));
    }

    #[test]
    fn replace_drops_fields_absent_from_payload() {
        let mut records = vec![note(0)];
        assert!(replace(&mut records, 0, NoteFields { text: None }));
        assert_eq!(records[0], Note { id: 0, text: None });
    }

    #[test]
    fn replace_missing_id_leaves_sequence_untouched() {
        let mut records = vec![note(0)];
        assert!(!replace(&mut records, 3, fields("nope")));
        assert_eq!(records, vec![note(0)]);
    }

    #[test]
    fn remove_preserves_relative_order() {
        let mut records = vec![note(0), note(1), note(2)];
        let removed = remove(&mut records, 1).unwrap();
        assert_eq!(removed.id, 1);
        assert_eq!(ids(&records), vec![0, 2]);
    }

    #[test]
    fn remove_missing_id_returns_none() {
        let mut records = vec![note(0)];
        assert!(remove(&mut records, 9).is_none());
        assert_eq!(records.len(), 1);
    }
}
