//! Person collection persistence
//!
//! The slot holds the whole collection as one JSON array. Every save replaces
//! it; there are no incremental writes.

use super::{KeyValueStorage, StorageError};
use crate::consts::PERSONS_KEY;
use crate::person::Person;

/// Whole-snapshot load/save of the person collection
pub struct PersonRepository {
    storage: Box<dyn KeyValueStorage>,
    key: String,
}

impl PersonRepository {
    /// Repository on the default `persons` slot
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, PERSONS_KEY)
    }

    pub fn with_key(storage: Box<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the slot, surfacing every failure
    pub fn try_load(&self) -> Result<Vec<Person>, StorageError> {
        let Some(json) = self.storage.get_item(&self.key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&json).map_err(|source| StorageError::Decode {
            key: self.key.clone(),
            source,
        })
    }

    /// Overwrite the slot with the given collection
    pub fn try_save(&self, persons: &[Person]) -> Result<(), StorageError> {
        let json = serde_json::to_string(persons).map_err(|source| StorageError::Encode {
            key: self.key.clone(),
            source,
        })?;
        self.storage.set_item(&self.key, &json)
    }

    /// Load the collection; missing or corrupt data yields an empty one
    pub fn load(&self) -> Vec<Person> {
        match self.try_load() {
            Ok(persons) => {
                log::info!("Loaded {} persons", persons.len());
                persons
            }
            Err(err) => {
                log::warn!("Discarding stored persons: {}", err);
                Vec::new()
            }
        }
    }

    /// Save the collection; failures are logged and dropped
    pub fn save(&self, persons: &[Person]) {
        match self.try_save(persons) {
            Ok(()) => log::debug!("Persons saved ({} entries)", persons.len()),
            Err(err) => log::warn!("Persons not saved: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use proptest::prelude::*;

    use super::*;
    use crate::person::PersonDraft;
    use crate::storage::{MemoryStorage, Unavailable};

    fn sample(id: &str, first: &str) -> Person {
        PersonDraft {
            title: "mr".into(),
            first_name: first.into(),
            last_name: "Lee".into(),
            nationality: "thai".into(),
            gender: "male".into(),
            phone_code: "+66".into(),
            ..Default::default()
        }
        .with_id(id)
    }

    fn shared() -> (Rc<MemoryStorage>, PersonRepository) {
        let storage = Rc::new(MemoryStorage::new());
        let repo = PersonRepository::new(Box::new(Rc::clone(&storage)));
        (storage, repo)
    }

    #[test]
    fn test_load_absent_slot_is_empty() {
        let (_, repo) = shared();
        assert!(repo.load().is_empty());
        assert!(repo.try_load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let (storage, repo) = shared();
        let persons = vec![sample("1", "Ann"), sample("2", "Bo")];
        repo.save(&persons);

        assert!(storage.get_item("persons").unwrap().unwrap().starts_with('['));
        assert_eq!(repo.load(), persons);
    }

    #[test]
    fn test_save_replaces_whole_collection() {
        let (_, repo) = shared();
        repo.save(&[sample("1", "Ann"), sample("2", "Bo")]);
        repo.save(&[sample("3", "Cy")]);

        let loaded = repo.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "3");
    }

    #[test]
    fn test_corrupt_slot_loads_empty() {
        let (storage, repo) = shared();
        for garbage in ["not json", "{\"id\":\"1\"}", "[1,2,3]", ""] {
            storage.set_item("persons", garbage).unwrap();
            assert!(repo.load().is_empty(), "garbage {:?} should load empty", garbage);
            assert!(matches!(repo.try_load(), Err(StorageError::Decode { .. })));
        }
    }

    #[test]
    fn test_unavailable_storage_is_silent() {
        let repo = PersonRepository::new(Box::new(Unavailable));
        repo.save(&[sample("1", "Ann")]);
        assert!(repo.load().is_empty());
        assert!(matches!(
            repo.try_save(&[]),
            Err(StorageError::Unavailable)
        ));
    }

    #[test]
    fn test_custom_key() {
        let storage = Rc::new(MemoryStorage::new());
        let repo = PersonRepository::with_key(Box::new(Rc::clone(&storage)), "people_v1");
        repo.save(&[sample("1", "Ann")]);
        assert_eq!(repo.key(), "people_v1");
        assert!(storage.get_item("persons").unwrap().is_none());
        assert!(storage.get_item("people_v1").unwrap().is_some());
    }

    fn person_from(fields: Vec<String>) -> Person {
        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        Person {
            id: next(),
            title: next(),
            first_name: next(),
            last_name: next(),
            birthday: next(),
            nationality: next(),
            citizen_id: next(),
            gender: next(),
            phone: next(),
            phone_code: next(),
            passport_no: next(),
            salary: next(),
        }
    }

    proptest! {
        #[test]
        fn prop_save_load_roundtrip_any_strings(
            rows in proptest::collection::vec(
                proptest::collection::vec(
                    prop_oneof![
                        any::<String>(),
                        Just(String::new()),
                        Just("\"quoted\" \\ back".to_string()),
                        Just("ไทย 日本 🙂".to_string()),
                    ],
                    12,
                ),
                0..6,
            ),
        ) {
            let (_, repo) = shared();
            let persons: Vec<Person> = rows.into_iter().map(person_from).collect();
            repo.save(&persons);
            prop_assert_eq!(repo.load(), persons);
        }
    }
}
