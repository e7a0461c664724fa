//! Person store
//!
//! Authoritative in-memory person collection plus the record currently loaded
//! into the edit form. Every transition is total: missing targets are no-ops,
//! and storage failures are absorbed by the repository.
//!
//! Mutating transitions write the whole collection back through the
//! [`PersonRepository`] and then notify subscribers with the new state.

mod id;
mod subscribers;

use std::collections::HashSet;

pub use id::{Clock, IdGenerator, SystemClock};
pub use subscribers::{SubscriptionId, Subscribers};

use crate::person::{Person, PersonDraft};
use crate::storage::PersonRepository;

/// Snapshot of the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonState {
    /// Insertion-ordered collection
    pub persons: Vec<Person>,
    /// Copy of the record being edited, if any
    pub editing_person: Option<Person>,
}

pub struct PersonStore {
    state: PersonState,
    repo: PersonRepository,
    ids: IdGenerator,
    subscribers: Subscribers<PersonState>,
}

impl PersonStore {
    /// Empty store; call [`load`](Self::load) to read persisted data
    pub fn new(repo: PersonRepository) -> Self {
        Self::with_clock(repo, Box::new(SystemClock))
    }

    pub fn with_clock(repo: PersonRepository, clock: Box<dyn Clock>) -> Self {
        Self {
            state: PersonState::default(),
            repo,
            ids: IdGenerator::new(clock),
            subscribers: Subscribers::default(),
        }
    }

    /// Current state
    pub fn snapshot(&self) -> &PersonState {
        &self.state
    }

    pub fn persons(&self) -> &[Person] {
        &self.state.persons
    }

    pub fn editing_person(&self) -> Option<&Person> {
        self.state.editing_person.as_ref()
    }

    pub fn get(&self, id: &str) -> Option<&Person> {
        self.state.persons.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.state.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.persons.is_empty()
    }

    /// Register a callback run after every transition
    pub fn subscribe(&mut self, callback: impl FnMut(&PersonState) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Replace the collection with the persisted one
    pub fn load(&mut self) {
        self.state.persons = self.repo.load();
        self.notify();
    }

    /// Append a new record with a fresh id; returns the id
    pub fn add(&mut self, draft: PersonDraft) -> String {
        let id = self.ids.next_id(&self.state.persons);
        log::debug!("Adding person {}", id);
        self.state.persons.push(draft.with_id(id.clone()));
        self.persist();
        self.notify();
        id
    }

    /// Replace the record with the same id in place; always ends editing.
    ///
    /// Returns false when no record has that id.
    pub fn update(&mut self, person: Person) -> bool {
        let replaced = match self.state.persons.iter_mut().find(|p| p.id == person.id) {
            Some(slot) => {
                log::debug!("Updating person {}", person.id);
                *slot = person;
                true
            }
            None => {
                log::debug!("Update of unknown person {} ignored", person.id);
                false
            }
        };
        if replaced {
            self.persist();
        }
        self.state.editing_person = None;
        self.notify();
        replaced
    }

    /// Remove every record with this id
    pub fn delete_one(&mut self, id: &str) {
        let before = self.state.persons.len();
        self.state.persons.retain(|p| p.id != id);
        log::debug!(
            "Deleted {} person(s) with id {}",
            before - self.state.persons.len(),
            id
        );
        self.persist();
        self.notify();
    }

    /// Remove every record whose id is in `ids`
    pub fn delete_many<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: HashSet<String> = ids.into_iter().map(|s| s.as_ref().to_string()).collect();
        let before = self.state.persons.len();
        self.state.persons.retain(|p| !ids.contains(&p.id));
        log::debug!("Deleted {} person(s)", before - self.state.persons.len());
        self.persist();
        self.notify();
    }

    /// Replace the editing pointer wholesale
    pub fn set_editing(&mut self, person: Option<Person>) {
        self.state.editing_person = person;
        self.notify();
    }

    fn persist(&self) {
        self.repo.save(&self.state.persons);
    }

    fn notify(&mut self) {
        self.subscribers.notify(&self.state);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use proptest::prelude::*;

    use super::*;
    use crate::storage::{KeyValueStorage, MemoryStorage};

    struct ManualClock(Rc<Cell<f64>>);

    impl Clock for ManualClock {
        fn now_ms(&self) -> f64 {
            self.0.get()
        }
    }

    fn draft(first: &str, last: &str) -> PersonDraft {
        PersonDraft {
            title: "ms".into(),
            first_name: first.into(),
            last_name: last.into(),
            nationality: "thai".into(),
            gender: "female".into(),
            phone_code: "+66".into(),
            ..Default::default()
        }
    }

    fn store_on(storage: &Rc<MemoryStorage>) -> PersonStore {
        let repo = PersonRepository::new(Box::new(Rc::clone(storage)));
        PersonStore::with_clock(repo, Box::new(ManualClock(Rc::new(Cell::new(1000.0)))))
    }

    fn reload(storage: &Rc<MemoryStorage>) -> Vec<Person> {
        PersonRepository::new(Box::new(Rc::clone(storage))).load()
    }

    fn ids(store: &PersonStore) -> Vec<&str> {
        store.persons().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_add_edit_update_scenario() {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = store_on(&storage);
        store.load();
        assert!(store.is_empty());

        let id = store.add(draft("Ann", "Lee"));
        assert!(!id.is_empty());
        assert_eq!(store.len(), 1);

        let added = store.persons()[0].clone();
        store.set_editing(Some(added.clone()));
        assert_eq!(store.editing_person(), Some(&added));

        let mut edited = added.clone();
        edited.last_name = "Smith".into();
        assert!(store.update(edited));

        assert_eq!(store.len(), 1);
        assert_eq!(store.persons()[0].last_name, "Smith");
        assert_eq!(store.persons()[0].id, id);
        assert!(store.editing_person().is_none());
        assert_eq!(reload(&storage), store.persons());
    }

    #[test]
    fn test_add_appends_and_persists() {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = store_on(&storage);
        let a = store.add(draft("Ann", "Lee"));
        let b = store.add(draft("Bo", "Kim"));
        assert_ne!(a, b);
        assert_eq!(ids(&store), vec![a.as_str(), b.as_str()]);

        let persisted = reload(&storage);
        assert_eq!(persisted.len(), 2);
        assert_eq!(persisted[1].to_draft(), draft("Bo", "Kim"));
    }

    #[test]
    fn test_load_replaces_collection_and_keeps_editing() {
        let storage = Rc::new(MemoryStorage::new());
        let mut writer = store_on(&storage);
        writer.add(draft("Ann", "Lee"));

        let mut store = store_on(&storage);
        let editing = draft("X", "Y").with_id("x");
        store.set_editing(Some(editing.clone()));
        store.load();
        assert_eq!(store.len(), 1);
        assert_eq!(store.editing_person(), Some(&editing));
    }

    #[test]
    fn test_add_after_load_avoids_stored_ids() {
        let storage = Rc::new(MemoryStorage::new());
        let mut first = store_on(&storage);
        first.add(draft("Ann", "Lee"));

        // Second session with the same frozen clock
        let mut second = store_on(&storage);
        second.load();
        second.add(draft("Bo", "Kim"));
        assert_eq!(ids(&second), vec!["1000", "1001"]);
    }

    #[test]
    fn test_update_unknown_id_is_noop_but_clears_editing() {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = store_on(&storage);
        store.add(draft("Ann", "Lee"));
        let before = store.persons().to_vec();
        let saved_before = storage.get_item("persons").unwrap();

        store.set_editing(Some(before[0].clone()));
        assert!(!store.update(draft("Ghost", "Person").with_id("missing")));

        assert_eq!(store.persons(), before.as_slice());
        assert!(store.editing_person().is_none());
        assert_eq!(storage.get_item("persons").unwrap(), saved_before);
    }

    #[test]
    fn test_update_preserves_positions() {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = store_on(&storage);
        store.add(draft("A", "1"));
        let mid = store.add(draft("B", "2"));
        store.add(draft("C", "3"));

        assert!(store.update(draft("B", "changed").with_id(mid.clone())));
        let names: Vec<_> = store.persons().iter().map(|p| p.last_name.as_str()).collect();
        assert_eq!(names, vec!["1", "changed", "3"]);
        assert_eq!(store.persons()[1].id, mid);
    }

    #[test]
    fn test_delete_one_and_many() {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = store_on(&storage);
        let a = store.add(draft("A", "1"));
        let b = store.add(draft("B", "2"));
        let c = store.add(draft("C", "3"));
        let d = store.add(draft("D", "4"));

        store.delete_one(&b);
        assert_eq!(ids(&store), vec![a.as_str(), c.as_str(), d.as_str()]);

        store.delete_one("nope");
        assert_eq!(store.len(), 3);

        store.delete_many([&a, &d, &"nope".to_string()]);
        assert_eq!(ids(&store), vec![c.as_str()]);
        assert_eq!(reload(&storage).len(), 1);
    }

    #[test]
    fn test_delete_one_removes_duplicates() {
        let storage = Rc::new(MemoryStorage::new());
        let dup = vec![
            draft("A", "1").with_id("dup"),
            draft("B", "2").with_id("keep"),
            draft("C", "3").with_id("dup"),
        ];
        PersonRepository::new(Box::new(Rc::clone(&storage))).save(&dup);

        let mut store = store_on(&storage);
        store.load();
        store.delete_one("dup");
        assert_eq!(ids(&store), vec!["keep"]);
    }

    #[test]
    fn test_subscribers_see_post_state() {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = store_on(&storage);
        let lens = Rc::new(RefCell::new(Vec::new()));
        let sub = {
            let lens = lens.clone();
            store.subscribe(move |state: &PersonState| {
                lens.borrow_mut()
                    .push((state.persons.len(), state.editing_person.is_some()))
            })
        };

        let id = store.add(draft("A", "1"));
        let person = store.get(&id).cloned();
        store.set_editing(person);
        store.delete_one(&id);
        assert!(store.unsubscribe(sub));
        store.add(draft("B", "2"));

        assert_eq!(*lens.borrow(), vec![(1, false), (1, true), (0, true)]);
    }

    proptest! {
        #[test]
        fn prop_delete_many_matches_repeated_delete_one(
            picks in proptest::collection::vec(0usize..8, 0..8),
            reversed in any::<bool>(),
        ) {
            let storage_a = Rc::new(MemoryStorage::new());
            let storage_b = Rc::new(MemoryStorage::new());
            let mut many = store_on(&storage_a);
            let mut one = store_on(&storage_b);
            for i in 0..8 {
                many.add(draft(&format!("P{}", i), "x"));
                one.add(draft(&format!("P{}", i), "x"));
            }

            let mut targets: Vec<String> =
                picks.iter().map(|&i| many.persons()[i].id.clone()).collect();
            many.delete_many(&targets);
            if reversed {
                targets.reverse();
            }
            for id in &targets {
                one.delete_one(id);
            }

            prop_assert_eq!(many.persons(), one.persons());
            // Survivors keep their relative order
            let positions: Vec<u64> =
                many.persons().iter().map(|p| p.id.parse().unwrap()).collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn prop_added_records_survive_reload(
            names in proptest::collection::vec("[A-Za-z]{1,8}", 1..6),
        ) {
            let storage = Rc::new(MemoryStorage::new());
            let mut store = store_on(&storage);
            for name in &names {
                store.add(draft(name, "Doe"));
            }
            let reloaded = reload(&storage);
            prop_assert_eq!(reloaded.len(), names.len());
            for (person, name) in reloaded.iter().zip(&names) {
                prop_assert_eq!(person.to_draft(), draft(name, "Doe"));
            }
            let unique: HashSet<_> = reloaded.iter().map(|p| &p.id).collect();
            prop_assert_eq!(unique.len(), names.len());
        }
    }
}
