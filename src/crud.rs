//! CRUD page controller
//!
//! Turns user intents (submit, edit, cancel, delete, select, page) into
//! person store transitions and keeps the form, pagination and selection
//! consistent with the store afterwards.

use crate::config::AppConfig;
use crate::form::{FormError, PersonForm};
use crate::person::Person;
use crate::storage::{KeyValueStorage, PersonRepository};
use crate::store::PersonStore;
use crate::table::{Pagination, Selection};

/// What a successful submit did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Added(String),
    Updated(String),
    /// The record being edited was deleted before the submit
    Missing(String),
}

pub struct CrudPage {
    store: PersonStore,
    form: PersonForm,
    pagination: Pagination,
    selection: Selection,
    default_phone_code: String,
}

impl CrudPage {
    pub fn new(store: PersonStore, config: &AppConfig) -> Self {
        Self {
            store,
            form: PersonForm::with_phone_code(&config.default_phone_code),
            pagination: Pagination::new(config.page_size),
            selection: Selection::new(),
            default_phone_code: config.default_phone_code.clone(),
        }
    }

    /// Page wired to the configured slot of `storage`
    pub fn with_storage(storage: Box<dyn KeyValueStorage>, config: &AppConfig) -> Self {
        let repo = PersonRepository::with_key(storage, config.storage_key.clone());
        Self::new(PersonStore::new(repo), config)
    }

    /// Read persisted records
    pub fn mount(&mut self) {
        self.store.load();
        self.pagination.clamp(self.store.len());
        log::info!("CRUD page mounted with {} persons", self.store.len());
    }

    pub fn store(&self) -> &PersonStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PersonStore {
        &mut self.store
    }

    pub fn form(&self) -> &PersonForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PersonForm {
        &mut self.form
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_editing(&self) -> bool {
        self.store.editing_person().is_some()
    }

    /// Validate the form and add or update; the form resets on success.
    ///
    /// The store notifies once per submit. `update` already ends editing.
    pub fn submit(&mut self) -> Result<Submitted, FormError> {
        let draft = self.form.validate()?;
        let editing_id = self.store.editing_person().map(|p| p.id.clone());
        let outcome = match editing_id {
            Some(id) if self.store.update(draft.clone().with_id(id.clone())) => Submitted::Updated(id),
            Some(id) => Submitted::Missing(id),
            None => Submitted::Added(self.store.add(draft)),
        };
        self.form.reset(&self.default_phone_code);
        Ok(outcome)
    }

    /// Load a copy of the record into the form; false if it is gone
    pub fn edit(&mut self, id: &str) -> bool {
        let Some(person) = self.store.get(id).cloned() else {
            log::warn!("Edit of unknown person {}", id);
            return false;
        };
        self.form = PersonForm::from_person(&person);
        self.store.set_editing(Some(person));
        true
    }

    pub fn cancel_edit(&mut self) {
        self.store.set_editing(None);
        self.form.reset(&self.default_phone_code);
    }

    /// Clear the form without leaving edit mode
    pub fn reset_form(&mut self) {
        self.form.reset(&self.default_phone_code);
    }

    pub fn delete(&mut self, id: &str) {
        self.store.delete_one(id);
        self.after_delete();
    }

    /// Delete every checked row and clear the selection
    pub fn delete_selected(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let ids = self.selection.ids().to_vec();
        self.store.delete_many(&ids);
        self.selection.clear();
        self.after_delete();
    }

    pub fn toggle_row(&mut self, id: &str, checked: bool) {
        self.selection.toggle(id, checked);
    }

    /// Header checkbox over the visible page
    pub fn toggle_page(&mut self, checked: bool) {
        let page = self.pagination.page_slice(self.store.persons());
        self.selection.set_all(page, checked);
    }

    pub fn page_all_checked(&self) -> bool {
        self.selection.all_checked(self.rows())
    }

    pub fn next_page(&mut self) {
        self.pagination.next(self.store.len());
    }

    pub fn prev_page(&mut self) {
        self.pagination.prev();
    }

    /// Records on the visible page
    pub fn rows(&self) -> &[Person] {
        self.pagination.page_slice(self.store.persons())
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.store.len())
    }

    pub fn page_label(&self) -> String {
        self.pagination.label(self.store.len())
    }

    fn after_delete(&mut self) {
        let persons = self.store.persons();
        self.selection.retain_existing(persons);
        self.pagination.clamp(persons.len());
    }
}
