//! Shape CRUD - shape grid widget and person editor
//!
//! Core modules:
//! - `shapes`: Six-shape arrangement engine (rotate, swap halves, shuffle)
//! - `person`: Person record and form option sets
//! - `storage`: Key-value storage backends and the person persistence adapter
//! - `store`: Person store with editing pointer and change subscriptions
//! - `form`, `table`, `crud`: View/controller state for the CRUD page
//! - `config`: App configuration persisted next to the data
//! - `platform`: Browser/native platform abstraction

pub mod config;
pub mod crud;
pub mod form;
pub mod person;
pub mod platform;
pub mod shapes;
pub mod storage;
pub mod store;
pub mod table;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::AppConfig;
pub use crud::CrudPage;
pub use form::{FormError, FormField, PersonForm};
pub use person::{Gender, Nationality, Person, PersonDraft, Title};
pub use shapes::{Direction, ShapeArrangement, ShapeKind};
pub use storage::{KeyValueStorage, MemoryStorage, PersonRepository, StorageError, Unavailable};
pub use store::{PersonState, PersonStore, SubscriptionId};
pub use table::{Pagination, Selection};

/// App configuration constants
pub mod consts {
    /// LocalStorage slot holding the person collection
    pub const PERSONS_KEY: &str = "persons";
    /// LocalStorage slot holding the app configuration
    pub const CONFIG_KEY: &str = "shape_crud_config";
    /// Rows per table page
    pub const DEFAULT_PAGE_SIZE: usize = 5;
    /// Phone code preselected in a fresh form
    pub const DEFAULT_PHONE_CODE: &str = "+66";
    /// Number of shapes in the grid
    pub const SHAPE_COUNT: usize = 6;
}
