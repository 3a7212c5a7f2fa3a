//! Fan chart support library.
//! - `api` / `person`: load WikiTree profiles into a navigable person graph.
//! - `settings`: build the tabbed settings dialog from a declarative registry
//!   and detect edits.

pub mod api;
pub mod config;
pub mod error;
pub mod person;
pub mod settings;

pub use api::TreeApi;
pub use config::AppConfig;
pub use error::{ApiError, ConfigError};
pub use person::{Person, PersonId, Relatives};
