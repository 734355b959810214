//! SQLite persistence for the compliance register.
//!
//! One [`Store`] wraps a shared connection and exposes typed CRUD for
//! organizations, departments, processing activities, breach incidents
//! and PIA records. List-valued fields are stored as JSON text; enums
//! as their wire strings.

mod error;
mod seed;
mod store;

pub use error::StoreError;
pub use seed::seed_demo;
pub use store::{NewIncident, Store};
