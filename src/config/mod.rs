//! Configuration loading
//!
//! Reads a JSON configuration document, validates it against the fixed
//! daemon-configuration schema, and resolves daemon and machine names into
//! a [`Config`].

pub mod loader;
pub mod schema;

pub use loader::{CameraBinding, Config};
pub use schema::document_schema;
