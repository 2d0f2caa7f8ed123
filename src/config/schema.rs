//! Fixed schema for daemon configuration documents
//!
//! The document shape is not user-extensible: a top-level object with
//! exactly the six required keys, no others. Domain and camera identifiers
//! are free-form object keys; every daemon and machine reference must
//! satisfy the registry-backed format checkers.

use std::sync::LazyLock;

use crate::registry;
use crate::validation::{Additional, ObjectSchema, Schema};

/// Top-level keys every configuration document must carry, in schema order.
pub const REQUIRED_KEYS: &[&str] = &[
    "daemon",
    "log_name",
    "control_machines",
    "initialize_timeout",
    "shutdown_timeout",
    "domains",
];

static DOCUMENT_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::Object(ObjectSchema {
        properties: vec![
            ("daemon", Schema::string_with_format(registry::DAEMON_NAME)),
            ("log_name", Schema::string()),
            (
                "control_machines",
                Schema::array_of(Schema::string_with_format(registry::MACHINE_NAME)),
            ),
            ("initialize_timeout", Schema::number_with_minimum(1.0)),
            ("shutdown_timeout", Schema::number_with_minimum(1.0)),
            (
                "domains",
                Schema::map_of(Schema::map_of(Schema::string_with_format(
                    registry::DAEMON_NAME,
                ))),
            ),
        ],
        required: REQUIRED_KEYS.to_vec(),
        additional: Additional::Forbid,
    })
});

/// The schema every configuration document is validated against.
#[must_use]
pub fn document_schema() -> &'static Schema {
    &DOCUMENT_SCHEMA
}
