//! Observability
//!
//! Structured logging for camvirt tooling.

pub mod logging;

pub use logging::{LogFormat, init_logging};
