//! `camvirt` - configuration tooling for multi-domain camera-control daemons
//!
//! This library loads, validates, and resolves the JSON configuration
//! documents that describe a camera-control deployment: the daemon to run,
//! the machines allowed to control it, startup/shutdown timeouts, and the
//! mapping of logical domains to cameras.

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod registry;
pub mod validation;
