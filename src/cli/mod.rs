//! Command-line interface
//!
//! Argument definitions and command handlers for the `camvirt` binary.

pub mod args;
pub mod commands;
