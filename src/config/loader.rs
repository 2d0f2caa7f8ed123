//! Configuration loading pipeline
//!
//! This module implements the configuration loading pipeline:
//! 1. Read the raw file content
//! 2. JSON parsing
//! 3. Schema validation (shape, registry-backed formats, bounds)
//! 4. Name resolution into typed descriptors
//!
//! Stages run strictly in order, so a parse failure is never reported as a
//! schema violation and an unresolvable name is never reported before the
//! document shape has been accepted.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::schema::document_schema;
use crate::error::{ConfigError, ValidationIssue};
use crate::registry::{DaemonDescriptor, MachineAddress, Registries};
use crate::validation;

// ============================================================================
// Resolved configuration
// ============================================================================

/// A camera and the daemon and domain it is bound to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraBinding {
    /// Daemon that exposes this camera
    pub daemon: DaemonDescriptor,
    /// Domain the camera belongs to
    pub domain: String,
}

/// A loaded, validated, and resolved daemon configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    /// Endpoint of the daemon this configuration drives
    pub daemon: DaemonDescriptor,
    /// Log name, passed through verbatim
    pub log_name: String,
    /// Machines allowed to issue control commands, in document order
    pub control_ips: Vec<MachineAddress>,
    /// Seconds to wait for cameras to initialize
    pub initialize_timeout: f64,
    /// Seconds to wait for cameras to shut down
    pub shutdown_timeout: f64,
    /// Domain identifiers, in document order
    pub domains: Vec<String>,
    /// Camera bindings keyed by camera identifier, in document order
    pub cameras: IndexMap<String, CameraBinding>,
}

/// Document shape after schema validation, before name resolution.
#[derive(Debug, Deserialize)]
struct RawConfig {
    daemon: String,
    log_name: String,
    control_machines: Vec<String>,
    initialize_timeout: f64,
    shutdown_timeout: f64,
    domains: IndexMap<String, IndexMap<String, String>>,
}

impl Config {
    /// Load and resolve the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - JSON parsing fails
    /// - The document violates the configuration schema
    /// - A daemon or machine name does not resolve
    pub fn load(path: impl AsRef<Path>, registries: &Registries) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        // Stage 0: read raw file content
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::File {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&raw, path, registries)
    }

    /// Parse, validate, and resolve a configuration document held in
    /// memory. `origin` labels the document in errors.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`], minus the file read.
    pub fn from_json_str(
        raw: &str,
        origin: impl AsRef<Path>,
        registries: &Registries,
    ) -> Result<Self, ConfigError> {
        let origin = origin.as_ref();

        // Tolerate a UTF-8 BOM
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

        // Stage 1: JSON parsing
        let document: Value = serde_json::from_str(raw).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        })?;

        // Stage 2: schema validation with registry-backed format checkers
        let formats = registries.formats();
        let result = validation::validate(&document, document_schema(), &formats);
        if result.has_errors() {
            return Err(ConfigError::Schema {
                path: origin.display().to_string(),
                issues: result.errors,
            });
        }

        // Stage 3: deserialize the validated document
        let raw_config: RawConfig =
            serde_json::from_value(document).map_err(|e| ConfigError::Parse {
                path: origin.to_path_buf(),
                line: 0,
                column: 0,
                message: format!("failed to deserialize configuration: {e}"),
            })?;

        // Stage 4: resolve names against the registries
        Self::resolve(raw_config, registries)
    }

    fn resolve(raw: RawConfig, registries: &Registries) -> Result<Self, ConfigError> {
        let daemon = registries.daemons.resolve(&raw.daemon)?.clone();

        let control_ips = raw
            .control_machines
            .iter()
            .map(|name| registries.machines.resolve(name).cloned())
            .collect::<Result<Vec<_>, _>>()?;

        let mut domains = Vec::with_capacity(raw.domains.len());
        let mut cameras = IndexMap::new();
        for (domain_id, domain_cameras) in raw.domains {
            domains.push(domain_id.clone());
            for (camera_id, daemon_name) in domain_cameras {
                let binding = CameraBinding {
                    daemon: registries.daemons.resolve(&daemon_name)?.clone(),
                    domain: domain_id.clone(),
                };
                // A camera id claimed by several domains keeps the last
                // definition, at its original position.
                if let Some(previous) = cameras.insert(camera_id.clone(), binding) {
                    let warning = ValidationIssue::warning(
                        format!("domains.{domain_id}.{camera_id}"),
                        format!(
                            "camera '{camera_id}' is defined in both '{}' and '{domain_id}'; keeping the '{domain_id}' entry",
                            previous.domain
                        ),
                    );
                    tracing::warn!("{warning}");
                }
            }
        }

        Ok(Self {
            daemon,
            log_name: raw.log_name,
            control_ips,
            initialize_timeout: raw.initialize_timeout,
            shutdown_timeout: raw.shutdown_timeout,
            domains,
            cameras,
        })
    }
}
