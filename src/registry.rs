//! Daemon and machine registries
//!
//! Configuration documents refer to daemons and control machines by name.
//! A [`Registry`] maps those names to resolved descriptors, and a
//! [`Registries`] pair supplies the format checkers the schema uses to
//! reject unknown names during validation.
//!
//! Lookups that miss produce a [`ConfigError::Reference`] carrying the
//! closest registered name when one is similar enough to be a plausible
//! typo.

use std::fmt;
use std::net::IpAddr;
use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::ConfigError;
use crate::validation::Formats;

/// Format name for strings that must resolve in the daemon registry.
pub const DAEMON_NAME: &str = "daemon_name";

/// Format name for strings that must resolve in the machine registry.
pub const MACHINE_NAME: &str = "machine_name";

/// Similarity floor for typo suggestions (Jaro-Winkler).
const SUGGESTION_THRESHOLD: f64 = 0.8;

// ============================================================================
// Descriptors
// ============================================================================

/// Network endpoint of a daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaemonDescriptor {
    /// Registry name of the daemon
    pub name: String,
    /// Host the daemon runs on
    pub host: String,
    /// TCP port the daemon listens on
    pub port: u16,
}

impl DaemonDescriptor {
    /// Create a descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for DaemonDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.name, self.host, self.port)
    }
}

/// Resolved address of a control machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineAddress {
    /// Registry name of the machine
    pub name: String,
    /// IP address commands from this machine arrive from
    pub ip: IpAddr,
}

impl MachineAddress {
    /// Create a machine address.
    #[must_use]
    pub fn new(name: impl Into<String>, ip: IpAddr) -> Self {
        Self {
            name: name.into(),
            ip,
        }
    }
}

impl fmt::Display for MachineAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.ip)
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Which registry a name was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    /// Daemon endpoints
    Daemon,
    /// Control machines
    Machine,
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daemon => write!(f, "daemon"),
            Self::Machine => write!(f, "machine"),
        }
    }
}

/// An ordered name-to-descriptor table.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    kind: RegistryKind,
    entries: IndexMap<String, T>,
}

impl<T> Registry<T> {
    /// Create an empty registry of the given kind.
    #[must_use]
    pub fn new(kind: RegistryKind) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
        }
    }

    /// Which kind of names this registry holds.
    #[must_use]
    pub const fn kind(&self) -> RegistryKind {
        self.kind
    }

    /// Register `entry` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, entry: T) -> Option<T> {
        self.entries.insert(name.into(), entry)
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Look up `name`, if registered.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    /// Look up `name`, producing a [`ConfigError::Reference`] on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Reference`] when `name` is not registered,
    /// carrying the closest registered name if one is similar enough.
    pub fn resolve(&self, name: &str) -> Result<&T, ConfigError> {
        self.get(name).ok_or_else(|| ConfigError::Reference {
            kind: self.kind,
            name: name.to_string(),
            suggestion: self.suggest(name).map(str::to_string),
        })
    }

    /// The registered name most similar to `name`, if any clears the
    /// suggestion threshold.
    #[must_use]
    pub fn suggest(&self, name: &str) -> Option<&str> {
        self.entries
            .keys()
            .map(|candidate| (candidate, strsim::jaro_winkler(name, candidate)))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|left, right| left.1.total_cmp(&right.1))
            .map(|(candidate, _)| candidate.as_str())
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Registered entries, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Format-checker body: accept registered names, reject the rest with a
    /// message that names the closest match when one exists.
    fn check_name(&self, value: &str) -> Result<(), String> {
        if self.contains(value) {
            return Ok(());
        }
        Err(self.suggest(value).map_or_else(
            || format!("unknown {} '{value}'", self.kind),
            |similar| format!("unknown {} '{value}' (closest match: '{similar}')", self.kind),
        ))
    }
}

// ============================================================================
// Registries
// ============================================================================

/// The daemon and machine registries a configuration resolves against.
#[derive(Debug, Clone)]
pub struct Registries {
    /// Daemon endpoints by name
    pub daemons: Registry<DaemonDescriptor>,
    /// Control machines by name
    pub machines: Registry<MachineAddress>,
}

impl Registries {
    /// Create a pair of empty registries.
    #[must_use]
    pub fn new() -> Self {
        Self {
            daemons: Registry::new(RegistryKind::Daemon),
            machines: Registry::new(RegistryKind::Machine),
        }
    }

    /// Format checkers for `daemon_name` and `machine_name`, closing over
    /// this pair. Registered under [`DAEMON_NAME`] and [`MACHINE_NAME`].
    #[must_use]
    pub fn formats(&self) -> Formats<'_> {
        let mut formats = Formats::new();
        formats.register(DAEMON_NAME, move |value| self.daemons.check_name(value));
        formats.register(MACHINE_NAME, move |value| self.machines.check_name(value));
        formats
    }

    /// The built-in site catalog.
    #[must_use]
    pub fn site() -> &'static Self {
        &SITE
    }
}

impl Default for Registries {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Site catalog
// ============================================================================

// name, host, port
const SITE_DAEMONS: &[(&str, &str, u16)] = &[
    ("camvirt_daemon", "ops-server", 9041),
    ("dome_east_camera_daemon", "dome-east-pi", 9042),
    ("dome_west_camera_daemon", "dome-west-pi", 9043),
    ("allsky_camera_daemon", "roof-pi", 9044),
    ("focus_camera_daemon", "ops-server", 9045),
];

// name, address
const SITE_MACHINES: &[(&str, &str)] = &[
    ("ops_server", "10.2.6.10"),
    ("dome_east_pi", "10.2.6.21"),
    ("dome_west_pi", "10.2.6.22"),
    ("roof_pi", "10.2.6.23"),
    ("observer_desktop", "10.2.6.30"),
];

static SITE: LazyLock<Registries> = LazyLock::new(|| {
    let mut registries = Registries::new();
    for (name, host, port) in SITE_DAEMONS {
        registries
            .daemons
            .insert(*name, DaemonDescriptor::new(*name, *host, *port));
    }
    for (name, address) in SITE_MACHINES {
        let ip = address.parse().expect("site catalog addresses are valid");
        registries
            .machines
            .insert(*name, MachineAddress::new(*name, ip));
    }
    registries
});
