//! Host capability contracts.
//!
//! Everything the core consumes from its surrounding host beyond project
//! state: ambient settings, reference mutation, and script execution. The
//! core forwards to these; it never implements their semantics.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::metadata::ReferenceMetadata;

/// A configured package source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSource {
    /// Human-readable source name.
    pub name: String,
    /// URL or directory path of the source.
    pub location: String,
    /// Disabled sources are kept in settings but skipped during restore.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl PackageSource {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        PackageSource {
            name: name.into(),
            location: location.into(),
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Ambient settings the host's configuration subsystem resolves. Values
/// arrive already parsed; loading settings files is not this crate's job.
pub trait SettingsProvider: Send + Sync {
    /// Enabled package sources, in resolution order.
    fn enabled_sources(&self) -> Vec<PackageSource>;

    /// Fallback folders consulted before any source.
    fn fallback_package_folders(&self) -> Vec<PathBuf>;

    /// The machine-wide packages folder.
    fn global_packages_folder(&self) -> PathBuf;

    /// Settings files that produced these values.
    fn config_file_paths(&self) -> Vec<PathBuf>;
}

/// Mutation of the live project's references. Pass-through only: the core
/// forwards arguments verbatim and reports the host's boolean outcome.
/// Must be invoked under affinity.
pub trait ReferenceMutator: Send + Sync {
    /// Add a reference, or update its version and metadata if present.
    fn add_or_update_reference(
        &self,
        id: &str,
        version_expr: &str,
        metadata: &ReferenceMetadata,
    ) -> bool;

    /// Remove a reference by id.
    fn remove_reference(&self, id: &str) -> bool;
}

/// Phase a package script runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptContext {
    Install,
    Uninstall,
}

/// Script execution, owned entirely by the host. The core forwards
/// (identity, install path, context, throw-on-failure) and never interprets
/// script contents.
pub trait ScriptRunner: Send + Sync {
    fn run(
        &self,
        package_id: &str,
        install_path: &std::path::Path,
        context: ScriptContext,
        throw_on_failure: bool,
    ) -> bool;
}
