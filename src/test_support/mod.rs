//! Test utilities and mocks for Berth unit tests.
//!
//! Provides an in-memory project and a static settings provider so tests
//! exercise the normalization pipeline without a real host or a real
//! affinity-bearing thread.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use berth::test_support::{InMemoryProject, StaticSettings};
//! use berth::{InlineExecutor, RestoreService};
//!
//! let project = InMemoryProject::new("app", "/p/app.csproj")
//!     .target_framework("net472")
//!     .intermediate_output_path("/p/obj");
//! let service = RestoreService::new(
//!     Arc::new(project),
//!     Arc::new(StaticSettings::default()),
//!     Arc::new(InlineExecutor),
//! );
//! let spec = service.restore_spec().unwrap();
//! assert!(spec.dependencies().is_empty());
//! ```

pub mod fixtures;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::core::metadata::ReferenceMetadata;
use crate::core::project::{ProjectReader, RawReference};
use crate::host::{PackageSource, ReferenceMutator, SettingsProvider};

pub use fixtures::*;

/// An in-memory [`ProjectReader`] built up field by field.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProject {
    pub name: Option<String>,
    pub unique_name: String,
    pub full_path: PathBuf,
    pub target_framework_moniker: Option<String>,
    pub version: Option<String>,
    pub intermediate_output_path: Option<PathBuf>,
    pub restore_sources: Option<String>,
    pub restore_fallback_folders: Option<String>,
    pub restore_packages_path: Option<String>,
    pub package_target_fallback: Option<String>,
    pub runtime_identifiers: Option<String>,
    pub runtime_supports: Option<String>,
    pub package_references: Vec<RawReference>,
    pub project_references: Vec<RawReference>,
}

impl InMemoryProject {
    pub fn new(unique_name: impl Into<String>, full_path: impl Into<PathBuf>) -> Self {
        InMemoryProject {
            unique_name: unique_name.into(),
            full_path: full_path.into(),
            ..Default::default()
        }
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn target_framework(mut self, moniker: impl Into<String>) -> Self {
        self.target_framework_moniker = Some(moniker.into());
        self
    }

    pub fn project_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn intermediate_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.intermediate_output_path = Some(path.into());
        self
    }

    pub fn restore_sources(mut self, raw: impl Into<String>) -> Self {
        self.restore_sources = Some(raw.into());
        self
    }

    pub fn restore_fallback_folders(mut self, raw: impl Into<String>) -> Self {
        self.restore_fallback_folders = Some(raw.into());
        self
    }

    pub fn restore_packages_path(mut self, raw: impl Into<String>) -> Self {
        self.restore_packages_path = Some(raw.into());
        self
    }

    pub fn package_target_fallback(mut self, raw: impl Into<String>) -> Self {
        self.package_target_fallback = Some(raw.into());
        self
    }

    pub fn runtimes(mut self, identifiers: impl Into<String>) -> Self {
        self.runtime_identifiers = Some(identifiers.into());
        self
    }

    pub fn supports(mut self, profiles: impl Into<String>) -> Self {
        self.runtime_supports = Some(profiles.into());
        self
    }

    pub fn package_reference(mut self, reference: RawReference) -> Self {
        self.package_references.push(reference);
        self
    }

    pub fn project_reference(mut self, reference: RawReference) -> Self {
        self.project_references.push(reference);
        self
    }
}

impl ProjectReader for InMemoryProject {
    fn name(&self) -> Option<String> {
        self.name.clone()
    }

    fn unique_name(&self) -> String {
        self.unique_name.clone()
    }

    fn full_path(&self) -> PathBuf {
        self.full_path.clone()
    }

    fn target_framework_moniker(&self) -> Option<String> {
        self.target_framework_moniker.clone()
    }

    fn version(&self) -> Option<String> {
        self.version.clone()
    }

    fn intermediate_output_path(&self) -> Option<PathBuf> {
        self.intermediate_output_path.clone()
    }

    fn restore_sources(&self) -> Option<String> {
        self.restore_sources.clone()
    }

    fn restore_fallback_folders(&self) -> Option<String> {
        self.restore_fallback_folders.clone()
    }

    fn restore_packages_path(&self) -> Option<String> {
        self.restore_packages_path.clone()
    }

    fn package_target_fallback(&self) -> Option<String> {
        self.package_target_fallback.clone()
    }

    fn runtime_identifiers(&self) -> Option<String> {
        self.runtime_identifiers.clone()
    }

    fn runtime_supports(&self) -> Option<String> {
        self.runtime_supports.clone()
    }

    fn package_references(&self) -> Vec<RawReference> {
        self.package_references.clone()
    }

    fn project_references(&self) -> Vec<RawReference> {
        self.project_references.clone()
    }
}

/// A [`SettingsProvider`] returning fixed values.
#[derive(Debug, Clone)]
pub struct StaticSettings {
    pub sources: Vec<PackageSource>,
    pub fallback_folders: Vec<PathBuf>,
    pub global_packages: PathBuf,
    pub config_paths: Vec<PathBuf>,
}

impl Default for StaticSettings {
    fn default() -> Self {
        StaticSettings {
            sources: vec![PackageSource::new(
                "default",
                "https://feed.example/v3/index.json",
            )],
            fallback_folders: Vec::new(),
            global_packages: PathBuf::from("/home/user/.packages"),
            config_paths: Vec::new(),
        }
    }
}

impl SettingsProvider for StaticSettings {
    fn enabled_sources(&self) -> Vec<PackageSource> {
        self.sources.clone()
    }

    fn fallback_package_folders(&self) -> Vec<PathBuf> {
        self.fallback_folders.clone()
    }

    fn global_packages_folder(&self) -> PathBuf {
        self.global_packages.clone()
    }

    fn config_file_paths(&self) -> Vec<PathBuf> {
        self.config_paths.clone()
    }
}

/// A [`ReferenceMutator`] that records every call and answers with a
/// configurable outcome.
#[derive(Debug, Default)]
pub struct RecordingMutator {
    pub refuse: AtomicBool,
    pub added: Mutex<Vec<(String, String, ReferenceMetadata)>>,
    pub removed: Mutex<Vec<String>>,
}

impl RecordingMutator {
    pub fn refusing() -> Self {
        RecordingMutator {
            refuse: AtomicBool::new(true),
            ..Default::default()
        }
    }
}

impl ReferenceMutator for RecordingMutator {
    fn add_or_update_reference(
        &self,
        id: &str,
        version_expr: &str,
        metadata: &ReferenceMetadata,
    ) -> bool {
        self.added.lock().unwrap().push((
            id.to_string(),
            version_expr.to_string(),
            metadata.clone(),
        ));
        !self.refuse.load(Ordering::SeqCst)
    }

    fn remove_reference(&self, id: &str) -> bool {
        self.removed.lock().unwrap().push(id.to_string());
        !self.refuse.load(Ordering::SeqCst)
    }
}
