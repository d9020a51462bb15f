//! Project state capability.
//!
//! The host owns the live project; the core only reads it through this
//! trait, and only while running on the affinity thread. Getters return
//! `None` for state the project simply does not declare; absence is a
//! normal condition here, and each consumer decides whether it is fatal.

use std::path::PathBuf;

use crate::core::metadata::ReferenceMetadata;

/// One raw package- or project-reference record as the host hands it over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReference {
    /// Package id, or the project reference's unique path key.
    key: String,
    /// Version-range expression, absent for project references.
    version_range: Option<String>,
    metadata: ReferenceMetadata,
}

impl RawReference {
    pub fn new(key: impl Into<String>) -> Self {
        RawReference {
            key: key.into(),
            version_range: None,
            metadata: ReferenceMetadata::empty(),
        }
    }

    pub fn with_version_range(mut self, range: impl Into<String>) -> Self {
        self.version_range = Some(range.into());
        self
    }

    pub fn with_metadata(mut self, metadata: ReferenceMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// The reference key: package id for package references, the unique
    /// path key for project references (doubles as display path).
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn version_range(&self) -> Option<&str> {
        self.version_range.as_deref()
    }

    pub fn metadata(&self) -> &ReferenceMetadata {
        &self.metadata
    }
}

/// Read access to host project state.
///
/// Every getter must only be invoked on the affinity thread; the service
/// layer marshals calls there before touching this trait.
pub trait ProjectReader: Send + Sync {
    /// Display name, unset for projects that never declare one.
    fn name(&self) -> Option<String>;

    /// Unique name, the display-name fallback and cache key.
    fn unique_name(&self) -> String;

    /// Absolute path of the project file.
    fn full_path(&self) -> PathBuf;

    /// The single target-framework moniker, e.g. `net472`.
    fn target_framework_moniker(&self) -> Option<String>;

    /// Raw version string, e.g. `1.2.3`.
    fn version(&self) -> Option<String>;

    /// Intermediate output path, required for a strict restore.
    fn intermediate_output_path(&self) -> Option<PathBuf>;

    /// Semicolon-delimited restore-sources override.
    fn restore_sources(&self) -> Option<String>;

    /// Semicolon-delimited fallback-folders override.
    fn restore_fallback_folders(&self) -> Option<String>;

    /// Per-project packages-path override.
    fn restore_packages_path(&self) -> Option<String>;

    /// Semicolon-delimited package-target-fallback framework list.
    fn package_target_fallback(&self) -> Option<String>;

    /// Semicolon-delimited runtime identifiers.
    fn runtime_identifiers(&self) -> Option<String>;

    /// Semicolon-delimited runtime compatibility profiles.
    fn runtime_supports(&self) -> Option<String>;

    /// Raw package-reference records.
    fn package_references(&self) -> Vec<RawReference>;

    /// Raw project-reference records.
    fn project_references(&self) -> Vec<RawReference>;
}

/// The directory containing the project file, used to anchor relative
/// settings values. Falls back to the path itself if it has no parent.
pub fn project_directory(reader: &dyn ProjectReader) -> PathBuf {
    let full_path = reader.full_path();
    full_path
        .parent()
        .map(PathBuf::from)
        .unwrap_or(full_path)
}
