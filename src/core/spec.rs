//! The restore specification.
//!
//! The immutable output value handed to the downstream resolver. Built
//! fresh on every request, owned by the caller, no live reference back to
//! project state.

use std::path::PathBuf;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::core::dependency::DependencyEntry;
use crate::core::framework::{RestoreFramework, TargetFramework};

/// How the project declares its dependencies. Legacy package-reference
/// projects always restore in this style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStyle {
    PackageReference,
}

/// The single target-framework entry of a specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetFrameworkInfo {
    /// The framework to resolve against, possibly a fallback composite.
    pub framework: RestoreFramework,
    /// Package dependencies declared for this framework.
    pub dependencies: Vec<DependencyEntry>,
    /// Secondary frameworks from package-target-fallback.
    pub imports: Vec<TargetFramework>,
}

/// Runtime identifiers and compatibility profiles, carried verbatim.
/// Malformed entries are the resolver's to reject, not this model's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeGraph {
    pub runtimes: Vec<String>,
    pub supports: Vec<String>,
}

impl RuntimeGraph {
    pub fn is_empty(&self) -> bool {
        self.runtimes.is_empty() && self.supports.is_empty()
    }
}

/// Restore bookkeeping: where outputs land, where packages come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestoreMetadata {
    pub style: ProjectStyle,
    /// Intermediate output path where restore artifacts are written.
    pub output_path: PathBuf,
    /// Absolute path of the project file.
    pub project_path: PathBuf,
    /// Short names of the originally-declared frameworks. Always one entry
    /// for single-targeting projects.
    pub original_target_frameworks: Vec<String>,
    /// Normalized project-reference entries with asset flags applied.
    pub project_references: Vec<DependencyEntry>,
    /// Where restored packages are unpacked.
    pub packages_path: PathBuf,
    /// Package source locations, resolution order preserved.
    pub sources: Vec<String>,
    /// Fallback package folders consulted before sources.
    pub fallback_folders: Vec<PathBuf>,
    /// Settings files that contributed to this specification.
    pub config_file_paths: Vec<PathBuf>,
}

/// A complete, resolver-ready restore specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestoreSpecification {
    name: String,
    version: Version,
    target_framework: TargetFrameworkInfo,
    runtime_graph: RuntimeGraph,
    metadata: RestoreMetadata,
}

impl RestoreSpecification {
    pub fn new(
        name: impl Into<String>,
        version: Version,
        target_framework: TargetFrameworkInfo,
        runtime_graph: RuntimeGraph,
        metadata: RestoreMetadata,
    ) -> Self {
        RestoreSpecification {
            name: name.into(),
            version,
            target_framework,
            runtime_graph,
            metadata,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The single target-framework entry. Single-targeting is an invariant
    /// of this model, so there is exactly one.
    pub fn target_framework(&self) -> &TargetFrameworkInfo {
        &self.target_framework
    }

    pub fn runtime_graph(&self) -> &RuntimeGraph {
        &self.runtime_graph
    }

    pub fn metadata(&self) -> &RestoreMetadata {
        &self.metadata
    }

    /// Package dependencies of the single framework.
    pub fn dependencies(&self) -> &[DependencyEntry] {
        &self.target_framework.dependencies
    }
}
