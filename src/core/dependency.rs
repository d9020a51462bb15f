//! Dependency entries.
//!
//! A DependencyEntry is the normalized form of one raw reference record:
//! a typed identity, the kind of thing referenced, and the asset flags
//! extracted from its metadata.

use std::fmt;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::core::assets::AssetFlags;

/// What a dependency entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyKind {
    /// A package from a source.
    Package,
    /// A project participating in the same resolution graph.
    Project,
    /// A project outside the resolution graph, referenced by path.
    ExternalProject,
}

/// Identity of a dependency: name plus pinned version.
///
/// Name comparison is case-insensitive, matching package-id semantics; the
/// original casing is preserved for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageIdentity {
    name: String,
    version: Version,
}

impl PackageIdentity {
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        PackageIdentity {
            name: name.into(),
            version,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The case-folded grouping key used for deduplication.
    pub fn dedup_key(&self) -> (String, Version) {
        (self.name.to_lowercase(), self.version.clone())
    }
}

impl PartialEq for PackageIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name) && self.version == other.version
    }
}

impl Eq for PackageIdentity {}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}

/// A normalized dependency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyEntry {
    identity: PackageIdentity,
    kind: DependencyKind,
    flags: AssetFlags,
}

impl DependencyEntry {
    pub fn new(identity: PackageIdentity, kind: DependencyKind) -> Self {
        DependencyEntry {
            identity,
            kind,
            flags: AssetFlags::default(),
        }
    }

    /// Attach asset flags.
    pub fn with_flags(mut self, flags: AssetFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn identity(&self) -> &PackageIdentity {
        &self.identity
    }

    pub fn name(&self) -> &str {
        self.identity.name()
    }

    pub fn version(&self) -> &Version {
        self.identity.version()
    }

    pub fn kind(&self) -> DependencyKind {
        self.kind
    }

    pub fn flags(&self) -> &AssetFlags {
        &self.flags
    }

    pub fn is_package(&self) -> bool {
        self.kind == DependencyKind::Package
    }
}

impl fmt::Display for DependencyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identity)
    }
}
