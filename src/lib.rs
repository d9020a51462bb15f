//! Berth - restore-specification assembly for package-reference projects
//!
//! This crate converts a live project's dependency declarations into an
//! immutable, canonical restore specification for a downstream resolver,
//! marshaling every read of host project state onto a designated affinity
//! thread.

pub mod affinity;
pub mod core;
pub mod error;
pub mod host;
pub mod ops;

/// Test utilities and mocks for Berth tests.
///
/// Provides an in-memory project and a static settings provider so tests
/// need no real host. Compiled only for this crate's own tests (via the
/// `test-support` feature the dev-dependency on self enables), never into
/// a release build.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::core::{
    dependency::DependencyEntry, framework::TargetFramework, metadata::ReferenceMetadata,
    project::ProjectReader, spec::RestoreSpecification, version::VersionRange,
};

pub use affinity::{AffinityExecutor, DedicatedThreadExecutor, InlineExecutor};
pub use error::RestoreError;
pub use ops::RestoreService;
