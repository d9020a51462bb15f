//! Core data model: references, frameworks, versions, and the restore
//! specification itself.

pub mod assets;
pub mod dependency;
pub mod framework;
pub mod metadata;
pub mod project;
pub mod spec;
pub mod version;

pub use assets::{AssetFlags, AssetKind, AssetSet};
pub use dependency::{DependencyEntry, DependencyKind, PackageIdentity};
pub use framework::{
    FrameworkComparator, FrameworkFamily, NearestFrameworkComparator, RestoreFramework,
    TargetFramework,
};
pub use metadata::ReferenceMetadata;
pub use project::{ProjectReader, RawReference};
pub use spec::{
    ProjectStyle, RestoreMetadata, RestoreSpecification, RuntimeGraph, TargetFrameworkInfo,
};
pub use version::VersionRange;
