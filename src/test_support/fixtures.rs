//! Test fixtures for common test scenarios.
//!
//! Pre-built projects and reference records for testing the normalization
//! pipeline end to end.

use crate::core::metadata::{
    ReferenceMetadata, EXCLUDE_ASSETS, INCLUDE_ASSETS, PRIVATE_ASSETS,
};
use crate::core::project::RawReference;

use super::InMemoryProject;

/// A package reference with a plain version range and no metadata.
pub fn package_reference(id: &str, range: &str) -> RawReference {
    RawReference::new(id).with_version_range(range)
}

/// A package reference with all three asset-flag elements set.
pub fn flagged_package_reference(
    id: &str,
    range: &str,
    include: &str,
    exclude: &str,
    private: &str,
) -> RawReference {
    let metadata = ReferenceMetadata::empty()
        .with(INCLUDE_ASSETS, include)
        .with(EXCLUDE_ASSETS, exclude)
        .with(PRIVATE_ASSETS, private);
    RawReference::new(id)
        .with_version_range(range)
        .with_metadata(metadata)
}

/// A project reference keyed by relative path.
pub fn project_reference(path: &str) -> RawReference {
    RawReference::new(path)
}

/// A minimal project that builds a valid specification: single framework,
/// output path set, no references.
pub fn minimal_project() -> InMemoryProject {
    InMemoryProject::new("app.csproj", "/p/app.csproj")
        .display_name("app")
        .target_framework("net472")
        .project_version("1.2.3")
        .intermediate_output_path("/p/obj")
}

/// A project exercising every input: references, fallback frameworks,
/// runtimes, and settings overrides.
pub fn full_project() -> InMemoryProject {
    minimal_project()
        .package_target_fallback("netstandard2.0;net462")
        .runtimes("win-x64;linux-x64")
        .supports("net472.app")
        .restore_sources("https://feed.example/v3/index.json;./local-feed")
        .restore_fallback_folders("./fallback")
        .restore_packages_path("./packages")
        .package_reference(package_reference("Newtonsoft.Json", "13.0.1"))
        .package_reference(flagged_package_reference(
            "StyleCop.Analyzers",
            "1.1.118",
            "",
            "",
            "all",
        ))
        .project_reference(project_reference("../lib/lib.csproj"))
}
