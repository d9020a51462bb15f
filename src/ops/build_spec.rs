//! Restore-specification assembly.
//!
//! Orchestrates the metadata extractor, settings resolver, and dependency
//! normalizer into one immutable [`RestoreSpecification`]. Project state is
//! read fresh on every call; the caller owns the result and may cache it
//! keyed by project path.

use std::path::PathBuf;

use semver::Version;

use crate::core::framework::{RestoreFramework, TargetFramework};
use crate::core::project::{project_directory, ProjectReader};
use crate::core::spec::{
    ProjectStyle, RestoreMetadata, RestoreSpecification, RuntimeGraph, TargetFrameworkInfo,
};
use crate::core::version::parse_project_version;
use crate::error::RestoreError;
use crate::host::SettingsProvider;
use crate::ops::normalize::{normalize_package_references, normalize_project_references};
use crate::ops::settings::{resolve_setting_list, resolve_setting_paths, split_setting};

/// Build a specification, faulting when required project state is absent.
pub fn build_restore_spec(
    project: &dyn ProjectReader,
    settings: &dyn SettingsProvider,
) -> Result<RestoreSpecification, RestoreError> {
    let unique_name = project.unique_name();
    let project_path = project.full_path();
    let project_dir = project_directory(project);

    tracing::debug!(project = %unique_name, "building restore specification");

    let moniker = project.target_framework_moniker().ok_or_else(|| {
        RestoreError::MissingProjectState {
            project: unique_name.clone(),
            what: "target framework moniker",
        }
    })?;
    let primary = TargetFramework::parse(&moniker)?;

    // Package-target-fallback wraps the primary framework in a fallback
    // composite so downstream resolution treats imports as secondary
    // candidates.
    let imports = parse_fallback_imports(project.package_target_fallback().as_deref())?;
    let framework = RestoreFramework::with_imports(primary.clone(), imports.clone());

    let dependencies = normalize_package_references(&project.package_references())?;
    let project_references = normalize_project_references(&project.project_references())?;

    // Runtime descriptors pass through verbatim; the resolver rejects
    // malformed entries, not this builder.
    let runtime_graph = RuntimeGraph {
        runtimes: split_setting(project.runtime_identifiers().as_deref().unwrap_or("")),
        supports: split_setting(project.runtime_supports().as_deref().unwrap_or("")),
    };

    let output_path = project.intermediate_output_path().ok_or_else(|| {
        RestoreError::MissingProjectState {
            project: unique_name.clone(),
            what: "intermediate output path",
        }
    })?;

    let packages_path = match project.restore_packages_path() {
        Some(explicit) => {
            let path = PathBuf::from(&explicit);
            if path.is_absolute() {
                path
            } else {
                crate::ops::settings::clean_path(&project_dir.join(path))
            }
        }
        None => settings.global_packages_folder(),
    };

    let sources = resolve_setting_list(
        project.restore_sources().as_deref(),
        &project_dir,
        || {
            settings
                .enabled_sources()
                .into_iter()
                .filter(|s| s.enabled)
                .map(|s| s.location)
                .collect()
        },
    );

    let fallback_folders = resolve_setting_paths(
        project.restore_fallback_folders().as_deref(),
        &project_dir,
        || settings.fallback_package_folders(),
    );

    // Config paths have no per-project override string; the resolver still
    // runs so the clear/ambient precedence stays in one place.
    let config_file_paths =
        resolve_setting_paths(None, &project_dir, || settings.config_file_paths());

    let name = project.name().unwrap_or_else(|| unique_name.clone());
    let version = match project.version() {
        Some(raw) => parse_project_version(&raw)?,
        None => Version::new(1, 0, 0),
    };

    let target_framework = TargetFrameworkInfo {
        framework,
        dependencies,
        imports,
    };

    let metadata = RestoreMetadata {
        style: ProjectStyle::PackageReference,
        output_path,
        project_path,
        original_target_frameworks: vec![primary.short_name().to_string()],
        project_references,
        packages_path,
        sources,
        fallback_folders,
        config_file_paths,
    };

    tracing::debug!(
        project = %unique_name,
        dependencies = target_framework.dependencies.len(),
        project_references = metadata.project_references.len(),
        "restore specification built"
    );

    Ok(RestoreSpecification::new(
        name,
        version,
        target_framework,
        runtime_graph,
        metadata,
    ))
}

/// Best-effort variant: absent required state yields `None` instead of a
/// fault. Parse failures still propagate, since a malformed specification
/// must never be silently fabricated.
pub fn try_build_restore_spec(
    project: &dyn ProjectReader,
    settings: &dyn SettingsProvider,
) -> Result<Option<RestoreSpecification>, RestoreError> {
    match build_restore_spec(project, settings) {
        Ok(spec) => Ok(Some(spec)),
        Err(RestoreError::MissingProjectState { project, what }) => {
            tracing::debug!(%project, what, "skipping restore specification");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Parse the semicolon-delimited package-target-fallback framework list.
fn parse_fallback_imports(
    raw: Option<&str>,
) -> Result<Vec<TargetFramework>, RestoreError> {
    split_setting(raw.unwrap_or(""))
        .iter()
        .map(|name| TargetFramework::parse(name))
        .collect()
}
