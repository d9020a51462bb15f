//! Dependency normalization.
//!
//! Turns raw reference records into typed [`DependencyEntry`] values and
//! deduplicates identity collisions when projecting installed packages.

use std::collections::HashMap;

use semver::Version;

use crate::core::assets::AssetFlags;
use crate::core::dependency::{DependencyEntry, DependencyKind, PackageIdentity};
use crate::core::framework::{FrameworkComparator, TargetFramework};
use crate::core::metadata::{EXCLUDE_ASSETS, INCLUDE_ASSETS, PRIVATE_ASSETS};
use crate::core::project::RawReference;
use crate::core::version::VersionRange;
use crate::error::RestoreError;

/// Extract the three asset-flag strings from a record's metadata, in the
/// order include, exclude, private, and apply them.
fn extract_flags(reference: &RawReference) -> Result<AssetFlags, RestoreError> {
    let meta = reference.metadata();
    let include = meta.value(INCLUDE_ASSETS)?;
    let exclude = meta.value(EXCLUDE_ASSETS)?;
    let private = meta.value(PRIVATE_ASSETS)?;
    Ok(AssetFlags::from_raw(include, exclude, private))
}

/// Normalize one package-reference record.
///
/// The entry's version is the minimum bound of the parsed range; a record
/// without a range expression pins `0.0.0`, leaving the floor to the
/// resolver.
pub fn normalize_package_reference(
    reference: &RawReference,
) -> Result<DependencyEntry, RestoreError> {
    let version = match reference.version_range() {
        Some(range) => VersionRange::parse(range)?.minimum(),
        None => Version::new(0, 0, 0),
    };

    let identity = PackageIdentity::new(reference.key(), version);
    let flags = extract_flags(reference)?;

    Ok(DependencyEntry::new(identity, DependencyKind::Package).with_flags(flags))
}

/// Normalize one project-reference record.
///
/// The reference's unique key serves as both display path and lookup key;
/// project references carry no version, so the identity pins `0.0.0`.
pub fn normalize_project_reference(
    reference: &RawReference,
) -> Result<DependencyEntry, RestoreError> {
    let identity = PackageIdentity::new(reference.key(), Version::new(0, 0, 0));
    let flags = extract_flags(reference)?;

    Ok(DependencyEntry::new(identity, DependencyKind::ExternalProject).with_flags(flags))
}

/// Normalize a batch of package references, preserving order.
pub fn normalize_package_references(
    references: &[RawReference],
) -> Result<Vec<DependencyEntry>, RestoreError> {
    references.iter().map(normalize_package_reference).collect()
}

/// Normalize a batch of project references, preserving order.
pub fn normalize_project_references(
    references: &[RawReference],
) -> Result<Vec<DependencyEntry>, RestoreError> {
    references.iter().map(normalize_project_reference).collect()
}

/// Deduplicate entries sharing a package identity.
///
/// Entries are grouped by identity (case-insensitive name + version). With
/// a comparator, the surviving entry is the one whose associated framework
/// sorts first; without one, the first-seen entry survives. Ties on
/// comparator rank also keep the first-seen entry: the scan below only
/// replaces the survivor on a strictly-better rank, so insertion order is
/// the tie-break.
pub fn dedupe_by_identity(
    entries: Vec<(DependencyEntry, TargetFramework)>,
    comparator: Option<&dyn FrameworkComparator>,
) -> Vec<DependencyEntry> {
    use std::collections::hash_map::Entry;

    let mut order: Vec<(String, Version)> = Vec::new();
    let mut survivors: HashMap<(String, Version), (DependencyEntry, TargetFramework)> =
        HashMap::new();

    for (entry, framework) in entries {
        let key = entry.identity().dedup_key();
        match survivors.entry(key) {
            Entry::Vacant(slot) => {
                order.push(slot.key().clone());
                slot.insert((entry, framework));
            }
            Entry::Occupied(mut slot) => {
                if let Some(cmp) = comparator {
                    let (_, kept_framework) = slot.get();
                    if cmp.compare(&framework, kept_framework) == std::cmp::Ordering::Less {
                        tracing::debug!(
                            package = %entry.identity(),
                            framework = %framework,
                            "replacing duplicate with nearer framework"
                        );
                        slot.insert((entry, framework));
                    }
                }
                // No comparator: first-seen wins.
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| survivors.remove(&key).map(|(entry, _)| entry))
        .collect()
}
