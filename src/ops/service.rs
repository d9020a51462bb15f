//! Public restore operations.
//!
//! [`RestoreService`] wires a project, ambient settings, and an affinity
//! executor together and exposes the operations the host calls: building
//! restore specifications, projecting installed packages, and the
//! mutation/script pass-throughs.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::affinity::{run_under_affinity, AffinityExecutor};
use crate::core::framework::{NearestFrameworkComparator, TargetFramework};
use crate::core::project::ProjectReader;
use crate::core::spec::RestoreSpecification;
use crate::core::DependencyEntry;
use crate::error::RestoreError;
use crate::host::{ReferenceMutator, ScriptContext, ScriptRunner, SettingsProvider};
use crate::ops::build_spec::{build_restore_spec, try_build_restore_spec};
use crate::ops::normalize::{dedupe_by_identity, normalize_package_references};

/// Entry point for restore operations against one project.
///
/// Holds no mutable state; every operation re-reads project state under
/// affinity. Callers wanting at-most-one-in-flight semantics memoize the
/// returned specification keyed by project path.
pub struct RestoreService {
    project: Arc<dyn ProjectReader>,
    settings: Arc<dyn SettingsProvider>,
    executor: Arc<dyn AffinityExecutor>,
    mutator: Option<Arc<dyn ReferenceMutator>>,
    scripts: Option<Arc<dyn ScriptRunner>>,
}

impl RestoreService {
    pub fn new(
        project: Arc<dyn ProjectReader>,
        settings: Arc<dyn SettingsProvider>,
        executor: Arc<dyn AffinityExecutor>,
    ) -> Self {
        RestoreService {
            project,
            settings,
            executor,
            mutator: None,
            scripts: None,
        }
    }

    /// Attach the host's reference-mutation capability.
    pub fn with_mutator(mut self, mutator: Arc<dyn ReferenceMutator>) -> Self {
        self.mutator = Some(mutator);
        self
    }

    /// Attach the host's script-execution capability.
    pub fn with_scripts(mut self, scripts: Arc<dyn ScriptRunner>) -> Self {
        self.scripts = Some(scripts);
        self
    }

    /// Build the restore specification, faulting on missing required state.
    pub fn restore_spec(&self) -> Result<RestoreSpecification, RestoreError> {
        let project = Arc::clone(&self.project);
        let settings = Arc::clone(&self.settings);
        run_under_affinity(&*self.executor, move || {
            build_restore_spec(&*project, &*settings)
        })?
    }

    /// Best-effort variant: `None` when required state is absent.
    pub fn try_restore_spec(&self) -> Result<Option<RestoreSpecification>, RestoreError> {
        let project = Arc::clone(&self.project);
        let settings = Arc::clone(&self.settings);
        run_under_affinity(&*self.executor, move || {
            try_build_restore_spec(&*project, &*settings)
        })?
    }

    /// Project the package references as an installed-package listing,
    /// deduplicated by identity with the project's own framework as the
    /// reduction target.
    pub fn installed_packages(&self) -> Result<Vec<DependencyEntry>, RestoreError> {
        let project = Arc::clone(&self.project);
        run_under_affinity(&*self.executor, move || {
            let entries = normalize_package_references(&project.package_references())?;

            let comparator = project
                .target_framework_moniker()
                .map(|moniker| TargetFramework::parse(&moniker))
                .transpose()?
                .map(NearestFrameworkComparator::new);

            let framework = match &comparator {
                Some(cmp) => cmp.target().clone(),
                // No framework on the project: dedup falls back to
                // first-seen, the placeholder never gets compared.
                None => TargetFramework::parse("netstandard2.0")?,
            };

            let keyed = entries.into_iter().map(|e| (e, framework.clone())).collect();
            Ok(dedupe_by_identity(
                keyed,
                comparator
                    .as_ref()
                    .map(|c| c as &dyn crate::core::framework::FrameworkComparator),
            ))
        })?
    }

    /// Forward an add-or-update to the host's mutation capability. The
    /// host's boolean outcome is reported as-is; a service without a
    /// mutator reports failure.
    pub fn add_or_update_reference(
        &self,
        id: &str,
        version_expr: &str,
        metadata_names: &[String],
        metadata_values: &[String],
    ) -> Result<bool> {
        let Some(mutator) = self.mutator.clone() else {
            tracing::warn!(id, "no mutation capability attached");
            return Ok(false);
        };

        let id = id.to_string();
        let version_expr = version_expr.to_string();
        let metadata = crate::core::ReferenceMetadata::from_pairs(
            metadata_names.to_vec(),
            metadata_values.to_vec(),
        );

        let accepted = run_under_affinity(&*self.executor, move || {
            mutator.add_or_update_reference(&id, &version_expr, &metadata)
        })?;
        Ok(accepted)
    }

    /// Forward a reference removal to the host's mutation capability.
    pub fn remove_reference(&self, id: &str) -> Result<bool> {
        let Some(mutator) = self.mutator.clone() else {
            tracing::warn!(id, "no mutation capability attached");
            return Ok(false);
        };

        let id = id.to_string();
        let removed = run_under_affinity(&*self.executor, move || mutator.remove_reference(&id))?;
        Ok(removed)
    }

    /// Forward a package script to the host. With `throw_on_failure` the
    /// host's failure becomes an error instead of a boolean.
    pub fn run_script(
        &self,
        package_id: &str,
        install_path: &Path,
        context: ScriptContext,
        throw_on_failure: bool,
    ) -> Result<bool> {
        let Some(scripts) = self.scripts.as_ref() else {
            // No script capability means nothing to run, which is success.
            return Ok(true);
        };

        let ok = scripts.run(package_id, install_path, context, throw_on_failure);
        if !ok && throw_on_failure {
            anyhow::bail!("script for `{}` failed during {:?}", package_id, context);
        }
        Ok(ok)
    }
}
