//! End-to-end restore-specification tests driving the service facade the
//! way a host would.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use semver::Version;
use tempfile::TempDir;

use berth::core::{DependencyKind, ProjectStyle, RestoreFramework};
use berth::host::{ScriptContext, ScriptRunner};
use berth::test_support::{
    flagged_package_reference, full_project, minimal_project, package_reference, InMemoryProject,
    RecordingMutator, StaticSettings,
};
use berth::{DedicatedThreadExecutor, InlineExecutor, RestoreError, RestoreService};

fn service(project: InMemoryProject) -> RestoreService {
    RestoreService::new(
        Arc::new(project),
        Arc::new(StaticSettings::default()),
        Arc::new(InlineExecutor),
    )
}

#[test]
fn test_zero_references_yields_empty_lists() {
    let spec = service(minimal_project()).restore_spec().unwrap();

    assert!(spec.dependencies().is_empty());
    assert!(spec.metadata().project_references.is_empty());
    assert_eq!(spec.name(), "app");
    assert_eq!(spec.version(), &Version::new(1, 2, 3));
}

#[test]
fn test_full_project_builds_complete_spec() {
    let spec = service(full_project()).restore_spec().unwrap();

    // Fallback frameworks wrap the primary moniker.
    match &spec.target_framework().framework {
        RestoreFramework::Fallback { framework, imports } => {
            assert_eq!(framework.short_name(), "net472");
            let names: Vec<&str> = imports.iter().map(|f| f.short_name()).collect();
            assert_eq!(names, vec!["netstandard2.0", "net462"]);
        }
        other => panic!("expected fallback framework, got {:?}", other),
    }

    // Dependencies carry only package references; projects land in metadata.
    assert_eq!(spec.dependencies().len(), 2);
    assert!(spec.dependencies().iter().all(|d| d.is_package()));
    assert_eq!(spec.metadata().project_references.len(), 1);
    assert_eq!(
        spec.metadata().project_references[0].kind(),
        DependencyKind::ExternalProject
    );

    // Runtime descriptors pass through verbatim.
    assert_eq!(spec.runtime_graph().runtimes, vec!["win-x64", "linux-x64"]);
    assert_eq!(spec.runtime_graph().supports, vec!["net472.app"]);

    // Settings overrides: URLs pass through, relative values anchor at the
    // project directory.
    assert_eq!(
        spec.metadata().sources,
        vec![
            "https://feed.example/v3/index.json".to_string(),
            Path::new("/p").join("local-feed").to_string_lossy().into_owned(),
        ]
    );
    assert_eq!(
        spec.metadata().fallback_folders,
        vec![Path::new("/p").join("fallback")]
    );
    assert_eq!(spec.metadata().packages_path, Path::new("/p").join("packages"));

    assert_eq!(spec.metadata().style, ProjectStyle::PackageReference);
    assert_eq!(spec.metadata().original_target_frameworks, vec!["net472"]);
    assert_eq!(spec.metadata().output_path, PathBuf::from("/p/obj"));
}

#[test]
fn test_spec_round_trips_through_json() {
    let spec = service(full_project()).restore_spec().unwrap();

    let json = serde_json::to_string(&spec).unwrap();
    let restored: berth::RestoreSpecification = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, spec);
}

#[test]
fn test_relative_settings_anchor_at_real_project_directory() {
    let dir = TempDir::new().unwrap();
    let project_file = dir.path().join("app.csproj");

    let project = InMemoryProject::new("app.csproj", &project_file)
        .target_framework("net472")
        .intermediate_output_path(dir.path().join("obj"))
        .restore_sources("./local-feed")
        .restore_packages_path("./packages");
    let spec = service(project).restore_spec().unwrap();

    assert_eq!(
        spec.metadata().sources,
        vec![dir.path().join("local-feed").to_string_lossy().into_owned()]
    );
    assert_eq!(spec.metadata().packages_path, dir.path().join("packages"));
    assert_eq!(spec.metadata().project_path, project_file);
}

#[test]
fn test_package_version_is_range_minimum() {
    let project = minimal_project()
        .package_reference(package_reference("PkgA", ">=2.4, <3.0"));
    let spec = service(project).restore_spec().unwrap();

    assert_eq!(spec.dependencies()[0].version(), &Version::new(2, 4, 0));
}

#[test]
fn test_ambient_sources_used_without_override() {
    let spec = service(minimal_project()).restore_spec().unwrap();
    assert_eq!(
        spec.metadata().sources,
        vec!["https://feed.example/v3/index.json"]
    );
    // Packages path falls back to the global folder.
    assert_eq!(
        spec.metadata().packages_path,
        PathBuf::from("/home/user/.packages")
    );
}

#[test]
fn test_clear_sources_override_empties_list() {
    let project = minimal_project().restore_sources("Clear");
    let spec = service(project).restore_spec().unwrap();
    assert!(spec.metadata().sources.is_empty());
}

#[test]
fn test_strict_build_faults_without_output_path() {
    let project = InMemoryProject::new("app.csproj", "/p/app.csproj").target_framework("net472");
    let err = service(project).restore_spec().unwrap_err();
    assert!(matches!(err, RestoreError::MissingProjectState { .. }));
}

#[test]
fn test_best_effort_build_returns_none_without_output_path() {
    let project = InMemoryProject::new("app.csproj", "/p/app.csproj").target_framework("net472");
    let result = service(project).try_restore_spec().unwrap();
    assert!(result.is_none());
}

#[test]
fn test_best_effort_still_faults_on_bad_version() {
    let project = minimal_project()
        .package_reference(package_reference("PkgA", "not-a-range"));
    let err = service(project).try_restore_spec().unwrap_err();
    assert!(matches!(err, RestoreError::InvalidVersion { .. }));
}

#[test]
fn test_name_falls_back_to_unique_name() {
    let project = InMemoryProject::new("fallback.csproj", "/p/fallback.csproj")
        .target_framework("net472")
        .intermediate_output_path("/p/obj");
    let spec = service(project).restore_spec().unwrap();
    assert_eq!(spec.name(), "fallback.csproj");
}

#[test]
fn test_installed_packages_dedupes_by_identity() {
    let project = minimal_project()
        .package_reference(package_reference("PkgA", "1.0.0"))
        .package_reference(package_reference("pkga", "1.0.0"))
        .package_reference(package_reference("PkgB", "2.0.0"));

    let installed = service(project).installed_packages().unwrap();
    let names: Vec<&str> = installed.iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["PkgA", "PkgB"]);
}

#[test]
fn test_private_assets_flow_through() {
    let project = minimal_project().package_reference(flagged_package_reference(
        "StyleCop.Analyzers",
        "1.1.118",
        "",
        "",
        "all",
    ));
    let spec = service(project).restore_spec().unwrap();

    let flags = spec.dependencies()[0].flags();
    assert_eq!(flags.suppress_parent, berth::core::AssetSet::all());
}

#[test]
fn test_bypass_mode_matches_true_affinity() {
    let inline_spec = service(full_project()).restore_spec().unwrap();

    let marshaled = RestoreService::new(
        Arc::new(full_project()),
        Arc::new(StaticSettings::default()),
        Arc::new(DedicatedThreadExecutor::spawn()),
    );
    let marshaled_spec = marshaled.restore_spec().unwrap();

    assert_eq!(inline_spec, marshaled_spec);
}

#[test]
fn test_marshaled_build_works_from_any_thread() {
    let service = Arc::new(RestoreService::new(
        Arc::new(full_project()),
        Arc::new(StaticSettings::default()),
        Arc::new(DedicatedThreadExecutor::spawn()),
    ));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || service.restore_spec().unwrap())
        })
        .collect();

    let mut specs: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let first = specs.pop().unwrap();
    assert!(specs.iter().all(|s| *s == first));
}

#[test]
fn test_mutation_pass_through_forwards_verbatim() {
    let mutator = Arc::new(RecordingMutator::default());
    let service = RestoreService::new(
        Arc::new(minimal_project()),
        Arc::new(StaticSettings::default()),
        Arc::new(InlineExecutor),
    )
    .with_mutator(mutator.clone());

    let accepted = service
        .add_or_update_reference(
            "Serilog",
            "3.1.1",
            &["PrivateAssets".to_string()],
            &["all".to_string()],
        )
        .unwrap();
    assert!(accepted);

    let added = mutator.added.lock().unwrap();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].0, "Serilog");
    assert_eq!(added[0].1, "3.1.1");
    assert_eq!(added[0].2.value("PrivateAssets").unwrap(), "all");
    drop(added);

    assert!(service.remove_reference("Serilog").unwrap());
    assert_eq!(*mutator.removed.lock().unwrap(), vec!["Serilog"]);
}

#[test]
fn test_mutation_failure_reported_as_boolean() {
    let service = RestoreService::new(
        Arc::new(minimal_project()),
        Arc::new(StaticSettings::default()),
        Arc::new(InlineExecutor),
    )
    .with_mutator(Arc::new(RecordingMutator::refusing()));

    assert!(!service.remove_reference("Missing").unwrap());
}

struct FailingScripts;

impl ScriptRunner for FailingScripts {
    fn run(&self, _: &str, _: &Path, _: ScriptContext, _: bool) -> bool {
        false
    }
}

#[test]
fn test_script_failure_boolean_or_error() {
    let service = RestoreService::new(
        Arc::new(minimal_project()),
        Arc::new(StaticSettings::default()),
        Arc::new(InlineExecutor),
    )
    .with_scripts(Arc::new(FailingScripts));

    let quiet = service
        .run_script("PkgA", Path::new("/pkgs/PkgA"), ScriptContext::Install, false)
        .unwrap();
    assert!(!quiet);

    let loud = service.run_script("PkgA", Path::new("/pkgs/PkgA"), ScriptContext::Install, true);
    assert!(loud.is_err());
}
