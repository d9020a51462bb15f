//! High-level operations.
//!
//! This module contains the normalization pipeline and the service facade
//! the host drives.

pub mod build_spec;
pub mod normalize;
pub mod service;
pub mod settings;

pub use build_spec::{build_restore_spec, try_build_restore_spec};
pub use normalize::{
    dedupe_by_identity, normalize_package_reference, normalize_package_references,
    normalize_project_reference, normalize_project_references,
};
pub use service::RestoreService;
pub use settings::{resolve_setting_list, resolve_setting_paths, split_setting, CLEAR_SENTINEL};
