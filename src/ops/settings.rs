//! Settings-list resolution.
//!
//! List-valued settings (sources, fallback folders, config paths) can be
//! overridden per project with a semicolon-delimited string. Precedence is
//! explicit > clear > ambient: explicit tokens win outright, the `Clear`
//! sentinel yields an empty list even over ambient defaults, and only a
//! genuinely empty override falls back to the ambient supplier.

use std::path::{Path, PathBuf};

use url::Url;

/// The reserved token meaning "use no values", compared case-insensitively.
pub const CLEAR_SENTINEL: &str = "Clear";

/// Resolve the effective list for one setting.
///
/// `override_value` is the project's raw override string (`None` and `""`
/// are equivalent); `ambient` supplies the default list and is only invoked
/// when the override is empty and carries no clear sentinel.
pub fn resolve_setting_list<F>(
    override_value: Option<&str>,
    project_dir: &Path,
    ambient: F,
) -> Vec<String>
where
    F: FnOnce() -> Vec<String>,
{
    let tokens = split_setting(override_value.unwrap_or(""));

    // Clear beats everything, including fallback: an override of just
    // `Clear` means "no values", while an empty override means "no opinion".
    if tokens
        .iter()
        .any(|t| t.eq_ignore_ascii_case(CLEAR_SENTINEL))
    {
        return Vec::new();
    }

    if tokens.is_empty() {
        return ambient();
    }

    tokens
        .into_iter()
        .map(|t| absolutize(&t, project_dir))
        .collect()
}

/// Path-typed variant of [`resolve_setting_list`].
pub fn resolve_setting_paths<F>(
    override_value: Option<&str>,
    project_dir: &Path,
    ambient: F,
) -> Vec<PathBuf>
where
    F: FnOnce() -> Vec<PathBuf>,
{
    let as_strings = resolve_setting_list(override_value, project_dir, || {
        ambient()
            .into_iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    });
    as_strings.into_iter().map(PathBuf::from).collect()
}

/// Split a semicolon-delimited setting string into trimmed, non-empty tokens.
pub fn split_setting(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Anchor a relative value at the project directory. Absolute paths and
/// absolute non-file URLs pass through unchanged.
fn absolutize(value: &str, project_dir: &Path) -> String {
    if let Ok(url) = Url::parse(value) {
        // A one-letter scheme is a Windows drive letter, not a URL.
        if url.scheme() != "file" && url.scheme().len() > 1 {
            return value.to_string();
        }
    }

    let path = Path::new(value);
    if path.is_absolute() {
        value.to_string()
    } else {
        clean_path(&project_dir.join(path))
            .to_string_lossy()
            .into_owned()
    }
}

/// Lexically clean a path: drop `.` components and fold `..` into the
/// preceding component. Purely textual, no filesystem access, so values
/// that do not exist yet still resolve deterministically.
pub fn clean_path(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() {
                    cleaned.push(component);
                }
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_dir() -> PathBuf {
        if cfg!(windows) {
            PathBuf::from(r"C:\p")
        } else {
            PathBuf::from("/p")
        }
    }

    #[test]
    fn test_empty_override_falls_back_to_ambient() {
        let ambient = vec!["https://a".to_string(), "https://b".to_string()];
        let result = resolve_setting_list(Some(""), &project_dir(), || ambient.clone());
        assert_eq!(result, ambient);

        let result = resolve_setting_list(None, &project_dir(), || ambient.clone());
        assert_eq!(result, ambient);
    }

    #[test]
    fn test_clear_yields_empty_over_ambient() {
        let result = resolve_setting_list(Some("Clear"), &project_dir(), || {
            vec!["https://a".to_string()]
        });
        assert!(result.is_empty());
    }

    #[test]
    fn test_clear_is_case_insensitive() {
        for spelling in ["clear", "CLEAR", "cLeAr"] {
            let result = resolve_setting_list(Some(spelling), &project_dir(), || {
                vec!["https://a".to_string()]
            });
            assert!(result.is_empty(), "spelling `{}` did not clear", spelling);
        }
    }

    #[test]
    fn test_clear_wins_even_among_explicit_tokens() {
        let result = resolve_setting_list(Some("https://a;Clear;https://b"), &project_dir(), || {
            vec!["https://ambient".to_string()]
        });
        assert!(result.is_empty());
    }

    #[test]
    fn test_explicit_tokens_ignore_ambient() {
        let result = resolve_setting_list(Some("https://x;https://y"), &project_dir(), || {
            panic!("ambient supplier must not run for explicit overrides")
        });
        assert_eq!(result, vec!["https://x", "https://y"]);
    }

    #[test]
    fn test_relative_values_anchor_at_project_dir() {
        let dir = project_dir();
        let result = resolve_setting_list(Some("./local"), &dir, Vec::new);
        assert_eq!(result, vec![dir.join("local").to_string_lossy()]);
    }

    #[test]
    fn test_clean_path_folds_dot_components() {
        let dir = project_dir();
        assert_eq!(clean_path(&dir.join("./a/./b")), dir.join("a/b"));
        assert_eq!(clean_path(&dir.join("a/../b")), dir.join("b"));
    }

    #[test]
    fn test_absolute_paths_pass_through() {
        let dir = project_dir();
        let absolute = if cfg!(windows) { r"C:\elsewhere" } else { "/elsewhere" };
        let result = resolve_setting_list(Some(absolute), &dir, Vec::new);
        assert_eq!(result, vec![absolute.to_string()]);
    }

    #[test]
    fn test_urls_pass_through() {
        let result =
            resolve_setting_list(Some("https://feed.example/v3/index.json"), &project_dir(), Vec::new);
        assert_eq!(result, vec!["https://feed.example/v3/index.json"]);
    }

    #[test]
    fn test_split_drops_empty_tokens() {
        assert_eq!(split_setting("a;;b; ;c"), vec!["a", "b", "c"]);
        assert!(split_setting("").is_empty());
        assert!(split_setting(" ; ; ").is_empty());
    }

    #[test]
    fn test_path_variant() {
        let dir = project_dir();
        let result = resolve_setting_paths(Some("sub"), &dir, Vec::new);
        assert_eq!(result, vec![dir.join("sub")]);

        let ambient = vec![dir.join("fallback")];
        let result = resolve_setting_paths(None, &dir, || ambient.clone());
        assert_eq!(result, ambient);
    }
}
