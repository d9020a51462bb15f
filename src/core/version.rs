//! Version-range handling.
//!
//! Package references carry a version-range expression rather than an exact
//! version. The restore specification pins each package identity to the
//! range's minimum bound; the downstream resolver widens from there.

use std::fmt;
use std::str::FromStr;

use semver::{Comparator, Op, Version, VersionReq};
use serde::{Deserialize, Serialize};

use crate::error::RestoreError;

/// A parsed version-range expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionRange {
    req: VersionReq,
}

impl VersionRange {
    /// Parse a range expression, e.g. `1.2.3`, `^1.2`, `>=2.0, <3.0`.
    pub fn parse(input: &str) -> Result<Self, RestoreError> {
        if input.trim().is_empty() {
            return Err(RestoreError::ContractViolation {
                argument: "version range",
            });
        }

        let req: VersionReq = input
            .parse()
            .map_err(|e| RestoreError::invalid_version(input, e))?;

        Ok(VersionRange { req })
    }

    /// The underlying requirement.
    pub fn req(&self) -> &VersionReq {
        &self.req
    }

    /// Check whether a version satisfies the range.
    pub fn matches(&self, version: &Version) -> bool {
        self.req.matches(version)
    }

    /// The range's minimum bound.
    ///
    /// Each comparator that constrains from below contributes a lower bound;
    /// the range's minimum is the greatest of them, since every comparator
    /// must hold simultaneously. An unconstrained range (`*` or only
    /// upper-bound comparators) has minimum `0.0.0`.
    pub fn minimum(&self) -> Version {
        self.req
            .comparators
            .iter()
            .filter_map(comparator_lower_bound)
            .max()
            .unwrap_or_else(|| Version::new(0, 0, 0))
    }
}

/// The lower bound a single comparator imposes, if any.
fn comparator_lower_bound(comp: &Comparator) -> Option<Version> {
    let base = Version {
        major: comp.major,
        minor: comp.minor.unwrap_or(0),
        patch: comp.patch.unwrap_or(0),
        pre: comp.pre.clone(),
        build: semver::BuildMetadata::EMPTY,
    };

    match comp.op {
        Op::Exact | Op::GreaterEq | Op::Tilde | Op::Caret | Op::Wildcard => Some(base),

        // Strictly-greater floors depend on the comparator's shape:
        // `>1.2.3` admits nothing below 1.2.4, but `>1.2` means nothing
        // below 1.3.0 and `>1` nothing below 2.0.0. A pre-release bound's
        // smallest successor appends a zero segment.
        Op::Greater => {
            if comp.patch.is_none() {
                if comp.minor.is_none() {
                    Some(Version::new(comp.major + 1, 0, 0))
                } else {
                    Some(Version::new(base.major, base.minor + 1, 0))
                }
            } else if !base.pre.is_empty() {
                let pre = semver::Prerelease::new(&format!("{}.0", base.pre)).ok()?;
                Some(Version {
                    pre,
                    ..base
                })
            } else {
                Some(Version::new(base.major, base.minor, base.patch + 1))
            }
        }

        // Upper-bound-only comparators constrain nothing from below.
        Op::Less | Op::LessEq => None,

        _ => None,
    }
}

impl FromStr for VersionRange {
    type Err = RestoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionRange::parse(s)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.req)
    }
}

/// Parse an exact project version, allowing incomplete forms like `1` or `1.2`.
pub fn parse_project_version(s: &str) -> Result<Version, RestoreError> {
    if let Ok(v) = s.parse() {
        return Ok(v);
    }

    let parts: Vec<&str> = s.split('.').collect();
    let parsed = match parts.len() {
        1 => parts[0].parse().ok().map(|major| Version::new(major, 0, 0)),
        2 => {
            let major = parts[0].parse().ok();
            let minor = parts[1].parse().ok();
            major.zip(minor).map(|(ma, mi)| Version::new(ma, mi, 0))
        }
        _ => None,
    };

    parsed.ok_or_else(|| RestoreError::invalid_version(s, "not a valid project version"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_of_exact() {
        let range = VersionRange::parse("=1.2.3").unwrap();
        assert_eq!(range.minimum(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_minimum_of_caret() {
        let range = VersionRange::parse("^1.2").unwrap();
        assert_eq!(range.minimum(), Version::new(1, 2, 0));
    }

    #[test]
    fn test_minimum_of_bare_version() {
        // A bare version string is a caret requirement in semver terms, so
        // its minimum is itself.
        let range = VersionRange::parse("2.1.0").unwrap();
        assert_eq!(range.minimum(), Version::new(2, 1, 0));
    }

    #[test]
    fn test_minimum_takes_greatest_lower_bound() {
        let range = VersionRange::parse(">=1.0, >=1.5, <2.0").unwrap();
        assert_eq!(range.minimum(), Version::new(1, 5, 0));
    }

    #[test]
    fn test_minimum_of_unbounded() {
        let range = VersionRange::parse("*").unwrap();
        assert_eq!(range.minimum(), Version::new(0, 0, 0));

        let upper_only = VersionRange::parse("<3.0").unwrap();
        assert_eq!(upper_only.minimum(), Version::new(0, 0, 0));
    }

    #[test]
    fn test_strictly_greater_excludes_bound() {
        let range = VersionRange::parse(">1.2.3").unwrap();
        assert_eq!(range.minimum(), Version::new(1, 2, 4));
    }

    #[test]
    fn test_strictly_greater_partial_floors_next_component() {
        // `>1.2` admits nothing below 1.3.0, `>1` nothing below 2.0.0.
        let range = VersionRange::parse(">1.2").unwrap();
        assert_eq!(range.minimum(), Version::new(1, 3, 0));

        let range = VersionRange::parse(">1").unwrap();
        assert_eq!(range.minimum(), Version::new(2, 0, 0));
    }

    #[test]
    fn test_strictly_greater_preserves_prerelease() {
        let range = VersionRange::parse(">1.0.0-alpha").unwrap();
        let min = range.minimum();
        assert_eq!((min.major, min.minor, min.patch), (1, 0, 0));
        assert_eq!(min.pre.as_str(), "alpha.0");
        assert!(range.matches(&min));
    }

    #[test]
    fn test_empty_range_is_contract_violation() {
        let err = VersionRange::parse("  ").unwrap_err();
        assert!(matches!(err, RestoreError::ContractViolation { .. }));
    }

    #[test]
    fn test_garbage_range_is_invalid_version() {
        let err = VersionRange::parse("not-a-version").unwrap_err();
        assert!(matches!(err, RestoreError::InvalidVersion { .. }));
    }

    #[test]
    fn test_project_version_lenient() {
        assert_eq!(parse_project_version("1").unwrap(), Version::new(1, 0, 0));
        assert_eq!(parse_project_version("1.2").unwrap(), Version::new(1, 2, 0));
        assert_eq!(
            parse_project_version("1.2.3").unwrap(),
            Version::new(1, 2, 3)
        );
        assert!(parse_project_version("one.two").is_err());
    }
}
