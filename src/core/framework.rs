//! Target-framework identifiers.
//!
//! A project targets exactly one framework, named by a short moniker such as
//! `net472`, `netstandard2.0`, or `net6.0`. Package-target-fallback adds
//! secondary frameworks consulted when a package has no assets for the
//! primary one; the composite of primary + imports is a fallback framework.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RestoreError;

/// Framework family a short moniker belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameworkFamily {
    /// Classic `net4x`-style frameworks (`net472`, `net48`).
    NetFramework,
    /// `netstandard1.x`/`2.x` contract frameworks.
    NetStandard,
    /// `netcoreapp3.1` and dotted `net5.0`+ monikers.
    NetCoreApp,
}

impl fmt::Display for FrameworkFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FrameworkFamily::NetFramework => "net",
            FrameworkFamily::NetStandard => "netstandard",
            FrameworkFamily::NetCoreApp => "netcoreapp",
        };
        write!(f, "{}", name)
    }
}

/// A parsed target framework.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetFramework {
    family: FrameworkFamily,
    version: (u16, u16, u16),
    short_name: String,
}

impl TargetFramework {
    /// Parse a framework short name.
    pub fn parse(input: &str) -> Result<Self, RestoreError> {
        let short_name = input.trim();
        if short_name.is_empty() {
            return Err(RestoreError::ContractViolation {
                argument: "framework short name",
            });
        }
        let lower = short_name.to_ascii_lowercase();

        let (family, rest) = if let Some(rest) = lower.strip_prefix("netstandard") {
            (FrameworkFamily::NetStandard, rest)
        } else if let Some(rest) = lower.strip_prefix("netcoreapp") {
            (FrameworkFamily::NetCoreApp, rest)
        } else if let Some(rest) = lower.strip_prefix("net") {
            // Dotted `net6.0` is a core-app moniker; bare digits (`net472`)
            // are a classic framework version with implied dots.
            if rest.contains('.') {
                (FrameworkFamily::NetCoreApp, rest)
            } else {
                (FrameworkFamily::NetFramework, rest)
            }
        } else {
            return Err(RestoreError::InvalidFramework(short_name.to_string()));
        };

        let version = if rest.contains('.') {
            parse_dotted_version(rest)
        } else {
            parse_digit_version(rest)
        }
        .ok_or_else(|| RestoreError::InvalidFramework(short_name.to_string()))?;

        Ok(TargetFramework {
            family,
            version,
            short_name: lower,
        })
    }

    pub fn family(&self) -> FrameworkFamily {
        self.family
    }

    pub fn version(&self) -> (u16, u16, u16) {
        self.version
    }

    /// The normalized short name, e.g. `net472`.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }
}

/// `472` → 4.7.2, `48` → 4.8.0. More than three digits is not a valid
/// classic moniker and must not be truncated to one.
fn parse_digit_version(digits: &str) -> Option<(u16, u16, u16)> {
    if digits.is_empty() || digits.len() > 3 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut parts = digits.chars().map(|c| c.to_digit(10).unwrap() as u16);
    let major = parts.next()?;
    let minor = parts.next().unwrap_or(0);
    let patch = parts.next().unwrap_or(0);
    Some((major, minor, patch))
}

/// `6.0` → 6.0.0, `3.1` → 3.1.0.
fn parse_dotted_version(dotted: &str) -> Option<(u16, u16, u16)> {
    let mut parts = dotted.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().map_or(Some(0), |p| p.parse().ok())?;
    let patch = parts.next().map_or(Some(0), |p| p.parse().ok())?;
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor, patch))
}

impl FromStr for TargetFramework {
    type Err = RestoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetFramework::parse(s)
    }
}

impl fmt::Display for TargetFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name)
    }
}

/// The framework a target-framework-info entry resolves against: either the
/// plain project framework or a fallback composite carrying import
/// frameworks as secondary candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RestoreFramework {
    Plain {
        framework: TargetFramework,
    },
    Fallback {
        framework: TargetFramework,
        imports: Vec<TargetFramework>,
    },
}

impl RestoreFramework {
    /// Wrap a framework, producing the fallback composite when imports exist.
    pub fn with_imports(framework: TargetFramework, imports: Vec<TargetFramework>) -> Self {
        if imports.is_empty() {
            RestoreFramework::Plain { framework }
        } else {
            RestoreFramework::Fallback { framework, imports }
        }
    }

    /// The primary framework.
    pub fn primary(&self) -> &TargetFramework {
        match self {
            RestoreFramework::Plain { framework } => framework,
            RestoreFramework::Fallback { framework, .. } => framework,
        }
    }

    /// Secondary candidate frameworks, empty for the plain form.
    pub fn imports(&self) -> &[TargetFramework] {
        match self {
            RestoreFramework::Plain { .. } => &[],
            RestoreFramework::Fallback { imports, .. } => imports,
        }
    }
}

/// Orders frameworks for reduction when projecting multi-framework shaped
/// data onto a single-framework project.
pub trait FrameworkComparator {
    /// `Less` means `a` is preferred over `b`.
    fn compare(&self, a: &TargetFramework, b: &TargetFramework) -> Ordering;
}

/// Prefers the framework nearest to a reduction target: the target's own
/// family ranks first, then `netstandard` contracts, then everything else;
/// within a rank, higher versions sort first.
#[derive(Debug, Clone)]
pub struct NearestFrameworkComparator {
    target: TargetFramework,
}

impl NearestFrameworkComparator {
    pub fn new(target: TargetFramework) -> Self {
        NearestFrameworkComparator { target }
    }

    /// The reduction target.
    pub fn target(&self) -> &TargetFramework {
        &self.target
    }

    fn rank(&self, framework: &TargetFramework) -> u8 {
        if framework.family() == self.target.family() {
            0
        } else if framework.family() == FrameworkFamily::NetStandard {
            1
        } else {
            2
        }
    }
}

impl FrameworkComparator for NearestFrameworkComparator {
    fn compare(&self, a: &TargetFramework, b: &TargetFramework) -> Ordering {
        self.rank(a)
            .cmp(&self.rank(b))
            .then_with(|| b.version().cmp(&a.version()))
    }
}
