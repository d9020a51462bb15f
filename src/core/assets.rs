//! Asset-flag sets.
//!
//! A package carries several groups of assets (compile-time references,
//! runtime libraries, content files, build logic, ...). The three metadata
//! flags on a reference select which groups flow to the consuming project
//! and which are suppressed from its own consumers.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One asset group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetKind {
    Compile,
    Runtime,
    ContentFiles,
    Build,
    Native,
    Analyzers,
    BuildTransitive,
}

impl AssetKind {
    pub const ALL: [AssetKind; 7] = [
        AssetKind::Compile,
        AssetKind::Runtime,
        AssetKind::ContentFiles,
        AssetKind::Build,
        AssetKind::Native,
        AssetKind::Analyzers,
        AssetKind::BuildTransitive,
    ];

    fn from_token(token: &str) -> Option<AssetKind> {
        match token.to_ascii_lowercase().as_str() {
            "compile" => Some(AssetKind::Compile),
            "runtime" => Some(AssetKind::Runtime),
            "contentfiles" => Some(AssetKind::ContentFiles),
            "build" => Some(AssetKind::Build),
            "native" => Some(AssetKind::Native),
            "analyzers" => Some(AssetKind::Analyzers),
            "buildtransitive" => Some(AssetKind::BuildTransitive),
            _ => None,
        }
    }

    fn token(&self) -> &'static str {
        match self {
            AssetKind::Compile => "compile",
            AssetKind::Runtime => "runtime",
            AssetKind::ContentFiles => "contentfiles",
            AssetKind::Build => "build",
            AssetKind::Native => "native",
            AssetKind::Analyzers => "analyzers",
            AssetKind::BuildTransitive => "buildtransitive",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// A set of asset groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetSet {
    kinds: BTreeSet<AssetKind>,
}

impl AssetSet {
    pub fn none() -> Self {
        AssetSet::default()
    }

    pub fn all() -> Self {
        AssetSet {
            kinds: AssetKind::ALL.into_iter().collect(),
        }
    }

    pub fn of(kinds: impl IntoIterator<Item = AssetKind>) -> Self {
        AssetSet {
            kinds: kinds.into_iter().collect(),
        }
    }

    /// Parse a semicolon/comma-delimited flag list. `all` and `none` are
    /// recognized spellings; unknown tokens are ignored, since the project
    /// file schema is open-ended and a stray token must not fail a restore.
    pub fn parse(raw: &str) -> Self {
        let mut kinds = BTreeSet::new();
        for token in raw
            .split([';', ','])
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            if token.eq_ignore_ascii_case("all") {
                return AssetSet::all();
            }
            if token.eq_ignore_ascii_case("none") {
                kinds.clear();
                continue;
            }
            if let Some(kind) = AssetKind::from_token(token) {
                kinds.insert(kind);
            } else {
                tracing::warn!(token, "ignoring unrecognized asset flag");
            }
        }
        AssetSet { kinds }
    }

    pub fn contains(&self, kind: AssetKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Set difference.
    pub fn without(&self, other: &AssetSet) -> AssetSet {
        AssetSet {
            kinds: self.kinds.difference(&other.kinds).copied().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = AssetKind> + '_ {
        self.kinds.iter().copied()
    }
}

impl fmt::Display for AssetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kinds.len() == AssetKind::ALL.len() {
            return write!(f, "all");
        }
        if self.kinds.is_empty() {
            return write!(f, "none");
        }
        let tokens: Vec<&str> = self.kinds.iter().map(|k| k.token()).collect();
        write!(f, "{}", tokens.join(";"))
    }
}

/// Effective asset flags on a dependency entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFlags {
    /// Groups the consuming project uses, exclusions already subtracted.
    pub include: AssetSet,
    /// Groups explicitly excluded.
    pub exclude: AssetSet,
    /// Groups hidden from the consuming project's own consumers.
    pub suppress_parent: AssetSet,
}

impl AssetFlags {
    /// Apply the three raw flag strings, in the order include, exclude,
    /// private. Exclusion wins on overlap. Unspecified flags take the
    /// conventional defaults: everything included, nothing excluded, and
    /// content-files/analyzers/build kept private.
    pub fn from_raw(include: &str, exclude: &str, private: &str) -> Self {
        let include = if include.trim().is_empty() {
            AssetSet::all()
        } else {
            AssetSet::parse(include)
        };
        let exclude = if exclude.trim().is_empty() {
            AssetSet::none()
        } else {
            AssetSet::parse(exclude)
        };
        let suppress_parent = if private.trim().is_empty() {
            AssetSet::of([
                AssetKind::ContentFiles,
                AssetKind::Analyzers,
                AssetKind::Build,
            ])
        } else {
            AssetSet::parse(private)
        };

        AssetFlags {
            include: include.without(&exclude),
            exclude,
            suppress_parent,
        }
    }
}

impl Default for AssetFlags {
    fn default() -> Self {
        AssetFlags::from_raw("", "", "")
    }
}
