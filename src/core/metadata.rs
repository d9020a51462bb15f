//! Reference metadata extraction.
//!
//! The host attaches metadata to each reference record as an ordered pair of
//! parallel (element-name, value) sequences. That shape is awkward to query,
//! so it is folded into a name → value map at the boundary; lookups then
//! return the stored value or an empty string when the element is absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::RestoreError;

/// Metadata element naming the assets a consuming project compiles against.
pub const INCLUDE_ASSETS: &str = "IncludeAssets";
/// Metadata element naming the assets excluded from consumption.
pub const EXCLUDE_ASSETS: &str = "ExcludeAssets";
/// Metadata element naming the assets suppressed from parent projects.
pub const PRIVATE_ASSETS: &str = "PrivateAssets";

/// The element names the normalizer reads, in extraction order.
pub const FLAG_ELEMENTS: [&str; 3] = [INCLUDE_ASSETS, EXCLUDE_ASSETS, PRIVATE_ASSETS];

/// Metadata attached to one reference record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceMetadata {
    elements: BTreeMap<String, String>,
}

impl ReferenceMetadata {
    /// Metadata with no elements. Every lookup yields the empty string.
    pub fn empty() -> Self {
        ReferenceMetadata::default()
    }

    /// Fold the host's parallel name/value sequences into a map.
    ///
    /// Sequences of unequal length are truncated to the shorter one; a
    /// repeated name keeps the last value, matching last-write-wins project
    /// file semantics.
    pub fn from_pairs<N, V>(names: N, values: V) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let elements = names
            .into_iter()
            .zip(values)
            .map(|(n, v)| (n.into(), v.into()))
            .collect();
        ReferenceMetadata { elements }
    }

    /// Insert or replace one element.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.elements.insert(name.into(), value.into());
        self
    }

    /// The value of `element`, or `""` when absent.
    ///
    /// An empty element name is a contract violation: callers always name a
    /// concrete element, so an empty name is a bug at the call site rather
    /// than a condition to default away.
    pub fn value(&self, element: &str) -> Result<&str, RestoreError> {
        if element.is_empty() {
            return Err(RestoreError::ContractViolation {
                argument: "metadata element name",
            });
        }
        Ok(self
            .elements
            .get(element)
            .map(String::as_str)
            .unwrap_or(""))
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_element_yields_empty_string() {
        let meta = ReferenceMetadata::empty();
        assert_eq!(meta.value(INCLUDE_ASSETS).unwrap(), "");
        assert_eq!(meta.value("Anything").unwrap(), "");
    }

    #[test]
    fn test_present_element_yields_value() {
        let meta = ReferenceMetadata::empty().with(PRIVATE_ASSETS, "all");
        assert_eq!(meta.value(PRIVATE_ASSETS).unwrap(), "all");
        assert_eq!(meta.value(EXCLUDE_ASSETS).unwrap(), "");
    }

    #[test]
    fn test_empty_element_name_is_contract_violation() {
        let meta = ReferenceMetadata::empty();
        let err = meta.value("").unwrap_err();
        assert!(matches!(
            err,
            RestoreError::ContractViolation {
                argument: "metadata element name"
            }
        ));
    }

    #[test]
    fn test_from_pairs_zips_parallel_sequences() {
        let meta = ReferenceMetadata::from_pairs(
            [INCLUDE_ASSETS, EXCLUDE_ASSETS],
            ["compile;runtime", "build"],
        );
        assert_eq!(meta.value(INCLUDE_ASSETS).unwrap(), "compile;runtime");
        assert_eq!(meta.value(EXCLUDE_ASSETS).unwrap(), "build");
    }

    #[test]
    fn test_from_pairs_truncates_to_shorter_sequence() {
        let meta = ReferenceMetadata::from_pairs([INCLUDE_ASSETS, EXCLUDE_ASSETS], ["compile"]);
        assert_eq!(meta.value(INCLUDE_ASSETS).unwrap(), "compile");
        assert_eq!(meta.value(EXCLUDE_ASSETS).unwrap(), "");
    }

    #[test]
    fn test_from_pairs_last_write_wins() {
        let meta =
            ReferenceMetadata::from_pairs([PRIVATE_ASSETS, PRIVATE_ASSETS], ["none", "all"]);
        assert_eq!(meta.value(PRIVATE_ASSETS).unwrap(), "all");
    }
}
