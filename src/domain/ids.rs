//! Domain identifier types with validation
//!
//! This module provides newtype wrappers for the identifiers shared by every
//! table of a dataset.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sample key newtype wrapper
///
/// Every input file is one sample, identified by its file name. The key joins
/// the sample table with all four analysis category tables.
///
/// # Examples
///
/// ```
/// use cardlive::domain::ids::SampleKey;
/// use std::str::FromStr;
///
/// let key = SampleKey::from_str("sample-0001.json").unwrap();
/// assert_eq!(key.as_str(), "sample-0001.json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SampleKey(String);

impl SampleKey {
    /// Creates a new SampleKey from a file name
    ///
    /// # Returns
    ///
    /// Returns `Ok(SampleKey)` if the name is non-empty and has no path
    /// separators, `Err` otherwise
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Sample key cannot be empty".to_string());
        }
        if name.contains('/') || name.contains('\\') {
            return Err(format!(
                "Sample key must be a bare file name, got: {name}"
            ));
        }
        Ok(Self(name))
    }

    /// Returns the sample key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SampleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SampleKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SampleKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Geographic area codes with special meaning
pub mod geo {
    /// Code for Antarctica, which was the default choice in the submission form
    pub const ANTARCTICA: i64 = 10;

    /// Code used for samples with no applicable geographic area
    pub const NOT_APPLICABLE: i64 = -10;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_key_valid() {
        let key = SampleKey::new("abc.json").unwrap();
        assert_eq!(key.as_str(), "abc.json");
        assert_eq!(key.to_string(), "abc.json");
        assert_eq!(key.clone().into_inner(), "abc.json");
    }

    #[test]
    fn test_sample_key_rejects_empty() {
        assert!(SampleKey::new("").is_err());
        assert!(SampleKey::new("   ").is_err());
    }

    #[test]
    fn test_sample_key_rejects_paths() {
        assert!(SampleKey::new("dir/abc.json").is_err());
        assert!(SampleKey::new("dir\\abc.json").is_err());
    }

    #[test]
    fn test_sample_key_ordering() {
        let a = SampleKey::new("a").unwrap();
        let b = SampleKey::new("b").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_sample_key_serialization() {
        let key = SampleKey::new("s1").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"s1\"");
        let back: SampleKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
