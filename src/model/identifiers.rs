//! Name newtypes with smart constructors.
//!
//! Region and panel names are the keys of the dock layout. Both reject
//! empty or whitespace-only strings at construction time.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Name of a region in the dock layout (e.g. "root", "right_top").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct RegionName(String);

/// Stable identifier of a panel (e.g. "viewport", "console").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct PanelName(String);

/// Error for blank region names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Region name cannot be empty")]
pub struct InvalidRegionName;

/// Error for blank panel names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Panel name cannot be empty")]
pub struct InvalidPanelName;

impl RegionName {
    /// Smart constructor: validates non-blank name
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidRegionName> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(InvalidRegionName);
        }
        Ok(Self(raw))
    }

    /// The full-window region every layout starts from.
    pub fn root() -> Self {
        Self::from_static(crate::dock::ROOT_REGION)
    }

    /// Constructor for compile-time names known to be non-blank.
    pub(crate) fn from_static(raw: &'static str) -> Self {
        debug_assert!(!raw.trim().is_empty());
        Self(raw.to_string())
    }

    /// The name as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PanelName {
    /// Smart constructor: validates non-blank name
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidPanelName> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(InvalidPanelName);
        }
        Ok(Self(raw))
    }

    /// Constructor for compile-time names known to be non-blank.
    pub(crate) fn from_static(raw: &'static str) -> Self {
        debug_assert!(!raw.trim().is_empty());
        Self(raw.to_string())
    }

    /// The name as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RegionName {
    type Error = InvalidRegionName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for PanelName {
    type Error = InvalidPanelName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for PanelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
