//! Checker configuration.
//!
//! # Examples
//!
//! ```
//! use cadence_sema::config::{AccessCheckMode, CheckerConfig};
//!
//! let config = CheckerConfig::from_json(r#"{ "access_check_mode": "Strict" }"#).unwrap();
//! assert_eq!(config.access_check_mode, AccessCheckMode::Strict);
//! assert!(!config.position_info);
//! ```

use crate::types::Location;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How declarations without an access modifier are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccessCheckMode {
    /// Every declaration must have an explicit access modifier
    Strict,
    /// Missing modifiers mean private
    NotSpecifiedRestricted,
    /// Missing modifiers mean public
    #[default]
    NotSpecifiedUnrestricted,
    /// Access is not checked
    None,
}

impl AccessCheckMode {
    pub fn is_strict(self) -> bool {
        self == AccessCheckMode::Strict
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    pub access_check_mode: AccessCheckMode,
    /// Record member origins in the elaboration for tooling
    pub position_info: bool,
    /// Location assigned to every type declared by the checker
    pub location: Location,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid checker configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CheckerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn with_access_check_mode(mut self, mode: AccessCheckMode) -> Self {
        self.access_check_mode = mode;
        self
    }

    pub fn with_position_info(mut self, enabled: bool) -> Self {
        self.position_info = enabled;
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}
