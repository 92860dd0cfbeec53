//! Run configuration for the pair table.

use crate::error::{ProprError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options for [`crate::pairs::run`].
///
/// ```yaml
/// check: true
/// pseudocount: 0.5
/// max_phi: 0.5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProprConfig {
    /// Reject negative and missing input before computing.
    pub check: bool,
    /// Added to every value before any log transform.
    pub pseudocount: Option<f64>,
    /// Keep only pairs with phi at or below this value.
    pub max_phi: Option<f64>,
}

impl ProprConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(ProprError::from)
    }

    /// Load from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_yaml(&std::fs::read_to_string(path)?)
    }

    /// Reject values no run could use.
    pub fn validate(&self) -> Result<()> {
        if let Some(pc) = self.pseudocount {
            if pc.is_nan() || pc <= 0.0 {
                return Err(ProprError::InvalidParameter(format!(
                    "pseudocount must be positive, got {}",
                    pc
                )));
            }
        }
        if let Some(max_phi) = self.max_phi {
            if max_phi.is_nan() {
                return Err(ProprError::InvalidParameter(
                    "max_phi must be a number".to_string(),
                ));
            }
        }
        Ok(())
    }
}
