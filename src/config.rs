//! Grader configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::types::*;

/// Tunables for how form rows are interpreted during grading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraderConfig {
    /// Accept "Dr"/"Cr" in the entry-type column
    pub accept_side_abbreviations: bool,
    /// Skip untouched form rows (blank account and side, zero amount) without warning
    pub skip_placeholder_rows: bool,
    /// Reject amounts with more decimal places than this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount_scale: Option<i64>,
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            accept_side_abbreviations: true,
            skip_placeholder_rows: true,
            max_amount_scale: None,
        }
    }
}

impl GraderConfig {
    /// Parse a configuration from JSON; missing keys fall back to defaults
    pub fn from_json_str(json: &str) -> GraderResult<Self> {
        let config: GraderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> GraderResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        tracing::debug!(path = %path.display(), ?config, "loaded grader config");
        Ok(config)
    }

    pub fn validate(&self) -> GraderResult<()> {
        if let Some(scale) = self.max_amount_scale {
            if scale < 0 {
                return Err(GraderError::Config(format!(
                    "max_amount_scale must be zero or positive, got {}",
                    scale
                )));
            }
        }
        Ok(())
    }
}
