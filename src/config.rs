// ⚙️ Rule Configuration - Bounds for every guarded field
// Loaded from JSON so the bounds live outside the code

use anyhow::{bail, Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// RULE CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Lowest accepted age (inclusive)
    pub min_age: i64,

    /// Highest accepted age (inclusive)
    pub max_age: i64,

    /// Highest accepted student score (inclusive)
    pub max_score: i64,

    /// Whether an account may be opened with a zero balance
    pub allow_zero_opening_balance: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        RuleConfig {
            min_age: 0,
            max_age: 130,
            max_score: 100,
            allow_zero_opening_balance: true,
        }
    }
}

impl RuleConfig {
    /// Load rule bounds from a JSON file
    ///
    /// Missing keys fall back to the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read rules file: {:?}", path.as_ref()))?;

        Self::from_json(&content)
    }

    /// Parse rule bounds from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        let config: RuleConfig =
            serde_json::from_str(content).context("Failed to parse rules JSON")?;
        config.check()?;
        Ok(config)
    }

    /// Reject bound combinations no value could ever satisfy
    pub fn check(&self) -> Result<()> {
        if self.min_age > self.max_age {
            bail!(
                "min_age ({}) must not exceed max_age ({})",
                self.min_age,
                self.max_age
            );
        }
        if self.max_score < 0 {
            bail!("max_score must not be negative, got {}", self.max_score);
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
