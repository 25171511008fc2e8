//! Planner configuration

use crate::error::PlannerError;
use docplan_document::HeadingRule;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default property key under which the plan is stored
pub const DEFAULT_PROPERTY_KEY: &str = "documentPlannerData";

/// Placeholder paragraph inserted under generated headings
pub const DEFAULT_PLACEHOLDER: &str = "<insert your text here>";

/// Title paragraph of the TOC scaffold
pub const DEFAULT_TOC_TITLE: &str = "TABLE OF CONTENTS";

/// Planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Key of the plan in the property bag
    pub property_key: String,
    /// Quiet period before a scheduled save runs, in milliseconds
    pub save_debounce_ms: u64,
    /// Heading detection rule for sync and statistics
    pub heading_rule: HeadingRule,
    /// Text of the placeholder paragraph
    pub placeholder_text: String,
    /// Title of the TOC scaffold
    pub toc_title: String,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Emit logs as JSON
    pub log_json: bool,
}

impl PlannerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML; missing keys take defaults
    ///
    /// # Errors
    /// - `PlannerError::Config` on invalid TOML or bad values
    pub fn from_toml_str(source: &str) -> Result<Self, PlannerError> {
        let config: Self = toml::from_str(source).map_err(|e| PlannerError::Config(e.to_string()))?;
        if config.property_key.trim().is_empty() {
            return Err(PlannerError::Config("property_key must not be empty".to_string()));
        }
        Ok(config)
    }

    /// With property key
    #[inline]
    #[must_use]
    pub fn with_property_key(mut self, key: impl Into<String>) -> Self {
        self.property_key = key.into();
        self
    }

    /// With save debounce
    #[inline]
    #[must_use]
    pub fn with_save_debounce(mut self, debounce: Duration) -> Self {
        self.save_debounce_ms = u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// With heading rule
    #[inline]
    #[must_use]
    pub fn with_heading_rule(mut self, rule: HeadingRule) -> Self {
        self.heading_rule = rule;
        self
    }

    /// Save debounce as a duration
    #[inline]
    #[must_use]
    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            property_key: DEFAULT_PROPERTY_KEY.to_string(),
            save_debounce_ms: 100,
            heading_rule: HeadingRule::Strict,
            placeholder_text: DEFAULT_PLACEHOLDER.to_string(),
            toc_title: DEFAULT_TOC_TITLE.to_string(),
            log_filter: "info".to_string(),
            log_json: false,
        }
    }
}
