//! Store configuration.
//!
//! ```
//! use smarttable::{SortPolicy, StoreConfig};
//!
//! let config = StoreConfig::from_json(r#"{"page_size": 250, "sort_policy": "reset"}"#).unwrap();
//! assert_eq!(config.page_size, 250);
//! assert_eq!(config.filter_delay_ms, 750);
//! assert_eq!(config.sort_policy, SortPolicy::Reset);
//! ```

use crate::error::StoreError;
use crate::sort::SortPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_FILTER_DELAY_MS: u64 = 750;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Largest number of rows a single grow adds to the window.
    pub page_size: usize,
    /// Quiet period after the last keystroke before a column filter applies.
    pub filter_delay_ms: u64,
    pub sort_policy: SortPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            page_size: DEFAULT_PAGE_SIZE,
            filter_delay_ms: DEFAULT_FILTER_DELAY_MS,
            sort_policy: SortPolicy::default(),
        }
    }
}

impl StoreConfig {
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_filter_delay(mut self, delay: Duration) -> Self {
        self.filter_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_sort_policy(mut self, policy: SortPolicy) -> Self {
        self.sort_policy = policy;
        self
    }

    pub fn filter_delay(&self) -> Duration {
        Duration::from_millis(self.filter_delay_ms)
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.page_size == 0 {
            return Err(StoreError::InvalidConfig("page_size must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let config: StoreConfig = serde_json::from_str(json)
            .map_err(|e| StoreError::InvalidConfig(format!("JSON parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.page_size, 100);
        assert_eq!(config.filter_delay(), Duration::from_millis(750));
        assert_eq!(config.sort_policy, SortPolicy::Reapply);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = StoreConfig::from_json(r#"{"filter_delay_ms": 10}"#).unwrap();
        assert_eq!(config.filter_delay_ms, 10);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let err = StoreConfig::from_json(r#"{"page_size": 0}"#).unwrap_err();
        assert!(matches!(err, StoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(StoreConfig::from_json("{page_size").is_err());
        assert!(StoreConfig::from_json(r#"{"sort_policy": "sideways"}"#).is_err());
    }

    #[test]
    fn test_builders() {
        let config = StoreConfig::default()
            .with_page_size(5)
            .with_filter_delay(Duration::from_millis(20))
            .with_sort_policy(SortPolicy::Reset);
        assert_eq!(config.page_size, 5);
        assert_eq!(config.filter_delay_ms, 20);
        assert_eq!(config.sort_policy, SortPolicy::Reset);
    }

    #[test]
    fn test_huge_delay_saturates() {
        let config = StoreConfig::default().with_filter_delay(Duration::MAX);
        assert_eq!(config.filter_delay_ms, u64::MAX);
    }
}
