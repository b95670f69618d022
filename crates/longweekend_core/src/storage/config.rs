//! Storage gateway configuration.
//!
//! Quota numbers are heuristics for browser local storage. They drive a
//! non-fatal warning only and never block a write.

/// Default key holding the serialized holiday collection.
pub const DEFAULT_STORAGE_KEY: &str = "long-weekend-planner.holidays";
/// Assumed backend capacity when the store cannot report one.
pub const DEFAULT_ASSUMED_QUOTA_BYTES: usize = 5 * 1024 * 1024;
/// Share of the assumed quota above which saves log a warning.
pub const DEFAULT_QUOTA_WARNING_RATIO: f64 = 0.8;

/// Tunables for `StorageGateway`.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub storage_key: String,
    pub assumed_quota_bytes: usize,
    pub quota_warning_ratio: f64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            assumed_quota_bytes: DEFAULT_ASSUMED_QUOTA_BYTES,
            quota_warning_ratio: DEFAULT_QUOTA_WARNING_RATIO,
        }
    }
}

impl GatewayConfig {
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    pub fn with_assumed_quota_bytes(mut self, assumed_quota_bytes: usize) -> Self {
        self.assumed_quota_bytes = assumed_quota_bytes;
        self
    }

    /// Sets the warning ratio, clamped to `0.0..=1.0`.
    pub fn with_quota_warning_ratio(mut self, ratio: f64) -> Self {
        self.quota_warning_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Byte count above which a save is considered close to quota.
    pub fn warning_threshold_bytes(&self) -> usize {
        (self.assumed_quota_bytes as f64 * self.quota_warning_ratio) as usize
    }

    /// Returns whether `estimated_bytes` is past the warning threshold.
    pub fn exceeds_warning_threshold(&self, estimated_bytes: usize) -> bool {
        estimated_bytes > self.warning_threshold_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::GatewayConfig;

    #[test]
    fn default_threshold_is_eighty_percent_of_five_mib() {
        let config = GatewayConfig::default();
        assert_eq!(config.warning_threshold_bytes(), 4 * 1024 * 1024);
        assert!(!config.exceeds_warning_threshold(4 * 1024 * 1024));
        assert!(config.exceeds_warning_threshold(4 * 1024 * 1024 + 1));
    }

    #[test]
    fn warning_ratio_is_clamped() {
        let config = GatewayConfig::default()
            .with_assumed_quota_bytes(100)
            .with_quota_warning_ratio(3.0);
        assert_eq!(config.warning_threshold_bytes(), 100);
    }
}
