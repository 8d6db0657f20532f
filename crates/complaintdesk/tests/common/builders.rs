//! Builder patterns for creating test data programmatically.

#![allow(dead_code)]

use complaintdesk::config::{AppConfig, StorageBackend};
use complaintdesk::{ComplaintCategory, NewComplaint};

/// Builder for submission fields.
pub struct ComplaintBuilder {
    fields: NewComplaint,
}

impl ComplaintBuilder {
    /// A valid power outage report.
    pub fn new() -> Self {
        Self {
            fields: NewComplaint {
                ca_number: "112233445566".to_string(),
                full_name: "สมชาย ใจดี".to_string(),
                phone: "0812345678".to_string(),
                category: ComplaintCategory::PowerOutage,
                description: "ไฟฟ้าดับทั้งซอยมา 1 ชั่วโมงแล้ว".to_string(),
                photo: None,
                location: "123 ถนนสุขุมวิท แขวงคลองเตย เขตคลองเตย กรุงเทพฯ".to_string(),
            },
        }
    }

    pub fn category(mut self, category: ComplaintCategory) -> Self {
        self.fields.category = category;
        self
    }

    pub fn ca_number(mut self, ca_number: &str) -> Self {
        self.fields.ca_number = ca_number.to_string();
        self
    }

    pub fn full_name(mut self, name: &str) -> Self {
        self.fields.full_name = name.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.fields.description = description.to_string();
        self
    }

    pub fn photo(mut self, data_url: &str) -> Self {
        self.fields.photo = Some(data_url.to_string());
        self
    }

    pub fn build(self) -> NewComplaint {
        self.fields
    }
}

impl Default for ComplaintBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for application configs that stay off the network and disk
/// unless told otherwise.
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.storage.latency_ms = 0;
        config.summary.api_key_env_var = None;
        Self { config }
    }

    pub fn backend(mut self, backend: StorageBackend, path: Option<&str>) -> Self {
        self.config.storage.backend = backend;
        self.config.storage.path = path.map(str::to_string);
        self
    }

    pub fn seed(mut self, enabled: bool) -> Self {
        self.config.seed.enabled = enabled;
        self
    }

    pub fn latency_ms(mut self, latency_ms: u64) -> Self {
        self.config.storage.latency_ms = latency_ms;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
