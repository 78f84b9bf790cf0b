use super::{ConfigTable, MetricValue, Namespace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// A metric as requested by a task and as returned by a collector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub namespace: Namespace,
    pub version: i64,
    pub value: Option<MetricValue>,
    pub timestamp: SystemTime,
    pub last_advertised_time: SystemTime,
    pub tags: BTreeMap<String, String>,
    pub unit: String,
    pub description: String,
    pub config: Option<ConfigTable>,
}

impl Metric {
    /// A metric request with no data yet, as a task asks for it.
    pub fn request(namespace: Namespace, version: i64) -> Self {
        Self {
            namespace,
            version,
            value: None,
            timestamp: UNIX_EPOCH,
            last_advertised_time: UNIX_EPOCH,
            tags: BTreeMap::new(),
            unit: String::new(),
            description: String::new(),
            config: None,
        }
    }

    pub fn with_value(mut self, value: MetricValue, timestamp: SystemTime) -> Self {
        self.value = Some(value);
        self.timestamp = timestamp;
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn with_config(mut self, config: ConfigTable) -> Self {
        self.config = Some(config);
        self
    }
}
