//! Scheduler-side domain objects handled by the control proxy.

mod metric;
mod plugin;
mod types;

pub use metric::Metric;
pub use plugin::{plugin_type_code, Plugin, PluginType, SubscribedPlugin, UNKNOWN_PLUGIN_TYPE};
pub use types::{ConfigTable, ConfigValue, MetricValue};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Segment that matches any single namespace element.
pub const WILDCARD: &str = "*";

/// Hierarchical metric path, e.g. `intel/procfs/cpu/*/user`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Namespace(Vec<String>);

impl Namespace {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if any segment needs expanding by the remote manager.
    pub fn is_wildcard(&self) -> bool {
        self.0.iter().any(|s| s == WILDCARD)
    }
}

impl From<Vec<String>> for Namespace {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for Namespace {
    fn from(segments: &[&str]) -> Self {
        Self::new(segments.iter().copied())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0.join("/"))
    }
}
