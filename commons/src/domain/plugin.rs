use super::ConfigTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire code sent for a plugin type this side cannot map.
///
/// The remote manager rejects it; the client never fails on it.
pub const UNKNOWN_PLUGIN_TYPE: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PluginType {
    Collector,
    Processor,
    Publisher,
}

impl PluginType {
    pub fn wire_code(self) -> i32 {
        match self {
            PluginType::Collector => 0,
            PluginType::Processor => 1,
            PluginType::Publisher => 2,
        }
    }

    pub fn from_wire_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(PluginType::Collector),
            1 => Some(PluginType::Processor),
            2 => Some(PluginType::Publisher),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PluginType::Collector => "collector",
            PluginType::Processor => "processor",
            PluginType::Publisher => "publisher",
        }
    }
}

impl From<PluginType> for i32 {
    fn from(t: PluginType) -> Self {
        t.wire_code()
    }
}

impl std::str::FromStr for PluginType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "collector" => Ok(PluginType::Collector),
            "processor" => Ok(PluginType::Processor),
            "publisher" => Ok(PluginType::Publisher),
            _ => Err(format!("Unknown plugin type: {}", s)),
        }
    }
}

impl fmt::Display for PluginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire code for a plugin type name, [`UNKNOWN_PLUGIN_TYPE`] when it does not map.
pub fn plugin_type_code(type_name: &str) -> i32 {
    type_name
        .parse::<PluginType>()
        .map(PluginType::wire_code)
        .unwrap_or(UNKNOWN_PLUGIN_TYPE)
}

/// Identity of a plugin a task depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plugin {
    pub type_name: String,
    pub name: String,
    pub version: i64,
}

impl Plugin {
    pub fn new(plugin_type: PluginType, name: impl Into<String>, version: i64) -> Self {
        Self {
            type_name: plugin_type.as_str().to_string(),
            name: name.into(),
            version,
        }
    }

    pub fn plugin_type(&self) -> Option<PluginType> {
        self.type_name.parse().ok()
    }
}

/// A plugin as referenced by a task workflow, with its task-level config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscribedPlugin {
    pub type_name: String,
    pub name: String,
    pub version: i64,
    pub config: ConfigTable,
}

impl SubscribedPlugin {
    pub fn new(plugin_type: PluginType, name: impl Into<String>, version: i64) -> Self {
        Self {
            type_name: plugin_type.as_str().to_string(),
            name: name.into(),
            version,
            config: ConfigTable::new(),
        }
    }

    pub fn with_config(mut self, config: ConfigTable) -> Self {
        self.config = config;
        self
    }
}
