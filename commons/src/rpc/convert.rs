//! Conversions between scheduler domain objects and wire records.
//!
//! All conversions are total: they never fail and never panic.

use super::msg;
use crate::domain::{
    plugin_type_code, ConfigTable, ConfigValue, Metric, MetricValue, Namespace, Plugin,
    SubscribedPlugin, UNKNOWN_PLUGIN_TYPE,
};
use crate::err::SnapError;
use crate::utils::TimeUtility;
use log::warn;
use std::time::SystemTime;

pub fn to_wire_time(t: SystemTime) -> msg::Time {
    let (sec, nsec) = TimeUtility::to_unix_parts(t);
    msg::Time { sec, nsec }
}

/// A missing time decodes as the epoch.
pub fn from_wire_time(t: Option<msg::Time>) -> SystemTime {
    let t = t.unwrap_or_default();
    TimeUtility::from_unix_parts(t.sec, t.nsec)
}

pub fn to_config_map(config: &ConfigTable) -> msg::ConfigMap {
    let mut out = msg::ConfigMap::default();
    for (key, value) in config {
        match value {
            ConfigValue::Str(v) => {
                out.string_map.insert(key.clone(), v.clone());
            }
            ConfigValue::Int(v) => {
                out.int_map.insert(key.clone(), *v);
            }
            ConfigValue::Float(v) => {
                out.float_map.insert(key.clone(), *v);
            }
            ConfigValue::Bool(v) => {
                out.bool_map.insert(key.clone(), *v);
            }
        }
    }
    out
}

/// A key present in more than one typed map keeps the value of the last map
/// read, in the order int, string, float, bool.
pub fn from_config_map(config: msg::ConfigMap) -> ConfigTable {
    let entries = config
        .int_map
        .into_iter()
        .map(|(k, v)| (k, ConfigValue::Int(v)))
        .chain(config.string_map.into_iter().map(|(k, v)| (k, ConfigValue::Str(v))))
        .chain(config.float_map.into_iter().map(|(k, v)| (k, ConfigValue::Float(v))))
        .chain(config.bool_map.into_iter().map(|(k, v)| (k, ConfigValue::Bool(v))));
    let mut out = ConfigTable::new();
    for (key, value) in entries {
        if let Some(prev) = out.get(&key) {
            warn!(
                "Config key {} is sent as both {} and {}, keeping {}",
                key,
                prev.type_name(),
                value.type_name(),
                value
            );
        }
        out.insert(key, value);
    }
    out
}

fn to_wire_data(value: &MetricValue) -> msg::metric::Data {
    use msg::metric::Data;
    match value {
        MetricValue::Float32(v) => Data::Float32Data(*v),
        MetricValue::Float64(v) => Data::Float64Data(*v),
        MetricValue::Int32(v) => Data::Int32Data(*v),
        MetricValue::Int64(v) => Data::Int64Data(*v),
        MetricValue::Uint32(v) => Data::Uint32Data(*v),
        MetricValue::Uint64(v) => Data::Uint64Data(*v),
        MetricValue::Bool(v) => Data::BoolData(*v),
        MetricValue::String(v) => Data::StringData(v.clone()),
        MetricValue::Bytes(v) => Data::BytesData(v.clone()),
    }
}

fn from_wire_data(data: msg::metric::Data) -> MetricValue {
    use msg::metric::Data;
    match data {
        Data::Float32Data(v) => MetricValue::Float32(v),
        Data::Float64Data(v) => MetricValue::Float64(v),
        Data::Int32Data(v) => MetricValue::Int32(v),
        Data::Int64Data(v) => MetricValue::Int64(v),
        Data::Uint32Data(v) => MetricValue::Uint32(v),
        Data::Uint64Data(v) => MetricValue::Uint64(v),
        Data::BoolData(v) => MetricValue::Bool(v),
        Data::StringData(v) => MetricValue::String(v),
        Data::BytesData(v) => MetricValue::Bytes(v),
    }
}

pub fn to_wire_metric(m: &Metric) -> msg::Metric {
    msg::Metric {
        namespace: m.namespace.segments().to_vec(),
        version: m.version,
        config: m.config.as_ref().map(to_config_map),
        last_advertised_time: Some(to_wire_time(m.last_advertised_time)),
        tags: m.tags.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        timestamp: Some(to_wire_time(m.timestamp)),
        unit: m.unit.clone(),
        description: m.description.clone(),
        data: m.value.as_ref().map(to_wire_data),
    }
}

pub fn from_wire_metric(m: msg::Metric) -> Metric {
    Metric {
        namespace: Namespace::from(m.namespace),
        version: m.version,
        value: m.data.map(from_wire_data),
        timestamp: from_wire_time(m.timestamp),
        last_advertised_time: from_wire_time(m.last_advertised_time),
        tags: m.tags.into_iter().collect(),
        unit: m.unit,
        description: m.description,
        config: m.config.map(from_config_map),
    }
}

pub fn to_wire_metrics(metrics: &[Metric]) -> Vec<msg::Metric> {
    metrics.iter().map(to_wire_metric).collect()
}

pub fn from_wire_metrics(metrics: Vec<msg::Metric>) -> Vec<Metric> {
    metrics.into_iter().map(from_wire_metric).collect()
}

pub fn to_wire_namespaces(nss: &[Namespace]) -> Vec<msg::ArrString> {
    nss.iter()
        .map(|ns| msg::ArrString {
            s: ns.segments().to_vec(),
        })
        .collect()
}

pub fn from_wire_namespaces(arr: Vec<msg::ArrString>) -> Vec<Namespace> {
    arr.into_iter().map(|a| Namespace::from(a.s)).collect()
}

/// Core plugin shape, for subscribe and unsubscribe.
pub fn to_core_plugins(plugins: &[Plugin]) -> Vec<msg::Plugin> {
    plugins
        .iter()
        .map(|p| {
            let code = plugin_type_code(&p.type_name);
            if code == UNKNOWN_PLUGIN_TYPE {
                warn!("Plugin {} has unknown type {:?}", p.name, p.type_name);
            }
            msg::Plugin {
                type_name: p.type_name.clone(),
                name: p.name.clone(),
                version: p.version,
                plugin_type: code,
            }
        })
        .collect()
}

/// Subscribed plugin shape, for dependency validation.
pub fn to_subscribed_plugins(plugins: &[SubscribedPlugin]) -> Vec<msg::SubscribedPlugin> {
    plugins
        .iter()
        .map(|p| msg::SubscribedPlugin {
            type_name: p.type_name.clone(),
            name: p.name.clone(),
            version: p.version,
            config: Some(to_config_map(&p.config)),
        })
        .collect()
}

pub fn from_wire_error(err: msg::SnapError) -> SnapError {
    SnapError::new(err.error_message).with_fields(err.error_fields)
}

pub fn to_wire_error(err: &SnapError) -> msg::SnapError {
    msg::SnapError {
        error_message: err.message().to_string(),
        error_fields: err
            .fields()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    }
}

/// Converts structured reply errors, keeping their order.
pub fn convert_snap_errors(errors: Vec<msg::SnapError>) -> Vec<SnapError> {
    errors.into_iter().map(from_wire_error).collect()
}

pub fn to_wire_errors(errors: &[SnapError]) -> Vec<msg::SnapError> {
    errors.iter().map(to_wire_error).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PluginType;
    use proptest::prelude::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn sample_config() -> ConfigTable {
        let mut config = ConfigTable::new();
        config.insert("user".into(), ConfigValue::from("root"));
        config.insert("port".into(), ConfigValue::from(8086i64));
        config.insert("ratio".into(), ConfigValue::from(0.25));
        config.insert("debug".into(), ConfigValue::from(true));
        config
    }

    #[test]
    fn test_config_map_keeps_type_tags() {
        let wire = to_config_map(&sample_config());
        assert_eq!(wire.string_map.get("user").map(String::as_str), Some("root"));
        assert_eq!(wire.int_map.get("port"), Some(&8086));
        assert_eq!(wire.float_map.get("ratio"), Some(&0.25));
        assert_eq!(wire.bool_map.get("debug"), Some(&true));
        assert_eq!(from_config_map(wire), sample_config());
    }

    #[test]
    fn test_config_key_in_two_maps_keeps_later_type() {
        let mut wire = msg::ConfigMap::default();
        wire.int_map.insert("k".into(), 1);
        wire.string_map.insert("k".into(), "s".into());
        wire.bool_map.insert("flag".into(), true);
        let config = from_config_map(wire);
        assert_eq!(config.len(), 2);
        assert_eq!(config.get("k"), Some(&ConfigValue::Str("s".into())));
        assert_eq!(config.get("flag"), Some(&ConfigValue::Bool(true)));
    }

    #[test]
    fn test_empty_config_map() {
        let wire = to_config_map(&ConfigTable::new());
        assert_eq!(wire, msg::ConfigMap::default());
        assert!(from_config_map(wire).is_empty());
    }

    #[test]
    fn test_metric_round_trip() {
        let metric = Metric::request(Namespace::new(["intel", "mock", "foo"]), 2)
            .with_value(
                MetricValue::Int64(42),
                UNIX_EPOCH + Duration::new(1_700_000_000, 5),
            )
            .with_tag("host", "node1")
            .with_config(sample_config());
        let wire = to_wire_metric(&metric);
        assert_eq!(wire.namespace, vec!["intel", "mock", "foo"]);
        assert_eq!(wire.data, Some(msg::metric::Data::Int64Data(42)));
        assert_eq!(from_wire_metric(wire), metric);
    }

    #[test]
    fn test_metric_without_value_or_times() {
        let wire = msg::Metric {
            namespace: vec!["a".into()],
            ..Default::default()
        };
        let metric = from_wire_metric(wire);
        assert_eq!(metric.value, None);
        assert_eq!(metric.timestamp, UNIX_EPOCH);
        assert_eq!(metric.config, None);
    }

    #[test]
    fn test_namespace_lists_keep_order() {
        let nss = vec![
            Namespace::new(["b", "x"]),
            Namespace::new(["a", "y"]),
            Namespace::default(),
        ];
        assert_eq!(from_wire_namespaces(to_wire_namespaces(&nss)), nss);
        assert!(from_wire_namespaces(Vec::new()).is_empty());
    }

    #[test]
    fn test_plugin_shapes() {
        let core = to_core_plugins(&[
            Plugin::new(PluginType::Publisher, "file", 3),
            Plugin {
                type_name: "streaming-collector".into(),
                name: "stream".into(),
                version: 1,
            },
        ]);
        assert_eq!(core[0].plugin_type, 2);
        assert_eq!(core[0].type_name, "publisher");
        assert_eq!(core[1].plugin_type, -1);

        let subscribed = to_subscribed_plugins(&[SubscribedPlugin::new(
            PluginType::Collector,
            "mock",
            1,
        )
        .with_config(sample_config())]);
        assert_eq!(subscribed[0].name, "mock");
        assert_eq!(
            subscribed[0].config.clone().map(from_config_map),
            Some(sample_config())
        );
    }

    #[test]
    fn test_structured_errors_keep_fields_and_order() {
        let wire = vec![
            msg::SnapError {
                error_message: "metric not found".into(),
                error_fields: [("name".to_string(), "/intel/foo".to_string())].into(),
            },
            msg::SnapError {
                error_message: "plugin not loaded".into(),
                error_fields: Default::default(),
            },
        ];
        let errs = convert_snap_errors(wire.clone());
        assert_eq!(errs.len(), 2);
        assert_eq!(errs[0].message(), "metric not found");
        assert_eq!(
            errs[0].fields().get("name").map(String::as_str),
            Some("/intel/foo")
        );
        assert!(errs.iter().all(|e| !e.is_transport()));
        assert_eq!(to_wire_errors(&errs), wire);
        assert!(convert_snap_errors(Vec::new()).is_empty());
    }

    fn config_value() -> impl Strategy<Value = ConfigValue> {
        prop_oneof![
            ".*".prop_map(ConfigValue::Str),
            any::<i64>().prop_map(ConfigValue::Int),
            (-1e12f64..1e12).prop_map(ConfigValue::Float),
            any::<bool>().prop_map(ConfigValue::Bool),
        ]
    }

    proptest! {
        #[test]
        fn prop_config_round_trip(config in prop::collection::btree_map("[a-z]{1,8}", config_value(), 0..16)) {
            prop_assert_eq!(from_config_map(to_config_map(&config)), config);
        }
    }
}
