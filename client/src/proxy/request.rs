//! Wire request construction. Builders are total and never fail; values this
//! side cannot map are sent as sentinels for the manager to reject.

use commons::domain::{ConfigTable, Metric, Namespace, Plugin, PluginType, SubscribedPlugin};
use commons::rpc::{convert, msg};
use std::time::SystemTime;

/// Shared by namespace expansion and query matching.
pub fn namespace_request(namespace: &Namespace) -> msg::ExpandWildcardsRequest {
    msg::ExpandWildcardsRequest {
        namespace: namespace.segments().to_vec(),
    }
}

/// Shared by publish and process.
pub fn pub_proc_request(
    content_type: &str,
    content: &[u8],
    plugin_name: &str,
    plugin_version: i64,
    config: &ConfigTable,
    task_id: &str,
) -> msg::PubProcMetricsRequest {
    msg::PubProcMetricsRequest {
        content_type: content_type.to_string(),
        content: content.to_vec(),
        plugin_name: plugin_name.to_string(),
        plugin_version,
        config: Some(convert::to_config_map(config)),
        task_id: task_id.to_string(),
    }
}

pub fn collect_request(
    metrics: &[Metric],
    deadline: SystemTime,
    task_id: &str,
) -> msg::CollectMetricsRequest {
    msg::CollectMetricsRequest {
        metrics: convert::to_wire_metrics(metrics),
        deadline: Some(convert::to_wire_time(deadline)),
        task_id: task_id.to_string(),
    }
}

pub fn content_types_request(
    name: &str,
    plugin_type: PluginType,
    version: i32,
) -> msg::GetPluginContentTypesRequest {
    msg::GetPluginContentTypesRequest {
        name: name.to_string(),
        plugin_type: plugin_type.wire_code(),
        version,
    }
}

pub fn validate_deps_request(
    metrics: &[Metric],
    plugins: &[SubscribedPlugin],
) -> msg::ValidateDepsRequest {
    msg::ValidateDepsRequest {
        metrics: convert::to_wire_metrics(metrics),
        plugins: convert::to_subscribed_plugins(plugins),
    }
}

/// Shared by subscribe and unsubscribe.
pub fn deps_request(task_id: &str, metrics: &[Metric], plugins: &[Plugin]) -> msg::SubscribeDepsRequest {
    msg::SubscribeDepsRequest {
        metrics: convert::to_wire_metrics(metrics),
        plugins: convert::to_core_plugins(plugins),
        task_id: task_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commons::domain::{ConfigValue, UNKNOWN_PLUGIN_TYPE};
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_pub_proc_request_fields() {
        let mut config = ConfigTable::new();
        config.insert("file".into(), ConfigValue::from("/tmp/out"));
        let req = pub_proc_request("snap.gob", b"abc", "file", 3, &config, "task-1");
        assert_eq!(req.content_type, "snap.gob");
        assert_eq!(req.content, b"abc");
        assert_eq!(req.plugin_name, "file");
        assert_eq!(req.plugin_version, 3);
        assert_eq!(req.task_id, "task-1");
        assert_eq!(
            req.config.unwrap().string_map.get("file").map(String::as_str),
            Some("/tmp/out")
        );
    }

    #[test]
    fn test_empty_config_is_still_sent() {
        let req = pub_proc_request("", &[], "p", 1, &ConfigTable::new(), "");
        assert_eq!(req.config, Some(msg::ConfigMap::default()));
    }

    #[test]
    fn test_collect_request_deadline() {
        let deadline = UNIX_EPOCH + Duration::new(1_600_000_000, 999_999_999);
        let req = collect_request(&[], deadline, "t");
        assert_eq!(
            req.deadline,
            Some(msg::Time {
                sec: 1_600_000_000,
                nsec: 999_999_999
            })
        );
        assert!(req.metrics.is_empty());
    }

    #[test]
    fn test_content_types_request_codes() {
        let req = content_types_request("passthru", PluginType::Processor, 1);
        assert_eq!(req.plugin_type, 1);
        assert_eq!(req.version, 1);
    }

    #[test]
    fn test_deps_request_plugin_shape() {
        let plugins = vec![
            Plugin::new(PluginType::Collector, "mock", 2),
            Plugin {
                type_name: "mystery".into(),
                name: "x".into(),
                version: 1,
            },
        ];
        let metrics = vec![Metric::request(Namespace::new(["intel", "mock", "foo"]), 2)];
        let req = deps_request("task-9", &metrics, &plugins);
        assert_eq!(req.task_id, "task-9");
        assert_eq!(req.metrics[0].namespace, vec!["intel", "mock", "foo"]);
        assert_eq!(req.plugins[0].plugin_type, 0);
        assert_eq!(req.plugins[1].plugin_type, UNKNOWN_PLUGIN_TYPE);

        let validate = validate_deps_request(
            &metrics,
            &[SubscribedPlugin::new(PluginType::Publisher, "file", 1)],
        );
        assert_eq!(validate.plugins[0].type_name, "publisher");
        assert!(validate.plugins[0].config.is_some());
    }
}
