pub mod convert;
pub mod msg;

/// Fully qualified gRPC service name of the metric manager.
pub const SERVICE_NAME: &str = "rpc.MetricManager";

/// Remote methods exposed by the metric manager service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    ExpandWildcards,
    MatchQueryToNamespaces,
    PublishMetrics,
    ProcessMetrics,
    CollectMetrics,
    GetPluginContentTypes,
    ValidateDeps,
    SubscribeDeps,
    UnsubscribeDeps,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::ExpandWildcards => "ExpandWildcards",
            Method::MatchQueryToNamespaces => "MatchQueryToNamespaces",
            Method::PublishMetrics => "PublishMetrics",
            Method::ProcessMetrics => "ProcessMetrics",
            Method::CollectMetrics => "CollectMetrics",
            Method::GetPluginContentTypes => "GetPluginContentTypes",
            Method::ValidateDeps => "ValidateDeps",
            Method::SubscribeDeps => "SubscribeDeps",
            Method::UnsubscribeDeps => "UnsubscribeDeps",
        }
    }

    /// HTTP/2 path the method is served under.
    pub fn path(self) -> &'static str {
        match self {
            Method::ExpandWildcards => "/rpc.MetricManager/ExpandWildcards",
            Method::MatchQueryToNamespaces => "/rpc.MetricManager/MatchQueryToNamespaces",
            Method::PublishMetrics => "/rpc.MetricManager/PublishMetrics",
            Method::ProcessMetrics => "/rpc.MetricManager/ProcessMetrics",
            Method::CollectMetrics => "/rpc.MetricManager/CollectMetrics",
            Method::GetPluginContentTypes => "/rpc.MetricManager/GetPluginContentTypes",
            Method::ValidateDeps => "/rpc.MetricManager/ValidateDeps",
            Method::SubscribeDeps => "/rpc.MetricManager/SubscribeDeps",
            Method::UnsubscribeDeps => "/rpc.MetricManager/UnsubscribeDeps",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_match_service_and_name() {
        let methods = [
            Method::ExpandWildcards,
            Method::MatchQueryToNamespaces,
            Method::PublishMetrics,
            Method::ProcessMetrics,
            Method::CollectMetrics,
            Method::GetPluginContentTypes,
            Method::ValidateDeps,
            Method::SubscribeDeps,
            Method::UnsubscribeDeps,
        ];
        let mut paths = std::collections::BTreeSet::new();
        for m in methods {
            assert_eq!(m.path(), format!("/{}/{}", SERVICE_NAME, m.as_str()));
            assert_eq!(m.to_string(), m.as_str());
            paths.insert(m.path());
        }
        assert_eq!(paths.len(), 9);
    }
}
