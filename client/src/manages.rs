use crate::cltctx::CallContext;
use crate::reply::Outcome;
use async_trait::async_trait;
use commons::domain::{ConfigTable, Metric, Namespace, Plugin, PluginType, SubscribedPlugin};
use commons::SnapError;
use std::time::SystemTime;

/// Content handed back by a processor plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedContent {
    pub content_type: String,
    pub content: Vec<u8>,
}

/// Content types a plugin accepts and the ones it emits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTypes {
    pub accepted: Vec<String>,
    pub returned: Vec<String>,
}

/// Metric management operations the scheduler relies on, whether the
/// manager runs in process or behind a remote channel.
#[async_trait]
pub trait ManagesMetrics: Send + Sync {
    async fn expand_wildcards(
        &self,
        ctx: &CallContext,
        namespace: &Namespace,
    ) -> Result<Vec<Namespace>, SnapError>;

    async fn match_query_to_namespaces(
        &self,
        ctx: &CallContext,
        namespace: &Namespace,
    ) -> Result<Vec<Namespace>, SnapError>;

    #[allow(clippy::too_many_arguments)]
    async fn publish_metrics(
        &self,
        ctx: &CallContext,
        content_type: &str,
        content: &[u8],
        plugin_name: &str,
        plugin_version: i64,
        config: &ConfigTable,
        task_id: &str,
    ) -> Vec<SnapError>;

    /// The processed content is returned even when errors were reported.
    #[allow(clippy::too_many_arguments)]
    async fn process_metrics(
        &self,
        ctx: &CallContext,
        content_type: &str,
        content: &[u8],
        plugin_name: &str,
        plugin_version: i64,
        config: &ConfigTable,
        task_id: &str,
    ) -> Outcome<ProcessedContent>;

    /// All or nothing: any reported error discards the collected metrics.
    async fn collect_metrics(
        &self,
        ctx: &CallContext,
        metrics: &[Metric],
        deadline: SystemTime,
        task_id: &str,
    ) -> Outcome<Vec<Metric>>;

    async fn get_plugin_content_types(
        &self,
        ctx: &CallContext,
        name: &str,
        plugin_type: PluginType,
        version: i32,
    ) -> Result<ContentTypes, SnapError>;

    async fn validate_deps(
        &self,
        ctx: &CallContext,
        metrics: &[Metric],
        plugins: &[SubscribedPlugin],
    ) -> Vec<SnapError>;

    async fn subscribe_deps(
        &self,
        ctx: &CallContext,
        task_id: &str,
        metrics: &[Metric],
        plugins: &[Plugin],
    ) -> Vec<SnapError>;

    async fn unsubscribe_deps(
        &self,
        ctx: &CallContext,
        task_id: &str,
        metrics: &[Metric],
        plugins: &[Plugin],
    ) -> Vec<SnapError>;
}
