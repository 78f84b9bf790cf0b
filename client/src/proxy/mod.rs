pub mod request;


use crate::cltctx::CallContext;
use crate::grpc::{GrpcClientConfig, GrpcMetricManagerClient, MetricManagerClient};
use crate::manages::{ContentTypes, ManagesMetrics, ProcessedContent};
use crate::reply::{self, Outcome, PayloadPolicy};
use anyhow::Result;
use async_trait::async_trait;
use commons::domain::{ConfigTable, Metric, Namespace, Plugin, PluginType, SubscribedPlugin};
use commons::err::reply_errors_to_errors;
use commons::rpc::convert::{convert_snap_errors, from_wire_metrics, from_wire_namespaces};
use commons::rpc::Method;
use commons::SnapError;
use log::debug;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// The two operations answered with a namespace list.
#[derive(Debug, Clone, Copy)]
enum NamespaceQuery {
    Expand,
    Match,
}

impl NamespaceQuery {
    fn method(self) -> Method {
        match self {
            NamespaceQuery::Expand => Method::ExpandWildcards,
            NamespaceQuery::Match => Method::MatchQueryToNamespaces,
        }
    }
}

/// The two operations sharing the dependency subscription request.
#[derive(Debug, Clone, Copy)]
enum DepsChange {
    Subscribe,
    Unsubscribe,
}

impl DepsChange {
    fn method(self) -> Method {
        match self {
            DepsChange::Subscribe => Method::SubscribeDeps,
            DepsChange::Unsubscribe => Method::UnsubscribeDeps,
        }
    }
}

/// Fulfils [`ManagesMetrics`] by forwarding every call to a remote metric
/// manager.
///
/// Holds no state besides the shared client handle, so one proxy can serve
/// any number of concurrent callers.
pub struct ControlProxy<C: ?Sized> {
    client: Arc<C>,
    default_timeout: Option<Duration>,
}

impl<C: ?Sized> Clone for ControlProxy<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            default_timeout: self.default_timeout,
        }
    }
}

impl ControlProxy<GrpcMetricManagerClient> {
    pub async fn connect(config: &GrpcClientConfig) -> Result<Self> {
        let client = GrpcMetricManagerClient::connect(config).await?;
        Ok(Self::new(Arc::new(client)).with_default_timeout(config.call_timeout))
    }
}

impl<C: MetricManagerClient + ?Sized> ControlProxy<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            default_timeout: None,
        }
    }

    /// Bounds calls made with a context that has no deadline.
    pub fn with_default_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout;
        self
    }

    fn context(&self, ctx: &CallContext) -> CallContext {
        match (ctx.deadline(), self.default_timeout) {
            (None, Some(timeout)) => ctx.bounded_by(timeout),
            _ => ctx.clone(),
        }
    }

    async fn namespaces(
        &self,
        ctx: &CallContext,
        query: NamespaceQuery,
        namespace: &Namespace,
    ) -> Result<Vec<Namespace>, SnapError> {
        let ctx = self.context(ctx);
        let method = query.method();
        let req = ctx.request(request::namespace_request(namespace));
        let reply = match query {
            NamespaceQuery::Expand => ctx.run(method, self.client.expand_wildcards(req)).await?,
            NamespaceQuery::Match => {
                ctx.run(method, self.client.match_query_to_namespaces(req))
                    .await?
            }
        };
        reply::single_error(reply.error)?;
        let nss = from_wire_namespaces(reply.nss);
        if namespace.is_wildcard() {
            debug!("{} {} matched {} namespace(s)", method, namespace, nss.len());
        } else {
            debug!("{} {} is static, got {} namespace(s)", method, namespace, nss.len());
        }
        Ok(nss)
    }

    async fn deps(
        &self,
        ctx: &CallContext,
        change: DepsChange,
        task_id: &str,
        metrics: &[Metric],
        plugins: &[Plugin],
    ) -> Vec<SnapError> {
        let ctx = self.context(ctx);
        let method = change.method();
        let req = ctx.request(request::deps_request(task_id, metrics, plugins));
        debug!(
            "{} for task {}: {} metric(s), {} plugin(s)",
            method,
            task_id,
            metrics.len(),
            plugins.len()
        );
        let reply = match change {
            DepsChange::Subscribe => ctx.run(method, self.client.subscribe_deps(req)).await,
            DepsChange::Unsubscribe => ctx.run(method, self.client.unsubscribe_deps(req)).await,
        };
        reply::error_list(reply, |r| convert_snap_errors(r.errors))
    }
}

#[async_trait]
impl<C: MetricManagerClient + ?Sized> ManagesMetrics for ControlProxy<C> {
    async fn expand_wildcards(
        &self,
        ctx: &CallContext,
        namespace: &Namespace,
    ) -> Result<Vec<Namespace>, SnapError> {
        self.namespaces(ctx, NamespaceQuery::Expand, namespace).await
    }

    async fn match_query_to_namespaces(
        &self,
        ctx: &CallContext,
        namespace: &Namespace,
    ) -> Result<Vec<Namespace>, SnapError> {
        self.namespaces(ctx, NamespaceQuery::Match, namespace)
            .await
    }

    async fn publish_metrics(
        &self,
        ctx: &CallContext,
        content_type: &str,
        content: &[u8],
        plugin_name: &str,
        plugin_version: i64,
        config: &ConfigTable,
        task_id: &str,
    ) -> Vec<SnapError> {
        let ctx = self.context(ctx);
        let req = ctx.request(request::pub_proc_request(
            content_type,
            content,
            plugin_name,
            plugin_version,
            config,
            task_id,
        ));
        let reply = ctx
            .run(Method::PublishMetrics, self.client.publish_metrics(req))
            .await;
        reply::error_list(reply, |r| reply_errors_to_errors(r.errors))
    }

    async fn process_metrics(
        &self,
        ctx: &CallContext,
        content_type: &str,
        content: &[u8],
        plugin_name: &str,
        plugin_version: i64,
        config: &ConfigTable,
        task_id: &str,
    ) -> Outcome<ProcessedContent> {
        let ctx = self.context(ctx);
        let req = ctx.request(request::pub_proc_request(
            content_type,
            content,
            plugin_name,
            plugin_version,
            config,
            task_id,
        ));
        let reply = match ctx
            .run(Method::ProcessMetrics, self.client.process_metrics(req))
            .await
        {
            Ok(reply) => reply,
            Err(e) => return Outcome::transport(e),
        };
        let processed = ProcessedContent {
            content_type: reply.content_type,
            content: reply.content,
        };
        Outcome::from_reply(
            processed,
            reply_errors_to_errors(reply.errors),
            PayloadPolicy::KeepOnError,
        )
    }

    async fn collect_metrics(
        &self,
        ctx: &CallContext,
        metrics: &[Metric],
        deadline: SystemTime,
        task_id: &str,
    ) -> Outcome<Vec<Metric>> {
        let ctx = self.context(ctx);
        let req = ctx.request(request::collect_request(metrics, deadline, task_id));
        let reply = match ctx
            .run(Method::CollectMetrics, self.client.collect_metrics(req))
            .await
        {
            Ok(reply) => reply,
            Err(e) => return Outcome::transport(e),
        };
        debug!(
            "Collected {} metric(s) with {} error(s) for task {}",
            reply.metrics.len(),
            reply.errors.len(),
            task_id
        );
        Outcome::from_reply(
            reply.metrics,
            reply_errors_to_errors(reply.errors),
            PayloadPolicy::DropOnError,
        )
        .map(from_wire_metrics)
    }

    async fn get_plugin_content_types(
        &self,
        ctx: &CallContext,
        name: &str,
        plugin_type: PluginType,
        version: i32,
    ) -> Result<ContentTypes, SnapError> {
        let ctx = self.context(ctx);
        let req = ctx.request(request::content_types_request(name, plugin_type, version));
        let reply = ctx
            .run(
                Method::GetPluginContentTypes,
                self.client.get_plugin_content_types(req),
            )
            .await?;
        reply::message_error(reply.error)?;
        Ok(ContentTypes {
            accepted: reply.accepted_types,
            returned: reply.returned_types,
        })
    }

    async fn validate_deps(
        &self,
        ctx: &CallContext,
        metrics: &[Metric],
        plugins: &[SubscribedPlugin],
    ) -> Vec<SnapError> {
        let ctx = self.context(ctx);
        let req = ctx.request(request::validate_deps_request(metrics, plugins));
        let reply = ctx
            .run(Method::ValidateDeps, self.client.validate_deps(req))
            .await;
        reply::error_list(reply, |r| convert_snap_errors(r.errors))
    }

    async fn subscribe_deps(
        &self,
        ctx: &CallContext,
        task_id: &str,
        metrics: &[Metric],
        plugins: &[Plugin],
    ) -> Vec<SnapError> {
        self.deps(ctx, DepsChange::Subscribe, task_id, metrics, plugins)
            .await
    }

    async fn unsubscribe_deps(
        &self,
        ctx: &CallContext,
        task_id: &str,
        metrics: &[Metric],
        plugins: &[Plugin],
    ) -> Vec<SnapError> {
        self.deps(ctx, DepsChange::Unsubscribe, task_id, metrics, plugins)
            .await
    }
}
