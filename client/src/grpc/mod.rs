mod config;

pub use config::GrpcClientConfig;

use anyhow::Result;
use async_trait::async_trait;
use commons::rpc::msg;
use commons::rpc::{Method, SERVICE_NAME};
use http::uri::PathAndQuery;
use log::{debug, info};
use tonic::codec::ProstCodec;
use tonic::transport::{Channel, Endpoint};
use tonic::{Request, Response, Status};

/// Remote side of the metric manager protocol: one unary call per method.
///
/// Implementations must be usable from many in-flight calls at once.
#[async_trait]
pub trait MetricManagerClient: Send + Sync {
    async fn expand_wildcards(
        &self,
        request: Request<msg::ExpandWildcardsRequest>,
    ) -> Result<Response<msg::ExpandWildcardsReply>, Status>;

    async fn match_query_to_namespaces(
        &self,
        request: Request<msg::ExpandWildcardsRequest>,
    ) -> Result<Response<msg::ExpandWildcardsReply>, Status>;

    async fn publish_metrics(
        &self,
        request: Request<msg::PubProcMetricsRequest>,
    ) -> Result<Response<msg::ErrorReply>, Status>;

    async fn process_metrics(
        &self,
        request: Request<msg::PubProcMetricsRequest>,
    ) -> Result<Response<msg::ProcessMetricsReply>, Status>;

    async fn collect_metrics(
        &self,
        request: Request<msg::CollectMetricsRequest>,
    ) -> Result<Response<msg::CollectMetricsReply>, Status>;

    async fn get_plugin_content_types(
        &self,
        request: Request<msg::GetPluginContentTypesRequest>,
    ) -> Result<Response<msg::GetPluginContentTypesReply>, Status>;

    async fn validate_deps(
        &self,
        request: Request<msg::ValidateDepsRequest>,
    ) -> Result<Response<msg::ValidateDepsReply>, Status>;

    async fn subscribe_deps(
        &self,
        request: Request<msg::SubscribeDepsRequest>,
    ) -> Result<Response<msg::SubscribeDepsReply>, Status>;

    async fn unsubscribe_deps(
        &self,
        request: Request<msg::SubscribeDepsRequest>,
    ) -> Result<Response<msg::SubscribeDepsReply>, Status>;
}

/// [`MetricManagerClient`] over a tonic channel.
#[derive(Clone)]
pub struct GrpcMetricManagerClient {
    inner: tonic::client::Grpc<Channel>,
}

impl GrpcMetricManagerClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    fn endpoint(config: &GrpcClientConfig) -> Result<Endpoint> {
        let endpoint = Channel::from_shared(config.endpoint.clone())?
            .connect_timeout(config.connect_timeout)
            .tcp_keepalive(Some(config.keepalive_interval))
            .http2_keep_alive_interval(config.keepalive_interval)
            .keep_alive_timeout(config.keepalive_timeout);
        Ok(endpoint)
    }

    /// Connects eagerly, failing if the manager cannot be reached.
    pub async fn connect(config: &GrpcClientConfig) -> Result<Self> {
        let channel = Self::endpoint(config)?.connect().await?;
        info!("Connected to metric manager at {}", config.endpoint);
        Ok(Self::new(channel))
    }

    /// Defers connecting to the first call; connection failures then surface
    /// as transport errors of that call.
    pub fn connect_lazy(config: &GrpcClientConfig) -> Result<Self> {
        let channel = Self::endpoint(config)?.connect_lazy();
        debug!("Lazy channel to metric manager at {}", config.endpoint);
        Ok(Self::new(channel))
    }

    async fn unary<Q, P>(&self, method: Method, request: Request<Q>) -> Result<Response<P>, Status>
    where
        Q: prost::Message + Send + Sync + 'static,
        P: prost::Message + Default + Send + Sync + 'static,
    {
        // the channel is a cheap handle; cloning keeps calls independent
        let mut grpc = self.inner.clone();
        grpc.ready()
            .await
            .map_err(|e| Status::unavailable(format!("Service was not ready: {}", e)))?;
        let path = PathAndQuery::from_static(method.path());
        let mut request = request;
        request
            .extensions_mut()
            .insert(tonic::GrpcMethod::new(SERVICE_NAME, method.as_str()));
        grpc.unary(request, path, ProstCodec::default()).await
    }
}

#[async_trait]
impl MetricManagerClient for GrpcMetricManagerClient {
    async fn expand_wildcards(
        &self,
        request: Request<msg::ExpandWildcardsRequest>,
    ) -> Result<Response<msg::ExpandWildcardsReply>, Status> {
        self.unary(Method::ExpandWildcards, request).await
    }

    async fn match_query_to_namespaces(
        &self,
        request: Request<msg::ExpandWildcardsRequest>,
    ) -> Result<Response<msg::ExpandWildcardsReply>, Status> {
        self.unary(Method::MatchQueryToNamespaces, request).await
    }

    async fn publish_metrics(
        &self,
        request: Request<msg::PubProcMetricsRequest>,
    ) -> Result<Response<msg::ErrorReply>, Status> {
        self.unary(Method::PublishMetrics, request).await
    }

    async fn process_metrics(
        &self,
        request: Request<msg::PubProcMetricsRequest>,
    ) -> Result<Response<msg::ProcessMetricsReply>, Status> {
        self.unary(Method::ProcessMetrics, request).await
    }

    async fn collect_metrics(
        &self,
        request: Request<msg::CollectMetricsRequest>,
    ) -> Result<Response<msg::CollectMetricsReply>, Status> {
        self.unary(Method::CollectMetrics, request).await
    }

    async fn get_plugin_content_types(
        &self,
        request: Request<msg::GetPluginContentTypesRequest>,
    ) -> Result<Response<msg::GetPluginContentTypesReply>, Status> {
        self.unary(Method::GetPluginContentTypes, request).await
    }

    async fn validate_deps(
        &self,
        request: Request<msg::ValidateDepsRequest>,
    ) -> Result<Response<msg::ValidateDepsReply>, Status> {
        self.unary(Method::ValidateDeps, request).await
    }

    async fn subscribe_deps(
        &self,
        request: Request<msg::SubscribeDepsRequest>,
    ) -> Result<Response<msg::SubscribeDepsReply>, Status> {
        self.unary(Method::SubscribeDeps, request).await
    }

    async fn unsubscribe_deps(
        &self,
        request: Request<msg::SubscribeDepsRequest>,
    ) -> Result<Response<msg::SubscribeDepsReply>, Status> {
        self.unary(Method::UnsubscribeDeps, request).await
    }
}
