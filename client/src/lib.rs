//! Client side of the metric manager protocol.
//!
//! [`ControlProxy`] forwards the nine metric management operations to a
//! remote manager and folds every outcome, transport failures included, into
//! the error conventions callers expect from an in-process manager.

pub mod cltctx;
pub mod grpc;
pub mod manages;
pub mod proxy;
pub mod reply;

pub use cltctx::CallContext;
pub use grpc::{GrpcClientConfig, GrpcMetricManagerClient, MetricManagerClient};
pub use manages::{ContentTypes, ManagesMetrics, ProcessedContent};
pub use proxy::ControlProxy;
pub use reply::{Outcome, PayloadPolicy};
