use commons::rpc::Method;
use commons::SnapError;
use log::{debug, warn};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Bounds a single remote call: an optional deadline plus a cancellation
/// token shared with whoever may abort the call.
///
/// The default context never expires and is never cancelled.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl CallContext {
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancel: CancellationToken::new(),
        }
    }

    /// Cancels this context whenever `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Same cancellation, deadline tightened to at most `timeout` from now.
    pub fn bounded_by(&self, timeout: Duration) -> Self {
        let candidate = Instant::now() + timeout;
        Self {
            deadline: Some(self.deadline.map_or(candidate, |d| d.min(candidate))),
            cancel: self.cancel.clone(),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Fails if the call must not be started at all.
    pub fn check(&self) -> Result<(), SnapError> {
        if self.is_cancelled() {
            return Err(SnapError::cancelled());
        }
        match self.remaining() {
            Some(left) if left.is_zero() => Err(SnapError::deadline_exceeded()),
            _ => Ok(()),
        }
    }

    /// Wraps a wire request, forwarding the remaining time as the gRPC timeout.
    pub fn request<T>(&self, message: T) -> tonic::Request<T> {
        let mut request = tonic::Request::new(message);
        if let Some(left) = self.remaining() {
            request.set_timeout(left);
        }
        request
    }

    /// Drives one round trip. Any transport failure, cancellation or expired
    /// deadline becomes the single error of the call; the reply is only
    /// returned when the transport delivered one.
    pub async fn run<T, F>(&self, method: Method, call: F) -> Result<T, SnapError>
    where
        F: Future<Output = Result<tonic::Response<T>, tonic::Status>>,
    {
        if let Err(e) = self.check() {
            warn!("{} not sent: {}", method, e);
            return Err(e);
        }
        debug!("Sending {} request", method);

        let call = async {
            call.await
                .map(tonic::Response::into_inner)
                .map_err(SnapError::from)
        };
        let bounded = async {
            match self.deadline {
                Some(deadline) => tokio::time::timeout_at(deadline, call)
                    .await
                    .unwrap_or_else(|_| Err(SnapError::deadline_exceeded())),
                None => call.await,
            }
        };
        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(SnapError::cancelled()),
            res = bounded => res,
        };

        match &result {
            Ok(_) => debug!("{} reply received", method),
            Err(e) => warn!("{} failed in transport: {}", method, e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commons::StatusCode;

    fn reply(v: u32) -> Result<tonic::Response<u32>, tonic::Status> {
        Ok(tonic::Response::new(v))
    }

    #[tokio::test]
    async fn test_background_runs_to_completion() {
        let ctx = CallContext::background();
        assert_eq!(ctx.remaining(), None);
        let out = ctx
            .run(Method::ExpandWildcards, async { reply(7) })
            .await
            .unwrap();
        assert_eq!(out, 7);
    }

    #[tokio::test]
    async fn test_status_becomes_transport_error() {
        let ctx = CallContext::background();
        let err = ctx
            .run(Method::CollectMetrics, async {
                Err::<tonic::Response<u32>, _>(tonic::Status::unavailable("gone"))
            })
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.status(), Some(StatusCode::ConnectionFailure));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_interrupts_hanging_call() {
        let ctx = CallContext::with_timeout(Duration::from_millis(50));
        let err = ctx
            .run(
                Method::ProcessMetrics,
                std::future::pending::<Result<tonic::Response<u32>, tonic::Status>>(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::RequestTimeout));
    }

    #[tokio::test]
    async fn test_cancellation_interrupts_hanging_call() {
        let token = CancellationToken::new();
        let ctx = CallContext::background().with_cancellation(token.clone());
        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });
        let err = ctx
            .run(
                Method::SubscribeDeps,
                std::future::pending::<Result<tonic::Response<u32>, tonic::Status>>(),
            )
            .await
            .unwrap_err();
        canceller.await.unwrap();
        assert_eq!(err.status(), Some(StatusCode::Cancelled));
    }

    #[tokio::test]
    async fn test_cancelled_context_does_not_send() {
        let ctx = CallContext::background();
        ctx.cancel();
        let sent = std::sync::atomic::AtomicBool::new(false);
        let err = ctx
            .run(Method::PublishMetrics, async {
                sent.store(true, std::sync::atomic::Ordering::SeqCst);
                reply(1)
            })
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::Cancelled));
        assert!(!sent.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_by_keeps_tighter_deadline() {
        let ctx = CallContext::with_timeout(Duration::from_secs(1));
        let tight = ctx.bounded_by(Duration::from_secs(30));
        assert_eq!(tight.deadline(), ctx.deadline());

        let bounded = CallContext::background().bounded_by(Duration::from_secs(2));
        assert!(bounded.remaining().unwrap() <= Duration::from_secs(2));

        let request = bounded.request(5u32);
        assert!(request.metadata().get("grpc-timeout").is_some());
        assert!(CallContext::background()
            .request(5u32)
            .metadata()
            .get("grpc-timeout")
            .is_none());
    }
}
