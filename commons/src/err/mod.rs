use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Status of a remote call as seen by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCode {
    Ok,
    InvalidRequest,
    ConnectionFailure,
    RequestTimeout,
    Cancelled,
    Aborted,
    OutOfRange,
    ResourceExhausted,
    Unimplemented,
    Internal,
    Unknown,
    NotFound,
    Unauthenticated,
}

impl From<tonic::Code> for StatusCode {
    fn from(code: tonic::Code) -> Self {
        use tonic::Code;
        match code {
            Code::Ok => StatusCode::Ok,
            Code::Cancelled => StatusCode::Cancelled,
            Code::Unknown => StatusCode::Unknown,
            Code::InvalidArgument | Code::AlreadyExists | Code::FailedPrecondition => {
                StatusCode::InvalidRequest
            }
            Code::DeadlineExceeded => StatusCode::RequestTimeout,
            Code::NotFound => StatusCode::NotFound,
            Code::PermissionDenied | Code::Unauthenticated => StatusCode::Unauthenticated,
            Code::ResourceExhausted => StatusCode::ResourceExhausted,
            Code::Aborted => StatusCode::Aborted,
            Code::OutOfRange => StatusCode::OutOfRange,
            Code::Unimplemented => StatusCode::Unimplemented,
            Code::Internal | Code::DataLoss => StatusCode::Internal,
            Code::Unavailable => StatusCode::ConnectionFailure,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::Ok => write!(f, "OK"),
            StatusCode::InvalidRequest => write!(f, "Invalid Request"),
            StatusCode::ConnectionFailure => write!(f, "Connection Failure"),
            StatusCode::RequestTimeout => write!(f, "Request Timeout"),
            StatusCode::Cancelled => write!(f, "Cancelled"),
            StatusCode::Aborted => write!(f, "Aborted"),
            StatusCode::OutOfRange => write!(f, "Out of Range"),
            StatusCode::ResourceExhausted => write!(f, "Resource Exhausted"),
            StatusCode::Unimplemented => write!(f, "Unimplemented"),
            StatusCode::Internal => write!(f, "Internal Error"),
            StatusCode::Unknown => write!(f, "Unknown"),
            StatusCode::NotFound => write!(f, "Not Found"),
            StatusCode::Unauthenticated => write!(f, "Unauthenticated"),
        }
    }
}

/// Where a [`SnapError`] came from.
///
/// Transport failures mean the call did not complete and nothing of the reply
/// was read. Application failures were reported by the remote manager inside
/// an otherwise successful reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorOrigin {
    Transport(StatusCode),
    Application,
}

/// Prefix put in front of an error message: the status for transport
/// failures, nothing for application errors.
impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorOrigin::Transport(code) => write!(f, "{}: ", code),
            ErrorOrigin::Application => Ok(()),
        }
    }
}

/// Error handed back to the scheduler by metric-management operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
#[error("{origin}{message}")]
pub struct SnapError {
    message: String,
    fields: BTreeMap<String, String>,
    origin: ErrorOrigin,
}

impl SnapError {
    /// Application error carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: BTreeMap::new(),
            origin: ErrorOrigin::Application,
        }
    }

    pub fn transport(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: BTreeMap::new(),
            origin: ErrorOrigin::Transport(status),
        }
    }

    pub fn cancelled() -> Self {
        Self::transport(StatusCode::Cancelled, "call cancelled by caller")
    }

    pub fn deadline_exceeded() -> Self {
        Self::transport(StatusCode::RequestTimeout, "call deadline exceeded")
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_fields<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.fields
            .extend(fields.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn origin(&self) -> ErrorOrigin {
        self.origin
    }

    pub fn is_transport(&self) -> bool {
        matches!(self.origin, ErrorOrigin::Transport(_))
    }

    /// Transport status, `None` for application errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self.origin {
            ErrorOrigin::Transport(code) => Some(code),
            ErrorOrigin::Application => None,
        }
    }
}

impl From<tonic::Status> for SnapError {
    fn from(status: tonic::Status) -> Self {
        let message = if status.message().is_empty() {
            status.code().description().to_string()
        } else {
            status.message().to_string()
        };
        Self::transport(status.code().into(), message)
    }
}

/// Converts reply error strings into application errors, keeping their order.
pub fn reply_errors_to_errors(errors: Vec<String>) -> Vec<SnapError> {
    errors.into_iter().map(SnapError::new).collect()
}

/// Flattens errors to their messages for replies that only carry strings.
pub fn errors_to_strings(errors: &[SnapError]) -> Vec<String> {
    errors.iter().map(|e| e.message().to_string()).collect()
}
