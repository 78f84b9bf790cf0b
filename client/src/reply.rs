//! Classification of metric manager replies into domain results.

use commons::rpc::{convert, msg};
use commons::SnapError;

/// What happens to a reply payload that arrived together with errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadPolicy {
    /// Hand the payload back alongside the errors.
    KeepOnError,
    /// Any error voids the whole payload.
    DropOnError,
}

/// Result of an operation whose reply carries a payload and an error list.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Ok(T),
    Partial(T, Vec<SnapError>),
    Failed(Vec<SnapError>),
}

impl<T> Outcome<T> {
    pub fn from_reply(payload: T, errors: Vec<SnapError>, policy: PayloadPolicy) -> Self {
        if errors.is_empty() {
            return Outcome::Ok(payload);
        }
        match policy {
            PayloadPolicy::KeepOnError => Outcome::Partial(payload, errors),
            PayloadPolicy::DropOnError => Outcome::Failed(errors),
        }
    }

    /// The call never produced a reply.
    pub fn transport(err: SnapError) -> Self {
        Outcome::Failed(vec![err])
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Outcome::Ok(p) | Outcome::Partial(p, _) => Some(p),
            Outcome::Failed(_) => None,
        }
    }

    /// Errors in the order they were reported; empty on success.
    pub fn errors(&self) -> &[SnapError] {
        match self {
            Outcome::Ok(_) => &[],
            Outcome::Partial(_, errs) | Outcome::Failed(errs) => errs,
        }
    }

    pub fn into_parts(self) -> (Option<T>, Vec<SnapError>) {
        match self {
            Outcome::Ok(p) => (Some(p), Vec::new()),
            Outcome::Partial(p, errs) => (Some(p), errs),
            Outcome::Failed(errs) => (None, errs),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Ok(p) => Outcome::Ok(f(p)),
            Outcome::Partial(p, errs) => Outcome::Partial(f(p), errs),
            Outcome::Failed(errs) => Outcome::Failed(errs),
        }
    }
}

/// Replies carrying at most one structured error.
pub(crate) fn single_error(error: Option<msg::SnapError>) -> Result<(), SnapError> {
    match error {
        Some(err) => Err(convert::from_wire_error(err)),
        None => Ok(()),
    }
}

/// Replies carrying a plain error string, where empty means success.
pub(crate) fn message_error(error: String) -> Result<(), SnapError> {
    if error.is_empty() {
        Ok(())
    } else {
        Err(SnapError::new(error))
    }
}

/// Flattens a round trip into the error list of an operation with no payload.
pub(crate) fn error_list<R, F>(reply: Result<R, SnapError>, errors: F) -> Vec<SnapError>
where
    F: FnOnce(R) -> Vec<SnapError>,
{
    match reply {
        Ok(reply) => errors(reply),
        Err(e) => vec![e],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commons::StatusCode;

    fn errs(n: usize) -> Vec<SnapError> {
        (0..n).map(|i| SnapError::new(format!("e{i}"))).collect()
    }

    #[test]
    fn test_policy_decides_payload_fate() {
        let kept = Outcome::from_reply("payload", errs(2), PayloadPolicy::KeepOnError);
        assert_eq!(kept.payload(), Some(&"payload"));
        assert_eq!(kept.errors().len(), 2);

        let dropped = Outcome::from_reply("payload", errs(2), PayloadPolicy::DropOnError);
        assert_eq!(dropped.payload(), None);
        assert_eq!(dropped.errors().len(), 2);

        for policy in [PayloadPolicy::KeepOnError, PayloadPolicy::DropOnError] {
            let ok = Outcome::from_reply(1, Vec::new(), policy);
            assert!(ok.is_ok());
            assert!(ok.errors().is_empty());
        }
    }

    #[test]
    fn test_into_parts_and_map() {
        let (payload, errors) = Outcome::from_reply(2, errs(1), PayloadPolicy::KeepOnError)
            .map(|v| v * 10)
            .into_parts();
        assert_eq!(payload, Some(20));
        assert_eq!(errors[0].message(), "e0");

        let (payload, errors) = Outcome::<u8>::transport(SnapError::cancelled()).into_parts();
        assert_eq!(payload, None);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].status(), Some(StatusCode::Cancelled));
    }

    #[test]
    fn test_single_error() {
        assert!(single_error(None).is_ok());
        let err = single_error(Some(msg::SnapError {
            error_message: "bad ns".into(),
            error_fields: [("ns".to_string(), "/a/*".to_string())].into(),
        }))
        .unwrap_err();
        assert_eq!(err.message(), "bad ns");
        assert_eq!(err.fields().len(), 1);
    }

    #[test]
    fn test_empty_message_is_success() {
        assert!(message_error(String::new()).is_ok());
        assert_eq!(
            message_error("no such plugin".into()).unwrap_err().message(),
            "no such plugin"
        );
    }

    #[test]
    fn test_error_list_prefers_transport() {
        let out = error_list(Err::<(), _>(SnapError::deadline_exceeded()), |_| errs(3));
        assert_eq!(out.len(), 1);
        assert!(out[0].is_transport());

        let out = error_list(Ok(()), |_| Vec::new());
        assert!(out.is_empty());
    }
}
