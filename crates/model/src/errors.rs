use mongodb::error::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Store query failed: {0}")]
    StoreQueryFailed(String),
    #[error("Failed to load dataset: {0}")]
    Ingest(String),
}

impl DashboardError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        DashboardError::InvalidArgument(msg.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DashboardError::InvalidArgument(_))
    }
}

impl From<mongodb::error::Error> for DashboardError {
    fn from(err: mongodb::error::Error) -> Self {
        match *err.kind {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::ConnectionPoolCleared { .. } => {
                DashboardError::StoreUnavailable(err.to_string())
            }
            _ => DashboardError::StoreQueryFailed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use mongodb::bson::{from_bson, Bson};

    use super::*;

    #[test]
    fn test_network_errors_are_unavailable() {
        for kind in [
            io::ErrorKind::ConnectionRefused,
            io::ErrorKind::ConnectionReset,
            io::ErrorKind::TimedOut,
        ] {
            let err = mongodb::error::Error::from(io::Error::new(kind, "mongo is down"));
            assert!(
                matches!(DashboardError::from(err), DashboardError::StoreUnavailable(_)),
                "{:?}",
                kind
            );
        }
    }

    #[test]
    fn test_decode_errors_are_query_failures() {
        let decode = from_bson::<i64>(Bson::String("not a number".to_owned())).unwrap_err();
        let err = mongodb::error::Error::from(decode);
        assert!(matches!(
            DashboardError::from(err),
            DashboardError::StoreQueryFailed(_)
        ));
    }
}
