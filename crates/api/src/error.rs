use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::{error, warn};
use model::errors::DashboardError;
use serde_json::json;

/// Failed request rendered as `{"message": ..., "error": ...}`.
#[derive(Debug)]
pub struct ApiError {
    message: &'static str,
    error: DashboardError,
}

impl ApiError {
    pub fn new(message: &'static str, error: DashboardError) -> Self {
        ApiError { message, error }
    }

    pub fn status(&self) -> StatusCode {
        match self.error {
            DashboardError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            DashboardError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            DashboardError::StoreQueryFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Ingest(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{}: {}", self.message, self.error);
        } else {
            warn!("{}: {}", self.message, self.error);
        }
        let body = json!({
            "message": self.message,
            "error": self.error.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

pub(crate) trait OrApiError<T> {
    fn or_api_error(self, message: &'static str) -> Result<T, ApiError>;
}

impl<T> OrApiError<T> for Result<T, DashboardError> {
    fn or_api_error(self, message: &'static str) -> Result<T, ApiError> {
        self.map_err(|err| ApiError::new(message, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DashboardError::invalid("bad"), StatusCode::BAD_REQUEST),
            (
                DashboardError::StoreUnavailable("down".to_owned()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                DashboardError::StoreQueryFailed("oops".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (DashboardError::Ingest("404".to_owned()), StatusCode::BAD_GATEWAY),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError::new("Failed", error).status(), status);
        }
    }
}
