use crate::domain::ClientError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// JSON body of every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    // ---
    pub error: String,
}

/// Handler failure mapped onto an HTTP status.
#[derive(Debug)]
pub struct ApiError {
    // ---
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    // ---
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        // ---
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<ClientError> for ApiError {
    // ---
    fn from(err: ClientError) -> Self {
        // ---
        let status = match err {
            ClientError::SpotNotFound(_) => StatusCode::NOT_FOUND,
            ClientError::SpotFull(_) | ClientError::SlotOccupied(_) => StatusCode::CONFLICT,
            ClientError::NotLoggedIn => StatusCode::UNAUTHORIZED,
            ClientError::NoSpotSelected | ClientError::NoSlotSelected => StatusCode::BAD_REQUEST,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    // ---
    fn into_response(self) -> Response {
        // ---
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}
