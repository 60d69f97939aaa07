//! Response envelope and the single error-to-envelope translator.
//!
//! Every endpoint, success or failure, answers with the same shape:
//! `{ success, message, data, errors?, error_code? }`. Handler errors are
//! `MarketError` values; the [`ApiError`] wrapper maps each taxonomy branch
//! to a status code and renders the envelope, so no failure ever escapes as
//! a bare framework response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use clipdeal_core::MarketError;
use serde::Serialize;
use serde_json::{json, Value};

/// The uniform response envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

/// 200 with data.
pub fn ok<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::OK,
        Json(Envelope {
            success: true,
            message: message.to_string(),
            data: Some(data),
            errors: None,
            error_code: None,
        }),
    )
}

/// 201 with data.
pub fn created<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    let (_, body) = ok(message, data);
    (StatusCode::CREATED, body)
}

/// 200 with no payload.
pub fn ok_empty(message: &str) -> (StatusCode, Json<Envelope<Value>>) {
    (
        StatusCode::OK,
        Json(Envelope {
            success: true,
            message: message.to_string(),
            data: None,
            errors: None,
            error_code: None,
        }),
    )
}

/// Handler error carrying the domain taxonomy into the envelope.
#[derive(Debug)]
pub struct ApiError(pub MarketError);

impl From<MarketError> for ApiError {
    fn from(err: MarketError) -> Self {
        ApiError(err)
    }
}

/// Convenience Result for handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            MarketError::Validation { .. } | MarketError::UniqueViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            MarketError::NotFound { .. } => StatusCode::NOT_FOUND,
            MarketError::NotAuthenticated | MarketError::Forbidden(_) => StatusCode::FORBIDDEN,
            MarketError::InvalidTransition { .. } => StatusCode::CONFLICT,
            MarketError::Connection(_)
            | MarketError::Remote(_)
            | MarketError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let errors = match &self.0 {
            MarketError::Validation { field, message } => {
                let mut map = serde_json::Map::new();
                map.insert(field.clone(), json!(message));
                Some(Value::Object(map))
            }
            MarketError::UniqueViolation { constraint, value } => {
                let mut map = serde_json::Map::new();
                map.insert(constraint.to_string(), json!(format!("'{}' is already in use", value)));
                Some(Value::Object(map))
            }
            _ => None,
        };

        let envelope = Envelope::<Value> {
            success: false,
            message: self.0.to_string(),
            data: None,
            errors,
            error_code: Some(self.0.error_code().to_string()),
        };

        (status, Json(envelope)).into_response()
    }
}

/// Fallback for unknown routes, so even a bad path gets the envelope.
pub async fn fallback_not_found() -> ApiError {
    ApiError(MarketError::not_found("route", "unknown"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                MarketError::validation("min_price", "bad"),
                StatusCode::BAD_REQUEST,
            ),
            (
                MarketError::not_found("content", "x"),
                StatusCode::NOT_FOUND,
            ),
            (MarketError::NotAuthenticated, StatusCode::FORBIDDEN),
            (
                MarketError::Forbidden("no".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                MarketError::InvalidTransition {
                    from: "accepted".to_string(),
                    to: "rejected".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                MarketError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
