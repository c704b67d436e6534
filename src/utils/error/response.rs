//! HTTP response handling for errors

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use super::types::GatewayError;

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Upstream(_) | GatewayError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            GatewayError::Config(_) => ("CONFIG_ERROR", self.to_string()),
            GatewayError::Redis(_) | GatewayError::RedisUnavailable => {
                ("CACHE_ERROR", "Cache operation failed".to_string())
            }
            GatewayError::Serialization(_) => {
                ("SERIALIZATION_ERROR", "Serialization failed".to_string())
            }
            GatewayError::Yaml(_) | GatewayError::Io(_) => {
                ("INTERNAL_ERROR", "An internal error occurred".to_string())
            }
            GatewayError::HttpClient(_) => {
                ("UPSTREAM_ERROR", "Upstream request failed".to_string())
            }
            GatewayError::Upstream(_) => ("UPSTREAM_ERROR", self.to_string()),
            GatewayError::NotFound(_) => ("NOT_FOUND", self.to_string()),
            GatewayError::BadRequest(_) => ("BAD_REQUEST", self.to_string()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse::new(error_code, message))
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.to_string(),
                message: message.into(),
                timestamp: chrono::Utc::now().timestamp(),
                request_id: None,
            },
        }
    }
}
