use crate::error::GatewayError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

pub const ERROR_CODE_HEADER: &str = "X-Error-Code";

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub trace_id: Uuid,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: &'static str, message: String },
    NotFound { code: &'static str, message: String },
    BadGateway { code: &'static str, message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: "invalid_request",
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest { code, .. }
            | ApiError::NotFound { code, .. }
            | ApiError::BadGateway { code, .. } => code,
            ApiError::Internal { .. } => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        let message = err.to_string();
        match err {
            GatewayError::BothProvidersFailed { .. } if err.is_not_found() => ApiError::NotFound {
                code: "payment_not_found",
                message,
            },
            GatewayError::BothProvidersFailed { .. } => ApiError::BadGateway {
                code: "providers_unavailable",
                message,
            },
            _ => ApiError::Internal { message },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let trace_id = Uuid::new_v4();
        let message = match self {
            ApiError::BadRequest { message, .. }
            | ApiError::NotFound { message, .. }
            | ApiError::BadGateway { message, .. }
            | ApiError::Internal { message } => message,
        };

        if status.is_server_error() {
            tracing::error!(%trace_id, code, %message, "request failed");
        } else {
            tracing::info!(%trace_id, code, %message, "request rejected");
        }

        let body = ErrorBody {
            code: code.to_string(),
            message,
            trace_id,
        };
        let mut response = (status, Json(body)).into_response();
        response
            .headers_mut()
            .insert(ERROR_CODE_HEADER, HeaderValue::from_static(code));
        response
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
