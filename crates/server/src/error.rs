use crate::integrations::{AdvisorError, GatewayError, ReportError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use booking::{BookingError, StoreError};
use database::ServiceError;
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

/// Every error a handler can return, rendered as
/// `{"error": "<kind>", "message": "<human readable>"}`
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    BadGateway(String),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    pub fn forbidden() -> Self {
        Self::Forbidden("You do not have permission to do this".to_string())
    }

    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            Self::Booking(err) => match err {
                BookingError::TableNotFound(_) | BookingError::ReservationNotFound(_) => {
                    (StatusCode::NOT_FOUND, "not_found")
                }
                BookingError::CapacityExceeded { .. } => {
                    (StatusCode::BAD_REQUEST, "capacity_exceeded")
                }
                BookingError::SlotConflict => (StatusCode::CONFLICT, "slot_conflict"),
                BookingError::DuplicateReservation => {
                    (StatusCode::CONFLICT, "duplicate_reservation")
                }
                BookingError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
                BookingError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            },
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable"),
            Self::BadGateway(_) => (StatusCode::BAD_GATEWAY, "bad_gateway"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();

        // Internal details stay in the log
        let message = match &self {
            Self::Internal(detail) => {
                log::error!("Internal error: {detail}");
                self.to_string()
            }
            Self::Booking(BookingError::Store(err)) => {
                log::error!("Reservation store failure: {err}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": kind, "message": message }))).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        BookingError::from(err).into()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            ServiceError::Conflict(message) => Self::Conflict(message),
            ServiceError::Invalid(message) => Self::BadRequest(message),
            ServiceError::Db(err) => err.into(),
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Rejected(message) => Self::BadRequest(message),
            GatewayError::Http(err) => Self::BadGateway(format!("Payment gateway error: {err}")),
        }
    }
}

impl From<AdvisorError> for AppError {
    fn from(err: AdvisorError) -> Self {
        log::error!("AI advisor failed: {err}");
        Self::BadGateway(format!("AI service error: {err}"))
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        Self::Internal(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
