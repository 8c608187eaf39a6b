use actix_web::HttpResponse;
use log::error;
use serde_json::json;
use thiserror::Error;

use crate::domain::errors::DomainError;

/// HTTP-facing failure shapes. The checkout routes answer with
/// `{"error", "details"}` bodies, the clinical routes with
/// `{"success": false, "message"}`; validation failures are 400s carrying the
/// user-facing message directly.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{context}: {detail}")]
    Checkout {
        context: &'static str,
        detail: String,
    },

    #[error("{0}")]
    Clinical(String),
}

impl AppError {
    /// Failure while handling `POST /api/orders`.
    pub fn creating_order(e: DomainError) -> Self {
        match e {
            DomainError::InvalidInput(msg) => AppError::Validation(msg),
            other => AppError::Checkout {
                context: "Error creando orden",
                detail: other.to_string(),
            },
        }
    }

    /// Failure while handling `POST /api/orders/{order_id}/capture`.
    pub fn capturing_order(e: DomainError) -> Self {
        match e {
            DomainError::InvalidInput(msg) => AppError::Validation(msg),
            other => AppError::Checkout {
                context: "Error capturando orden",
                detail: other.to_string(),
            },
        }
    }

    /// Failure on the login/records routes. The detail never reaches the
    /// client; it is logged when the response is rendered.
    pub fn clinical(e: DomainError) -> Self {
        AppError::Clinical(e.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(message) => HttpResponse::BadRequest().json(json!({
                "error": message
            })),
            AppError::Checkout { context, detail } => {
                HttpResponse::InternalServerError().json(json!({
                    "error": context,
                    "details": detail
                }))
            }
            AppError::Clinical(detail) => {
                error!("clinical route failed: {detail}");
                HttpResponse::InternalServerError().json(json!({
                    "success": false,
                    "message": "Error en el servidor"
                }))
            }
        }
    }
}
