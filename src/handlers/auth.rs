use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::clinical::ClinicalService;
use crate::domain::clinical::UserProfile;
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// The authenticated user as exposed to clients. The stored password is
/// never part of this shape.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    /// Key for the clinical-record endpoints; equal to the account id.
    pub folio: i32,
    pub name: String,
    pub email: String,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            folio: profile.folio,
            name: profile.name,
            email: profile.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ── Handler ──────────────────────────────────────────────────────────────────

/// POST /login
///
/// Exact-match credential check. Unknown email and wrong password are
/// deliberately indistinguishable; both answer 200 with the same generic
/// message.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login outcome; `success` tells them apart", body = LoginResponse),
        (status = 500, description = "Server error"),
    ),
    tag = "clinical"
)]
pub async fn login(
    service: web::Data<ClinicalService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let outcome = service
        .authenticate(body.email, body.password)
        .await
        .map_err(AppError::clinical)?;

    let response = match outcome {
        Some(profile) => LoginResponse {
            success: true,
            user: Some(profile.into()),
            message: None,
        },
        None => LoginResponse {
            success: false,
            user: None,
            message: Some("Correo o contraseña incorrectos".to_string()),
        },
    };
    Ok(HttpResponse::Ok().json(response))
}
