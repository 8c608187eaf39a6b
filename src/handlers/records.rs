use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::json;

use crate::application::clinical::ClinicalService;
use crate::errors::AppError;

/// The shared read-endpoint shape: `success` is true iff at least one row
/// matched the folio. An unknown folio is an empty result, not an error.
fn records_response<T: Serialize>(rows: Vec<T>) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "success": !rows.is_empty(), "data": rows }))
}

/// GET /mediciones/{folio}
#[utoipa::path(
    get,
    path = "/mediciones/{folio}",
    params(("folio" = i32, Path, description = "Patient folio")),
    responses(
        (status = 200, description = "Measurement history, oldest first"),
        (status = 500, description = "Server error"),
    ),
    tag = "clinical"
)]
pub async fn measurements(
    service: web::Data<ClinicalService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let rows = service
        .measurements(path.into_inner())
        .await
        .map_err(AppError::clinical)?;
    Ok(records_response(rows))
}

/// GET /signos_vitales/{folio}
#[utoipa::path(
    get,
    path = "/signos_vitales/{folio}",
    params(("folio" = i32, Path, description = "Patient folio")),
    responses(
        (status = 200, description = "Vital-signs history, oldest first"),
        (status = 500, description = "Server error"),
    ),
    tag = "clinical"
)]
pub async fn vital_signs(
    service: web::Data<ClinicalService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let rows = service
        .vital_signs(path.into_inner())
        .await
        .map_err(AppError::clinical)?;
    Ok(records_response(rows))
}

/// GET /bioquimicos/{folio}
#[utoipa::path(
    get,
    path = "/bioquimicos/{folio}",
    params(("folio" = i32, Path, description = "Patient folio")),
    responses(
        (status = 200, description = "Blood-panel history, oldest first"),
        (status = 500, description = "Server error"),
    ),
    tag = "clinical"
)]
pub async fn biochemical_results(
    service: web::Data<ClinicalService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let rows = service
        .biochemical_results(path.into_inner())
        .await
        .map_err(AppError::clinical)?;
    Ok(records_response(rows))
}

/// GET /plan_nutricional/{folio}
#[utoipa::path(
    get,
    path = "/plan_nutricional/{folio}",
    params(("folio" = i32, Path, description = "Patient folio")),
    responses(
        (status = 200, description = "Nutrition plans, oldest first"),
        (status = 500, description = "Server error"),
    ),
    tag = "clinical"
)]
pub async fn nutrition_plans(
    service: web::Data<ClinicalService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let rows = service
        .nutrition_plans(path.into_inner())
        .await
        .map_err(AppError::clinical)?;
    Ok(records_response(rows))
}
