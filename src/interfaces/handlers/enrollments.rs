use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};
use uuid::Uuid;

use crate::AppState;
use crate::entities::enrollment::{EnrollRequest, SetEnrollmentStatusRequest};
use crate::errors::AppError;
use crate::use_cases::extractors::{AdminClaims, AuthClaims};

#[post("")]
pub async fn enroll(
    state: web::Data<AppState>,
    claims: AuthClaims,
    data: web::Json<EnrollRequest>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let enrollment = state
        .enrollment_handler
        .enroll(&ctx, &data.course_id)
        .await?;
    Ok(HttpResponse::Created().json(enrollment))
}

#[get("")]
pub async fn my_enrollments(
    state: web::Data<AppState>,
    claims: AuthClaims,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let enrollments = state.enrollment_handler.list_mine(&ctx).await?;
    Ok(HttpResponse::Ok().json(enrollments))
}

#[patch("/{enrollment_id}/status")]
pub async fn set_enrollment_status(
    state: web::Data<AppState>,
    claims: AdminClaims,
    enrollment_id: web::Path<Uuid>,
    data: web::Json<SetEnrollmentStatusRequest>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let enrollment = state
        .enrollment_handler
        .set_status(&ctx, &enrollment_id, data.status)
        .await?;
    Ok(HttpResponse::Ok().json(enrollment))
}

#[post("/{enrollment_id}/drop")]
pub async fn drop_enrollment(
    state: web::Data<AppState>,
    claims: AuthClaims,
    enrollment_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let enrollment = state.enrollment_handler.drop(&ctx, &enrollment_id).await?;
    Ok(HttpResponse::Ok().json(enrollment))
}

#[delete("/{enrollment_id}")]
pub async fn delete_enrollment(
    state: web::Data<AppState>,
    claims: AdminClaims,
    enrollment_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    state
        .enrollment_handler
        .delete(&ctx, &enrollment_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/{enrollment_id}/recompute")]
pub async fn recompute_progress(
    state: web::Data<AppState>,
    claims: AdminClaims,
    enrollment_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let enrollment = state
        .enrollment_handler
        .recompute_progress(&ctx, &enrollment_id)
        .await?;
    Ok(HttpResponse::Ok().json(enrollment))
}
