use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};
use uuid::Uuid;

use crate::AppState;
use crate::entities::assignment::UpdateAssignmentRequest;
use crate::entities::grade::{BulkGradeRequest, GradeRequest};
use crate::entities::submission::SubmitRequest;
use crate::errors::AppError;
use crate::use_cases::extractors::{AdminClaims, AuthClaims};

#[get("/{assignment_id}")]
pub async fn get_assignment(
    state: web::Data<AppState>,
    _claims: AuthClaims,
    assignment_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let assignment = state.grading_handler.get_assignment(&assignment_id).await?;
    Ok(HttpResponse::Ok().json(assignment))
}

#[patch("/{assignment_id}")]
pub async fn update_assignment(
    state: web::Data<AppState>,
    claims: AuthClaims,
    assignment_id: web::Path<Uuid>,
    data: web::Json<UpdateAssignmentRequest>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let assignment = state
        .grading_handler
        .update_assignment(&ctx, &assignment_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(assignment))
}

#[delete("/{assignment_id}")]
pub async fn delete_assignment(
    state: web::Data<AppState>,
    claims: AuthClaims,
    assignment_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    state
        .grading_handler
        .delete_assignment(&ctx, &assignment_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/{assignment_id}/submissions")]
pub async fn submit(
    state: web::Data<AppState>,
    claims: AuthClaims,
    assignment_id: web::Path<Uuid>,
    data: web::Json<SubmitRequest>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let submission = state
        .grading_handler
        .submit(&ctx, &assignment_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(submission))
}

#[get("/{assignment_id}/submissions")]
pub async fn list_submissions(
    state: web::Data<AppState>,
    claims: AuthClaims,
    assignment_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let submissions = state
        .grading_handler
        .list_submissions(&ctx, &assignment_id)
        .await?;
    Ok(HttpResponse::Ok().json(submissions))
}

#[post("/{assignment_id}/grades")]
pub async fn grade_submission(
    state: web::Data<AppState>,
    claims: AdminClaims,
    assignment_id: web::Path<Uuid>,
    data: web::Json<GradeRequest>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let grade = state
        .grading_handler
        .grade(&ctx, &assignment_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(grade))
}

#[post("/{assignment_id}/grades/bulk")]
pub async fn grade_bulk(
    state: web::Data<AppState>,
    claims: AdminClaims,
    assignment_id: web::Path<Uuid>,
    data: web::Json<BulkGradeRequest>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let grades = state
        .grading_handler
        .grade_bulk(&ctx, &assignment_id, data.into_inner().grades)
        .await?;
    Ok(HttpResponse::Ok().json(grades))
}

#[get("/{assignment_id}/stats")]
pub async fn assignment_stats(
    state: web::Data<AppState>,
    claims: AuthClaims,
    assignment_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let stats = state
        .grading_handler
        .assignment_stats(&ctx, &assignment_id)
        .await?;
    Ok(HttpResponse::Ok().json(stats))
}
