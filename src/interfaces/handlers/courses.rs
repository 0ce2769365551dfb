use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};
use uuid::Uuid;

use crate::AppState;
use crate::entities::assignment::NewAssignmentRequest;
use crate::entities::course::{NewCourseRequest, UpdateCourseRequest};
use crate::errors::AppError;
use crate::use_cases::extractors::{AuthClaims, AuthContext};

fn optional_context(claims: &Option<AuthClaims>) -> Option<AuthContext> {
    claims.as_ref().and_then(|c| c.context().ok())
}

#[get("")]
pub async fn list_courses(
    state: web::Data<AppState>,
    claims: Option<AuthClaims>,
) -> Result<impl Responder, AppError> {
    let ctx = optional_context(&claims);
    let courses = state.catalog_handler.list_courses(ctx.as_ref()).await?;
    Ok(HttpResponse::Ok().json(courses))
}

#[get("/{course_id}")]
pub async fn get_course(
    state: web::Data<AppState>,
    claims: Option<AuthClaims>,
    course_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let ctx = optional_context(&claims);
    let course = state
        .catalog_handler
        .get_course(ctx.as_ref(), &course_id)
        .await?;
    Ok(HttpResponse::Ok().json(course))
}

#[post("")]
pub async fn create_course(
    state: web::Data<AppState>,
    claims: AuthClaims,
    data: web::Json<NewCourseRequest>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let course = state
        .catalog_handler
        .create_course(&ctx, data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(course))
}

#[patch("/{course_id}")]
pub async fn update_course(
    state: web::Data<AppState>,
    claims: AuthClaims,
    course_id: web::Path<Uuid>,
    data: web::Json<UpdateCourseRequest>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let course = state
        .catalog_handler
        .update_course(&ctx, &course_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(course))
}

#[delete("/{course_id}")]
pub async fn delete_course(
    state: web::Data<AppState>,
    claims: AuthClaims,
    course_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    state.catalog_handler.delete_course(&ctx, &course_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/{course_id}/publish")]
pub async fn publish_course(
    state: web::Data<AppState>,
    claims: AuthClaims,
    course_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let course = state
        .catalog_handler
        .set_published(&ctx, &course_id, true)
        .await?;
    Ok(HttpResponse::Ok().json(course))
}

#[post("/{course_id}/unpublish")]
pub async fn unpublish_course(
    state: web::Data<AppState>,
    claims: AuthClaims,
    course_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let course = state
        .catalog_handler
        .set_published(&ctx, &course_id, false)
        .await?;
    Ok(HttpResponse::Ok().json(course))
}

#[get("/{course_id}/assignments")]
pub async fn list_assignments(
    state: web::Data<AppState>,
    _claims: AuthClaims,
    course_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let assignments = state.grading_handler.list_assignments(&course_id).await?;
    Ok(HttpResponse::Ok().json(assignments))
}

#[post("/{course_id}/assignments")]
pub async fn create_assignment(
    state: web::Data<AppState>,
    claims: AuthClaims,
    course_id: web::Path<Uuid>,
    data: web::Json<NewAssignmentRequest>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let assignment = state
        .grading_handler
        .create_assignment(&ctx, &course_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(assignment))
}

#[get("/{course_id}/enrollments")]
pub async fn list_course_enrollments(
    state: web::Data<AppState>,
    claims: AuthClaims,
    course_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let enrollments = state
        .enrollment_handler
        .list_for_course(&ctx, &course_id)
        .await?;
    Ok(HttpResponse::Ok().json(enrollments))
}
