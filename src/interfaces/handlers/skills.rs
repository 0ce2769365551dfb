use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};
use uuid::Uuid;

use crate::AppState;
use crate::entities::skill::{NewSkillRequest, UpdateSkillRequest};
use crate::errors::AppError;
use crate::use_cases::extractors::AdminClaims;

#[get("")]
pub async fn list_skills(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let skills = state.catalog_handler.list_skills().await?;
    Ok(HttpResponse::Ok().json(skills))
}

#[get("/{skill_id}")]
pub async fn get_skill(
    state: web::Data<AppState>,
    skill_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let skill = state.catalog_handler.get_skill(&skill_id).await?;
    Ok(HttpResponse::Ok().json(skill))
}

#[post("")]
pub async fn create_skill(
    state: web::Data<AppState>,
    claims: AdminClaims,
    data: web::Json<NewSkillRequest>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let skill = state
        .catalog_handler
        .create_skill(&ctx, data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(skill))
}

#[patch("/{skill_id}")]
pub async fn update_skill(
    state: web::Data<AppState>,
    claims: AdminClaims,
    skill_id: web::Path<Uuid>,
    data: web::Json<UpdateSkillRequest>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let skill = state
        .catalog_handler
        .update_skill(&ctx, &skill_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(skill))
}

#[delete("/{skill_id}")]
pub async fn delete_skill(
    state: web::Data<AppState>,
    claims: AdminClaims,
    skill_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    state.catalog_handler.delete_skill(&ctx, &skill_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
