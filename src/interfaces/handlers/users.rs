use actix_web::{HttpResponse, Responder, delete, get, patch, put, web};
use uuid::Uuid;

use crate::AppState;
use crate::entities::user::UpdateProfileRequest;
use crate::entities::user_skill::SetSkillLevelRequest;
use crate::errors::AppError;
use crate::use_cases::extractors::AuthClaims;

#[get("/users/me")]
pub async fn me(state: web::Data<AppState>, claims: AuthClaims) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let user = state.auth_handler.me(&ctx).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[patch("/users/me")]
pub async fn update_profile(
    state: web::Data<AppState>,
    claims: AuthClaims,
    data: web::Json<UpdateProfileRequest>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let user = state
        .auth_handler
        .update_profile(&ctx, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(user))
}

#[get("/users/{user_id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    claims: AuthClaims,
    user_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let user = state.auth_handler.get_user(&ctx, &user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[get("/users/me/certificates")]
pub async fn my_certificates(
    state: web::Data<AppState>,
    claims: AuthClaims,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let certificates = state.enrollment_handler.my_certificates(&ctx).await?;
    Ok(HttpResponse::Ok().json(certificates))
}

#[get("/users/me/submissions")]
pub async fn my_submissions(
    state: web::Data<AppState>,
    claims: AuthClaims,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let submissions = state.grading_handler.my_submissions(&ctx).await?;
    Ok(HttpResponse::Ok().json(submissions))
}

#[get("/users/me/skills")]
pub async fn my_skills(
    state: web::Data<AppState>,
    claims: AuthClaims,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let skills = state.user_skill_handler.list_mine(&ctx).await?;
    Ok(HttpResponse::Ok().json(skills))
}

#[put("/users/me/skills")]
pub async fn set_skill_level(
    state: web::Data<AppState>,
    claims: AuthClaims,
    data: web::Json<SetSkillLevelRequest>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let entry = state
        .user_skill_handler
        .set_level(&ctx, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(entry))
}

#[delete("/users/me/skills/{skill_id}")]
pub async fn remove_skill_level(
    state: web::Data<AppState>,
    claims: AuthClaims,
    skill_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    state.user_skill_handler.remove(&ctx, &skill_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
