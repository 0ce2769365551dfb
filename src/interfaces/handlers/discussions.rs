use actix_web::{HttpResponse, Responder, delete, get, post, web};
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::entities::discussion::{NewReplyRequest, NewThreadRequest};
use crate::errors::AppError;
use crate::use_cases::extractors::AuthClaims;

#[derive(Debug, Deserialize)]
pub struct ThreadFilter {
    pub course_id: Option<Uuid>,
}

#[post("/threads")]
pub async fn create_thread(
    state: web::Data<AppState>,
    claims: AuthClaims,
    data: web::Json<NewThreadRequest>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let thread = state
        .discussion_handler
        .create_thread(&ctx, data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(thread))
}

#[get("/threads")]
pub async fn list_threads(
    state: web::Data<AppState>,
    filter: web::Query<ThreadFilter>,
) -> Result<impl Responder, AppError> {
    let threads = state
        .discussion_handler
        .list_threads(filter.course_id.as_ref())
        .await?;
    Ok(HttpResponse::Ok().json(threads))
}

#[post("/threads/{thread_id}/replies")]
pub async fn create_reply(
    state: web::Data<AppState>,
    claims: AuthClaims,
    thread_id: web::Path<Uuid>,
    data: web::Json<NewReplyRequest>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let reply = state
        .discussion_handler
        .create_reply(&ctx, &thread_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(reply))
}

#[get("/threads/{thread_id}/replies")]
pub async fn list_replies(
    state: web::Data<AppState>,
    thread_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let replies = state.discussion_handler.list_replies(&thread_id).await?;
    Ok(HttpResponse::Ok().json(replies))
}

#[delete("/threads/{thread_id}")]
pub async fn delete_thread(
    state: web::Data<AppState>,
    claims: AuthClaims,
    thread_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    state
        .discussion_handler
        .delete_thread(&ctx, &thread_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/replies/{reply_id}")]
pub async fn delete_reply(
    state: web::Data<AppState>,
    claims: AuthClaims,
    reply_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    state
        .discussion_handler
        .delete_reply(&ctx, &reply_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
