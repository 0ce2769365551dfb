use actix_web::{HttpResponse, Responder, get, web};
use uuid::Uuid;

use crate::AppState;
use crate::errors::AppError;
use crate::use_cases::extractors::AdminClaims;

#[get("/overview")]
pub async fn overview(
    state: web::Data<AppState>,
    claims: AdminClaims,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let overview = state.analytics_handler.overview(&ctx).await?;
    Ok(HttpResponse::Ok().json(overview))
}

#[get("/courses/{course_id}/report")]
pub async fn course_report(
    state: web::Data<AppState>,
    claims: AdminClaims,
    course_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let ctx = claims.context()?;
    let report = state
        .analytics_handler
        .course_report(&ctx, &course_id)
        .await?;
    Ok(HttpResponse::Ok().json(report))
}
