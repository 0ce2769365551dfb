use actix_web::{HttpResponse, Responder, error::ResponseError, post, web};

use crate::AppState;
use crate::entities::otp::{ResendOtpRequest, VerifyOtpRequest};
use crate::entities::token::RefreshTokenRequest;
use crate::entities::user::{LoginUser, NewUser};

#[post("/register")]
pub async fn register(state: web::Data<AppState>, user: web::Json<NewUser>) -> impl Responder {
    match state.auth_handler.register(user.into_inner()).await {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => e.to_http_response(),
    }
}

#[post("/verify-otp")]
pub async fn verify_otp(
    state: web::Data<AppState>,
    request: web::Json<VerifyOtpRequest>,
) -> impl Responder {
    match state.auth_handler.verify_otp(request.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => e.to_http_response(),
    }
}

#[post("/resend-otp")]
pub async fn resend_otp(
    state: web::Data<AppState>,
    request: web::Json<ResendOtpRequest>,
) -> impl Responder {
    match state.auth_handler.resend_otp(request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.to_http_response(),
    }
}

#[post("/login")]
pub async fn login(state: web::Data<AppState>, user: web::Json<LoginUser>) -> impl Responder {
    match state.auth_handler.login(user.into_inner()).await {
        Ok(auth_response) => HttpResponse::Ok().json(auth_response),
        Err(e) => e.error_response(),
    }
}

#[post("/refresh-token")]
pub async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> impl Responder {
    match state.auth_handler.refresh_token(&request.refresh_token).await {
        Ok(auth_response) => HttpResponse::Ok().json(auth_response),
        Err(e) => e.error_response(),
    }
}
