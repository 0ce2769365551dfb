use actix_web::{HttpResponse, http::StatusCode, web};

pub fn json_error(status: StatusCode, error: &str, details: &str) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "error": error,
        "details": details
    }))
}

async fn not_found() -> HttpResponse {
    json_error(
        StatusCode::NOT_FOUND,
        "Not found",
        "The requested resource does not exist",
    )
}

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.default_service(web::route().to(not_found));
}
