use actix_web::web;

use crate::handlers::home::home;

mod admin;
mod assignments;
mod auth;
mod catalog;
mod discussions;
mod enrollments;
mod json_error;
mod users;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .configure(auth::config_routes)
            .configure(users::config_routes)
            .configure(catalog::config_routes)
            .configure(enrollments::config_routes)
            .configure(assignments::config_routes)
            .configure(discussions::config_routes)
            .configure(admin::config_routes),
    );

    cfg.configure(json_error::config_routes);
}
