use actix_web::web;

use crate::handlers::users;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    // `/users/me` variants must register ahead of `/users/{user_id}`.
    cfg.service(users::me)
        .service(users::update_profile)
        .service(users::my_certificates)
        .service(users::my_submissions)
        .service(users::my_skills)
        .service(users::set_skill_level)
        .service(users::remove_skill_level)
        .service(users::get_user);
}
