use actix_web::web;

use crate::handlers::assignments;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/assignments")
            .service(assignments::get_assignment)
            .service(assignments::update_assignment)
            .service(assignments::delete_assignment)
            .service(assignments::submit)
            .service(assignments::list_submissions)
            .service(assignments::grade_bulk)
            .service(assignments::grade_submission)
            .service(assignments::assignment_stats),
    );
}
