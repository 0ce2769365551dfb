use actix_web::web;

use crate::handlers::enrollments;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/enrollments")
            .service(enrollments::enroll)
            .service(enrollments::my_enrollments)
            .service(enrollments::set_enrollment_status)
            .service(enrollments::drop_enrollment)
            .service(enrollments::recompute_progress)
            .service(enrollments::delete_enrollment),
    );
}
