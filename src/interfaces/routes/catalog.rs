use actix_web::web;

use crate::handlers::{courses, skills};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/skills")
            .service(skills::list_skills)
            .service(skills::create_skill)
            .service(skills::get_skill)
            .service(skills::update_skill)
            .service(skills::delete_skill),
    );

    cfg.service(
        web::scope("/courses")
            .service(courses::list_courses)
            .service(courses::create_course)
            .service(courses::get_course)
            .service(courses::update_course)
            .service(courses::delete_course)
            .service(courses::publish_course)
            .service(courses::unpublish_course)
            .service(courses::list_assignments)
            .service(courses::create_assignment)
            .service(courses::list_course_enrollments),
    );
}
