use actix_web::web;

use crate::handlers::discussions;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/discussions")
            .service(discussions::list_threads)
            .service(discussions::create_thread)
            .service(discussions::list_replies)
            .service(discussions::create_reply)
            .service(discussions::delete_thread)
            .service(discussions::delete_reply),
    );
}
