pub mod error_handler;
pub mod health;
pub mod threads;

use actix_web::web;

/// Register every route plus the shared extractor configuration.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error_handler::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error_handler::query_error_handler))
        .service(health::health_check)
        .service(
            web::scope("/api/v1/threads")
                .service(threads::open_thread)
                .service(threads::get_thread)
                .service(threads::list_messages)
                .service(threads::send_message)
                .service(threads::mark_thread_read)
                .service(threads::unread_count),
        );
}
