pub mod api;

use actix_web::web;

/// registers every route of the application
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api::index)
        .service(api::add)
        .service(api::delete)
        .service(api::chat_page)
        .service(api::chat)
        .service(api::device)
        .service(api::documentation)
        .service(api::export)
        .service(api::stats);
}
