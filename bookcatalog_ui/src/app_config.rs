use actix_web::web;

use crate::handlers;

pub fn config_app(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(handlers::health)))
        .service(web::resource("/").route(web::get().to(handlers::index)))
        .service(web::resource("/books").route(web::post().to(handlers::add_book)))
        .service(
            web::resource("/books/{book_id}/delete")
                .route(web::get().to(handlers::confirm_delete))
                .route(web::post().to(handlers::delete_book)),
        )
        .service(
            web::scope("/search")
                .service(web::resource("").route(web::post().to(handlers::search)))
                .service(web::resource("/clear").route(web::post().to(handlers::clear_search))),
        );
}
