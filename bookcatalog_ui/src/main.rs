use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use bookcatalog_ui::api::NewBook;
use bookcatalog_ui::app_config::config_app;
use bookcatalog_ui::backend::{CatalogBackend, InMemoryCatalogBackend};
use bookcatalog_ui::client::BookCatalogClient;
use bookcatalog_ui::settings::Settings;
use bookcatalog_ui::telemetry::init_telemetry;

fn demo_books() -> Vec<NewBook> {
    [
        ("Dune", "Frank Herbert", "978-0441013593", "Chilton Books", 1965, 3),
        ("Solaris", "Stanislaw Lem", "978-0156027601", "Walker", 1961, 1),
    ]
    .into_iter()
    .map(|(title, author, isbn, publisher, year, copies)| NewBook {
        title: title.to_string(),
        author: author.to_string(),
        isbn: isbn.to_string(),
        publisher: publisher.to_string(),
        year: Some(year),
        copies,
        available_copies: copies,
    })
    .collect()
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_telemetry("bookcatalog_ui")?;
    let settings = Settings::load()?;

    let backend: Arc<dyn CatalogBackend> = if settings.use_in_memory_backend {
        tracing::info!("Using in-memory catalog");
        Arc::new(InMemoryCatalogBackend::with_books(demo_books()))
    } else {
        let client = BookCatalogClient::new(&settings.backend_url)?;
        tracing::info!("Using catalog at {}", client.url());
        Arc::new(client)
    };

    tracing::info!(
        "starting HTTP server at http://{}:{}",
        settings.server.host,
        settings.server.port
    );
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(backend.clone()))
            .wrap(TracingLogger::default())
            .configure(config_app)
    })
    .bind((settings.server.host.as_str(), settings.server.port))
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server failed")
}
