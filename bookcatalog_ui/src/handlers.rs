use std::sync::Arc;

use actix_web::http::header::{ContentType, LOCATION};
use actix_web::web::{self, Data};
use actix_web::{Error, HttpResponse};
use serde::Deserialize;

use crate::api::BookId;
use crate::backend::CatalogBackend;
use crate::controller::{TableEvent, ViewController};
use crate::form::BookForm;
use crate::pages;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteConfirmation {
    #[serde(default)]
    pub confirm: String,
}

/// Every request paints its own view from a fresh read of the backend
fn view(backend: &Data<Arc<dyn CatalogBackend>>) -> ViewController {
    ViewController::new(backend.get_ref().clone())
}

/// Catalog location showing the results of `query`
fn catalog_location(query: &str) -> String {
    if query.trim().is_empty() {
        "/".to_string()
    } else {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .append_pair("q", query)
            .finish();
        format!("/?{}", encoded)
    }
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// Redirects to `location` once the operation went through, a notice is rendered
/// right away together with whatever the operation painted
fn finish(controller: &ViewController, location: String) -> HttpResponse {
    let state = controller.snapshot();
    if state.notice.is_some() {
        html(pages::index_page(&state))
    } else {
        HttpResponse::SeeOther()
            .append_header((LOCATION, location))
            .finish()
    }
}

pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

pub async fn index(
    backend: Data<Arc<dyn CatalogBackend>>,
    query: web::Query<SearchForm>,
) -> Result<HttpResponse, Error> {
    let controller = view(&backend);
    controller.handle_search(&query.q).await;
    Ok(html(pages::index_page(&controller.snapshot())))
}

pub async fn add_book(
    backend: Data<Arc<dyn CatalogBackend>>,
    form: web::Form<BookForm>,
) -> Result<HttpResponse, Error> {
    let controller = view(&backend);
    controller.handle_create(form.into_inner()).await;
    Ok(finish(&controller, catalog_location("")))
}

pub async fn search(
    backend: Data<Arc<dyn CatalogBackend>>,
    form: web::Form<SearchForm>,
) -> Result<HttpResponse, Error> {
    let controller = view(&backend);
    controller.handle_search(&form.q).await;
    Ok(finish(&controller, catalog_location(&form.q)))
}

pub async fn clear_search(
    backend: Data<Arc<dyn CatalogBackend>>,
) -> Result<HttpResponse, Error> {
    let controller = view(&backend);
    controller.clear_search().await;
    Ok(finish(&controller, catalog_location("")))
}

pub async fn confirm_delete(book_id: web::Path<BookId>) -> Result<HttpResponse, Error> {
    Ok(html(pages::confirm_delete_page(book_id.into_inner())))
}

pub async fn delete_book(
    backend: Data<Arc<dyn CatalogBackend>>,
    book_id: web::Path<BookId>,
    confirmation: web::Form<DeleteConfirmation>,
) -> Result<HttpResponse, Error> {
    let book_id = book_id.into_inner();
    let controller = view(&backend);
    if confirmation.confirm != "yes" {
        controller.handle_delete(book_id, &|_: &str| false).await;
        return Ok(finish(&controller, catalog_location("")));
    }

    // The delete is routed through the table, so it needs a current render
    controller.refresh().await;
    if controller.snapshot().notice.is_none() {
        controller
            .dispatch(TableEvent::DeleteClicked { book_id }, &|_: &str| true)
            .await;
    }
    Ok(finish(&controller, catalog_location("")))
}
