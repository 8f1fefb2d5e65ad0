use crate::error::CatalogError;
use crate::server::flash;
use crate::server::router::CatalogState;
use crate::views::{NOT_FOUND_TEMPLATE, NotFoundView};
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::PrivateCookieJar;

mod authors;
mod books;
mod catalog;
pub mod forms;

pub fn router() -> Router<CatalogState> {
    Router::new()
        .route("/", get(catalog::home))
        .route(
            "/add_author",
            get(authors::add_author_form).post(authors::add_author),
        )
        .route("/add_book", get(books::add_book_form).post(books::add_book))
        .route("/book/{book_id}/delete", post(books::delete_book))
}

/// Renders the 404 page, consuming any pending notifications.
pub(crate) fn render_not_found(
    state: &CatalogState,
    jar: PrivateCookieJar,
    message: String,
) -> Result<Response, CatalogError> {
    let (jar, flashes) = flash::take(jar);
    let body = state.views.render(
        NOT_FOUND_TEMPLATE,
        &NotFoundView {
            title: "Not found",
            flashes,
            message,
        },
    )?;
    Ok((StatusCode::NOT_FOUND, jar, Html(body)).into_response())
}
