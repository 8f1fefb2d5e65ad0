use super::forms::AddBookForm;
use super::render_not_found;
use crate::error::CatalogError;
use crate::server::flash::{self, FlashMessage};
use crate::server::router::CatalogState;
use crate::views::{ADD_BOOK_TEMPLATE, AddBookView, BookFormValues};
use axum::{
    Form,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::{error, warn};

/// GET /add_book
pub(super) async fn add_book_form(
    State(state): State<CatalogState>,
    jar: PrivateCookieJar,
) -> Result<Response, CatalogError> {
    let (jar, flashes) = flash::take(jar);
    render_form(&state, jar, StatusCode::OK, flashes, BookFormValues::default()).await
}

/// POST /add_book
///
/// The author id is left to the foreign key; an unknown author surfaces as a constraint error.
pub(super) async fn add_book(
    State(state): State<CatalogState>,
    jar: PrivateCookieJar,
    Form(form): Form<AddBookForm>,
) -> Result<Response, CatalogError> {
    let result = match form.parse() {
        Ok(create) => state.db.create_book(create).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(_) => {
            let jar = flash::push(
                jar,
                FlashMessage::success("Book added successfully."),
                state.secure_cookie,
            );
            Ok((jar, Redirect::to("/add_book")).into_response())
        }
        Err(err) => {
            warn!(error = %err, "Adding book failed");
            let message = match &err {
                CatalogError::Validation(msg) => msg.clone(),
                other => format!("Error adding book: {other}"),
            };
            let (jar, mut flashes) = flash::take(jar);
            flashes.push(FlashMessage::error(message));
            render_form(&state, jar, err.status(), flashes, form.values()).await
        }
    }
}

/// POST /book/{book_id}/delete
///
/// Removes the book, and its author when that was the author's last book. Unknown ids get a 404
/// page; every other outcome redirects to the listing with a notification.
pub(super) async fn delete_book(
    State(state): State<CatalogState>,
    jar: PrivateCookieJar,
    book_id: Result<Path<i64>, PathRejection>,
) -> Result<Response, CatalogError> {
    let Ok(Path(book_id)) = book_id else {
        return render_not_found(&state, jar, "No such book.".to_string());
    };

    let notice = match state.db.delete_book(book_id).await {
        Ok(outcome) => FlashMessage::success(match outcome.removed_author {
            Some(author) => format!(
                "Book \"{}\" and author \"{}\" successfully deleted!",
                outcome.book_title, author
            ),
            None => format!("Book \"{}\" successfully deleted!", outcome.book_title),
        }),
        Err(CatalogError::NotFound(id)) => {
            return render_not_found(&state, jar, format!("Book {id} not found."));
        }
        Err(err) => {
            error!(book_id, error = %err, "Deleting book failed");
            FlashMessage::error(format!("Error deleting book: {err}"))
        }
    };

    let jar = flash::push(jar, notice, state.secure_cookie);
    Ok((jar, Redirect::to("/")).into_response())
}

async fn render_form(
    state: &CatalogState,
    jar: PrivateCookieJar,
    status: StatusCode,
    flashes: Vec<FlashMessage>,
    form: BookFormValues,
) -> Result<Response, CatalogError> {
    let authors = state.db.list_authors().await?;
    let body = state.views.render(
        ADD_BOOK_TEMPLATE,
        &AddBookView {
            title: "Add book",
            flashes,
            authors,
            form,
        },
    )?;
    Ok((status, jar, Html(body)).into_response())
}
