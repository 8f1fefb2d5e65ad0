use super::forms::AddAuthorForm;
use crate::error::CatalogError;
use crate::server::flash::{self, FlashMessage};
use crate::server::router::CatalogState;
use crate::views::{ADD_AUTHOR_TEMPLATE, AddAuthorView, AuthorFormValues};
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::warn;

/// GET /add_author
pub(super) async fn add_author_form(
    State(state): State<CatalogState>,
    jar: PrivateCookieJar,
) -> Result<Response, CatalogError> {
    let (jar, flashes) = flash::take(jar);
    render_form(&state, jar, StatusCode::OK, flashes, AuthorFormValues::default())
}

/// POST /add_author
///
/// Redirects back to the empty form on success; otherwise re-renders the submitted values.
pub(super) async fn add_author(
    State(state): State<CatalogState>,
    jar: PrivateCookieJar,
    Form(form): Form<AddAuthorForm>,
) -> Result<Response, CatalogError> {
    let result = match form.parse() {
        Ok(create) => state.db.create_author(create).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(_) => {
            let jar = flash::push(
                jar,
                FlashMessage::success("Author added successfully."),
                state.secure_cookie,
            );
            Ok((jar, Redirect::to("/add_author")).into_response())
        }
        Err(err) => {
            warn!(error = %err, "Adding author failed");
            let message = match &err {
                CatalogError::Validation(msg) => msg.clone(),
                other => format!("Error adding author: {other}"),
            };
            let (jar, mut flashes) = flash::take(jar);
            flashes.push(FlashMessage::error(message));
            render_form(&state, jar, err.status(), flashes, form.values())
        }
    }
}

fn render_form(
    state: &CatalogState,
    jar: PrivateCookieJar,
    status: StatusCode,
    flashes: Vec<FlashMessage>,
    form: AuthorFormValues,
) -> Result<Response, CatalogError> {
    let body = state.views.render(
        ADD_AUTHOR_TEMPLATE,
        &AddAuthorView {
            title: "Add author",
            flashes,
            form,
        },
    )?;
    Ok((status, jar, Html(body)).into_response())
}
