use crate::db::{CatalogQuery, SortOrder};
use crate::error::CatalogError;
use crate::server::flash;
use crate::server::router::CatalogState;
use crate::views::{HOME_TEMPLATE, HomeView};
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub(super) struct CatalogParams {
    pub search: Option<String>,
    pub sort: Option<String>,
}

/// GET /
///
/// Every book with its author, optionally filtered by `search` and ordered by `sort`.
pub(super) async fn home(
    State(state): State<CatalogState>,
    Query(params): Query<CatalogParams>,
    jar: PrivateCookieJar,
) -> Result<Response, CatalogError> {
    let query = CatalogQuery::new(
        params.search.as_deref(),
        SortOrder::from_param(params.sort.as_deref()),
    );
    let books = state.db.list_catalog(query.clone()).await?;

    let (jar, flashes) = flash::take(jar);
    let body = state.views.render(
        HOME_TEMPLATE,
        &HomeView {
            title: "Library",
            flashes,
            books,
            current_sort: query.sort,
            search_query: query.search.unwrap_or_default(),
        },
    )?;
    Ok((jar, Html(body)).into_response())
}
