use crate::db::DbActorHandle;
use crate::error::CatalogError;
use crate::server::access_log::access_log;
use crate::server::routes::{self, render_not_found};
use crate::views::Views;
use axum::{
    Router,
    extract::{FromRef, State},
    middleware,
    response::Response,
};
use axum_extra::extract::cookie::{Key, PrivateCookieJar};
use std::sync::{Arc, LazyLock};

/// Process-wide key for the notification cookie. Pending notifications do not survive a restart.
static COOKIE_KEY: LazyLock<Key> = LazyLock::new(Key::generate);

#[derive(Clone)]
pub struct CatalogState {
    pub db: DbActorHandle,
    pub views: Arc<Views>,
    pub secure_cookie: bool,
}

impl CatalogState {
    pub fn new(db: DbActorHandle, views: Views, secure_cookie: bool) -> Self {
        Self {
            db,
            views: Arc::new(views),
            secure_cookie,
        }
    }
}

impl FromRef<CatalogState> for Key {
    fn from_ref(_state: &CatalogState) -> Self {
        COOKIE_KEY.clone()
    }
}

async fn not_found_handler(
    State(state): State<CatalogState>,
    jar: PrivateCookieJar,
) -> Result<Response, CatalogError> {
    render_not_found(&state, jar, "The page you asked for does not exist.".to_string())
}

pub fn catalog_router(state: CatalogState) -> Router {
    Router::new()
        .merge(routes::router())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(access_log))
}
