use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sqlx::error::ErrorKind;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum CatalogError {
    /// Missing or malformed form input. Nothing was written.
    #[error("{0}")]
    Validation(String),

    /// The database refused the write (foreign key, unique, not-null or check).
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Book {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Ractor error: {0}")]
    Actor(String),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),
}

impl CatalogError {
    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::Validation(_) | CatalogError::Constraint(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Database(_) | CatalogError::Actor(_) | CatalogError::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            match db_err.kind() {
                ErrorKind::ForeignKeyViolation
                | ErrorKind::UniqueViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return CatalogError::Constraint(db_err.message().to_string());
                }
                _ => {}
            }
        }
        CatalogError::Database(err)
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
            return (status, "An internal server error occurred.").into_response();
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_taxonomy() {
        assert_eq!(
            CatalogError::Validation("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            CatalogError::Constraint("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(CatalogError::NotFound(7).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            CatalogError::Actor("gone".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn non_database_sqlx_errors_stay_database_errors() {
        let err = CatalogError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, CatalogError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn validation_message_is_shown_verbatim() {
        let err = CatalogError::Validation("Name and birthdate are required!".into());
        assert_eq!(err.to_string(), "Name and birthdate are required!");
    }
}
