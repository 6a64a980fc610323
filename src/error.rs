use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("page not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Internal(anyhow::Error::new(err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::Internal(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Fixed messages only; the underlying error goes to the log.
        match self {
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Html(crate::templates::error_page("404 - Page Not Found")))
                    .into_response()
            },
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(crate::templates::error_page("500 - Internal Server Error")),
                )
                    .into_response()
            },
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
