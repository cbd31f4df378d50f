use axum::response::{
    IntoResponse,
    Response,
};
use http::status::StatusCode;
use thiserror::Error;

use crate::view;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum AppError {
    #[error("400 Bad Request")]
    BadRequest,
    #[error("401 Unauthorized")]
    Unauthorized,
    #[error("403 Forbidden")]
    Forbidden,
    #[error("404 Not Found")]
    NotFound,
    #[error("500 Internal Server Error")]
    InternalServerError,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<slac::error::Error> for AppError {
    fn from(e: slac::error::Error) -> Self {
        log::error!("access control platform error: {e}");
        AppError::InternalServerError
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        (self.status_code(), view::page(&message, &view::paragraph(&message))).into_response()
    }
}
