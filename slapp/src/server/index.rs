use axum::response::Html;

use crate::{
    error::AppError,
    view,
};

pub async fn index() -> Html<String> {
    view::index()
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}
