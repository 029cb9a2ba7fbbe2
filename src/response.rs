// src/response.rs
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use maud::Markup;

use crate::views::page_shell;

pub enum AppResponse {
    Full(Markup),
    Partial(Markup),
}

impl IntoResponse for AppResponse {
    fn into_response(self) -> Response {
        match self {
            AppResponse::Full(markup) => page_shell(markup).into_response(),
            AppResponse::Partial(markup) => markup.into_response(),
        }
    }
}

/// HTMX requests get the fragment, a normal page load gets the full shell.
pub fn build_response(headers: &HeaderMap, page_content: Markup) -> AppResponse {
    if headers.contains_key("HX-Request") {
        AppResponse::Partial(page_content)
    } else {
        AppResponse::Full(page_content)
    }
}
