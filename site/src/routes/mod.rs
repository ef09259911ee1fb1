//! HTTP handlers. `pages` and `forms` render HTML, `api` speaks JSON and
//! `admin` serves the content dashboard.

pub mod admin;
pub mod api;
pub mod forms;
pub mod pages;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use inceptum_content::User;
use serde::Serialize;
use tera::Context;
use tracing::error;

use crate::error::AppResult;
use crate::AppState;

/// Values every page template reads.
#[derive(Serialize)]
struct Chrome<'a> {
    current_page: &'a str,
    viewer: Option<&'a User>,
    is_admin: bool,
}

pub(crate) fn page_context(current_page: &str, viewer: Option<&User>) -> AppResult<Context> {
    let chrome = Chrome {
        current_page,
        viewer,
        is_admin: viewer.map(User::is_admin).unwrap_or(false),
    };
    Ok(Context::from_serialize(chrome)?)
}

pub(crate) fn render(state: &AppState, template: &str, ctx: &Context) -> AppResult<Html<String>> {
    Ok(Html(state.tera.render(template, ctx)?))
}

pub(crate) fn render_with_status(
    state: &AppState,
    status: StatusCode,
    template: &str,
    ctx: &Context,
) -> AppResult<Response> {
    Ok((status, render(state, template, ctx)?).into_response())
}

/// The HTML 404 page.
pub fn not_found_page(state: &AppState) -> Response {
    let rendered = page_context("404", None).and_then(|ctx| render(state, "404.html", &ctx));
    match rendered {
        Ok(html) => (StatusCode::NOT_FOUND, html).into_response(),
        Err(e) => {
            error!("Failed to render 404 page: {}", e);
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
    }
}
