use axum::{
    extract::{Form, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use inceptum_content::{find_package, FeatureView, Package, Visibility};
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use super::{not_found_page, page_context, render, render_with_status};
use crate::auth::Viewer;
use crate::error::{AppError, AppResult};
use crate::templates::{
    faq_json_ld, group_faq, package_cards, script_json, sections_by_name, solutions_slider,
};
use crate::wizard::{self, LeadWizard, PackageInquiry};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub view: Option<String>,
    pub tier: Option<String>,
    pub inquiry: Option<String>,
    pub denied: Option<String>,
}

pub async fn home(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(query): Query<HomeQuery>,
) -> AppResult<Html<String>> {
    let view = FeatureView::parse(query.view.as_deref());
    let requested_tier = query.tier.as_deref().and_then(|t| t.trim().parse().ok());

    let sections = sections_by_name(&state.store.list_page_content()?);
    let services = state.store.list_services(Visibility::ActiveOnly)?;
    let steps = state.store.list_process_steps(Visibility::ActiveOnly)?;
    let tiers = state.store.list_solution_tiers(Visibility::ActiveOnly)?;
    let testimonials = state.store.list_testimonials(Visibility::ActiveOnly)?;
    let faq_groups = group_faq(state.store.list_faq_items(Visibility::ActiveOnly)?);

    let mut ctx = page_context("home", viewer.0.as_ref())?;
    ctx.insert("sections", &sections);
    ctx.insert("services", &services);
    ctx.insert("steps", &steps);
    ctx.insert("slider", &solutions_slider(tiers, requested_tier));
    ctx.insert("feature_view", view.as_str());
    ctx.insert("packages", &package_cards(view));
    ctx.insert("testimonials", &testimonials);
    ctx.insert("faq_json_ld", &script_json(&faq_json_ld(&faq_groups)));
    ctx.insert("faq_groups", &faq_groups);
    ctx.insert("lead", &LeadWizard::default());
    ctx.insert("lead_error", &Option::<&str>::None);
    ctx.insert("inquiry_sent", &(query.inquiry.as_deref() == Some("sent")));
    ctx.insert("denied", &query.denied.is_some());
    render(&state, "home.html", &ctx)
}

pub async fn about(State(state): State<AppState>, viewer: Viewer) -> AppResult<Html<String>> {
    let sections = sections_by_name(&state.store.list_page_content()?);
    let mut ctx = page_context("about", viewer.0.as_ref())?;
    ctx.insert("section", &sections.get("about"));
    render(&state, "about.html", &ctx)
}

pub async fn thank_you(State(state): State<AppState>, viewer: Viewer) -> AppResult<Html<String>> {
    let ctx = page_context("thank-you", viewer.0.as_ref())?;
    render(&state, "thank_you.html", &ctx)
}

fn render_package(
    state: &AppState,
    viewer: &Viewer,
    package: &Package,
    inquiry: &PackageInquiry,
    error: Option<&str>,
    status: StatusCode,
) -> AppResult<Response> {
    let mut ctx = page_context("package", viewer.0.as_ref())?;
    ctx.insert("package", package);
    ctx.insert("inquiry", inquiry);
    ctx.insert("error", &error);
    render_with_status(state, status, "package.html", &ctx)
}

pub async fn package_page(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    match find_package(&slug) {
        Some(package) => render_package(
            &state,
            &viewer,
            package,
            &PackageInquiry::default(),
            None,
            StatusCode::OK,
        ),
        None => Ok(not_found_page(&state)),
    }
}

pub async fn package_inquiry(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(slug): Path<String>,
    Form(inquiry): Form<PackageInquiry>,
) -> AppResult<Response> {
    let Some(package) = find_package(&slug) else {
        return Ok(not_found_page(&state));
    };
    let inquiry = inquiry.trimmed();

    let submission = match inquiry.submission(package.name) {
        Ok(submission) => submission,
        Err(message) => {
            return render_package(
                &state,
                &viewer,
                package,
                &inquiry,
                Some(message),
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
    };

    match state.store.create_submission(submission) {
        Ok(row) => {
            info!("Package inquiry {} for {}", row.id, package.slug);
            Ok(Redirect::to("/?inquiry=sent#packages").into_response())
        }
        Err(e) => {
            error!("Failed to store package inquiry: {}", e);
            render_package(
                &state,
                &viewer,
                package,
                &inquiry,
                Some(wizard::MSG_STORE_FAILED),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub token: Option<String>,
}

/// Exchange a session token for the session cookie.
pub async fn auth_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> AppResult<Response> {
    let token = query
        .token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::bad_request("token is required"))?;

    let claims = state.sessions.verify(token).map_err(|e| {
        warn!("Rejected callback token: {}", e);
        AppError::new(StatusCode::UNAUTHORIZED, "unauthorized", "Invalid session token")
    })?;

    let user = state.store.upsert_user(claims.to_upsert())?;
    debug!("Signed in {} as {}", user.open_id, user.role);

    Ok((
        [(header::SET_COOKIE, state.sessions.session_cookie(token))],
        Redirect::to("/admin"),
    )
        .into_response())
}
