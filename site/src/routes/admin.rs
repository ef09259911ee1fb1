//! The admin dashboard. Anonymous and non-admin visitors are sent back to the
//! landing page with `?denied=1`; form posts redirect back to their tab.

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use inceptum_content::{
    FaqItem, FaqItemPatch, NewFaqItem, StoreResult, SubmissionStatus, User, Visibility,
};
use serde::Deserialize;
use tracing::{info, warn};

use super::{not_found_page, page_context, render_with_status};
use crate::auth::Viewer;
use crate::error::{AppError, AppResult};
use crate::AppState;

pub const MSG_FAQ_FIELDS: &str = "Please fill in all fields";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Faq,
    Services,
    Submissions,
}

impl Tab {
    pub fn parse(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            Some("services") => Tab::Services,
            Some("submissions") => Tab::Submissions,
            _ => Tab::Faq,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Faq => "faq",
            Tab::Services => "services",
            Tab::Submissions => "submissions",
        }
    }
}

fn require_admin(viewer: Viewer) -> Result<User, Response> {
    match viewer.0 {
        Some(user) if user.is_admin() => Ok(user),
        Some(user) => {
            warn!("Admin dashboard denied for {}", user.open_id);
            Err(Redirect::to("/?denied=1").into_response())
        }
        None => Err(Redirect::to("/?denied=1").into_response()),
    }
}

/// Posts against a missing row answer with the HTML 404 page.
fn missing_row<T>(state: &AppState, result: StoreResult<T>) -> AppResult<Option<Response>> {
    match result {
        Ok(_) => Ok(None),
        Err(e) if e.is_not_found() => {
            warn!("Admin post against a missing row: {}", e);
            Ok(Some(not_found_page(state)))
        }
        Err(e) => Err(e.into()),
    }
}

fn tab_redirect(tab: Tab, notice: &str) -> Response {
    Redirect::to(&format!("/admin?tab={}&notice={}", tab.as_str(), notice)).into_response()
}

/// FAQ editor values, as posted or prefilled from a row.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub struct FaqForm {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub display_order: Option<String>,
    /// Checkbox: present when ticked.
    #[serde(default)]
    pub is_active: Option<String>,
}

impl FaqForm {
    fn from_row(row: &FaqItem) -> Self {
        Self {
            id: Some(row.id),
            category: row.category.clone(),
            question: row.question.clone(),
            answer: row.answer.clone(),
            display_order: Some(row.display_order.to_string()),
            is_active: row.is_active.then(|| "on".to_string()),
        }
    }

    fn is_complete(&self) -> bool {
        ![&self.category, &self.question, &self.answer]
            .iter()
            .any(|v| v.trim().is_empty())
    }

    fn display_order(&self) -> i64 {
        self.display_order
            .as_deref()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    fn active(&self) -> bool {
        self.is_active.is_some()
    }
}

struct Dashboard {
    tab: Tab,
    form: FaqForm,
    error: Option<&'static str>,
    notice: Option<String>,
    status: StatusCode,
}

fn render_dashboard(state: &AppState, admin: &User, dash: Dashboard) -> AppResult<Response> {
    let mut ctx = page_context("admin", Some(admin))?;
    ctx.insert("tab", dash.tab.as_str());
    ctx.insert("faq_form", &dash.form);
    ctx.insert("error", &dash.error);
    ctx.insert("notice", &dash.notice);
    match dash.tab {
        Tab::Faq => {
            ctx.insert("faq_items", &state.store.list_faq_items(Visibility::All)?);
        }
        Tab::Services => {
            ctx.insert("services", &state.store.list_services(Visibility::All)?);
        }
        Tab::Submissions => {
            ctx.insert("submissions", &state.store.list_submissions(None)?);
            ctx.insert("statuses", &SubmissionStatus::ALL.map(|s| s.as_str()));
        }
    }
    render_with_status(state, dash.status, "admin.html", &ctx)
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
    /// FAQ item to load into the editor.
    pub edit: Option<i64>,
    pub notice: Option<String>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Response> {
    let admin = match require_admin(viewer) {
        Ok(admin) => admin,
        Err(redirect) => return Ok(redirect),
    };
    let tab = Tab::parse(query.tab.as_deref());
    let form = match query.edit {
        Some(id) => match state.store.get_faq_item(id)? {
            Some(row) => FaqForm::from_row(&row),
            None => return Ok(not_found_page(&state)),
        },
        None => FaqForm {
            is_active: Some("on".to_string()),
            ..Default::default()
        },
    };
    render_dashboard(
        &state,
        &admin,
        Dashboard {
            tab,
            form,
            error: None,
            notice: query.notice,
            status: StatusCode::OK,
        },
    )
}

fn incomplete_faq(state: &AppState, admin: &User, form: FaqForm) -> AppResult<Response> {
    render_dashboard(
        state,
        admin,
        Dashboard {
            tab: Tab::Faq,
            form,
            error: Some(MSG_FAQ_FIELDS),
            notice: None,
            status: StatusCode::UNPROCESSABLE_ENTITY,
        },
    )
}

pub async fn create_faq(
    State(state): State<AppState>,
    viewer: Viewer,
    Form(form): Form<FaqForm>,
) -> AppResult<Response> {
    let admin = match require_admin(viewer) {
        Ok(admin) => admin,
        Err(redirect) => return Ok(redirect),
    };
    if !form.is_complete() {
        return incomplete_faq(&state, &admin, form);
    }
    let row = state.store.create_faq_item(
        NewFaqItem {
            category: form.category.trim().to_string(),
            question: form.question.trim().to_string(),
            answer: form.answer.trim().to_string(),
            display_order: form.display_order(),
            is_active: form.active(),
        },
        Some(admin.id),
    )?;
    info!("{} created FAQ item {}", admin.open_id, row.id);
    Ok(tab_redirect(Tab::Faq, "created"))
}

pub async fn update_faq(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<i64>,
    Form(form): Form<FaqForm>,
) -> AppResult<Response> {
    let admin = match require_admin(viewer) {
        Ok(admin) => admin,
        Err(redirect) => return Ok(redirect),
    };
    if !form.is_complete() {
        let form = FaqForm { id: Some(id), ..form };
        return incomplete_faq(&state, &admin, form);
    }
    let updated = state.store.update_faq_item(
        id,
        FaqItemPatch {
            category: Some(form.category.trim().to_string()),
            question: Some(form.question.trim().to_string()),
            answer: Some(form.answer.trim().to_string()),
            display_order: Some(form.display_order()),
            is_active: Some(form.active()),
        },
        Some(admin.id),
    );
    if let Some(page) = missing_row(&state, updated)? {
        return Ok(page);
    }
    info!("{} updated FAQ item {}", admin.open_id, id);
    Ok(tab_redirect(Tab::Faq, "updated"))
}

pub async fn delete_faq(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let admin = match require_admin(viewer) {
        Ok(admin) => admin,
        Err(redirect) => return Ok(redirect),
    };
    if let Some(page) = missing_row(&state, state.store.delete_faq_item(id))? {
        return Ok(page);
    }
    info!("{} deleted FAQ item {}", admin.open_id, id);
    Ok(tab_redirect(Tab::Faq, "deleted"))
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
    #[serde(default)]
    pub admin_notes: Option<String>,
}

pub async fn update_submission_status(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<i64>,
    Form(form): Form<StatusForm>,
) -> AppResult<Response> {
    let admin = match require_admin(viewer) {
        Ok(admin) => admin,
        Err(redirect) => return Ok(redirect),
    };
    let status = SubmissionStatus::parse(&form.status)
        .ok_or_else(|| AppError::bad_request(format!("unknown status: {}", form.status)))?;
    // An empty notes box leaves the stored notes alone.
    let notes = form.admin_notes.filter(|n| !n.trim().is_empty());
    let updated = state.store.update_submission_status(id, status, notes);
    if let Some(page) = missing_row(&state, updated)? {
        return Ok(page);
    }
    info!("{} marked submission {} {}", admin.open_id, id, status);
    Ok(tab_redirect(Tab::Submissions, "status"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tabs_fall_back_to_faq() {
        assert_eq!(Tab::parse(None), Tab::Faq);
        assert_eq!(Tab::parse(Some("submissions")), Tab::Submissions);
        assert_eq!(Tab::parse(Some("users")), Tab::Faq);
    }

    #[test]
    fn faq_form_requires_all_text_fields() {
        let form = FaqForm {
            category: "Pricing".into(),
            question: "Any hidden fees?".into(),
            answer: "  ".into(),
            ..Default::default()
        };
        assert!(!form.is_complete());
        let form = FaqForm {
            answer: "No".into(),
            ..form
        };
        assert!(form.is_complete());
        assert_eq!(form.display_order(), 0);
        assert!(!form.active());
    }
}
