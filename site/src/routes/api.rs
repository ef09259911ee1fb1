//! JSON procedures over the content store. Reads are public; every mutation
//! except the contact form takes an [`AdminUser`].

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use inceptum_content::{
    ContactSubmission, FaqItem, FaqItemPatch, NewContactSubmission, NewFaqItem, NewService,
    PageContent, PageContentPatch, ProcessStep, ProcessStepPatch, Service, ServicePatch,
    SolutionTier, SolutionTierPatch, SubmissionStatus, SubmissionStatusUpdate, Testimonial, User,
    Visibility,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::{AdminUser, Viewer};
use crate::error::{ApiJson, AppError, AppResult};
use crate::AppState;

fn success() -> Json<Value> {
    Json(json!({ "success": true }))
}

fn found<T>(row: Option<T>, entity: &str, id: impl std::fmt::Display) -> AppResult<Json<T>> {
    row.map(Json)
        .ok_or_else(|| AppError::not_found(format!("{} not found: {}", entity, id)))
}

// ---- auth ----

pub async fn me(viewer: Viewer) -> Json<Option<User>> {
    Json(viewer.0)
}

pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, state.sessions.clear_cookie())],
        success(),
    )
}

// ---- page content ----

pub async fn list_page_content(State(state): State<AppState>) -> AppResult<Json<Vec<PageContent>>> {
    Ok(Json(state.store.list_page_content()?))
}

pub async fn get_page_content(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> AppResult<Json<PageContent>> {
    found(state.store.get_page_content(&section)?, "page content", section)
}

pub async fn update_page_content(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(section): Path<String>,
    ApiJson(patch): ApiJson<PageContentPatch>,
) -> AppResult<Json<Value>> {
    state
        .store
        .update_page_content(&section, patch, Some(admin.id))?;
    info!("{} updated page section {}", admin.open_id, section);
    Ok(success())
}

// ---- services ----

pub async fn list_services(State(state): State<AppState>) -> AppResult<Json<Vec<Service>>> {
    Ok(Json(state.store.list_services(Visibility::ActiveOnly)?))
}

pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Service>> {
    found(state.store.get_service(id)?, "service", id)
}

pub async fn create_service(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(input): ApiJson<NewService>,
) -> AppResult<Json<Service>> {
    let row = state.store.create_service(input, Some(admin.id))?;
    Ok(Json(row))
}

pub async fn update_service(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
    ApiJson(patch): ApiJson<ServicePatch>,
) -> AppResult<Json<Value>> {
    state.store.update_service(id, patch, Some(admin.id))?;
    Ok(success())
}

// ---- solution tiers ----

pub async fn list_solution_tiers(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SolutionTier>>> {
    Ok(Json(state.store.list_solution_tiers(Visibility::ActiveOnly)?))
}

pub async fn get_solution_tier(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<SolutionTier>> {
    found(state.store.get_solution_tier(id)?, "solution tier", id)
}

pub async fn update_solution_tier(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
    ApiJson(patch): ApiJson<SolutionTierPatch>,
) -> AppResult<Json<Value>> {
    state.store.update_solution_tier(id, patch, Some(admin.id))?;
    Ok(success())
}

// ---- process steps ----

pub async fn list_process_steps(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProcessStep>>> {
    Ok(Json(state.store.list_process_steps(Visibility::ActiveOnly)?))
}

pub async fn get_process_step(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProcessStep>> {
    found(state.store.get_process_step(id)?, "process step", id)
}

pub async fn update_process_step(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
    ApiJson(patch): ApiJson<ProcessStepPatch>,
) -> AppResult<Json<Value>> {
    state.store.update_process_step(id, patch, Some(admin.id))?;
    Ok(success())
}

// ---- FAQ ----

pub async fn list_faq(State(state): State<AppState>) -> AppResult<Json<Vec<FaqItem>>> {
    Ok(Json(state.store.list_faq_items(Visibility::ActiveOnly)?))
}

pub async fn get_faq(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<FaqItem>> {
    found(state.store.get_faq_item(id)?, "FAQ item", id)
}

pub async fn create_faq(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(input): ApiJson<NewFaqItem>,
) -> AppResult<Json<FaqItem>> {
    let row = state.store.create_faq_item(input, Some(admin.id))?;
    Ok(Json(row))
}

pub async fn update_faq(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
    ApiJson(patch): ApiJson<FaqItemPatch>,
) -> AppResult<Json<Value>> {
    state.store.update_faq_item(id, patch, Some(admin.id))?;
    Ok(success())
}

pub async fn delete_faq(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    state.store.delete_faq_item(id)?;
    info!("{} deleted FAQ item {}", admin.open_id, id);
    Ok(success())
}

// ---- testimonials ----

pub async fn list_testimonials(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Testimonial>>> {
    Ok(Json(state.store.list_testimonials(Visibility::ActiveOnly)?))
}

// ---- contact submissions ----

pub async fn submit_contact(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewContactSubmission>,
) -> AppResult<Json<ContactSubmission>> {
    let row = state.store.create_submission(input)?;
    info!("Contact submission {} received ({})", row.id, row.kind);
    Ok(Json(row))
}

#[derive(Debug, Default, Deserialize)]
pub struct SubmissionFilter {
    pub status: Option<String>,
}

impl SubmissionFilter {
    pub fn parse(&self) -> AppResult<Option<SubmissionStatus>> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => SubmissionStatus::parse(raw)
                .map(Some)
                .ok_or_else(|| AppError::bad_request(format!("unknown status: {}", raw))),
        }
    }
}

pub async fn list_submissions(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(filter): Query<SubmissionFilter>,
) -> AppResult<Json<Vec<ContactSubmission>>> {
    Ok(Json(state.store.list_submissions(filter.parse()?)?))
}

pub async fn update_submission_status(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
    ApiJson(update): ApiJson<SubmissionStatusUpdate>,
) -> AppResult<Json<Value>> {
    state
        .store
        .update_submission_status(id, update.status, update.admin_notes)?;
    info!("{} marked submission {} {}", admin.open_id, id, update.status);
    Ok(success())
}
