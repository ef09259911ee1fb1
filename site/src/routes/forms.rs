use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tera::Context;
use tracing::{error, info};

use super::{page_context, render_with_status};
use crate::auth::Viewer;
use crate::error::AppResult;
use crate::wizard::{
    BookingOutcome, BookingPost, BookingWizard, LeadOutcome, LeadPost, LeadStep, LeadWizard,
    BOOKING_STEPS, DIGITAL_PRESENCE, GROWTH_BUDGET, HURDLES, LEGAL_STATUS, MSG_STORE_FAILED,
    TIMEFRAME,
};
use crate::AppState;

fn booking_context(
    viewer: &Viewer,
    wizard: &BookingWizard,
    error: Option<&str>,
) -> AppResult<Context> {
    let mut ctx = page_context("booking", viewer.0.as_ref())?;
    ctx.insert("wizard", wizard);
    ctx.insert("total_steps", &BOOKING_STEPS);
    ctx.insert("progress", &wizard.progress_percent());
    ctx.insert("error", &error);
    ctx.insert("legal_status_options", LEGAL_STATUS);
    ctx.insert("hurdle_options", HURDLES);
    ctx.insert("digital_presence_options", DIGITAL_PRESENCE);
    ctx.insert("growth_budget_options", GROWTH_BUDGET);
    ctx.insert("timeframe_options", TIMEFRAME);
    Ok(ctx)
}

fn render_booking(
    state: &AppState,
    viewer: &Viewer,
    wizard: &BookingWizard,
    error: Option<&str>,
    status: StatusCode,
) -> AppResult<Response> {
    let ctx = booking_context(viewer, wizard, error)?;
    render_with_status(state, status, "booking.html", &ctx)
}

pub async fn booking_page(State(state): State<AppState>, viewer: Viewer) -> AppResult<Response> {
    render_booking(
        &state,
        &viewer,
        &BookingWizard::default(),
        None,
        StatusCode::OK,
    )
}

pub async fn booking_submit(
    State(state): State<AppState>,
    viewer: Viewer,
    Form(post): Form<BookingPost>,
) -> AppResult<Response> {
    let (wizard, action) = post.into_wizard();
    match wizard.apply(action) {
        BookingOutcome::Render {
            wizard,
            error: None,
        } => render_booking(&state, &viewer, &wizard, None, StatusCode::OK),
        BookingOutcome::Render {
            wizard,
            error: Some(message),
        } => render_booking(
            &state,
            &viewer,
            &wizard,
            Some(message),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        BookingOutcome::Complete { wizard, submission } => {
            match state.store.create_submission(submission) {
                Ok(row) => {
                    info!("Booking request {} received", row.id);
                    Ok(Redirect::to("/thank-you").into_response())
                }
                Err(e) => {
                    error!("Failed to store booking request: {}", e);
                    render_booking(
                        &state,
                        &viewer,
                        &wizard,
                        Some(MSG_STORE_FAILED),
                        StatusCode::INTERNAL_SERVER_ERROR,
                    )
                }
            }
        }
    }
}

fn lead_context(viewer: &Viewer, wizard: &LeadWizard, error: Option<&str>) -> AppResult<Context> {
    let mut ctx = page_context("lead", viewer.0.as_ref())?;
    ctx.insert("lead", wizard);
    ctx.insert("lead_error", &error);
    ctx.insert("packages", &inceptum_content::PACKAGES);
    Ok(ctx)
}

fn render_lead(
    state: &AppState,
    viewer: &Viewer,
    wizard: &LeadWizard,
    error: Option<&str>,
    status: StatusCode,
) -> AppResult<Response> {
    let ctx = lead_context(viewer, wizard, error)?;
    render_with_status(state, status, "lead_page.html", &ctx)
}

pub async fn lead_page(State(state): State<AppState>, viewer: Viewer) -> AppResult<Response> {
    render_lead(&state, &viewer, &LeadWizard::default(), None, StatusCode::OK)
}

pub async fn lead_submit(
    State(state): State<AppState>,
    viewer: Viewer,
    Form(post): Form<LeadPost>,
) -> AppResult<Response> {
    let (wizard, action) = post.into_wizard();
    let fallback = wizard.clone();
    match wizard.apply(action) {
        LeadOutcome::Render {
            wizard,
            error: None,
        } => render_lead(&state, &viewer, &wizard, None, StatusCode::OK),
        LeadOutcome::Render {
            wizard,
            error: Some(message),
        } => render_lead(
            &state,
            &viewer,
            &wizard,
            Some(message),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        LeadOutcome::Complete { wizard, submission } => {
            match state.store.create_submission(submission) {
                Ok(row) => {
                    info!("Strategy session request {} received", row.id);
                    render_lead(&state, &viewer, &wizard, None, StatusCode::OK)
                }
                Err(e) => {
                    error!("Failed to store strategy session request: {}", e);
                    let wizard = LeadWizard {
                        step: LeadStep::Details,
                        ..fallback
                    };
                    render_lead(
                        &state,
                        &viewer,
                        &wizard,
                        Some(MSG_STORE_FAILED),
                        StatusCode::INTERNAL_SERVER_ERROR,
                    )
                }
            }
        }
    }
}
