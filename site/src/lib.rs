//! Library interface for the Inceptum site: the landing page, the booking and
//! lead wizards, the JSON content API and the admin panel.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod templates;
pub mod wizard;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use inceptum_content::ContentStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tera::Tera;
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::{error, info, warn};

use crate::auth::SessionSettings;
use crate::config::SiteConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: ContentStore,
    pub tera: Arc<Tera>,
    pub sessions: SessionSettings,
    pub static_dir: PathBuf,
}

impl AppState {
    /// Open the database, seed it when empty and load the templates.
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let store = ContentStore::open(&config.database_path)
            .with_context(|| {
                format!("Failed to open database {}", config.database_path.display())
            })?
            .with_owner_open_id(config.owner_open_id.clone());
        info!("Opened database {}", config.database_path.display());

        if config.seed_on_empty {
            let report = store
                .seed_defaults(false)
                .context("Failed to seed default content")?;
            if !report.skipped {
                info!(
                    "Seeded default content: {} sections, {} services, {} tiers, {} steps, {} FAQ items",
                    report.page_sections,
                    report.services,
                    report.solution_tiers,
                    report.process_steps,
                    report.faq_items
                );
            }
        }

        let sessions = SessionSettings::new(
            config.jwt_secret(),
            config.session_ttl_days,
            config.secure_cookies,
        );
        if !sessions.is_enabled() {
            warn!("JWT_SECRET is not set; every visitor is anonymous and the admin panel is locked");
        }

        Self::from_parts(
            store,
            sessions,
            &config.templates_dir(),
            config.static_dir(),
        )
    }

    pub fn from_parts(
        store: ContentStore,
        sessions: SessionSettings,
        templates_dir: &Path,
        static_dir: PathBuf,
    ) -> Result<Self> {
        let tera = load_templates(templates_dir)?;
        Ok(Self {
            store,
            tera: Arc::new(tera),
            sessions,
            static_dir,
        })
    }
}

pub fn load_templates(dir: &Path) -> Result<Tera> {
    let tpl_glob = format!("{}/**/*.html", dir.display());
    let mut tera = Tera::new(&tpl_glob).map_err(|e| {
        error!("Parsing error for Tera templates ({}): {}", tpl_glob, e);
        anyhow::anyhow!("failed to load templates from {}: {}", tpl_glob, e)
    })?;
    templates::register_filters(&mut tera);
    Ok(tera)
}

async fn health() -> impl IntoResponse {
    "OK"
}

/// Fallback handler for unknown paths.
async fn not_found(State(state): State<AppState>) -> Response {
    routes::not_found_page(&state)
}

pub fn create_app(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/health", get(health))
        // Landing and static pages
        .route("/", get(routes::pages::home))
        .route("/about", get(routes::pages::about))
        .route("/thank-you", get(routes::pages::thank_you))
        .route(
            "/packages/:slug",
            get(routes::pages::package_page).post(routes::pages::package_inquiry),
        )
        .route("/auth/callback", get(routes::pages::auth_callback))
        // Wizards
        .route(
            "/booking",
            get(routes::forms::booking_page).post(routes::forms::booking_submit),
        )
        .route(
            "/lead",
            get(routes::forms::lead_page).post(routes::forms::lead_submit),
        )
        // Admin panel
        .route("/admin", get(routes::admin::dashboard))
        .route("/admin/faq", post(routes::admin::create_faq))
        .route("/admin/faq/:id", post(routes::admin::update_faq))
        .route("/admin/faq/:id/delete", post(routes::admin::delete_faq))
        .route(
            "/admin/submissions/:id/status",
            post(routes::admin::update_submission_status),
        )
        // JSON API
        .route("/api/auth/me", get(routes::api::me))
        .route("/api/auth/logout", post(routes::api::logout))
        .route("/api/page-content", get(routes::api::list_page_content))
        .route(
            "/api/page-content/:section",
            get(routes::api::get_page_content).put(routes::api::update_page_content),
        )
        .route(
            "/api/services",
            get(routes::api::list_services).post(routes::api::create_service),
        )
        .route(
            "/api/services/:id",
            get(routes::api::get_service).patch(routes::api::update_service),
        )
        .route("/api/solution-tiers", get(routes::api::list_solution_tiers))
        .route(
            "/api/solution-tiers/:id",
            get(routes::api::get_solution_tier).patch(routes::api::update_solution_tier),
        )
        .route("/api/process-steps", get(routes::api::list_process_steps))
        .route(
            "/api/process-steps/:id",
            get(routes::api::get_process_step).patch(routes::api::update_process_step),
        )
        .route(
            "/api/faq",
            get(routes::api::list_faq).post(routes::api::create_faq),
        )
        .route(
            "/api/faq/:id",
            get(routes::api::get_faq)
                .patch(routes::api::update_faq)
                .delete(routes::api::delete_faq),
        )
        .route("/api/testimonials", get(routes::api::list_testimonials))
        .route(
            "/api/contact",
            get(routes::api::list_submissions).post(routes::api::submit_contact),
        )
        .route(
            "/api/contact/:id/status",
            patch(routes::api::update_submission_status),
        )
        .nest_service("/static", static_files)
        .fallback(not_found)
        .layer(
            // Headers stay out of the spans: they carry session tokens.
            TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()),
        )
        .with_state(state)
}
