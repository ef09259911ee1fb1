//! Server configuration, read from flags with environment fallbacks.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::auth::MAX_SESSION_TTL_DAYS;

#[derive(Debug, Clone, Parser)]
#[command(name = "inceptum-site")]
#[command(about = "Serves the Inceptum marketing site, lead forms and admin panel")]
pub struct SiteConfig {
    /// Interface to bind
    #[arg(long, env, default_value = "0.0.0.0")]
    pub bind_addr: String,

    /// Port to listen on
    #[arg(long, env, default_value_t = 3000)]
    pub port: u16,

    /// SQLite database file
    #[arg(long, env, default_value = "inceptum.db")]
    pub database_path: PathBuf,

    /// HS256 secret for session tokens. Without it every visitor is anonymous.
    #[arg(long, env, hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Open id that is granted the admin role on first sign-in
    #[arg(long, env)]
    pub owner_open_id: Option<String>,

    /// Session cookie lifetime in days
    #[arg(
        long,
        env,
        default_value_t = 365,
        value_parser = clap::value_parser!(i64).range(1..=MAX_SESSION_TTL_DAYS)
    )]
    pub session_ttl_days: i64,

    /// Mark session cookies `Secure`
    #[arg(long, env)]
    pub secure_cookies: bool,

    /// Write the default catalogue when the content tables are empty
    #[arg(long, env, default_value_t = true, action = ArgAction::Set)]
    pub seed_on_empty: bool,

    /// Directory served under /static
    #[arg(long, env)]
    pub static_dir: Option<PathBuf>,

    /// Directory holding the Tera templates
    #[arg(long, env)]
    pub templates_dir: Option<PathBuf>,

    /// Output logs in JSON format
    #[arg(long, env)]
    pub log_json: bool,
}

impl SiteConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn jwt_secret(&self) -> Option<&str> {
        self.jwt_secret
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.templates_dir
            .clone()
            .unwrap_or_else(default_templates_dir)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.static_dir.clone().unwrap_or_else(default_static_dir)
    }
}

pub fn default_templates_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
}

pub fn default_static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
}
