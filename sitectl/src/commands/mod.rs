pub mod db;
pub mod submissions;
pub mod token;
pub mod users;

use anyhow::{Context, Result};
use clap::Args;
use inceptum_content::ContentStore;
use std::path::PathBuf;

/// Database location shared by the commands that touch the store.
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// SQLite database file (same default as the site)
    #[arg(long = "database", env = "DATABASE_PATH", default_value = "inceptum.db")]
    pub path: PathBuf,
}

impl DatabaseArgs {
    pub fn open(&self) -> Result<ContentStore> {
        ContentStore::open(&self.path)
            .with_context(|| format!("Failed to open database {}", self.path.display()))
    }
}
