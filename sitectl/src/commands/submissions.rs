use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use inceptum_content::{ContactSubmission, SubmissionStatus};
use tabled::{settings::style::Style, Table, Tabled};

use super::DatabaseArgs;

#[derive(Args, Debug)]
pub struct SubmissionsArgs {
    #[command(subcommand)]
    pub cmd: SubmissionsCommand,
}

#[derive(Subcommand, Debug)]
pub enum SubmissionsCommand {
    /// List submissions, newest first
    List {
        /// new, contacted or resolved
        #[arg(long)]
        status: Option<String>,
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        database: DatabaseArgs,
    },
}

#[derive(Debug, Tabled)]
struct SubmissionRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "RECEIVED")]
    received: String,
    #[tabled(rename = "TYPE")]
    kind: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "EMAIL")]
    email: String,
    #[tabled(rename = "PHONE")]
    phone: String,
}

impl From<&ContactSubmission> for SubmissionRow {
    fn from(s: &ContactSubmission) -> Self {
        Self {
            id: s.id,
            received: s.created_at.format("%Y-%m-%d %H:%M").to_string(),
            kind: s.kind.clone(),
            status: s.status.to_string(),
            name: s.name.clone(),
            email: s.email.clone(),
            phone: s.phone.clone().unwrap_or_default(),
        }
    }
}

pub fn run(args: SubmissionsArgs) -> Result<()> {
    match args.cmd {
        SubmissionsCommand::List {
            status,
            json,
            database,
        } => {
            let status = status
                .map(|s| {
                    SubmissionStatus::parse(&s).ok_or_else(|| {
                        anyhow!("unknown status '{}' (expected new, contacted or resolved)", s)
                    })
                })
                .transpose()?;
            let rows = database.open()?.list_submissions(status)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if rows.is_empty() {
                println!("No submissions.");
            } else {
                let mut table = Table::new(rows.iter().map(SubmissionRow::from));
                table.with(Style::rounded());
                println!("{}", table);
            }
        }
    }
    Ok(())
}
