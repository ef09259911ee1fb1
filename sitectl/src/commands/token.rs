//! Session tokens for operators. The printed token is exchanged for a session
//! cookie at `/auth/callback?token=...`.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use inceptum_site::auth::{SessionIdentity, SessionSettings};

#[derive(Args, Debug)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub cmd: TokenCommand,
}

#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    /// Mint a signed session token
    Issue(IssueArgs),
}

#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Open id the token identifies
    #[arg(long)]
    pub open_id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Token lifetime in days
    #[arg(long, default_value_t = 365)]
    pub ttl_days: i64,

    /// HS256 secret; must match the site's JWT_SECRET
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub secret: Option<String>,
}

pub fn run(args: TokenArgs) -> Result<()> {
    match args.cmd {
        TokenCommand::Issue(issue) => {
            let settings = SessionSettings::new(issue.secret.as_deref(), issue.ttl_days, false);
            let identity = SessionIdentity {
                open_id: issue.open_id,
                name: issue.name,
                email: issue.email,
                login_method: Some("cli".to_string()),
            };
            let token = settings
                .issue(&identity)
                .context("Failed to issue session token")?;
            println!("{}", token);
        }
    }
    Ok(())
}
