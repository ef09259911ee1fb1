use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use inceptum_content::{Role, UpsertUser};
use tracing::info;

use super::DatabaseArgs;

#[derive(Args, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub cmd: UsersCommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// Set a user's role. Users who have not signed in yet are created.
    Promote {
        #[arg(long)]
        open_id: String,
        /// admin or user
        #[arg(long, default_value = "admin")]
        role: String,
        #[command(flatten)]
        database: DatabaseArgs,
    },
}

pub fn run(args: UsersArgs) -> Result<()> {
    match args.cmd {
        UsersCommand::Promote {
            open_id,
            role,
            database,
        } => {
            let role = Role::parse(&role)
                .ok_or_else(|| anyhow!("unknown role '{}' (expected admin or user)", role))?;
            let store = database.open()?;
            let user = match store.get_user_by_open_id(&open_id)? {
                Some(_) => store.set_user_role(&open_id, role)?,
                None => {
                    info!("Pre-provisioning {} before first sign-in", open_id);
                    store.upsert_user(UpsertUser {
                        open_id: open_id.clone(),
                        name: None,
                        email: None,
                        login_method: None,
                        role: Some(role),
                        last_signed_in: None,
                    })?
                }
            };
            println!("{} is now {}", user.open_id, user.role);
        }
    }
    Ok(())
}
