use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "sitectl", version)]
#[command(about = "Operate the Inceptum site database and session tokens")]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, seed and inspect the content database
    Db(commands::db::DbArgs),
    /// Issue session tokens for the /auth/callback hand-off
    Token(commands::token::TokenArgs),
    /// Manage user roles
    Users(commands::users::UsersArgs),
    /// Review contact submissions
    Submissions(commands::submissions::SubmissionsArgs),
    /// Print version and exit
    Version,
}

fn init_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.cmd {
        Commands::Db(args) => commands::db::run(args),
        Commands::Token(args) => commands::token::run(args),
        Commands::Users(args) => commands::users::run(args),
        Commands::Submissions(args) => commands::submissions::run(args),
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
