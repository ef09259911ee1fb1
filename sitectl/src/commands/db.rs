//! Database commands - create the schema, write the default catalogue and
//! report row counts.

use anyhow::Result;
use clap::{Args, Subcommand};
use inceptum_content::TableCounts;
use tabled::{settings::style::Style, Table, Tabled};
use tracing::info;

use super::DatabaseArgs;

#[derive(Args, Debug)]
pub struct DbArgs {
    #[command(subcommand)]
    pub cmd: DbCommand,
}

#[derive(Subcommand, Debug)]
pub enum DbCommand {
    /// Create the database file and apply the schema
    Init {
        #[command(flatten)]
        database: DatabaseArgs,
    },
    /// Write the default catalogue
    Seed {
        #[command(flatten)]
        database: DatabaseArgs,
        /// Replace existing content rows
        #[arg(long)]
        force: bool,
    },
    /// Show row counts per table
    Stats {
        #[command(flatten)]
        database: DatabaseArgs,
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Tabled)]
struct CountRow {
    #[tabled(rename = "TABLE")]
    table: &'static str,
    #[tabled(rename = "ROWS")]
    rows: i64,
}

fn count_rows(counts: &TableCounts) -> Vec<CountRow> {
    [
        ("users", counts.users),
        ("page_content", counts.page_content),
        ("services", counts.services),
        ("solution_tiers", counts.solution_tiers),
        ("process_steps", counts.process_steps),
        ("faq_items", counts.faq_items),
        ("testimonials", counts.testimonials),
        ("contact_submissions", counts.contact_submissions),
    ]
    .into_iter()
    .map(|(table, rows)| CountRow { table, rows })
    .collect()
}

pub fn run(args: DbArgs) -> Result<()> {
    match args.cmd {
        DbCommand::Init { database } => {
            database.open()?;
            info!("Schema applied to {}", database.path.display());
            println!("Database ready at {}", database.path.display());
        }
        DbCommand::Seed { database, force } => {
            let store = database.open()?;
            let report = store.seed_defaults(force)?;
            if report.skipped {
                println!("Content already present; nothing seeded (use --force to replace it)");
            } else {
                println!(
                    "Seeded {} page sections, {} services, {} solution tiers, {} process steps, {} FAQ items",
                    report.page_sections,
                    report.services,
                    report.solution_tiers,
                    report.process_steps,
                    report.faq_items
                );
            }
        }
        DbCommand::Stats { database, json } => {
            let counts = database.open()?.counts()?;
            if json {
                println!("{}", serde_json::to_string(&counts)?);
            } else {
                let mut table = Table::new(count_rows(&counts));
                table.with(Style::rounded());
                println!("{}", table);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_rows_cover_every_table() {
        let counts = TableCounts {
            services: 6,
            faq_items: 9,
            ..Default::default()
        };
        let rows = count_rows(&counts);
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[2].table, "services");
        assert_eq!(rows[2].rows, 6);
        assert_eq!(rows[5].rows, 9);
    }
}
