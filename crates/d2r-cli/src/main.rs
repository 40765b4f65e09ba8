mod ask_cmd;
mod config;
mod import_cmd;
mod offices_cmd;
mod plan_cmd;
mod progress_cmds;
mod resolve;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use d2r_core::office::Level;
use d2r_core::office::filter::SortBy;
use d2r_db::pool;

use config::D2rConfig;

#[derive(Parser)]
#[command(name = "d2r", about = "Decide to Run campaign plan toolkit")]
struct Cli {
    /// Database URL (overrides D2R_DATABASE_URL env var)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Acting user ID (overrides the config file's [user] section)
    #[arg(long, global = true)]
    user: Option<Uuid>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a d2r config file (no database required)
    Init {
        /// PostgreSQL connection URL
        #[arg(long, default_value = "postgresql://localhost:5432/d2r")]
        db_url: String,
        /// User ID to record in the config file (generated when omitted)
        #[arg(long)]
        user_id: Option<Uuid>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Initialize the d2r database (requires config file or env vars)
    DbInit,
    /// Bulk-import offices from a JSON array file
    Import {
        /// Path to the JSON file
        file: String,
    },
    /// List offices for a state (or your saved offices)
    Offices {
        /// Two-letter state code
        #[arg(long)]
        state: Option<String>,
        /// List the acting user's saved offices instead
        #[arg(long)]
        saved: bool,
        /// Keep only offices at this level: federal, state, local
        #[arg(long)]
        level: Option<String>,
        /// Case-insensitive search over title and incumbent
        #[arg(long)]
        search: Option<String>,
        /// Sort order: deadline (default) or title
        #[arg(long, default_value = "deadline")]
        sort: String,
    },
    /// Render an office's campaign plan as markdown
    Plan {
        /// Office ID (full UUID or unambiguous prefix)
        office_id: String,
        /// Output file path (defaults to stdout)
        #[arg(long)]
        output: Option<String>,
    },
    /// Toggle a checklist item and save progress
    Toggle {
        /// Office ID (full UUID or unambiguous prefix)
        office_id: String,
        /// Checklist item ID (e.g. research, fec, kickoff)
        item_id: String,
    },
    /// Show completion stats for an office's plan
    Status {
        /// Office ID (full UUID or unambiguous prefix)
        office_id: String,
    },
    /// Bookmark an office
    Save {
        /// Office ID (full UUID or unambiguous prefix)
        office_id: String,
    },
    /// Remove a bookmarked office
    Unsave {
        /// Office ID (full UUID or unambiguous prefix)
        office_id: String,
    },
    /// Ask the campaign assistant a question (no database required)
    Ask {
        /// The question text
        question: String,
    },
}

/// Execute the `d2r init` command: write config file.
fn cmd_init(db_url: &str, user_id: Option<Uuid>, force: bool) -> Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let user_id = user_id.unwrap_or_else(Uuid::new_v4);

    let cfg = config::ConfigFile {
        database: config::DatabaseSection {
            url: db_url.to_owned(),
        },
        user: Some(config::UserSection { id: user_id }),
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  database.url = {db_url}");
    println!("  user.id = {user_id}");
    println!();
    println!("Next: run `d2r db-init` to create and migrate the database.");

    Ok(())
}

/// Execute the `d2r db-init` command: create database and run migrations.
async fn cmd_db_init(cli_db_url: Option<&str>) -> Result<()> {
    let resolved = D2rConfig::resolve(cli_db_url)?;

    println!("Initializing d2r database...");

    pool::ensure_database_exists(&resolved.db_config).await?;

    let db_pool = pool::create_pool(&resolved.db_config).await?;
    pool::run_migrations(&db_pool).await?;

    let counts = pool::table_counts(&db_pool).await?;
    println!("Database ready. Tables:");
    for (table, count) in &counts {
        println!("  {table}: {count} rows");
    }

    db_pool.close().await;

    println!("d2r db-init complete.");
    Ok(())
}

fn parse_level(input: Option<&str>) -> Result<Option<Level>> {
    input
        .map(|s| {
            s.parse::<Level>()
                .map_err(|e| anyhow::anyhow!("{e} (expected federal, state, or local)"))
        })
        .transpose()
}

fn parse_sort(input: &str) -> Result<SortBy> {
    match input {
        "deadline" => Ok(SortBy::Deadline),
        "title" => Ok(SortBy::Title),
        other => anyhow::bail!("unknown sort order {other:?} (expected deadline or title)"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            db_url,
            user_id,
            force,
        } => {
            cmd_init(&db_url, user_id, force)?;
        }
        Commands::DbInit => {
            cmd_db_init(cli.database_url.as_deref()).await?;
        }
        Commands::Import { file } => {
            let resolved = D2rConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = import_cmd::run_import(&db_pool, &file).await;
            db_pool.close().await;
            result?;
        }
        Commands::Offices {
            state,
            saved,
            level,
            search,
            sort,
        } => {
            let resolved = D2rConfig::resolve(cli.database_url.as_deref())?;
            let level = parse_level(level.as_deref())?;
            let sort = parse_sort(&sort)?;
            let saved_user = if saved {
                Some(
                    resolved
                        .user(cli.user)
                        .context("--saved requires a user; pass --user or run `d2r init`")?,
                )
            } else {
                None
            };
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result =
                offices_cmd::run_offices(&db_pool, state.as_deref(), saved_user, level, search, sort)
                    .await;
            db_pool.close().await;
            result?;
        }
        Commands::Plan { office_id, output } => {
            let resolved = D2rConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result =
                plan_cmd::run_plan(&db_pool, &office_id, resolved.user(cli.user), output.as_deref())
                    .await;
            db_pool.close().await;
            result?;
        }
        Commands::Toggle { office_id, item_id } => {
            let resolved = D2rConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result =
                progress_cmds::run_toggle(&db_pool, &office_id, &item_id, resolved.user(cli.user))
                    .await;
            db_pool.close().await;
            result?;
        }
        Commands::Status { office_id } => {
            let resolved = D2rConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result =
                progress_cmds::run_status(&db_pool, &office_id, resolved.user(cli.user)).await;
            db_pool.close().await;
            result?;
        }
        Commands::Save { office_id } => {
            let resolved = D2rConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result =
                progress_cmds::run_save(&db_pool, &office_id, resolved.user(cli.user)).await;
            db_pool.close().await;
            result?;
        }
        Commands::Unsave { office_id } => {
            let resolved = D2rConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result =
                progress_cmds::run_unsave(&db_pool, &office_id, resolved.user(cli.user)).await;
            db_pool.close().await;
            result?;
        }
        Commands::Ask { question } => {
            ask_cmd::run_ask(&question);
        }
    }

    Ok(())
}
