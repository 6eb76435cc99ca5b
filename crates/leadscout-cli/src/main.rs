mod export;
mod runs;
mod scrape;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "leadscout")]
#[command(about = "Business lead scraping command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one scrape job inline and wait for it to finish.
    Scrape {
        /// Search keywords, e.g. "steel pipes".
        #[arg(long)]
        keywords: String,
        /// Target location, e.g. "Mumbai".
        #[arg(long)]
        location: String,
        /// Search radius in km (recorded on the run; not used for filtering).
        #[arg(long, default_value_t = 25)]
        radius_km: i32,
    },
    /// List recent scrape runs, newest first.
    Runs {
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
    /// Export verified leads as CSV to a file or stdout.
    Export {
        /// Output path; omit to write to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = leadscout_core::load_app_config()?;
    let pool_config = leadscout_db::PoolConfig::from_app_config(&config);
    let pool = leadscout_db::connect_pool(&config.database_url, pool_config).await?;
    leadscout_db::run_migrations(&pool).await?;

    match cli.command {
        Commands::Scrape {
            keywords,
            location,
            radius_km,
        } => scrape::run(&pool, &config, &keywords, &location, radius_km).await,
        Commands::Runs { limit } => runs::run(&pool, limit).await,
        Commands::Export { output } => export::run(&pool, output.as_deref()).await,
    }
}
