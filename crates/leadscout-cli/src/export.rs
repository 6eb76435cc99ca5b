//! Verified-leads CSV export command.

use std::path::Path;

use leadscout_db::{leads_to_csv, list_verified_leads};

pub(crate) async fn run(pool: &sqlx::PgPool, output: Option<&Path>) -> anyhow::Result<()> {
    let rows = list_verified_leads(pool).await?;
    let csv = leads_to_csv(&rows)?;

    match output {
        Some(path) => {
            tokio::fs::write(path, &csv).await?;
            println!("wrote {} verified lead(s) to {}", rows.len(), path.display());
        }
        None => print!("{csv}"),
    }
    Ok(())
}
