//! Recent-runs listing command.

use leadscout_db::list_scrape_runs;

pub(crate) async fn run(pool: &sqlx::PgPool, limit: i64) -> anyhow::Result<()> {
    let runs = list_scrape_runs(pool, limit.clamp(1, 200)).await?;

    if runs.is_empty() {
        println!("no scrape runs recorded");
        return Ok(());
    }

    for run in runs {
        let outcome = match run.status.as_str() {
            "completed" => format!("{} lead(s)", run.leads_found),
            "failed" => run
                .error_message
                .unwrap_or_else(|| "unknown error".to_string()),
            _ => "-".to_string(),
        };
        println!(
            "{} | {:>9} | {:?} in {:?} | via {} | {} | {}",
            run.public_id,
            run.status,
            run.keywords,
            run.location,
            run.trigger_source,
            run.created_at.format("%Y-%m-%d %H:%M:%S"),
            outcome,
        );
    }
    Ok(())
}
