use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use autoblog::pipeline::{Pipeline, RunOutcome};
use autoblog_common::Config;

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new("autoblog=info,ai_client=info,wordpress_client=info")
    })?;

    let json = std::env::var("AUTOBLOG_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before the filter reads RUST_LOG
    let dotenv_loaded = dotenvy::dotenv().is_ok();
    init_tracing()?;

    info!(dotenv_loaded, "Autoblog starting...");

    let config = Config::from_env()?;
    config.log_redacted();

    let pipeline = Pipeline::from_config(&config)?;

    let report = pipeline.run().await?;

    match &report.outcome {
        RunOutcome::Published { title, result, .. } => info!(
            run_id = %report.run_id,
            title = %title,
            status = result.status,
            link = ?result.link,
            "Posted to WordPress"
        ),
        RunOutcome::Aborted { topic, reason } => info!(
            run_id = %report.run_id,
            topic = %topic,
            reason = reason.describe(),
            "Draft rejected by quality gate, nothing published"
        ),
    }

    Ok(())
}
