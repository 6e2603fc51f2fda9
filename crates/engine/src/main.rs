//! Character sheet assistant - console entry point.
//!
//! Reads one message per line from stdin and prints the replies. The console
//! user is a single owner configured through `CHARSHEET_OWNER`.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use charsheet_engine::{api::DialogService, App, EngineConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root when run from `crates/engine`.
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charsheet_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting character sheet assistant");

    let config = EngineConfig::from_env()?;
    let app = Arc::new(App::from_config(&config).await?);
    let dialog = DialogService::new(app);

    tracing::info!(owner = %config.owner, "Ready for input");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = dialog.handle(&config.owner, &line).await;
        println!("{}", reply.text);
        if !reply.options.is_empty() {
            println!("[{}]", reply.options.join(" | "));
        }
        println!();
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
