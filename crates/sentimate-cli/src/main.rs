use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sentimate_core::app::process_with_retry;
use sentimate_core::domain::{Review, ReviewId, ReviewMessage};
use sentimate_core::{AppBuilder, SentimateConfig};
use tokio::time::sleep;

#[derive(Parser)]
#[command(name = "sentimate", about = "Review sentiment enrichment pipeline")]
struct Cli {
    /// Path to sentimate.toml (defaults apply when omitted)
    #[arg(long, global = true, env = "SENTIMATE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Queue a review (JSON field mapping), analyze it and print the stored sentiment
    Submit {
        /// JSON file with the review's fields (review_id, title, detail, ...)
        #[arg(long)]
        review: PathBuf,

        /// Treat the review as an update of an existing one (nothing is queued)
        #[arg(long)]
        existing: bool,

        /// How long to wait for the sentiment to be stored
        #[arg(long, default_value_t = 30)]
        wait_secs: u64,
    },

    /// Process serialized review messages from stdin, one per line
    Consume,

    /// Print one stored sentiment field for a review
    Show {
        #[arg(long)]
        review_id: i64,

        #[arg(long, default_value = "type")]
        field: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    sentimate_core::logging::init_tracing();

    let cli = Cli::parse();
    let config = SentimateConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    let app = AppBuilder::from_config_plaintext(&config)
        .context("failed to set up pipeline")?
        .build()?;

    match cli.command {
        Command::Submit {
            review,
            existing,
            wait_secs,
        } => {
            let content = std::fs::read_to_string(&review)
                .with_context(|| format!("failed to read {}", review.display()))?;
            let data: serde_json::Map<String, serde_json::Value> =
                serde_json::from_str(&content).context("review file must be a JSON object")?;
            let review_id = ReviewMessage::parse(&content)
                .ok()
                .and_then(|message| message.review_id);

            let outcome = app.hook.execute(&Review::new(data, !existing)).await?;
            tracing::info!(?outcome, "review hook executed");

            let Some(review_id) = review_id else {
                println!("review has no review_id; nothing to show");
                return Ok(());
            };

            let workers = app.spawn_workers();
            let deadline = tokio::time::Instant::now() + Duration::from_secs(wait_secs);
            let mut found = None;
            while tokio::time::Instant::now() < deadline {
                if let Ok(record) = app.service.get_by_review_id(review_id).await {
                    found = Some(record);
                    break;
                }
                sleep(Duration::from_millis(200)).await;
            }
            workers.shutdown_and_join().await;

            match found {
                Some(_) => {
                    for field in ["type", "score", "ratio"] {
                        let value = app
                            .view_model
                            .get_data_by_review_id(review_id, Some(field))
                            .await
                            .unwrap_or_default();
                        println!("{field}: {value}");
                    }
                }
                None => println!("no sentiment stored for review {review_id}"),
            }
        }
        Command::Consume => {
            let retry = app.settings().retry.clone();
            let lines: Vec<String> = std::io::stdin()
                .lock()
                .lines()
                .collect::<std::io::Result<_>>()
                .context("failed to read stdin")?;
            for line in lines.iter().filter(|l| !l.trim().is_empty()) {
                let outcome = process_with_retry(&app.consumer, line, &retry).await;
                println!("{}", serde_json::to_string(&outcome)?);
            }
        }
        Command::Show { review_id, field } => {
            match app
                .view_model
                .get_data_by_review_id(ReviewId::new(review_id), Some(&field))
                .await
            {
                Some(value) => println!("{value}"),
                None => println!("no {field} stored for review {review_id}"),
            }
        }
    }

    Ok(())
}
