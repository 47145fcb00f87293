//! Groupo CLI: create group posts with photos and videos from the command line.
//!
//! Set GROUPO_TOKEN and GROUPO_API_URL. Uses bearer auth.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use groupo_api_client::ApiClient;
use groupo_cli::{init_tracing, load_library, media_item_from_arg, truncate_string, PostOutput};
use groupo_core::ClientConfig;
use groupo_processing::JpegReencoder;
use groupo_upload::{
    apply_selection_limits, PostRequest, SelectionLimits, SubmissionOutcome, UploadOrchestrator,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "groupo", about = "Groupo group posting CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a post in a group with one or more photos or videos
    Post {
        /// Group ID to post in
        #[arg(long)]
        group: i64,
        /// Caption text
        #[arg(long, default_value = "")]
        content: String,
        /// MIME type applied to every media entry (otherwise guessed from the name)
        #[arg(long)]
        mime: Option<String>,
        /// Paths, file:// URIs, or ph:// / assets-library:// URIs, in upload order
        #[arg(required = true)]
        media: Vec<String>,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Post {
            group,
            content,
            mime,
            media,
        } => {
            let items = media
                .iter()
                .map(|arg| media_item_from_arg(arg, mime.as_deref()))
                .collect();

            let limits = SelectionLimits::from(&config);

            let (outcome, notice) = match apply_selection_limits(items, limits) {
                Ok(selection) => {
                    let client = ApiClient::from_config(&config).context(
                        "Failed to create API client. Set GROUPO_TOKEN and GROUPO_API_URL",
                    )?;
                    let library = load_library(&config).await?;
                    let orchestrator = UploadOrchestrator::new(
                        Arc::new(client),
                        Arc::new(JpegReencoder::new()),
                        library,
                    );

                    tracing::info!(
                        group_id = group,
                        items = selection.items.len(),
                        content = %truncate_string(&content, 40),
                        "Submitting post"
                    );
                    let request = PostRequest {
                        group_id: group,
                        content,
                        items: selection.items,
                    };
                    (orchestrator.submit(&request).await, selection.notice)
                }
                Err(err) => (SubmissionOutcome::rejected(err, Vec::new()), None),
            };

            print_json(&PostOutput {
                notice,
                report: outcome.report(),
            })?;
            if !outcome.is_success() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
