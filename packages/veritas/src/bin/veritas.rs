//! Command-line front end for the analysis core.
//!
//! Prints the verdict for the given text, URL and images. Exits non-zero with
//! the user-facing error message when the analysis fails.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use veritas_core::{AnalysisResult, AnalysisStatus, Analyzer, Attachment, Config, Session};

#[derive(Parser)]
#[command(name = "veritas")]
#[command(about = "Check text, a URL, or images for fake news using search-grounded AI")]
struct Cli {
    /// Text or claim to verify
    #[arg(long)]
    text: Option<String>,

    /// URL of the article or post to verify
    #[arg(long)]
    url: Option<String>,

    /// Image to inspect (repeatable)
    #[arg(long = "file", value_name = "PATH")]
    files: Vec<PathBuf>,

    /// Override the Gemini model
    #[arg(long)]
    model: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

const DEFAULT_LOG_FILTER: &str = "info,veritas_core=debug";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr, so --json output stays clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }

    let analyzer = Analyzer::from_config(&config)?;

    let mut session = Session::new();
    let input = session.input_mut();
    input.set_text(cli.text.unwrap_or_default());
    input.set_url(cli.url.unwrap_or_default());
    input.add_files(cli.files.into_iter().map(Attachment::from_path));

    if !session.can_analyze() {
        bail!("Nothing to analyze: pass --text, --url, or at least one --file");
    }

    tracing::info!(model = %config.model, "Starting analysis");

    session.run(&analyzer).await;

    let result = finished_result(&session)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print_report(result);
    }

    Ok(())
}

/// The verdict of a finished run, or the user-facing failure as an error.
fn finished_result(session: &Session) -> Result<&AnalysisResult> {
    match session.status() {
        AnalysisStatus::Completed => session
            .result()
            .context("Analysis completed without a result"),
        _ => {
            let message = session.error().unwrap_or("Analysis did not run");
            bail!("Analysis Failed: {}", message)
        }
    }
}

fn print_report(result: &AnalysisResult) {
    println!("Verdict:    {}", result.classification);
    println!("Confidence: {}%", result.confidence_score);
    println!("Tone:       {}", result.sentiment);
    println!();
    println!("{}", result.summary);

    if !result.key_risk_factors.is_empty() {
        println!();
        println!("Risk factors:");
        for factor in &result.key_risk_factors {
            println!("  - {}", factor);
        }
    }

    if !result.verification_sources.is_empty() {
        println!();
        println!("Sources:");
        for source in &result.verification_sources {
            println!("  - {} <{}>", source.title, source.url);
        }
    }
}
