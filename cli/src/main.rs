//! CLI entrypoint for eigenscope
//!
//! This is the main binary that wires together all layers using
//! dependency injection: OpenAI gateway + in-memory stores into the
//! orchestrator, driven by an interactive terminal chat.

mod repl;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use eigenscope_application::{DiagnosticConfig, GenerateGlobalReportUseCase};
use eigenscope_infrastructure::{
    ConfigLoader, InMemoryAnalysisStore, InMemorySessionStore, OpenAiGateway,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eigenscope", version, about = "Find the eigenquestion behind your coordination failures")]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a config file (overrides discovered configs)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an interactive diagnostic session for one department
    Diagnose {
        /// Department being diagnosed
        #[arg(short, long)]
        department: String,

        /// Industry vocabulary for generated questions
        #[arg(short, long)]
        industry: String,

        /// Organization identifier
        #[arg(long, default_value = "default-org")]
        organization: String,

        /// User identifier
        #[arg(long, default_value = "operator")]
        user: String,

        /// Validate the eigenquestion gates before finalizing
        #[arg(long)]
        strict: bool,

        /// Write a JSONL transcript of the session
        #[arg(long)]
        transcript: Option<PathBuf>,

        /// Generate the organization report after completion
        #[arg(long)]
        report: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let file_config = ConfigLoader::load(cli.config.as_ref())
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?;
    for issue in file_config.validate() {
        eprintln!("config warning: {issue}");
    }

    let provider = file_config.provider.clone();
    let mut diagnostic_config: DiagnosticConfig = file_config.into_diagnostic_config();

    // === Dependency Injection ===
    let api_key = std::env::var(&provider.api_key_env)
        .with_context(|| format!("{} is not set", provider.api_key_env))?;
    let base_url = provider
        .base_url
        .unwrap_or_else(|| "https://api.openai.com/v1".to_string());
    let gateway = Arc::new(
        OpenAiGateway::with_timeout(api_key, base_url, Duration::from_secs(provider.timeout_secs))
            .map_err(|e| anyhow::anyhow!("failed to build gateway: {e}"))?,
    );
    let sessions = Arc::new(InMemorySessionStore::new());
    let analyses = Arc::new(InMemoryAnalysisStore::new());

    match cli.command {
        Command::Diagnose {
            department,
            industry,
            organization,
            user,
            strict,
            transcript,
            report,
        } => {
            if strict {
                diagnostic_config = diagnostic_config.with_strict_validation();
            }

            info!(%department, %industry, "starting diagnostic");
            let completed = repl::run_diagnostic(
                Arc::clone(&gateway),
                Arc::clone(&sessions),
                diagnostic_config.clone(),
                &organization,
                &user,
                &department,
                &industry,
                transcript,
            )
            .await?;

            if report {
                if !completed {
                    bail!("diagnostic was not completed; no report to generate");
                }
                let use_case = GenerateGlobalReportUseCase::new(
                    gateway,
                    sessions,
                    analyses,
                    &diagnostic_config,
                );
                let analysis = use_case.execute(&organization, &organization).await?;
                repl::print_global_report(&analysis);
            }
        }
    }

    Ok(())
}
