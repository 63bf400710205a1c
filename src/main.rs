//! ReqForge CLI
//!
//! Reads a project description from a file or stdin, runs it through the
//! refinement pipeline, and prints the resulting report as JSON.
//!
//! Exit codes: 0 = approved, 1 = rejected, 2 = error.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use reqforge::utils::paths::ensure_handlers_dir;
use reqforge::{
    ConfigService, HandlerCatalog, HandlerStore, Orchestrator, PipelineStatus,
};
use reqforge_quality_gates::QualityGate;

#[derive(Parser)]
#[command(name = "reqforge", version, about = "Refine a project description into an approved task plan")]
struct Cli {
    /// Project description file; reads stdin when omitted or "-"
    file: Option<PathBuf>,

    /// Domain hint passed to the resolver
    #[arg(long)]
    domain: Option<String>,

    /// Override the configured iteration budget
    #[arg(long)]
    max_iterations: Option<u32>,

    /// Disable runtime handler synthesis for this run
    #[arg(long)]
    no_synthesis: bool,

    /// Config file path (defaults to ~/.reqforge/config.json)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reqforge=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(PipelineStatus::Approved) => ExitCode::SUCCESS,
        Ok(PipelineStatus::Rejected) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<PipelineStatus> {
    let config_service = match cli.config {
        Some(path) => ConfigService::from_path(path)?,
        None => ConfigService::new()?,
    };
    let mut config = config_service.get_config().clone();
    if let Some(n) = cli.max_iterations {
        config.max_iterations = n;
    }
    if cli.no_synthesis {
        config.synthesis_enabled = false;
    }
    config.validate().map_err(anyhow::Error::msg)?;

    let content = match &cli.file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let handler_dir = match &config.handler_dir {
        Some(dir) => dir.clone(),
        None => ensure_handlers_dir()?,
    };
    let catalog = Arc::new(HandlerCatalog::new(HandlerStore::new(handler_dir)));
    catalog.scan().await;

    let orchestrator = Orchestrator::new(catalog, &config, QualityGate::default());
    let report = orchestrator.run(&content, cli.domain.as_deref()).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report.status)
}
