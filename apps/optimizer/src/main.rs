mod cli;
mod config;
mod errors;
mod layout;
mod llm_client;
mod models;
mod pipeline;
mod refinement;
mod storage;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::pipeline::{run, RefinementStatus};
use crate::refinement::{LayoutAdvisor, LlmAdvisor};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // .env first so clap's env fallbacks can see it
    Config::load_dotenv();
    let cli = Cli::parse();

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &cli.log_level))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting UI layout optimizer v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(e.exit_code());
        }
    };

    // Initialize LLM advisor unless refinement is disabled
    let advisor = if config.refine {
        let llm = LlmClient::new(
            config.api_key.clone(),
            config.model.clone(),
            &config.api_base,
            config.timeout,
        )?;
        info!("LLM client initialized (model: {})", llm.model());
        Some(LlmAdvisor::new(llm, config.brief.clone()))
    } else {
        None
    };

    match run(&config, advisor.as_ref().map(|a| a as &dyn LayoutAdvisor)).await {
        Ok(summary) => {
            if let RefinementStatus::FellBack { reason } = &summary.refinement {
                info!("Saved heuristic layout without refinement ({reason})");
            }
            info!("Done: {}", summary.output_path.display());
            Ok(())
        }
        Err(e) => {
            error!("{e}");
            std::process::exit(e.exit_code());
        }
    }
}
