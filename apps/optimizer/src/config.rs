use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::cli::Cli;
use crate::errors::AppError;
use crate::layout::LayoutConfig;
use crate::refinement::RefinementBrief;

/// Used when `OPENAI_API_KEY` is unset. The refinement call then fails
/// authentication and the pipeline keeps the heuristic layout.
pub const PLACEHOLDER_API_KEY: &str = "sk-placeholder";

/// Everything a pipeline run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
    pub refine: bool,
    pub layout: LayoutConfig,
    pub brief: RefinementBrief,
}

impl Config {
    /// Loads `.env` (if present) so clap's env fallbacks see it. Call before `Cli::parse`.
    pub fn load_dotenv() {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
    }

    pub fn from_cli(cli: Cli) -> Result<Self, AppError> {
        Self::from_parts(cli, std::env::var("OPENAI_API_KEY").ok())
    }

    fn from_parts(cli: Cli, api_key: Option<String>) -> Result<Self, AppError> {
        if cli.timeout_secs == 0 {
            return Err(AppError::Config(
                "LLM timeout must be at least 1 second".to_string(),
            ));
        }

        let api_key = match api_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => key,
            None => {
                if !cli.no_refine {
                    warn!("OPENAI_API_KEY is not set; refinement will fall back to the heuristic layout");
                }
                PLACEHOLDER_API_KEY.to_string()
            }
        };

        Ok(Config {
            input_path: cli.input,
            output_path: cli.output,
            api_key,
            model: cli.model,
            api_base: cli.api_base,
            timeout: Duration::from_secs(cli.timeout_secs),
            refine: !cli.no_refine,
            layout: LayoutConfig::default().with_wrap_policy(cli.wrap_policy),
            brief: RefinementBrief::default(),
        })
    }

    /// Config for an offline run with default layout settings.
    #[cfg(test)]
    pub fn for_paths(input_path: PathBuf, output_path: PathBuf) -> Self {
        Config {
            input_path,
            output_path,
            api_key: PLACEHOLDER_API_KEY.to_string(),
            model: crate::llm_client::DEFAULT_MODEL.to_string(),
            api_base: crate::llm_client::DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(5),
            refine: false,
            layout: LayoutConfig::default(),
            brief: RefinementBrief::default(),
        }
    }
}
