//! Command-line arguments. Every option falls back to an environment variable,
//! so `.env` files loaded by `Config` work the same as flags.

use std::path::PathBuf;

use clap::Parser;

use crate::layout::WrapPolicy;
use crate::llm_client::{DEFAULT_API_BASE, DEFAULT_MODEL};

#[derive(Debug, Parser)]
#[command(name = "optimizer")]
#[command(about = "Repack UI manifest components into rows and ask an LLM to refine the layout")]
#[command(version)]
pub struct Cli {
    /// Input layout document (JSON)
    #[arg(short, long, env = "UI_INPUT_PATH", default_value = "ide-manifest.json")]
    pub input: PathBuf,

    /// Where to write the optimized document
    #[arg(short, long, env = "UI_OUTPUT_PATH", default_value = "optimized-layout.json")]
    pub output: PathBuf,

    /// Chat model used for refinement
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the chat-completions API
    #[arg(long, env = "OPENAI_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Request timeout for the refinement call, in seconds
    #[arg(long, env = "LLM_TIMEOUT_SECS", default_value_t = 120)]
    pub timeout_secs: u64,

    /// Row wrap policy: skip-empty-row or literal
    #[arg(long, env = "LAYOUT_WRAP_POLICY", default_value_t = WrapPolicy::SkipEmptyRow)]
    pub wrap_policy: WrapPolicy,

    /// Skip the LLM refinement step
    #[arg(long, env = "UI_SKIP_REFINEMENT")]
    pub no_refine: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
