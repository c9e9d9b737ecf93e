//! Layout Optimization Pipeline — sequences the whole run.
//!
//! Flow: load → apply_heuristics → enhance (optional) → save.
//!
//! Only a load failure aborts before output exists. A missing `screens` field
//! and a failed refinement are recovered in their own steps and the run still
//! writes a document. A save failure is returned as `AppError::Save`.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::layout::{apply_heuristics, LayoutSummary};
use crate::refinement::{enhance, LayoutAdvisor};
use crate::storage::{load_document, save_document};

/// How the refinement step ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RefinementStatus {
    Applied,
    /// The advisor failed; the heuristic layout was kept.
    FellBack { reason: String },
    Skipped,
}

/// What happened during one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// `None` when the document had no `screens`.
    pub layout: Option<LayoutSummary>,
    pub refinement: RefinementStatus,
    pub output_path: PathBuf,
}

/// Runs the full pipeline for `config`. `advisor = None` skips refinement.
pub async fn run(
    config: &Config,
    advisor: Option<&dyn LayoutAdvisor>,
) -> Result<RunSummary, AppError> {
    // Step 1: Load
    info!("Loading layout from {}", config.input_path.display());
    let document = load_document(&config.input_path).map_err(AppError::Load)?;

    // Step 2: Heuristic row packing
    let outcome = apply_heuristics(document, &config.layout);
    let layout = outcome.summary().cloned();
    match &layout {
        Some(summary) => info!(
            screens = summary.screens,
            components = summary.components_placed,
            rows = summary.rows,
            "Heuristic layout applied"
        ),
        None => warn!("Document has no screens; writing it unchanged"),
    }
    let document = outcome.into_document();

    // Step 3: Advisory refinement (fail-open)
    let (document, refinement) = match advisor {
        Some(advisor) => {
            let refined = enhance(advisor, document).await;
            let status = match refined.failure_reason() {
                Some(reason) => RefinementStatus::FellBack {
                    reason: reason.to_string(),
                },
                None => RefinementStatus::Applied,
            };
            (refined.into_document(), status)
        }
        None => {
            info!("Refinement disabled, skipping LLM call");
            (document, RefinementStatus::Skipped)
        }
    };

    // Step 4: Save
    save_document(&document, &config.output_path).map_err(AppError::Save)?;

    Ok(RunSummary {
        layout,
        refinement,
        output_path: config.output_path.clone(),
    })
}
