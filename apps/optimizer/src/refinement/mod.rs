//! Advisory Refinement — best-effort LLM pass over an already packed layout.
//!
//! `LayoutAdvisor` is the pluggable seam. `LlmAdvisor` is the production backend;
//! tests swap in stubs. `enhance` is fail-open: any advisor failure yields
//! `Refinement::Unchanged` carrying the input document and the reason, so the
//! pipeline never stops because of this step.

pub mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::Document;
use crate::refinement::prompts::{DEFAULT_GUIDELINES, DEFAULT_OBJECTIVE, REFINE_SYSTEM};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Objective and guidelines sent alongside the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinementBrief {
    pub objective: String,
    pub guidelines: Vec<String>,
}

impl Default for RefinementBrief {
    fn default() -> Self {
        Self {
            objective: DEFAULT_OBJECTIVE.to_string(),
            guidelines: DEFAULT_GUIDELINES.iter().map(|g| g.to_string()).collect(),
        }
    }
}

/// The user-turn payload: `{layout, objective, guidelines}`.
#[derive(Debug, Serialize)]
struct RefinementRequest<'a> {
    layout: &'a Document,
    objective: &'a str,
    guidelines: &'a [String],
}

#[derive(Debug, Error)]
pub enum RefineError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Could not encode refinement request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Reply is not a layout document: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Reply is not a JSON object")]
    NotAnObject,

    #[error("Reply dropped the screens of the layout")]
    MissingScreens,
}

/// Outcome of the refinement step.
#[derive(Debug)]
pub enum Refinement {
    Refined(Document),
    /// The advisor failed; `document` is the input, untouched.
    Unchanged {
        document: Document,
        reason: RefineError,
    },
}

impl Refinement {
    pub fn into_document(self) -> Document {
        match self {
            Refinement::Refined(document) => document,
            Refinement::Unchanged { document, .. } => document,
        }
    }

    pub fn failure_reason(&self) -> Option<&RefineError> {
        match self {
            Refinement::Refined(_) => None,
            Refinement::Unchanged { reason, .. } => Some(reason),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// A backend that proposes a refined layout for a document.
///
/// Implementations return the raw reply; `enhance` validates it.
#[async_trait]
pub trait LayoutAdvisor: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    async fn advise(&self, document: &Document) -> Result<Value, RefineError>;
}

/// Production advisor: one chat-completion call per document.
pub struct LlmAdvisor {
    llm: LlmClient,
    brief: RefinementBrief,
    system: String,
}

impl LlmAdvisor {
    pub fn new(llm: LlmClient, brief: RefinementBrief) -> Self {
        Self {
            llm,
            brief,
            system: format!("{REFINE_SYSTEM} {JSON_ONLY_SYSTEM}"),
        }
    }
}

#[async_trait]
impl LayoutAdvisor for LlmAdvisor {
    fn name(&self) -> &str {
        self.llm.model()
    }

    async fn advise(&self, document: &Document) -> Result<Value, RefineError> {
        let payload = build_payload(document, &self.brief)?;
        let reply = self.llm.complete_json::<Value>(&self.system, &payload).await?;
        Ok(reply)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Refinement step
// ────────────────────────────────────────────────────────────────────────────

/// Asks `advisor` to refine `document`. Never fails: on any error the input is
/// returned inside `Refinement::Unchanged`.
pub async fn enhance(advisor: &dyn LayoutAdvisor, document: Document) -> Refinement {
    let result = match advisor.advise(&document).await {
        Ok(reply) => validate_reply(reply, &document),
        Err(e) => Err(e),
    };

    match result {
        Ok(refined) => {
            info!(advisor = advisor.name(), "Layout refined by advisor");
            Refinement::Refined(refined)
        }
        Err(reason) => {
            warn!(
                advisor = advisor.name(),
                "Layout refinement failed, keeping heuristic layout: {reason}"
            );
            Refinement::Unchanged { document, reason }
        }
    }
}

/// Serializes the user-turn payload.
pub fn build_payload(document: &Document, brief: &RefinementBrief) -> Result<String, RefineError> {
    let request = RefinementRequest {
        layout: document,
        objective: &brief.objective,
        guidelines: &brief.guidelines,
    };
    serde_json::to_string(&request).map_err(RefineError::Encode)
}

/// Accepts a reply only if it is an object that decodes as a document and keeps
/// `screens` when the original had them.
fn validate_reply(reply: Value, original: &Document) -> Result<Document, RefineError> {
    if !reply.is_object() {
        return Err(RefineError::NotAnObject);
    }

    let refined: Document = serde_json::from_value(reply).map_err(RefineError::Decode)?;

    if original.has_screens() && !refined.has_screens() {
        return Err(RefineError::MissingScreens);
    }

    Ok(refined)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
