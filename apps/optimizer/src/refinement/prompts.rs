//! Prompt constants for advisory layout refinement.
//!
//! The user turn is the JSON payload built by `RefinementRequest`; the model must
//! answer with the refined document as a bare JSON object.

/// UI/UX expert persona. `JSON_ONLY_SYSTEM` is appended when the system turn is built.
pub const REFINE_SYSTEM: &str = "You are a UI/UX design expert. \
    You receive a UI layout document with screens and positioned components \
    and return the same document with improved component positions. \
    Keep every screen, component and field; only adjust posX, posY and ordering.";

pub const DEFAULT_OBJECTIVE: &str = "Optimize the layout for better usability and aesthetics";

pub const DEFAULT_GUIDELINES: [&str; 3] = [
    "Improve the distribution of space",
    "Ensure accessibility",
    "Apply responsive design principles",
];
