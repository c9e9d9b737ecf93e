//! Row Packer — greedy left-to-right, top-to-bottom placement of screen components.
//!
//! # Algorithm (per screen)
//! 1. Stable-sort components by `typeComponent` (missing = "").
//! 2. Start the cursor at `(grid_x, grid_y)` with an empty row.
//! 3. For each component, wrap to a new row when it would cross `max_width`
//!    (see [`WrapPolicy`]), place it at the cursor, then advance by
//!    `width + padding_x` and grow the row height.
//!
//! Screens are packed independently. Only `posX` / `posY` and the order of
//! `childs` change; everything else in the document is passed through.

use serde::Serialize;
use tracing::{debug, warn};

use crate::layout::config::{LayoutConfig, WrapPolicy};
use crate::models::{Document, Screen};

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// Counters describing one layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutSummary {
    pub screens: usize,
    pub components_placed: usize,
    pub rows: usize,
    /// Components that cannot fit even on an empty row; placed flush left anyway.
    pub oversized: usize,
}

/// Result of [`apply_heuristics`].
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutOutcome {
    Applied {
        document: Document,
        summary: LayoutSummary,
    },
    /// The document has no `screens` field. Returned untouched.
    MissingScreens(Document),
}

impl LayoutOutcome {
    pub fn into_document(self) -> Document {
        match self {
            LayoutOutcome::Applied { document, .. } => document,
            LayoutOutcome::MissingScreens(document) => document,
        }
    }

    pub fn summary(&self) -> Option<&LayoutSummary> {
        match self {
            LayoutOutcome::Applied { summary, .. } => Some(summary),
            LayoutOutcome::MissingScreens(_) => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Repositions every component of every screen in `document`.
///
/// A document without `screens` is a recoverable condition: it is logged and
/// handed back unchanged as [`LayoutOutcome::MissingScreens`].
pub fn apply_heuristics(mut document: Document, config: &LayoutConfig) -> LayoutOutcome {
    if !document.has_screens() {
        warn!("No screens found in document, skipping layout");
        return LayoutOutcome::MissingScreens(document);
    }

    let max_width = document.max_width(config.default_max_width);
    let mut summary = LayoutSummary::default();

    for (index, screen) in document.screens_mut().into_iter().flatten().enumerate() {
        let stats = pack_screen(screen, max_width, config);
        debug!(
            screen = index,
            components = stats.components_placed,
            rows = stats.rows,
            "Packed screen"
        );
        summary.screens += 1;
        summary.components_placed += stats.components_placed;
        summary.rows += stats.rows;
        summary.oversized += stats.oversized;
    }

    LayoutOutcome::Applied { document, summary }
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

/// Packs a single screen in place and returns its counters.
fn pack_screen(screen: &mut Screen, max_width: i64, config: &LayoutConfig) -> LayoutSummary {
    let mut components = screen.take_childs();

    // `sort_by` is stable: equal categories keep their input order.
    components.sort_by(|a, b| a.category().cmp(b.category()));

    let mut cursor = RowCursor::new(config);
    let mut stats = LayoutSummary::default();

    for component in components.iter_mut() {
        let width = component.width_px(config.default_component_width);
        let height = component.height_px(config.default_component_height);

        if config.grid_x.saturating_add(width) > max_width {
            stats.oversized += 1;
        }

        let (x, y) = cursor.place(width, height, max_width, config);
        component.set_position(x, y);
        stats.components_placed += 1;
    }

    stats.rows = cursor.rows;
    screen.set_childs(components);
    stats
}

/// Running cursor state for one screen.
struct RowCursor {
    x: i64,
    y: i64,
    row_height: i64,
    rows: usize,
}

impl RowCursor {
    fn new(config: &LayoutConfig) -> Self {
        Self {
            x: config.grid_x,
            y: config.grid_y,
            row_height: 0,
            rows: 0,
        }
    }

    /// Returns the position for a `width × height` box and advances past it.
    fn place(
        &mut self,
        width: i64,
        height: i64,
        max_width: i64,
        config: &LayoutConfig,
    ) -> (i64, i64) {
        let overflows = self.x.saturating_add(width) > max_width;
        let row_occupied = self.x > config.grid_x;

        let wrap = match config.wrap_policy {
            WrapPolicy::SkipEmptyRow => overflows && row_occupied,
            WrapPolicy::Literal => overflows,
        };

        if wrap {
            self.x = config.grid_x;
            self.y = self
                .y
                .saturating_add(self.row_height)
                .saturating_add(config.padding_y);
            self.row_height = 0;
            self.rows += 1;
        } else if self.rows == 0 {
            self.rows = 1;
        }

        let position = (self.x, self.y);

        self.x = self
            .x
            .saturating_add(width)
            .saturating_add(config.padding_x);
        self.row_height = self.row_height.max(height);

        position
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
