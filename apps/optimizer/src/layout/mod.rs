// Layout Engine: deterministic greedy row-packing of screen components.
// Pure transform, document in and document out. No I/O.

pub mod config;
pub mod packer;

pub use config::{LayoutConfig, WrapPolicy};
pub use packer::{apply_heuristics, LayoutSummary};
