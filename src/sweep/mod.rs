//! Randomized property sweep over the rule-based generator.

pub mod evaluation;
pub mod output;
pub mod search;

pub use evaluation::{ComboResult, Property, check_plate, evaluate_combo};
pub use output::{print_summary, write_csv};
pub use search::{SweepConfig, SweepResults, parse_targets, run_sweep};
