//! Pure aggregation over a user's entry list. No I/O; safe to recompute on
//! every dashboard load.

mod engine;
mod format;

pub use engine::{summarize, InsightSummary, PRODUCTIVE_TAGS};
pub use format::format_hours;
