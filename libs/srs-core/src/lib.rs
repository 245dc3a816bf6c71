//! Stage-ladder spaced repetition engine.
//!
//! Provides:
//! - Stage table mapping each of the ten stages to a wait and a name
//! - Review processor (SM-2 ease updates on a fixed ladder)
//! - Due-item selection and stage-distribution summaries
//! - Shared types (Stage, Quality, ItemProgress, ReviewOutcome, etc.)
//!
//! Every operation takes the current instant as a parameter; nothing here
//! reads the system clock or performs I/O.

pub mod error;
pub mod review;
pub mod scheduler;
pub mod stages;
pub mod types;

pub use error::{Result, SrsError};
pub use review::{
    process_review, ReviewConfig, ReviewProcessor, DEFAULT_EASE_FACTOR, MIN_EASE_FACTOR,
};
pub use scheduler::{
    count_due_within, get_due_items, get_due_keyed, get_summary, is_due, next_pending_review,
    GroupCounts, StageSummary,
};
pub use stages::{get_interval, get_name, Interval, IntervalUnit, StageTable, MAX_INTERVAL_DAYS};
pub use types::{
    ItemProgress, Milestone, Quality, ReviewInput, ReviewOutcome, ReviewRecord, Stage, StageGroup,
    StageTransition,
};
