//! Stage ladder: wait interval and display name for every stage.
//!
//! The ladder is an ordinal-indexed array so interval tuning never touches
//! the transition rules in [`crate::review`].

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SrsError};
use crate::types::Stage;

/// Unit an interval magnitude is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    Hours,
    Days,
}

/// Wait before the next review at a given stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub magnitude: u32,
    pub unit: IntervalUnit,
}

impl Interval {
    pub const ZERO: Interval = Interval::hours(0);

    pub const fn hours(magnitude: u32) -> Self {
        Self { magnitude, unit: IntervalUnit::Hours }
    }

    pub const fn days(magnitude: u32) -> Self {
        Self { magnitude, unit: IntervalUnit::Days }
    }

    pub fn is_zero(self) -> bool {
        self.magnitude == 0
    }

    pub fn as_hours(self) -> u64 {
        match self.unit {
            IntervalUnit::Hours => self.magnitude as u64,
            IntervalUnit::Days => self.magnitude as u64 * 24,
        }
    }

    /// Interval in fractional days (hours / 24).
    pub fn as_days(self) -> f64 {
        self.as_hours() as f64 / 24.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::hours(self.as_hours() as i64)
    }
}

const STAGE_NAMES: [&str; Stage::COUNT] = [
    "New",
    "Apprentice I",
    "Apprentice II",
    "Apprentice III",
    "Apprentice IV",
    "Guru I",
    "Guru II",
    "Master",
    "Enlightened",
    "Burned",
];

const STANDARD_INTERVALS: [Interval; Stage::COUNT] = [
    Interval::ZERO,      // New
    Interval::hours(4),  // Apprentice I
    Interval::hours(8),  // Apprentice II
    Interval::days(1),   // Apprentice III
    Interval::days(2),   // Apprentice IV
    Interval::days(7),   // Guru I
    Interval::days(14),  // Guru II
    Interval::days(30),  // Master
    Interval::days(120), // Enlightened
    Interval::ZERO,      // Burned
];

/// Longest wait a tuned table may assign to a stage.
pub const MAX_INTERVAL_DAYS: u32 = 3650;

static STANDARD: StageTable = StageTable { intervals: STANDARD_INTERVALS };

/// Immutable stage -> interval lookup.
///
/// Names are fixed; intervals can be tuned through
/// [`StageTable::with_intervals`], which keeps the ladder invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[Interval; 10]", into = "[Interval; 10]")]
pub struct StageTable {
    intervals: [Interval; Stage::COUNT],
}

impl Default for StageTable {
    fn default() -> Self {
        STANDARD.clone()
    }
}

impl StageTable {
    /// The standard ladder (4h, 8h, 1d, 2d, 1w, 2w, 1mo, 4mo).
    pub fn standard() -> &'static StageTable {
        &STANDARD
    }

    /// Build a tuned ladder.
    ///
    /// New and Burned must wait zero, every reviewable stage must wait
    /// something up to [`MAX_INTERVAL_DAYS`], and waits must not shrink as
    /// the stage rises.
    pub fn with_intervals(intervals: [Interval; Stage::COUNT]) -> Result<Self> {
        for stage in Stage::all() {
            let interval = intervals[stage.index()];
            if !stage.is_reviewable() && !interval.is_zero() {
                return Err(SrsError::InvalidStageTable {
                    stage: stage.value(),
                    reason: "new and burned stages must have a zero interval",
                });
            }
            if stage.is_reviewable() && interval.is_zero() {
                return Err(SrsError::InvalidStageTable {
                    stage: stage.value(),
                    reason: "reviewable stage needs a non-zero interval",
                });
            }
            if interval.as_hours() > MAX_INTERVAL_DAYS as u64 * 24 {
                return Err(SrsError::InvalidStageTable {
                    stage: stage.value(),
                    reason: "interval longer than ten years",
                });
            }
        }

        for index in Stage::APPRENTICE_II.index()..Stage::BURNED.index() {
            if intervals[index].as_hours() < intervals[index - 1].as_hours() {
                return Err(SrsError::InvalidStageTable {
                    stage: index as u8,
                    reason: "interval shorter than the previous stage",
                });
            }
        }

        Ok(Self { intervals })
    }

    pub fn interval(&self, stage: Stage) -> Interval {
        self.intervals[stage.index()]
    }

    pub fn name(&self, stage: Stage) -> &'static str {
        STAGE_NAMES[stage.index()]
    }

    pub fn intervals(&self) -> &[Interval; Stage::COUNT] {
        &self.intervals
    }
}

impl TryFrom<[Interval; Stage::COUNT]> for StageTable {
    type Error = SrsError;

    fn try_from(intervals: [Interval; Stage::COUNT]) -> Result<Self> {
        Self::with_intervals(intervals)
    }
}

impl From<StageTable> for [Interval; Stage::COUNT] {
    fn from(table: StageTable) -> Self {
        table.intervals
    }
}

/// Interval for `stage` on the standard ladder.
pub fn get_interval(stage: Stage) -> Interval {
    STANDARD.interval(stage)
}

/// Display name for `stage`.
pub fn get_name(stage: Stage) -> &'static str {
    STANDARD.name(stage)
}
