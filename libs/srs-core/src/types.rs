//! Core types for the stage-ladder scheduler.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SrsError};
use crate::review::DEFAULT_EASE_FACTOR;
use crate::stages::StageTable;

/// Memorization stage of an item, 0 (New) through 9 (Burned).
///
/// Raw ordinals are validated on construction, so a `Stage` value is always
/// a valid index into a [`StageTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Stage(u8);

impl Stage {
    pub const NEW: Stage = Stage(0);
    pub const APPRENTICE_I: Stage = Stage(1);
    pub const APPRENTICE_II: Stage = Stage(2);
    pub const APPRENTICE_III: Stage = Stage(3);
    pub const APPRENTICE_IV: Stage = Stage(4);
    pub const GURU_I: Stage = Stage(5);
    pub const GURU_II: Stage = Stage(6);
    pub const MASTER: Stage = Stage(7);
    pub const ENLIGHTENED: Stage = Stage(8);
    pub const BURNED: Stage = Stage(9);

    /// Number of stages on the ladder.
    pub const COUNT: usize = 10;

    /// Create from a raw ordinal, rejecting anything above 9.
    pub fn new(value: u8) -> Result<Self> {
        if (value as usize) < Self::COUNT {
            Ok(Self(value))
        } else {
            Err(SrsError::InvalidStage { value })
        }
    }

    /// Raw ordinal.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Ordinal as an array index.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_new(self) -> bool {
        self == Self::NEW
    }

    pub fn is_burned(self) -> bool {
        self == Self::BURNED
    }

    /// Stages 1-8 take part in reviews; New and Burned do not.
    pub fn is_reviewable(self) -> bool {
        !self.is_new() && !self.is_burned()
    }

    /// Display name from the standard stage table.
    pub fn name(self) -> &'static str {
        StageTable::standard().name(self)
    }

    pub fn group(self) -> StageGroup {
        match self.0 {
            0 => StageGroup::New,
            1..=4 => StageGroup::Apprentice,
            5 | 6 => StageGroup::Guru,
            7 => StageGroup::Master,
            8 => StageGroup::Enlightened,
            _ => StageGroup::Burned,
        }
    }

    /// One stage up, held at Burned.
    pub fn promoted(self) -> Self {
        Self((self.0 + 1).min(Self::BURNED.0))
    }

    /// Stage after a lapse. Apprentice items drop one stage, anything from
    /// Guru upward drops two; never below Apprentice I.
    pub fn demoted(self) -> Self {
        let drop = if self.0 <= Self::APPRENTICE_IV.0 { 1 } else { 2 };
        Self(self.0.saturating_sub(drop).max(Self::APPRENTICE_I.0))
    }

    /// All stages in ladder order.
    pub fn all() -> impl Iterator<Item = Stage> {
        (0..Self::COUNT as u8).map(Stage)
    }
}

impl TryFrom<u8> for Stage {
    type Error = SrsError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        stage.0
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named groups of stages shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageGroup {
    New,
    Apprentice,
    Guru,
    Master,
    Enlightened,
    Burned,
}

impl StageGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Apprentice => "apprentice",
            Self::Guru => "guru",
            Self::Master => "master",
            Self::Enlightened => "enlightened",
            Self::Burned => "burned",
        }
    }
}

/// SM-2 response quality, conventionally 0-5 with 3 and above counting as
/// correct. Values are not range checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quality(u8);

impl Quality {
    /// Quality submitted for a correct answer.
    pub const CORRECT: Quality = Quality(5);
    /// Quality submitted for an incorrect answer.
    pub const INCORRECT: Quality = Quality(1);
    /// Lowest quality that still counts as a correct recall.
    pub const PASSING: Quality = Quality(3);

    pub fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_correct(self) -> bool {
        self >= Self::PASSING
    }

    /// Map a pass/fail answer onto the 0-5 scale.
    /// Wrong -> 1, Correct -> 5
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            Self::CORRECT
        } else {
            Self::INCORRECT
        }
    }
}

/// Scheduling state of one item for one learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemProgress {
    pub stage: Stage,
    pub ease_factor: f64,
    pub repetitions: u32,
    pub interval_days: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl Default for ItemProgress {
    fn default() -> Self {
        Self {
            stage: Stage::NEW,
            ease_factor: DEFAULT_EASE_FACTOR,
            repetitions: 0,
            interval_days: 0.0,
            next_review_at: None,
            last_reviewed_at: None,
        }
    }
}

impl ItemProgress {
    /// State for an item the learner has just been taught, using the
    /// standard stage table and default ease.
    pub fn introduce(now: DateTime<Utc>) -> Self {
        Self::introduce_with(StageTable::standard(), DEFAULT_EASE_FACTOR, now)
    }

    pub(crate) fn introduce_with(
        stages: &StageTable,
        ease_factor: f64,
        now: DateTime<Utc>,
    ) -> Self {
        let interval = stages.interval(Stage::APPRENTICE_I);
        Self {
            stage: Stage::APPRENTICE_I,
            ease_factor,
            repetitions: 0,
            interval_days: interval.as_days(),
            next_review_at: Some(now + interval.as_duration()),
            last_reviewed_at: None,
        }
    }
}

/// Input to the review processor: the answer quality and the pre-review
/// fields of the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewInput {
    pub quality: Quality,
    pub stage: Stage,
    pub ease_factor: f64,
    pub repetitions: u32,
    /// Stored interval. Carried along with the rest of the state but never
    /// read: the next interval comes from the stage table alone.
    #[serde(default)]
    pub interval_days: f64,
}

impl ReviewInput {
    pub fn new(quality: Quality, progress: &ItemProgress) -> Self {
        Self {
            quality,
            stage: progress.stage,
            ease_factor: progress.ease_factor,
            repetitions: progress.repetitions,
            interval_days: progress.interval_days,
        }
    }
}

/// Result of processing one review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    pub previous_stage: Stage,
    pub quality: Quality,
    pub correct: bool,
    pub new_state: ItemProgress,
    pub next_review_at: DateTime<Utc>,
    pub reviewed_at: DateTime<Utc>,
}

impl ReviewOutcome {
    pub fn transition(&self) -> StageTransition {
        let from = self.previous_stage;
        let to = self.new_state.stage;
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => StageTransition::Promoted { from, to },
            std::cmp::Ordering::Less => StageTransition::Demoted { from, to },
            std::cmp::Ordering::Equal => StageTransition::Unchanged(to),
        }
    }

    /// Milestone reached by this review, if it promoted the item into one.
    pub fn milestone(&self) -> Option<Milestone> {
        match self.transition() {
            StageTransition::Promoted { to, .. } => Milestone::entered(to),
            _ => None,
        }
    }

    /// Whether another review is scheduled (false once Burned).
    pub fn schedules_review(&self) -> bool {
        self.new_state.interval_days > 0.0
    }

    /// History entry the caller appends after persisting the new state.
    pub fn record(&self) -> ReviewRecord {
        ReviewRecord {
            previous_stage: self.previous_stage,
            new_stage: self.new_state.stage,
            quality: self.quality,
            correct: self.correct,
            reviewed_at: self.reviewed_at,
        }
    }
}

/// Direction of a stage change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageTransition {
    Promoted { from: Stage, to: Stage },
    Demoted { from: Stage, to: Stage },
    Unchanged(Stage),
}

/// Stage thresholds the reward system grants bonuses for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    Guru,
    Master,
    Enlightened,
    Burned,
}

impl Milestone {
    /// Milestone for arriving at `stage`, if it is a threshold stage.
    pub fn entered(stage: Stage) -> Option<Self> {
        match stage {
            Stage::GURU_I => Some(Self::Guru),
            Stage::MASTER => Some(Self::Master),
            Stage::ENLIGHTENED => Some(Self::Enlightened),
            Stage::BURNED => Some(Self::Burned),
            _ => None,
        }
    }
}

/// Immutable review-history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub previous_stage: Stage,
    pub new_stage: Stage,
    pub quality: Quality,
    pub correct: bool,
    pub reviewed_at: DateTime<Utc>,
}
