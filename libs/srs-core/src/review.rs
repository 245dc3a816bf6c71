//! Review processor: SM-2 ease updates on a fixed stage ladder.
//!
//! Unlike classic SM-2 the wait is never scaled by the ease factor. Each
//! review moves the item one rung up or down the ladder and the next wait is
//! read straight from the [`StageTable`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SrsError};
use crate::stages::StageTable;
use crate::types::{ItemProgress, Quality, ReviewInput, ReviewOutcome};

/// Ease assigned to newly introduced items.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
/// Floor for the ease factor after any review.
pub const MIN_EASE_FACTOR: f64 = 1.3;
/// Flat ease penalty for a lapse.
pub const LAPSE_EASE_PENALTY: f64 = 0.2;

/// Tunable review parameters, as loaded from a host's configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub lapse_ease_penalty: f64,
    pub stages: StageTable,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            initial_ease: DEFAULT_EASE_FACTOR,
            minimum_ease: MIN_EASE_FACTOR,
            lapse_ease_penalty: LAPSE_EASE_PENALTY,
            stages: StageTable::default(),
        }
    }
}

impl ReviewConfig {
    /// Reject settings that would let an ease factor drop below
    /// [`MIN_EASE_FACTOR`].
    pub fn validate(&self) -> Result<()> {
        if !self.minimum_ease.is_finite() || self.minimum_ease < MIN_EASE_FACTOR {
            return Err(invalid("minimum_ease", self.minimum_ease));
        }
        if !self.lapse_ease_penalty.is_finite() || self.lapse_ease_penalty < 0.0 {
            return Err(invalid("lapse_ease_penalty", self.lapse_ease_penalty));
        }
        if !self.initial_ease.is_finite() || self.initial_ease < self.minimum_ease {
            return Err(invalid("initial_ease", self.initial_ease));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, value: f64) -> SrsError {
    tracing::warn!(field, value, "rejected review setting");
    SrsError::InvalidConfig { field, value }
}

/// Review processor built from a validated [`ReviewConfig`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "ReviewConfig", into = "ReviewConfig")]
pub struct ReviewProcessor {
    config: ReviewConfig,
}

impl ReviewProcessor {
    pub fn new(config: ReviewConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    pub fn stages(&self) -> &StageTable {
        &self.config.stages
    }

    /// State for an item the learner has just been taught.
    pub fn introduce(&self, now: DateTime<Utc>) -> ItemProgress {
        ItemProgress::introduce_with(&self.config.stages, self.config.initial_ease, now)
    }

    /// Apply one review to the pre-review fields in `input`.
    ///
    /// `input.interval_days` is ignored. Fails on a negative or non-finite
    /// ease factor instead of clamping it, and when the next review would
    /// fall outside the representable calendar.
    pub fn process(&self, input: &ReviewInput, now: DateTime<Utc>) -> Result<ReviewOutcome> {
        if !input.ease_factor.is_finite() || input.ease_factor < 0.0 {
            tracing::warn!(
                ease = input.ease_factor,
                stage = input.stage.value(),
                "rejected review input"
            );
            return Err(SrsError::InvalidEaseFactor { value: input.ease_factor });
        }

        let correct = input.quality.is_correct();
        let (stage, repetitions, ease) = if correct {
            (
                input.stage.promoted(),
                input.repetitions.saturating_add(1),
                input.ease_factor + ease_delta(input.quality),
            )
        } else {
            (
                input.stage.demoted(),
                0,
                input.ease_factor - self.config.lapse_ease_penalty,
            )
        };
        let ease = ease.max(self.config.minimum_ease);

        let interval = self.config.stages.interval(stage);
        // Zero interval (Burned) leaves the due time at `now`.
        let next_review_at = now
            .checked_add_signed(interval.as_duration())
            .ok_or(SrsError::ScheduleOverflow { now })?;

        tracing::debug!(
            from = input.stage.value(),
            to = stage.value(),
            correct,
            ease,
            interval_hours = interval.as_hours(),
            "processed review"
        );

        Ok(ReviewOutcome {
            previous_stage: input.stage,
            quality: input.quality,
            correct,
            new_state: ItemProgress {
                stage,
                ease_factor: ease,
                repetitions,
                interval_days: interval.as_days(),
                next_review_at: Some(next_review_at),
                last_reviewed_at: Some(now),
            },
            next_review_at,
            reviewed_at: now,
        })
    }

    /// Review a stored item with the given answer quality.
    pub fn review(
        &self,
        progress: &ItemProgress,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> Result<ReviewOutcome> {
        self.process(&ReviewInput::new(quality, progress), now)
    }
}

impl TryFrom<ReviewConfig> for ReviewProcessor {
    type Error = SrsError;

    fn try_from(config: ReviewConfig) -> Result<Self> {
        Self::new(config)
    }
}

impl From<ReviewProcessor> for ReviewConfig {
    fn from(processor: ReviewProcessor) -> Self {
        processor.config
    }
}

/// Process a review with the default parameters.
pub fn process_review(input: &ReviewInput, now: DateTime<Utc>) -> Result<ReviewOutcome> {
    ReviewProcessor::default().process(input, now)
}

/// SM-2 ease adjustment for a correct answer.
/// EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
fn ease_delta(quality: Quality) -> f64 {
    let miss = 5.0 - quality.value() as f64;
    0.1 - miss * (0.08 + miss * 0.02)
}
