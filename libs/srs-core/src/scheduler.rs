//! Due-item selection and stage-distribution summaries.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ItemProgress, Stage, StageGroup};

/// Whether `item` should be in a review session at `now`.
///
/// New and Burned items are never due, nor is an item without a scheduled
/// review.
pub fn is_due(item: &ItemProgress, now: DateTime<Utc>) -> bool {
    if !item.stage.is_reviewable() {
        return false;
    }
    match item.next_review_at {
        Some(at) => at <= now,
        None => false,
    }
}

/// Due items, longest-waiting first.
pub fn get_due_items(items: &[ItemProgress], now: DateTime<Utc>) -> Vec<&ItemProgress> {
    let mut due: Vec<&ItemProgress> = items.iter().filter(|item| is_due(item, now)).collect();
    due.sort_by_key(|item| item.next_review_at);
    tracing::trace!(total = items.len(), due = due.len(), "selected due items");
    due
}

/// Same as [`get_due_items`] for items paired with a caller-side key.
pub fn get_due_keyed<K>(
    items: &[(K, ItemProgress)],
    now: DateTime<Utc>,
) -> Vec<&(K, ItemProgress)> {
    let mut due: Vec<&(K, ItemProgress)> =
        items.iter().filter(|(_, item)| is_due(item, now)).collect();
    due.sort_by_key(|(_, item)| item.next_review_at);
    tracing::trace!(total = items.len(), due = due.len(), "selected due items");
    due
}

/// Earliest upcoming review among items that are not due yet.
pub fn next_pending_review(items: &[ItemProgress], now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    items
        .iter()
        .filter(|item| item.stage.is_reviewable())
        .filter_map(|item| item.next_review_at)
        .filter(|at| *at > now)
        .min()
}

/// Reviewable items due now or within `window` from now.
///
/// A window reaching past the end of the calendar counts every scheduled
/// item; one reaching before its start counts none.
pub fn count_due_within(items: &[ItemProgress], now: DateTime<Utc>, window: Duration) -> usize {
    match now.checked_add_signed(window) {
        Some(horizon) => items.iter().filter(|item| is_due(item, horizon)).count(),
        None if window > Duration::zero() => items
            .iter()
            .filter(|item| item.stage.is_reviewable() && item.next_review_at.is_some())
            .count(),
        None => 0,
    }
}

/// Item counts per named stage group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCounts {
    pub new: usize,
    pub apprentice: usize,
    pub guru: usize,
    pub master: usize,
    pub enlightened: usize,
    pub burned: usize,
}

impl GroupCounts {
    pub fn get(&self, group: StageGroup) -> usize {
        match group {
            StageGroup::New => self.new,
            StageGroup::Apprentice => self.apprentice,
            StageGroup::Guru => self.guru,
            StageGroup::Master => self.master,
            StageGroup::Enlightened => self.enlightened,
            StageGroup::Burned => self.burned,
        }
    }

    fn slot(&mut self, group: StageGroup) -> &mut usize {
        match group {
            StageGroup::New => &mut self.new,
            StageGroup::Apprentice => &mut self.apprentice,
            StageGroup::Guru => &mut self.guru,
            StageGroup::Master => &mut self.master,
            StageGroup::Enlightened => &mut self.enlightened,
            StageGroup::Burned => &mut self.burned,
        }
    }

    pub fn sum(&self) -> usize {
        self.new + self.apprentice + self.guru + self.master + self.enlightened + self.burned
    }
}

/// Stage distribution of a learner's items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSummary {
    pub per_stage: [usize; Stage::COUNT],
    pub groups: GroupCounts,
    pub total: usize,
}

impl StageSummary {
    pub fn count(&self, stage: Stage) -> usize {
        self.per_stage[stage.index()]
    }
}

/// Count items per stage and per group.
pub fn get_summary(items: &[ItemProgress]) -> StageSummary {
    let mut summary = StageSummary::default();
    for item in items {
        summary.per_stage[item.stage.index()] += 1;
    }
    for stage in Stage::all() {
        *summary.groups.slot(stage.group()) += summary.count(stage);
    }
    summary.total = items.len();
    summary
}
