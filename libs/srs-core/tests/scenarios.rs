//! Review flows driven end to end with fixed instants.

use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use srs_core::{
    get_due_items, get_summary, ItemProgress, Milestone, Quality, ReviewInput, ReviewProcessor,
    Stage, StageTransition,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 18, 30, 0).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn new_item_answered_correctly() {
    let processor = ReviewProcessor::default();
    let progress = processor.introduce(now());

    let result = processor.review(&progress, Quality::new(5), now()).unwrap();

    assert_eq!(result.new_state.stage, Stage::APPRENTICE_II);
    assert_eq!(result.new_state.repetitions, 1);
    assert!(approx(result.new_state.ease_factor, 2.6));
    assert_eq!(result.next_review_at, now() + Duration::hours(8));
}

#[test]
fn guru_two_lapse() {
    let processor = ReviewProcessor::default();
    let input = ReviewInput {
        quality: Quality::new(1),
        stage: Stage::GURU_II,
        ease_factor: 2.2,
        repetitions: 5,
        interval_days: 14.0,
    };

    let result = processor.process(&input, now()).unwrap();

    assert_eq!(result.new_state.stage, Stage::APPRENTICE_IV);
    assert_eq!(result.new_state.repetitions, 0);
    assert!(approx(result.new_state.ease_factor, 2.0));
    assert_eq!(result.next_review_at, now() + Duration::hours(48));
    assert_eq!(
        result.transition(),
        StageTransition::Demoted {
            from: Stage::GURU_II,
            to: Stage::APPRENTICE_IV,
        }
    );
}

#[test]
fn enlightened_item_burns() {
    let processor = ReviewProcessor::default();
    let progress = ItemProgress {
        stage: Stage::ENLIGHTENED,
        repetitions: 7,
        ..Default::default()
    };

    let result = processor.review(&progress, Quality::CORRECT, now()).unwrap();

    assert_eq!(result.new_state.stage, Stage::BURNED);
    assert_eq!(result.new_state.interval_days, 0.0);
    assert!(!result.schedules_review());
    assert_eq!(result.milestone(), Some(Milestone::Burned));
    assert!(get_due_items(&[result.new_state], now() + Duration::days(3650)).is_empty());
}

#[test]
fn due_queue_over_mixed_stages() {
    let items = vec![
        ItemProgress {
            stage: Stage::NEW,
            next_review_at: Some(now() - Duration::days(1)),
            ..Default::default()
        },
        ItemProgress {
            stage: Stage::APPRENTICE_I,
            next_review_at: Some(now() - Duration::hours(2)),
            ..Default::default()
        },
        ItemProgress {
            stage: Stage::GURU_I,
            next_review_at: Some(now() + Duration::days(3)),
            ..Default::default()
        },
        ItemProgress {
            stage: Stage::BURNED,
            next_review_at: Some(now() - Duration::days(40)),
            ..Default::default()
        },
    ];

    let due = get_due_items(&items, now());

    assert_eq!(due, vec![&items[1]]);
}

#[test]
fn perfect_streak_reaches_burned_with_milestones() {
    let processor = ReviewProcessor::default();
    let mut progress = processor.introduce(now());
    let mut clock = now();
    let mut milestones = Vec::new();

    while progress.stage != Stage::BURNED {
        clock = progress.next_review_at.unwrap();
        let result = processor.review(&progress, Quality::from_correct(true), clock).unwrap();
        milestones.extend(result.milestone());
        progress = result.new_state;
    }

    assert_eq!(
        milestones,
        vec![
            Milestone::Guru,
            Milestone::Master,
            Milestone::Enlightened,
            Milestone::Burned,
        ]
    );
    assert_eq!(progress.repetitions, 8);
    assert_eq!(progress.last_reviewed_at, Some(clock));
    // 4h + 8h + 1d + 2d + 7d + 14d + 30d + 120d
    assert_eq!(clock - now(), Duration::hours(12) + Duration::days(174));
}

#[test]
fn state_and_record_round_trip_through_storage_shape() {
    let processor = ReviewProcessor::default();
    let progress = processor.introduce(now());
    let result = processor.review(&progress, Quality::from_correct(false), now()).unwrap();

    let stored = serde_json::to_string(&result.new_state).unwrap();
    let loaded: ItemProgress = serde_json::from_str(&stored).unwrap();
    assert_eq!(loaded, result.new_state);

    let record = serde_json::to_value(result.record()).unwrap();
    assert_eq!(record["previous_stage"], serde_json::json!(1));
    assert_eq!(record["new_stage"], serde_json::json!(1));
    assert_eq!(record["quality"], serde_json::json!(1));
    assert_eq!(record["correct"], serde_json::json!(false));
}

#[test]
fn corrupted_stored_stage_is_rejected() {
    let stored = r#"{"stage":12,"ease_factor":2.5,"repetitions":0,"interval_days":0.0}"#;
    assert!(serde_json::from_str::<ItemProgress>(stored).is_err());
}

#[test]
fn dashboard_summary_after_reviews() {
    let processor = ReviewProcessor::default();
    let fresh = processor.introduce(now());
    let promoted = processor
        .review(&fresh, Quality::CORRECT, now())
        .unwrap()
        .new_state;
    let items = vec![ItemProgress::default(), fresh, promoted];

    let summary = get_summary(&items);

    assert_eq!(summary.groups.new, 1);
    assert_eq!(summary.groups.apprentice, 2);
    assert_eq!(summary.count(Stage::APPRENTICE_II), 1);
    assert_eq!(summary.total, 3);
}
