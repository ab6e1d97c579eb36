use std::collections::BTreeMap;

use assessa_core::models::assignment::{Assignment, AssignmentStatus};
use assessa_core::models::mini_test::MiniTest;
use assessa_core::models::question::Question;
use assessa_core::models::refs::UserRef;
use assessa_core::models::test::Test;
use assessa_instruments::error::InstrumentError;
use assessa_instruments::flatten::flatten;
use assessa_instruments::scoring::{
    merge_score_sets, reconstruct_keyed, reconstruct_ordered, reviewer_sheet, slots_for, LIKERT,
};

fn question(id: i64, name: &str) -> Question {
    Question {
        id,
        name: name.to_string(),
        content: format!("{name} content"),
        mini_test: vec![],
    }
}

fn sample_test() -> Test {
    Test {
        id: 1,
        name: "季度考评".to_string(),
        mini_test: vec![
            MiniTest {
                id: 10,
                name: "沟通".to_string(),
                question: vec![question(100, "表达"), question(101, "倾听")],
                proportion: vec![0.5, 0.5],
                test: vec![],
            },
            MiniTest {
                id: 11,
                name: "执行".to_string(),
                question: vec![question(102, "按时交付")],
                proportion: vec![1.0],
                test: vec![],
            },
        ],
        proportion: vec![0.6, 0.4],
    }
}

fn record(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn sample_assignment(names: &[&str]) -> Assignment {
    Assignment {
        id: 5,
        test: sample_test(),
        reviewer: vec![],
        reviewee: UserRef {
            id: 9,
            name: "Carol".to_string(),
            role: None,
        },
        status: AssignmentStatus::InProgress,
        question_record: record(names),
        score_set: vec![],
    }
}

#[test]
fn flattening_follows_declaration_order() {
    let flat = flatten(&sample_test());
    let names: Vec<&str> = flat.iter().map(|q| q.name.as_str()).collect();
    assert_eq!(names, vec!["表达", "倾听", "按时交付"]);
    assert_eq!(flat[2].slot, 2);
    assert_eq!(flat[2].part_number, 2);
    assert_eq!(flat[2].mini_test_weight, Some(0.4));
    assert_eq!(flat.len(), sample_test().question_count());
}

#[test]
fn ordered_answers_fill_only_the_reviewers_slots() {
    let score_set = reconstruct_ordered(&record(&["Alice", "Bob", "Alice"]), "Alice", &[5.0, 3.0]).unwrap();
    assert_eq!(score_set, vec![Some(5.0), None, Some(3.0)]);
}

#[test]
fn reconstruction_enumerates_every_slot() {
    let rec = record(&["Alice", "Bob", "Alice"]);
    let score_set = reconstruct_ordered(&rec, "Bob", &[4.0]).unwrap();
    assert_eq!(score_set.len(), rec.len());
}

#[test]
fn ordered_answer_count_must_match() {
    let err = reconstruct_ordered(&record(&["Alice", "Bob", "Alice"]), "Alice", &[5.0]).unwrap_err();
    assert!(matches!(err, InstrumentError::AnswerCount { expected: 2, actual: 1 }));
}

#[test]
fn scores_outside_the_likert_scale_are_rejected() {
    let err = reconstruct_ordered(&record(&["Alice"]), "Alice", &[6.0]).unwrap_err();
    assert!(matches!(err, InstrumentError::ScoreOutOfRange { slot: 0, .. }));
    assert!(!LIKERT.contains(2.5));
    assert!(LIKERT.contains(1.0));
}

#[test]
fn keyed_answers_must_cover_exactly_the_reviewers_slots() {
    let rec = record(&["Alice", "Bob", "Alice"]);

    let answers = BTreeMap::from([(2, 3.0), (0, 5.0)]);
    assert_eq!(
        reconstruct_keyed(&rec, "Alice", &answers).unwrap(),
        vec![Some(5.0), None, Some(3.0)]
    );

    let foreign = BTreeMap::from([(0, 5.0), (1, 4.0), (2, 3.0)]);
    assert!(matches!(
        reconstruct_keyed(&rec, "Alice", &foreign),
        Err(InstrumentError::ForeignSlot { slot: 1, .. })
    ));

    let missing = BTreeMap::from([(0, 5.0)]);
    assert!(matches!(
        reconstruct_keyed(&rec, "Alice", &missing),
        Err(InstrumentError::MissingAnswer { slot: 2 })
    ));
}

#[test]
fn sheet_lists_assigned_questions_grouped_by_part() {
    let sheet = reviewer_sheet(&sample_assignment(&["Alice", "Bob", "Alice"]), "Alice").unwrap();
    assert!(!sheet.is_empty());
    assert_eq!(sheet.questions.len(), 2);
    assert_eq!(sheet.parts[0].assigned_count, 1);
    assert_eq!(sheet.parts[1].assigned_count, 1);
    assert_eq!(sheet.parts[0].question_count, 2);
    assert_eq!(sheet.scale, LIKERT);

    let grouped = sheet.grouped();
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[1].part.part_number, 2);
    assert_eq!(grouped[1].questions[0].name, "按时交付");
}

#[test]
fn sheet_is_empty_when_nothing_is_assigned() {
    let sheet = reviewer_sheet(&sample_assignment(&["Bob", "Bob", "Bob"]), "Alice").unwrap();
    assert!(sheet.is_empty());
    assert!(sheet.grouped().is_empty());
}

#[test]
fn misaligned_record_is_reported() {
    let err = reviewer_sheet(&sample_assignment(&["Alice", "Bob"]), "Alice").unwrap_err();
    assert!(matches!(err, InstrumentError::RecordMismatch { record: 2, questions: 3 }));
}

#[test]
fn slots_use_exact_name_match() {
    assert_eq!(slots_for(&record(&["Alice", "alice", " Alice"]), "Alice"), vec![0]);
}

#[test]
fn merging_keeps_other_reviewers_scores() {
    let existing = vec![None, Some(4.0), None];
    let mine = vec![Some(5.0), None, Some(3.0)];
    assert_eq!(merge_score_sets(&existing, &mine), vec![Some(5.0), Some(4.0), Some(3.0)]);
    assert_eq!(merge_score_sets(&[], &mine), mine);
}
