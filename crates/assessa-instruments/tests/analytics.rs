use assessa_core::models::assignment::{Assignment, AssignmentStatus};
use assessa_core::models::mini_test::MiniTest;
use assessa_core::models::question::Question;
use assessa_core::models::refs::UserRef;
use assessa_core::models::test::Test;
use assessa_instruments::analytics::{
    dashboard_stats, score_distribution, summarize, test_rollups, top_users, user_scores, weighted_score,
};

fn test_ref(id: i64, name: &str) -> Test {
    Test {
        id,
        name: name.to_string(),
        mini_test: vec![],
        proportion: vec![],
    }
}

fn assignment(id: i64, reviewee: (i64, &str), status: AssignmentStatus, scores: Vec<Option<f64>>) -> Assignment {
    Assignment {
        id,
        test: test_ref(1, "季度考评"),
        reviewer: vec![],
        reviewee: UserRef {
            id: reviewee.0,
            name: reviewee.1.to_string(),
            role: None,
        },
        status,
        question_record: vec![],
        score_set: scores,
    }
}

#[test]
fn user_average_pools_all_valid_scores() {
    let data = vec![
        assignment(1, (7, "Alice"), AssignmentStatus::Completed, vec![Some(4.0), Some(5.0), None]),
        assignment(2, (7, "Alice"), AssignmentStatus::Completed, vec![None, Some(3.0)]),
    ];
    let users = user_scores(&data);
    assert_eq!(users.len(), 1);
    assert!((users[0].average_score - 4.0).abs() < 1e-9);
    assert_eq!(users[0].completed_assessments, 2);
    assert_eq!(users[0].assessments[0].score, Some(4.5));
}

#[test]
fn scores_of_unfinished_assignments_do_not_count() {
    let data = vec![
        assignment(1, (7, "Alice"), AssignmentStatus::InProgress, vec![Some(1.0)]),
        assignment(2, (7, "Alice"), AssignmentStatus::Completed, vec![Some(5.0)]),
        assignment(3, (8, "Bob"), AssignmentStatus::Pending, vec![]),
    ];
    let users = user_scores(&data);
    assert_eq!(users[0].average_score, 5.0);
    assert_eq!(users[0].total_assessments, 2);
    assert_eq!(users[0].assessments[0].score, None);
    assert_eq!(users[1].user_name, "Bob");
    assert_eq!(users[1].average_score, 0.0);
}

#[test]
fn stats_count_statuses_and_completion_rate() {
    let data = vec![
        assignment(1, (7, "Alice"), AssignmentStatus::Completed, vec![Some(4.0), Some(2.0)]),
        assignment(2, (8, "Bob"), AssignmentStatus::Pending, vec![]),
        assignment(3, (8, "Bob"), AssignmentStatus::InProgress, vec![]),
        assignment(4, (9, "Carol"), AssignmentStatus::Completed, vec![None]),
    ];
    let stats = dashboard_stats(&data);
    assert_eq!(stats.total_assessments, 4);
    assert_eq!(stats.completed_assessments, 2);
    assert_eq!(stats.pending_assessments, 1);
    assert_eq!(stats.in_progress_assessments, 1);
    assert_eq!(stats.completion_rate, 50.0);
    assert_eq!(stats.average_score, 3.0);
}

#[test]
fn empty_input_yields_zeroes() {
    let dashboard = summarize(&[]);
    assert_eq!(dashboard.stats.average_score, 0.0);
    assert_eq!(dashboard.stats.completion_rate, 0.0);
    assert!(dashboard.users.is_empty());
    assert!(dashboard.tests.is_empty());
}

#[test]
fn tests_are_rolled_up_separately() {
    let mut other = assignment(2, (8, "Bob"), AssignmentStatus::Completed, vec![Some(2.0)]);
    other.test = test_ref(2, "年度考评");
    let data = vec![
        assignment(1, (7, "Alice"), AssignmentStatus::Completed, vec![Some(4.0)]),
        other,
    ];
    let rollups = test_rollups(&data);
    assert_eq!(rollups.len(), 2);
    assert_eq!(rollups[1].test_name, "年度考评");
    assert_eq!(rollups[1].average_score, 2.0);
}

fn weighted_test() -> Test {
    let q = |id: i64| Question {
        id,
        name: format!("q{id}"),
        content: String::new(),
        mini_test: vec![],
    };
    Test {
        id: 1,
        name: "t".to_string(),
        mini_test: vec![
            MiniTest {
                id: 1,
                name: "a".to_string(),
                question: vec![q(1), q(2)],
                proportion: vec![0.25, 0.75],
                test: vec![],
            },
            MiniTest {
                id: 2,
                name: "b".to_string(),
                question: vec![q(3)],
                proportion: vec![1.0],
                test: vec![],
            },
        ],
        proportion: vec![0.5, 0.5],
    }
}

#[test]
fn weighted_score_renormalises_over_answered_parts() {
    let test = weighted_test();

    let full = weighted_score(&test, &[Some(4.0), Some(2.0), Some(5.0)]).unwrap();
    assert!((full - 3.75).abs() < 1e-9);

    let partial = weighted_score(&test, &[Some(4.0), None, None]).unwrap();
    assert!((partial - 4.0).abs() < 1e-9);

    assert_eq!(weighted_score(&test, &[None, None, None]), None);
}

#[test]
fn assessment_rows_carry_the_weighted_score() {
    let mut done = assignment(1, (7, "Alice"), AssignmentStatus::Completed, vec![Some(4.0), Some(2.0), Some(5.0)]);
    done.test = weighted_test();
    let mut open = assignment(2, (7, "Alice"), AssignmentStatus::InProgress, vec![Some(4.0), None, None]);
    open.test = weighted_test();

    let users = user_scores(&[done, open]);
    let rows = &users[0].assessments;
    assert!((rows[0].weighted_score.unwrap() - 3.75).abs() < 1e-9);
    assert!((rows[0].score.unwrap() - 11.0 / 3.0).abs() < 1e-9);
    assert_eq!(rows[1].weighted_score, None);
}

#[test]
fn distribution_counts_whole_scores_of_completed_assignments() {
    let data = vec![
        assignment(1, (7, "Alice"), AssignmentStatus::Completed, vec![Some(5.0), Some(5.0), Some(1.0), None]),
        assignment(2, (8, "Bob"), AssignmentStatus::Completed, vec![Some(3.0), Some(2.5), Some(6.0)]),
        assignment(3, (8, "Bob"), AssignmentStatus::InProgress, vec![Some(4.0)]),
    ];
    assert_eq!(score_distribution(&data), [1, 0, 1, 0, 2]);
    assert_eq!(summarize(&data).score_distribution, [1, 0, 1, 0, 2]);
}

#[test]
fn top_users_rank_completed_reviewees_by_average() {
    let mut data: Vec<Assignment> = (0..12)
        .map(|i| {
            let score = 1.0 + (i % 5) as f64;
            assignment(i, (i, &format!("u{i}")), AssignmentStatus::Completed, vec![Some(score)])
        })
        .collect();
    data.push(assignment(99, (99, "idle"), AssignmentStatus::Pending, vec![]));

    let users = user_scores(&data);
    let top = top_users(&users, 10);
    assert_eq!(top.len(), 10);
    assert!(top.iter().all(|u| u.user_name != "idle"));
    assert_eq!(top[0].user_name, "u4");
    assert_eq!(top[1].user_name, "u9");
    assert!(top.windows(2).all(|w| w[0].average_score >= w[1].average_score));

    let dashboard = summarize(&data);
    assert_eq!(dashboard.top_users, top);
    assert_eq!(dashboard.users.len(), 13);
}
