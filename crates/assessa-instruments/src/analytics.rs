//! Dashboard aggregation over fetched assignments.

use std::collections::HashMap;

use serde::Serialize;
use ts_rs::TS;

use assessa_core::models::assignment::{Assignment, AssignmentStatus};
use assessa_core::models::test::Test;

#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardStats {
    pub total_assessments: usize,
    pub completed_assessments: usize,
    pub pending_assessments: usize,
    pub in_progress_assessments: usize,
    /// Mean over every submitted score of every completed assignment.
    pub average_score: f64,
    /// Percentage of assignments that are completed.
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AssessmentScore {
    #[ts(type = "number")]
    pub id: i64,
    pub test_name: String,
    pub status: AssignmentStatus,
    /// Plain mean of the submitted scores.
    pub score: Option<f64>,
    /// Mean weighted by question and mini-test proportions.
    pub weighted_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserScore {
    #[ts(type = "number")]
    pub user_id: i64,
    pub user_name: String,
    pub total_assessments: usize,
    pub completed_assessments: usize,
    /// Pooled mean over all submitted scores of the user's completed
    /// assignments; 0 when there are none.
    pub average_score: f64,
    pub assessments: Vec<AssessmentScore>,
    #[serde(skip)]
    #[ts(skip)]
    score_sum: f64,
    #[serde(skip)]
    #[ts(skip)]
    score_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TestRollup {
    #[ts(type = "number")]
    pub test_id: i64,
    pub test_name: String,
    pub total_assessments: usize,
    pub completed_assessments: usize,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Dashboard {
    pub stats: DashboardStats,
    /// Count of submitted scores per value, index 0 holding the 1s.
    pub score_distribution: [usize; 5],
    /// Best average first, among users with a completed assessment.
    pub top_users: Vec<UserScore>,
    pub users: Vec<UserScore>,
    pub tests: Vec<TestRollup>,
}

pub const TOP_USERS: usize = 10;

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Scores that count towards averages: only completed assignments.
fn counted_scores(assignment: &Assignment) -> Option<(f64, usize)> {
    if assignment.status != AssignmentStatus::Completed {
        return None;
    }
    let (sum, count) = assignment
        .valid_scores()
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then_some((sum, count))
}

pub fn dashboard_stats(assignments: &[Assignment]) -> DashboardStats {
    let mut stats = DashboardStats {
        total_assessments: assignments.len(),
        ..DashboardStats::default()
    };
    let (mut sum, mut count) = (0.0, 0usize);

    for a in assignments {
        match a.status {
            AssignmentStatus::Pending => stats.pending_assessments += 1,
            AssignmentStatus::InProgress => stats.in_progress_assessments += 1,
            AssignmentStatus::Completed => stats.completed_assessments += 1,
        }
        if let Some((s, c)) = counted_scores(a) {
            sum += s;
            count += c;
        }
    }

    stats.average_score = mean(sum, count);
    stats.completion_rate = mean(stats.completed_assessments as f64 * 100.0, stats.total_assessments);
    stats
}

/// Per-reviewee rollup in one pass. Users appear in first-seen order.
pub fn user_scores(assignments: &[Assignment]) -> Vec<UserScore> {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut users: Vec<UserScore> = Vec::new();

    for a in assignments {
        let pos = *index.entry(a.reviewee.id).or_insert_with(|| {
            users.push(UserScore {
                user_id: a.reviewee.id,
                user_name: a.reviewee.name.clone(),
                total_assessments: 0,
                completed_assessments: 0,
                average_score: 0.0,
                assessments: Vec::new(),
                score_sum: 0.0,
                score_count: 0,
            });
            users.len() - 1
        });
        let user = &mut users[pos];

        user.total_assessments += 1;
        if a.status == AssignmentStatus::Completed {
            user.completed_assessments += 1;
        }

        let counted = counted_scores(a);
        if let Some((s, c)) = counted {
            user.score_sum += s;
            user.score_count += c;
            user.average_score = mean(user.score_sum, user.score_count);
        }

        user.assessments.push(AssessmentScore {
            id: a.id,
            test_name: a.test.name.clone(),
            status: a.status,
            score: counted.map(|(s, c)| mean(s, c)),
            weighted_score: counted.and_then(|_| weighted_score(&a.test, &a.score_set)),
        });
    }

    users
}

/// Per-test rollup, in first-seen order.
pub fn test_rollups(assignments: &[Assignment]) -> Vec<TestRollup> {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut rollups: Vec<(TestRollup, f64, usize)> = Vec::new();

    for a in assignments {
        let pos = *index.entry(a.test.id).or_insert_with(|| {
            rollups.push((
                TestRollup {
                    test_id: a.test.id,
                    test_name: a.test.name.clone(),
                    total_assessments: 0,
                    completed_assessments: 0,
                    average_score: 0.0,
                },
                0.0,
                0,
            ));
            rollups.len() - 1
        });
        let (rollup, sum, count) = &mut rollups[pos];
        rollup.total_assessments += 1;
        if a.status == AssignmentStatus::Completed {
            rollup.completed_assessments += 1;
        }
        if let Some((s, c)) = counted_scores(a) {
            *sum += s;
            *count += c;
            rollup.average_score = mean(*sum, *count);
        }
    }

    rollups.into_iter().map(|(r, _, _)| r).collect()
}

/// How often each whole score from 1 to 5 was given on completed
/// assignments. Fractional and out-of-scale values are not counted.
pub fn score_distribution(assignments: &[Assignment]) -> [usize; 5] {
    let mut buckets = [0usize; 5];
    for a in assignments.iter().filter(|a| a.status == AssignmentStatus::Completed) {
        for score in a.valid_scores() {
            if (1.0..=5.0).contains(&score) && score.fract() == 0.0 {
                buckets[score as usize - 1] += 1;
            }
        }
    }
    buckets
}

/// The `limit` best reviewees by average score. Users without a completed
/// assessment are left out; ties keep first-seen order.
pub fn top_users(users: &[UserScore], limit: usize) -> Vec<UserScore> {
    let mut ranked: Vec<UserScore> = users
        .iter()
        .filter(|u| u.completed_assessments > 0)
        .cloned()
        .collect();
    ranked.sort_by(|a, b| b.average_score.total_cmp(&a.average_score));
    ranked.truncate(limit);
    ranked
}

pub fn summarize(assignments: &[Assignment]) -> Dashboard {
    let users = user_scores(assignments);
    Dashboard {
        stats: dashboard_stats(assignments),
        score_distribution: score_distribution(assignments),
        top_users: top_users(&users, TOP_USERS),
        users,
        tests: test_rollups(assignments),
    }
}

/// Weighted score of one score set: questions are weighted within their
/// mini-test, mini-tests within the test. Unanswered questions and parts
/// without any answer drop out and the remaining weights are renormalised.
pub fn weighted_score(test: &Test, score_set: &[Option<f64>]) -> Option<f64> {
    let mut slot = 0;
    let (mut total, mut total_weight) = (0.0, 0.0);

    for (part, mini_test) in test.mini_test.iter().enumerate() {
        let (mut part_sum, mut part_weight) = (0.0, 0.0);
        for q in 0..mini_test.question.len() {
            if let Some(score) = score_set.get(slot).copied().flatten() {
                let w = mini_test.proportion.get(q).copied().unwrap_or(0.0);
                part_sum += w * score;
                part_weight += w;
            }
            slot += 1;
        }
        if part_weight > 0.0 {
            let w = test.proportion.get(part).copied().unwrap_or(0.0);
            total += w * (part_sum / part_weight);
            total_weight += w;
        }
    }

    (total_weight > 0.0).then(|| total / total_weight)
}
