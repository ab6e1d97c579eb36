//! Weighted composition rules.
//!
//! A test is a weighted list of mini-tests and a mini-test is a weighted
//! list of questions. In both cases the proportion vector runs parallel to
//! the children and sums to 1 within [`PROPORTION_TOLERANCE`].

use assessa_core::inputs::{MiniTestInput, MiniTestPayload, TestInput, TestPayload, WeightedRow};
use assessa_core::models::mini_test::MiniTest;
use assessa_core::models::refs::NameRow;
use assessa_core::models::test::Test;

use crate::error::InstrumentError;

pub const PROPORTION_TOLERANCE: f64 = 0.01;

pub fn proportion_sum(weights: &[f64]) -> f64 {
    weights.iter().sum()
}

/// Check a proportion vector against its sibling collection.
pub fn check_proportions(
    noun: &'static str,
    weights: &[f64],
    siblings: usize,
) -> Result<(), InstrumentError> {
    if weights.len() != siblings {
        return Err(InstrumentError::ProportionCount {
            noun,
            siblings,
            proportions: weights.len(),
        });
    }
    let sum = proportion_sum(weights);
    if (sum - 1.0).abs() > PROPORTION_TOLERANCE {
        return Err(InstrumentError::ProportionSum { sum });
    }
    Ok(())
}

fn split_rows(rows: &[WeightedRow]) -> (Vec<NameRow>, Vec<f64>) {
    rows.iter()
        .map(|row| (NameRow::new(row.name.trim()), row.weight().unwrap_or_default()))
        .unzip()
}

/// Validate a mini-test form and build the backend body.
///
/// Field errors are reported first; the weight sum is only checked once
/// every row holds a valid proportion.
pub fn prepare_mini_test(input: &MiniTestInput) -> Result<MiniTestPayload, InstrumentError> {
    input.validate()?;
    let (question, proportion) = split_rows(&input.question);
    check_proportions("questions", &proportion, question.len())?;
    Ok(MiniTestPayload {
        name: input.name.trim().to_string(),
        question,
        proportion,
    })
}

/// Validate a test form and build the backend body.
pub fn prepare_test(input: &TestInput) -> Result<TestPayload, InstrumentError> {
    input.validate()?;
    let (mini_test, proportion) = split_rows(&input.mini_test);
    check_proportions("mini-tests", &proportion, mini_test.len())?;
    Ok(TestPayload {
        name: input.name.trim().to_string(),
        mini_test,
        proportion,
    })
}

/// Prefill for the test edit form.
pub fn test_form(test: &Test) -> TestInput {
    TestInput {
        name: test.name.clone(),
        mini_test: weighted_rows(test.mini_test.iter().map(|m| m.name.as_str()), &test.proportion),
    }
}

/// Prefill for the mini-test edit form.
pub fn mini_test_form(mini_test: &MiniTest) -> MiniTestInput {
    MiniTestInput {
        name: mini_test.name.clone(),
        question: weighted_rows(
            mini_test.question.iter().map(|q| q.name.as_str()),
            &mini_test.proportion,
        ),
    }
}

fn weighted_rows<'a>(names: impl Iterator<Item = &'a str>, weights: &[f64]) -> Vec<WeightedRow> {
    names
        .enumerate()
        .map(|(i, name)| {
            let proportion = weights.get(i).map(|w| w.to_string()).unwrap_or_else(|| "0".to_string());
            WeightedRow::new(name, proportion)
        })
        .collect()
}
