use assessa_core::inputs::{MiniTestInput, TestInput, WeightedRow};
use assessa_core::models::mini_test::MiniTest;
use assessa_core::models::question::Question;
use assessa_core::models::test::Test;
use assessa_instruments::composition::{
    check_proportions, mini_test_form, prepare_mini_test, prepare_test, test_form,
};
use assessa_instruments::error::InstrumentError;

fn test_input(rows: &[(&str, &str)]) -> TestInput {
    TestInput {
        name: "年度考评".to_string(),
        mini_test: rows.iter().map(|(n, p)| WeightedRow::new(*n, *p)).collect(),
    }
}

fn question(id: i64, name: &str) -> Question {
    Question {
        id,
        name: name.to_string(),
        content: format!("{name}?"),
        mini_test: vec![],
    }
}

#[test]
fn test_proportions_over_one_are_rejected() {
    let err = prepare_test(&test_input(&[("沟通", "0.5"), ("执行", "0.6")])).unwrap_err();
    assert!(matches!(err, InstrumentError::ProportionSum { sum } if (sum - 1.1).abs() < 1e-9));
}

#[test]
fn test_proportions_summing_to_one_are_accepted() {
    let payload = prepare_test(&test_input(&[("沟通", "0.4"), ("执行", "0.6")])).unwrap();
    assert_eq!(payload.proportion, vec![0.4, 0.6]);
    assert_eq!(payload.mini_test.len(), 2);

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["miniTest"][1]["name"], "执行");
}

#[test]
fn mini_test_with_three_questions_is_accepted() {
    let input = MiniTestInput {
        name: "沟通".to_string(),
        question: vec![
            WeightedRow::new("q1", "0.2"),
            WeightedRow::new("q2", "0.3"),
            WeightedRow::new("q3", "0.5"),
        ],
    };
    let payload = prepare_mini_test(&input).unwrap();
    assert_eq!(payload.proportion, vec![0.2, 0.3, 0.5]);
}

#[test]
fn tolerance_allows_small_rounding() {
    assert!(check_proportions("questions", &[0.333, 0.333, 0.333], 3).is_ok());
    assert!(check_proportions("questions", &[0.3, 0.3, 0.3], 3).is_err());
}

#[test]
fn length_mismatch_is_rejected() {
    let err = check_proportions("mini-tests", &[1.0], 2).unwrap_err();
    assert!(matches!(
        err,
        InstrumentError::ProportionCount { siblings: 2, proportions: 1, .. }
    ));
}

#[test]
fn field_errors_win_over_sum_errors() {
    let err = prepare_test(&test_input(&[("沟通", "abc")])).unwrap_err();
    assert!(matches!(err, InstrumentError::Core(_)));
}

#[test]
fn edit_forms_are_prefilled_from_stored_entities() {
    let mini = MiniTest {
        id: 3,
        name: "执行".to_string(),
        question: vec![question(1, "q1"), question(2, "q2")],
        proportion: vec![0.25, 0.75],
        test: vec![],
    };
    let form = mini_test_form(&mini);
    assert_eq!(form.question[1], WeightedRow::new("q2", "0.75"));

    let test = Test {
        id: 1,
        name: "年度".to_string(),
        mini_test: vec![mini],
        proportion: vec![],
    };
    let form = test_form(&test);
    assert_eq!(form.mini_test[0].proportion, "0");
    assert!(prepare_test(&form).is_err());
}
