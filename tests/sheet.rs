use std::fs;

use indexmap::IndexMap;
use reckon::{
    error::SheetError,
    grammar::{
        evaluator::functions::{Arity, FunctionRegistry},
        value::Value,
    },
    sheet::{
        classify::classify,
        evaluate::{Evaluation, RawValue, evaluate},
        split::split,
        worksheet::Worksheet,
    },
    store::{FixedIdentity, MemoryStore, Store, name_hash},
};

fn statements(text: &str) -> Vec<String> {
    split(text).0
}

fn eval_sheet(text: &str, vars: &[(&str, &str)]) -> Result<Evaluation, SheetError> {
    let functions = FunctionRegistry::default();
    let bindings: IndexMap<String, RawValue> =
        vars.iter()
            .map(|(name, value)| (name.to_string(), RawValue::from(*value)))
            .collect();

    evaluate(&statements(text), &bindings, &functions)
}

fn result_number(text: &str, vars: &[(&str, &str)]) -> f64 {
    let outcome = eval_sheet(text, vars).unwrap_or_else(|e| panic!("Sheet failed: {e}"));
    match outcome.result() {
        Some(Value::Number(n)) => *n,
        other => panic!("Expected a numeric result, got {other:?}"),
    }
}

#[test]
fn splitter_separates_statements_and_aliases() {
    let (statements, aliases) = split("// total: Grand Total\nx = 1;\ny = x + 1");

    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0], "x = 1");
    assert_eq!(statements[1].trim(), "y = x + 1");
    assert_eq!(aliases.get("total").unwrap(), "Grand Total");
}

#[test]
fn splitter_skips_alias_lines_without_separator() {
    let (_, aliases) = split("// just a note\nx + 1");

    assert!(aliases.is_empty());
}

#[test]
fn splitter_splits_alias_on_first_colon_only() {
    let (_, aliases) = split("// r: Ratio: a to b\nr = 1");

    assert_eq!(aliases.get("r").unwrap(), "Ratio: a to b");
}

#[test]
fn classifier_reports_free_variables_of_bare_expression() {
    let inputs = classify(&statements("a + b * c")).unwrap();

    assert_eq!(inputs, ["a", "b", "c"]);
}

#[test]
fn classifier_never_reports_assigned_names() {
    let inputs = classify(&statements("a = 1; b = a + 1")).unwrap();

    assert!(inputs.is_empty());
}

#[test]
fn classifier_ignores_position_of_assignment() {
    // y is read by the first statement and assigned by the second; it is
    // still produced, not required.
    let inputs = classify(&statements("y + 1;\ny = x * 2")).unwrap();

    assert_eq!(inputs, ["x"]);
}

#[test]
fn classifier_is_idempotent() {
    let list = statements("total = price * qty;\ntotal - discount");

    assert_eq!(classify(&list).unwrap(), classify(&list).unwrap());
}

#[test]
fn classifier_fails_on_any_malformed_statement() {
    assert!(classify(&statements("a +; b")).is_err());
}

#[test]
fn evaluator_chains_assignments_left_to_right() {
    let outcome = eval_sheet("x = 2;\ny = x * 3;\ny + 1", &[]).unwrap();

    assert_eq!(outcome.result(), Some(&Value::Number(7.0)));

    let outputs: Vec<(&str, &Value)> = outcome.outputs().collect();
    assert_eq!(outputs,
               [("x", &Value::Number(2.0)), ("y", &Value::Number(6.0))]);
}

#[test]
fn evaluator_resolves_raw_string_inputs() {
    assert_eq!(result_number("a / b", &[("a", "4"), ("b", "2")]), 2.0);
}

#[test]
fn evaluator_resolves_inputs_defined_in_terms_of_earlier_inputs() {
    assert_eq!(result_number("a + b", &[("a", "2"), ("b", "a + 1")]), 5.0);
}

#[test]
fn evaluator_yields_nan_for_circular_raw_inputs() {
    assert!(result_number("a + b", &[("a", "b"), ("b", "a")]).is_nan());
}

#[test]
fn evaluator_fails_on_unsupplied_input() {
    assert!(matches!(eval_sheet("a + 1", &[]), Err(SheetError::Runtime(_))));
}

#[test]
fn evaluator_fails_atomically_on_any_malformed_statement() {
    assert!(eval_sheet("x = 2;\ny = (3", &[]).is_err());
}

#[test]
fn evaluator_skips_empty_statements() {
    assert_eq!(result_number("x = 2;", &[]), 2.0);
}

#[test]
fn evaluator_produces_no_result_for_empty_sheet() {
    let outcome = eval_sheet("", &[]).unwrap();

    assert_eq!(outcome.result(), None);
    assert_eq!(outcome.outputs().count(), 0);
}

#[test]
fn evaluator_hides_reserved_names_from_output_enumeration() {
    let outcome = eval_sheet("$tmp = 2;\nr = $tmp * 3", &[]).unwrap();

    let visible: Vec<&str> = outcome.outputs().map(|(name, _)| name).collect();
    assert_eq!(visible, ["r"]);
    assert_eq!(outcome.output("$tmp"), Some(&Value::Number(2.0)));
    assert_eq!(outcome.result(), Some(&Value::Number(6.0)));
}

#[test]
fn call_shaped_lhs_is_a_comparison_not_an_assignment() {
    // `sqrt(x) = 2` cannot assign to a call, so the whole statement reads
    // as the comparison `sqrt(x) == 2`.
    let outcome = eval_sheet("x = 4;\nsqrt(x) = 2", &[]).unwrap();

    assert_eq!(outcome.result(), Some(&Value::Bool(true)));

    let names: Vec<&str> = outcome.outputs().map(|(name, _)| name).collect();
    assert_eq!(names, ["x"]);
}

#[test]
fn arithmetic_follows_precedence() {
    assert_eq!(result_number("2 + 3 * 4", &[]), 14.0);
    assert_eq!(result_number("(2 + 3) * 4", &[]), 20.0);
    assert_eq!(result_number("2 ^ 3 ^ 2", &[]), 512.0);
    assert_eq!(result_number("-2 ^ 2", &[]), 4.0);
    assert_eq!(result_number("10 % 3", &[]), 1.0);
}

#[test]
fn comparisons_and_logic_produce_booleans() {
    let outcome = eval_sheet("1 < 2 and not (2 < 1)", &[]).unwrap();

    assert_eq!(outcome.result(), Some(&Value::Bool(true)));
}

#[test]
fn arrays_support_indexing() {
    assert_eq!(result_number("[10, 20, 30][1]", &[]), 20.0);
}

#[test]
fn sum_and_avg_aggregate_arrays() {
    let outcome = eval_sheet("t = sum([1, 2, 3]);\nm = avg([1, 2, 3, 4])", &[]).unwrap();

    assert_eq!(outcome.output("t"), Some(&Value::Number(6.0)));
    assert_eq!(outcome.output("m"), Some(&Value::Number(2.5)));
}

#[test]
fn aggregates_fall_back_to_zero_defensively() {
    assert_eq!(result_number("sum([])", &[]), 0.0);
    assert_eq!(result_number("avg([])", &[]), 0.0);
    assert_eq!(result_number("sum(5)", &[]), 0.0);
    assert_eq!(result_number("avg([1, true])", &[]), 0.0);
}

#[test]
fn aggregates_check_arity() {
    assert!(eval_sheet("sum(1, 2)", &[]).is_err());
}

#[test]
fn worksheet_carries_input_values_across_edits() {
    let mut sheet = Worksheet::new();
    sheet.set_text("a + b").unwrap();
    sheet.set_input("a", "1");

    sheet.set_text("a + b + c").unwrap();
    let inputs: Vec<(&str, &str)> = sheet.inputs().collect();
    assert_eq!(inputs, [("a", "1"), ("b", ""), ("c", "")]);

    sheet.set_text("a").unwrap();
    let inputs: Vec<(&str, &str)> = sheet.inputs().collect();
    assert_eq!(inputs, [("a", "1")]);
}

#[test]
fn worksheet_keeps_inputs_when_classification_fails() {
    let mut sheet = Worksheet::new();
    sheet.set_text("x + 1").unwrap();
    sheet.set_input("x", "5");

    assert!(sheet.set_text("x + )").is_err());
    assert_eq!(sheet.input("x"), Some("5"));
}

#[test]
fn aliases_are_extracted_independently_of_evaluation() {
    let mut sheet = Worksheet::new();
    sheet.set_text("// total: Grand Total\ntotal = 5").unwrap();

    assert_eq!(sheet.inputs().count(), 0);
    assert_eq!(sheet.alias("total"), Some("Grand Total"));
    assert_eq!(sheet.display_name("total"), "Grand Total (total)");

    let outcome = sheet.calculate().unwrap();
    assert_eq!(outcome.output("total"), Some(&Value::Number(5.0)));

    // A sheet that no longer parses still yields its aliases.
    assert!(sheet.set_text("// total: Grand Total\ntotal = )").is_err());
    assert_eq!(sheet.alias("total"), Some("Grand Total"));
}

#[test]
fn worksheet_uses_registered_functions() {
    let mut sheet = Worksheet::new();
    sheet.functions_mut()
         .register("double", Arity::Exact(1), |args, line| {
             Ok(Value::Number(args[0].as_number(line)? * 2.0))
         });
    sheet.set_text("double(x)").unwrap();

    assert_eq!(sheet.inputs().map(|(name, _)| name).collect::<Vec<_>>(),
               ["x"]);

    sheet.set_input("x", "5");
    let outcome = sheet.calculate().unwrap();
    assert_eq!(outcome.result(), Some(&Value::Number(10.0)));
}

#[test]
fn records_round_trip_through_a_store() {
    let identity = FixedIdentity("user-1".to_string());

    let mut sheet = Worksheet::new();
    sheet.set_text("price * qty").unwrap();
    sheet.set_input("price", "3");
    sheet.set_input("qty", "4");

    let record = sheet.to_record("Checkout", &identity).unwrap();
    assert_eq!(record.partition_key, "user-1");
    assert_eq!(record.row_key, name_hash("Checkout"));

    let mut store = MemoryStore::default();
    store.put(record.clone()).unwrap();

    let loaded = store.get("user-1", &name_hash("Checkout"))
                      .unwrap()
                      .expect("record should exist");

    let mut restored = Worksheet::new();
    restored.load_record(&loaded).unwrap();

    assert_eq!(restored.text(), "price * qty");
    assert_eq!(restored.input("price"), Some("3"));
    assert_eq!(restored.input("qty"), Some("4"));

    // The serialized variables payload survives the trip byte for byte.
    let resaved = restored.to_record("Checkout", &identity).unwrap();
    assert_eq!(resaved.variables, record.variables);
}

#[test]
fn saving_under_the_same_name_overwrites() {
    let identity = FixedIdentity("user-1".to_string());
    let mut store = MemoryStore::default();

    let mut sheet = Worksheet::new();
    sheet.set_text("1 + 1").unwrap();
    store.put(sheet.to_record("Scratch", &identity).unwrap())
         .unwrap();

    sheet.set_text("2 + 2").unwrap();
    store.put(sheet.to_record("Scratch", &identity).unwrap())
         .unwrap();

    let records = store.list().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].expression, "2 + 2");
}

#[test]
fn name_hash_matches_known_values() {
    assert_eq!(name_hash("abc"), "96354");
    assert_eq!(name_hash(""), "0");
    assert_eq!(name_hash("Checkout"), name_hash("Checkout"));
}

#[test]
fn example_sheet_evaluates_from_disk() {
    let text = fs::read_to_string("tests/example.calc").expect("missing file");

    let mut sheet = Worksheet::new();
    sheet.set_text(&text).unwrap();

    let names: Vec<&str> = sheet.inputs().map(|(name, _)| name).collect();
    assert_eq!(names, ["price", "qty", "rate"]);
    assert_eq!(sheet.alias("subtotal"), Some("Pre-tax total"));

    sheet.set_input("price", "10");
    sheet.set_input("qty", "3");
    sheet.set_input("rate", "0.1");

    let outcome = sheet.calculate().unwrap();
    assert_eq!(outcome.result(), Some(&Value::Number(33.0)));
    assert_eq!(outcome.output("total"), Some(&Value::Number(33.0)));

    let visible: Vec<&str> = outcome.outputs().map(|(name, _)| name).collect();
    assert_eq!(visible, ["subtotal", "tax", "total"]);
}
