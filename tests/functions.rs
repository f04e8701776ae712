use fitscope::data::fitting::FittingAssignment;
use fitscope::data::functions::{default_functions, FitFunction, FunctionField, FunctionTable};
use fitscope::error::ValidationError;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn default_table_has_six_valid_functions() {
    let table = FunctionTable::default();
    assert_eq!(table.len(), 6);
    assert!(table.validate().is_ok());
    assert_eq!(table.names()[0], "Exp_Decay");
}

#[test]
fn leading_digit_name_is_rejected() {
    let f = FitFunction::new("1bad", "m*x+b", "m=0.1,b=0.0");
    assert_eq!(
        f.validate(),
        Err(ValidationError::InvalidName {
            function: "1bad".to_string()
        })
    );
}

#[test]
fn well_formed_function_is_accepted() {
    let f = FitFunction::new("good_1", "m*x+b", "m=0.1,b=0.0");
    let params = f.validate().unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].name, "m");
    assert!((params[0].value - 0.1).abs() < 1e-12);
}

#[test]
fn empty_parameters_are_allowed() {
    let f = FitFunction::new("flat", "c", "  ");
    assert_eq!(f.validate().unwrap(), vec![]);
}

#[test]
fn empty_equation_is_rejected() {
    let f = FitFunction::new("flat", "   ", "");
    assert!(matches!(f.validate(), Err(ValidationError::EmptyEquation { .. })));
}

#[test]
fn parameter_with_two_equals_is_malformed() {
    let f = FitFunction::new("lin", "m*x", "m=0.1=x");
    assert!(matches!(
        f.validate(),
        Err(ValidationError::MalformedParameter { .. })
    ));
}

#[test]
fn non_numeric_parameter_value_is_rejected() {
    let f = FitFunction::new("lin", "m*x", "m=abc");
    let err = f.validate().unwrap_err();
    assert!(matches!(err, ValidationError::NonNumericValue { .. }));
    assert!(err.to_string().contains("\"lin\""));
}

#[test]
fn bad_parameter_name_is_rejected() {
    let f = FitFunction::new("lin", "m*x", "2m=1");
    assert!(matches!(
        f.validate(),
        Err(ValidationError::InvalidParameterName { .. })
    ));
}

#[test]
fn table_edits() {
    let mut table = FunctionTable::from_functions(Vec::new());
    assert!(!table.remove_last());
    table.add();
    assert_eq!(table.len(), 1);
    assert!(table.names().is_empty());
    assert!(table.set_field(0, FunctionField::Name, " sq "));
    assert!(!table.set_field(3, FunctionField::Name, "x"));
    assert_eq!(table.names(), vec!["sq"]);
    assert_eq!(table.to_payload()[0].name, "sq");
    table.reset();
    assert_eq!(table.functions(), default_functions().as_slice());
}

#[test]
fn rebuild_keeps_choices_whose_function_survives() {
    let mut fitting = FittingAssignment::new();
    let features = strings(&["main_id", "temp", "time"]);
    let targets = strings(&["yield", "main_id"]);
    fitting.rebuild(&features, &targets, &strings(&["Linear", "Gaussian"]));
    assert_eq!(fitting.rows().count(), 2);
    assert!(fitting.assign("temp", "yield", "Linear"));
    assert!(fitting.assign("time", "yield", "Gaussian"));
    assert!(!fitting.assign("main_id", "yield", "Linear"));

    fitting.rebuild(&features, &targets, &strings(&["Linear"]));
    assert_eq!(fitting.get("temp", "yield"), Some("Linear"));
    assert_eq!(fitting.get("time", "yield"), None);
    assert_eq!(fitting.to_payload()["time"]["yield"], "");
}

#[test]
fn rebuild_drops_vanished_columns() {
    let mut fitting = FittingAssignment::new();
    fitting.rebuild(&strings(&["a", "b"]), &strings(&["t"]), &strings(&["f"]));
    fitting.assign("b", "t", "f");
    fitting.rebuild(&strings(&["a"]), &strings(&["t"]), &strings(&["f"]));
    assert!(fitting.to_payload().get("b").is_none());
}
