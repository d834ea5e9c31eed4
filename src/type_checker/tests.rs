//! Unit tests for the type checker.

use super::type_checker::{type_check, TypeChecker};
use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        types::{LangType, Operator},
    },
    errors::errors::{ErrorImpl, ErrorStage},
    parser::parser::parse,
};

fn checked(source: &str) -> (Program, usize) {
    let mut program = parse(source, Some("test.dc")).unwrap();
    let conversions = type_check(&mut program, Some("test.dc")).unwrap();
    (program, conversions)
}

fn check_error(source: &str) -> crate::errors::errors::Error {
    let mut program = parse(source, Some("test.dc")).unwrap();
    type_check(&mut program, Some("test.dc")).unwrap_err()
}

#[test]
fn test_round_trip_program_inserts_one_conversion() {
    let (program, conversions) = checked("int a = 10; float b = 2.5; b = b + a; print b;");

    assert_eq!(conversions, 1);
    assert_eq!(program.count_conversions(), 1);

    match &program.body[2] {
        Stmt::Assignment(assign) => match &assign.value {
            Expr::Binary(binary) => {
                assert_eq!(binary.operator, Operator::Add);
                assert!(matches!(&*binary.left, Expr::Symbol(s) if s.value == "b"));
                match &*binary.right {
                    Expr::Convert(convert) => {
                        assert_eq!(convert.target, LangType::Float);
                        assert!(matches!(&*convert.inner, Expr::Symbol(s) if s.value == "a"));
                    }
                    other => panic!("expected a conversion, got {:?}", other),
                }
            }
            other => panic!("unexpected value {:?}", other),
        },
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn test_int_int_inserts_nothing() {
    let (program, conversions) = checked("int a = 1; int b = a * 2 + 3 / a;");
    assert_eq!(conversions, 0);
    assert_eq!(program.count_conversions(), 0);
}

#[test]
fn test_float_float_inserts_nothing() {
    let (_, conversions) = checked("float a = 1.5; float b = a * 2.0;");
    assert_eq!(conversions, 0);
}

#[test]
fn test_float_declaration_widens_int_initializer() {
    let (program, conversions) = checked("float f = 3;");

    assert_eq!(conversions, 1);
    assert_eq!(program.to_string(), "float f = (float) 3;\n");
}

#[test]
fn test_float_assignment_widens_int_expression() {
    let (program, _) = checked("int i = 2; float f; f = i * i;");
    assert_eq!(program.body[2].to_string(), "f = (float) (i * i);");
}

#[test]
fn test_mixed_operands_wrap_only_the_int_side() {
    let (program, conversions) = checked("int i = 1; float f = 2.0; float r = f - i;");
    assert_eq!(conversions, 1);
    assert_eq!(program.body[2].to_string(), "float r = (f - (float) i);");

    let (program, conversions) = checked("int i = 1; float f = 2.0; float r = i / f;");
    assert_eq!(conversions, 1);
    assert_eq!(program.body[2].to_string(), "float r = ((float) i / f);");
}

#[test]
fn test_nested_widening() {
    // (i + j) stays Int, then widens as a whole against the float
    let (program, conversions) = checked("int i = 1; int j = 2; float f = 0.5; float r = (i + j) * f;");
    assert_eq!(conversions, 1);
    assert_eq!(program.body[3].to_string(), "float r = ((float) (i + j) * f);");
}

#[test]
fn test_narrowing_declaration_rejected() {
    let error = check_error("int a = 2.5;");

    assert_eq!(error.get_stage(), ErrorStage::Semantic);
    assert_eq!(
        *error.get_impl(),
        ErrorImpl::NarrowingConversion {
            variable: String::from("a"),
            expected: String::from("int"),
            received: String::from("float"),
        }
    );
}

#[test]
fn test_narrowing_assignment_rejected_regardless_of_nesting() {
    for source in [
        "float f = 1.0; int a; a = f;",
        "int a = 1; a = a + 0.5;",
        "int a = 1; int b = 2; a = (a * b) / (b - 1.0);",
        "int a = 1; a = ((((1.0))));",
    ] {
        let error = check_error(source);
        assert_eq!(error.get_error_name(), "NarrowingConversion", "{}", source);
    }
}

#[test]
fn test_use_before_declaration() {
    let error = check_error("int a = b;\nint b = 1;");

    assert_eq!(
        *error.get_impl(),
        ErrorImpl::VariableNotDeclared {
            variable: String::from("b")
        }
    );
    assert_eq!(error.get_line(), 1);
}

#[test]
fn test_assignment_to_undeclared() {
    let error = check_error("int a;\n\nc = 1;");
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
    assert_eq!(error.get_line(), 3);
}

#[test]
fn test_print_undeclared() {
    let error = check_error("print ghost;");
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
}

#[test]
fn test_print_accepts_either_type() {
    checked("int a = 1; float b = 1.0; print a; print b;");
}

#[test]
fn test_redeclaration_rejected() {
    let error = check_error("int a;\nfloat a;");

    assert_eq!(error.get_error_name(), "VariableAlreadyDeclared");
    assert_eq!(error.get_line(), 2);
}

#[test]
fn test_self_reference_in_initializer_resolves() {
    // The name is bound before its initializer is checked
    checked("int a = a + 1;");
}

#[test]
fn test_first_error_aborts() {
    let mut program = parse("int a = 1.5; print nope;", None).unwrap();
    let error = type_check(&mut program, None).unwrap_err();
    assert_eq!(error.get_error_name(), "NarrowingConversion");
}

#[test]
fn test_recheck_is_idempotent() {
    let (mut program, _) = checked("int a = 10; float b = 2.5; b = b + a; float c = a;");
    let before = program.clone();

    let mut checker = TypeChecker::new(None);
    checker.check_program(&mut program).unwrap();

    assert_eq!(checker.conversions_inserted(), 0);
    assert_eq!(program, before);
}
