use super::symbol_table::{Slot, Symbol, SymbolTable};
use crate::{ast::types::LangType, Position};

#[test]
fn test_declare_and_lookup() {
    let mut table = SymbolTable::new();
    table
        .declare("a", Symbol::new(LangType::Int), Position::line_only(1))
        .unwrap();

    assert_eq!(table.lookup("a"), Some(&Symbol::new(LangType::Int)));
    assert_eq!(table.lookup("b"), None);
}

#[test]
fn test_redeclaration_in_same_scope() {
    let mut table = SymbolTable::new();
    table
        .declare("a", Symbol::new(LangType::Int), Position::line_only(1))
        .unwrap();

    let error = table
        .declare("a", Symbol::new(LangType::Float), Position::line_only(2))
        .unwrap_err();
    assert_eq!(error.get_error_name(), "VariableAlreadyDeclared");
    assert_eq!(error.get_line(), 2);
    // The first binding is untouched
    assert_eq!(table.lookup("a").unwrap().ty, LangType::Int);
}

#[test]
fn test_shadowing_reverts_on_exit() {
    let mut table = SymbolTable::new();
    table
        .declare("x", Symbol::with_slot(LangType::Int, Slot(0)), Position::line_only(1))
        .unwrap();

    table.enter_scope();
    table
        .declare("x", Symbol::with_slot(LangType::Float, Slot(1)), Position::line_only(2))
        .unwrap();
    assert_eq!(table.lookup("x").unwrap().ty, LangType::Float);
    assert_eq!(table.lookup("x").unwrap().slot, Some(Slot(1)));

    assert!(table.exit_scope());
    assert_eq!(table.lookup("x").unwrap().ty, LangType::Int);
    assert_eq!(table.lookup("x").unwrap().slot, Some(Slot(0)));
}

#[test]
fn test_outer_names_visible_in_inner_scope() {
    let mut table = SymbolTable::new();
    table
        .declare("outer", Symbol::new(LangType::Float), Position::line_only(1))
        .unwrap();
    table.enter_scope();
    table.enter_scope();

    assert_eq!(table.depth(), 3);
    assert!(table.lookup("outer").is_some());
}

#[test]
fn test_global_scope_is_never_popped() {
    let mut table = SymbolTable::new();
    table
        .declare("g", Symbol::new(LangType::Int), Position::line_only(1))
        .unwrap();

    assert!(!table.exit_scope());
    assert_eq!(table.depth(), 1);
    assert!(table.lookup("g").is_some());
}

#[test]
fn test_fetch_reports_undeclared() {
    let table = SymbolTable::new();
    let error = table.fetch("nope", Position::line_only(9)).unwrap_err();
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
    assert_eq!(error.get_line(), 9);
}
