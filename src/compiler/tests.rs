//! Unit tests for code generation and the stack machine.

use super::{
    backend::{Backend, CompileOptions, Target},
    bytecode::{BytecodeBackend, BytecodeProgram, Instruction},
    compiler::{compile, Compiler},
    dc::{storage_for, DcBackend, Storage, REGISTERS, SCRATCH_REGISTER},
    vm::{Machine, Value, VmError},
};
use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        expressions::{BinaryExpr, NumberExpr, SymbolExpr},
        statements::{AssignmentStmt, Identifier, PrintStmt, VarDeclStmt},
        types::{LangType, Operator},
    },
    errors::errors::{ErrorImpl, ErrorStage},
    parser::parser::parse,
    symbol_table::symbol_table::Slot,
    type_checker::type_checker::type_check,
};

fn checked(source: &str) -> Program {
    let mut program = parse(source, None).unwrap();
    type_check(&mut program, None).unwrap();
    program
}

fn dc(source: &str) -> String {
    compile(&checked(source), None, &CompileOptions::default()).unwrap()
}

fn bytecode(source: &str) -> BytecodeProgram {
    Compiler::new(BytecodeBackend::new(), None)
        .gen(&checked(source))
        .unwrap()
}

fn run(source: &str) -> Vec<Value> {
    Machine::new().run(&bytecode(source)).unwrap()
}

fn decl(name: &str, ty: LangType, value: Option<Expr>) -> Stmt {
    Stmt::VarDecl(VarDeclStmt::new(Identifier::new(name, 1).unwrap(), ty, value, 1))
}

#[test]
fn test_dc_round_trip_program() {
    assert_eq!(
        dc("int a = 10; float b = 2.5; b = b + a; print b;"),
        "20 k\n10 sa\n2.5 sb\nlb la +\nsb\nlb\np\nsi\n"
    );
}

#[test]
fn test_dc_empty_program_is_preamble_only() {
    assert_eq!(dc(""), "20 k\n");
}

#[test]
fn test_dc_precision_is_configurable() {
    let options = CompileOptions {
        target: Target::Dc,
        precision: 5,
    };
    let out = compile(&checked("float f = 1.5;"), None, &options).unwrap();
    assert!(out.starts_with("5 k\n"));
}

#[test]
fn test_dc_declaration_without_initializer_emits_nothing() {
    assert_eq!(dc("int a; float b;"), "20 k\n");
}

#[test]
fn test_dc_operands_precede_operators() {
    // a * (b - 2)  =>  la lb 2 - *
    assert_eq!(
        dc("int a = 1; int b = 5; int c = a * (b - 2);"),
        "20 k\n1 sa\n5 sb\nla lb 2 -\n*\nsc\n"
    );
}

#[test]
fn test_dc_int_division_truncates() {
    assert_eq!(
        dc("int a = 7; int b = a / 2;"),
        "20 k\n7 sa\nla 2 0 k\n/\n20 k\nsb\n"
    );
}

#[test]
fn test_dc_float_division_keeps_precision() {
    assert_eq!(dc("float a = 7.0; a = a / 2.0;"), "20 k\n7.0 sa\nla 2.0 /\nsa\n");
}

#[test]
fn test_dc_negative_literal_uses_underscore() {
    let mut program = Program::new(1);
    program.push(decl(
        "a",
        LangType::Int,
        Some(Expr::Number(NumberExpr::new("-5", LangType::Int, 1).unwrap())),
    ));

    let out = compile(&program, None, &CompileOptions::default()).unwrap();
    assert_eq!(out, "20 k\n_5 sa\n");
}

#[test]
fn test_dc_registers_skip_scratch() {
    let source: String = (0..10).map(|n| format!("int v{} = {};", n, n)).collect();
    let out = dc(&source);

    assert!(out.contains("7 sh\n"));
    assert!(out.contains("8 sj\n"));
    assert!(!out.contains(&format!("s{}\n", SCRATCH_REGISTER)));
}

#[test]
fn test_dc_spills_past_named_registers() {
    let count = REGISTERS.len() + 2;
    let mut source: String = (0..count)
        .map(|n| format!("int v{} = {};\n", n, n))
        .collect();
    source.push_str("int w = v51 + v0;\nprint w;\nprint v52;\n");

    let out = dc(&source);

    assert!(out.contains("50 sZ\n"));
    assert!(out.contains("51 0 :i\n"));
    assert!(out.contains("52 1 :i\n"));
    assert!(out.contains("0 ;i la +\n2 :i\n"));
    assert!(out.ends_with("2 ;i\np\nsi\n1 ;i\np\nsi\n"));
}

#[test]
fn test_storage_for_slots() {
    assert_eq!(storage_for(Slot(0)), Storage::Register('a'));
    assert_eq!(storage_for(Slot(8)), Storage::Register('j'));
    assert_eq!(storage_for(Slot(50)), Storage::Register('Z'));
    assert_eq!(storage_for(Slot(51)), Storage::Spilled(0));
    assert_eq!(storage_for(Slot(1000)), Storage::Spilled(949));
}

#[test]
fn test_bytecode_listing() {
    let out = compile(
        &checked("int a = 10; float b = 2.5; b = b + a; print b;"),
        None,
        &CompileOptions::with_target(Target::Bytecode),
    )
    .unwrap();

    assert_eq!(
        out,
        ".slots 2\nipush 10\nistore 0\nfpush 2.5\nfstore 1\nfload 1\niload 0\ni2f\nfadd\nfstore 1\nfload 1\nfprint\npop\n"
    );
}

#[test]
fn test_bytecode_picks_opcode_by_operand_type() {
    let program = bytecode("int a = 6 / 4; float b = 6.0 / 4.0;");
    assert!(program.instructions.contains(&Instruction::IDiv));
    assert!(program.instructions.contains(&Instruction::FDiv));
}

#[test]
fn test_bytecode_slot_count() {
    let source: String = (0..100).map(|n| format!("int v{};", n)).collect();
    assert_eq!(bytecode(&source).slots, 100);
}

#[test]
fn test_bytecode_print_loads_prints_and_pops() {
    let program = bytecode("int a = 1; print a;");
    assert_eq!(
        program.instructions,
        vec![
            Instruction::IPush(1),
            Instruction::IStore(0),
            Instruction::ILoad(0),
            Instruction::IPrint,
            Instruction::Pop,
        ]
    );

    let mut machine = Machine::new();
    assert_eq!(machine.run(&program).unwrap(), vec![Value::Int(1)]);
    assert_eq!(machine.stack_depth(), 0);
}

#[test]
fn test_stack_is_empty_after_every_program_statement() {
    let mut machine = Machine::new();
    let program = bytecode("int a = 2; float b = a * 1.5; print a; print b; b = b / a; print b;");

    assert_eq!(
        machine.run(&program).unwrap(),
        vec![Value::Int(2), Value::Float(3.0), Value::Float(1.5)]
    );
    assert_eq!(machine.stack_depth(), 0);
}

#[test]
fn test_oversized_literal_is_lexical() {
    for target in [Target::Dc, Target::Bytecode] {
        let error = crate::compile(
            "int a = 99999999999999999999;",
            None,
            &CompileOptions::with_target(target),
        )
        .unwrap_err();

        assert_eq!(error.get_stage(), ErrorStage::Lexical);
        assert_eq!(error.get_error_name(), "MalformedNumber");
    }
}

#[test]
fn test_out_of_range_literal_node_rejected() {
    let error = NumberExpr::new("99999999999999999999", LangType::Int, 4).unwrap_err();
    assert_eq!(error.get_stage(), ErrorStage::Internal);
    assert_eq!(error.get_line(), 4);

    // A literal edited after construction is caught by the backend
    let mut literal = NumberExpr::new("1", LangType::Int, 1).unwrap();
    literal.value = String::from("99999999999999999999");
    let mut program = Program::new(1);
    program.push(decl("a", LangType::Int, Some(Expr::Number(literal))));

    let error = Compiler::new(BytecodeBackend::new(), None)
        .gen(&program)
        .unwrap_err();
    assert_eq!(error.get_stage(), ErrorStage::Internal);
    assert_eq!(
        *error.get_impl(),
        ErrorImpl::InvalidLiteral {
            literal: String::from("99999999999999999999"),
            ty: String::from("int"),
        }
    );
}

#[test]
fn test_unchecked_tree_is_an_internal_error() {
    // Int initializer for a Float variable with no Convert node
    let mut program = Program::new(1);
    program.push(decl(
        "f",
        LangType::Float,
        Some(Expr::Number(NumberExpr::new("3", LangType::Int, 1).unwrap())),
    ));

    let error = compile(&program, None, &CompileOptions::default()).unwrap_err();
    assert_eq!(error.get_stage(), ErrorStage::Internal);
    assert_eq!(error.get_error_name(), "UncheckedTypeMismatch");
}

#[test]
fn test_unbound_symbol_is_an_internal_error() {
    let mut program = Program::new(1);
    program.push(Stmt::Assignment(AssignmentStmt::new(
        Identifier::new("x", 1).unwrap(),
        Expr::Number(NumberExpr::new("1", LangType::Int, 1).unwrap()),
        1,
    )));

    let error = compile(&program, None, &CompileOptions::default()).unwrap_err();
    assert_eq!(error.get_stage(), ErrorStage::Internal);
    assert_eq!(
        *error.get_impl(),
        ErrorImpl::UnboundSymbol {
            variable: String::from("x")
        }
    );
}

#[test]
fn test_api_built_tree_compiles_after_checking() {
    let mut program = Program::new(1);
    program.push(decl(
        "a",
        LangType::Int,
        Some(Expr::Number(NumberExpr::new("-4", LangType::Int, 1).unwrap())),
    ));
    program.push(decl(
        "b",
        LangType::Float,
        Some(Expr::Binary(BinaryExpr::new(
            Operator::Mul,
            Expr::Symbol(SymbolExpr::new("a", 1).unwrap()),
            Expr::Number(NumberExpr::new("0.5", LangType::Float, 1).unwrap()),
            1,
        ))),
    ));
    program.push(Stmt::Print(PrintStmt::new(Identifier::new("b", 1).unwrap(), 1)));

    type_check(&mut program, None).unwrap();
    let listing = Compiler::new(BytecodeBackend::new(), None)
        .gen(&program)
        .unwrap();

    assert_eq!(Machine::new().run(&listing).unwrap(), vec![Value::Float(-2.0)]);
}

#[test]
fn test_dc_backend_alone() {
    let mut backend = DcBackend::new(3);
    backend.preamble();
    backend.convert(LangType::Int, LangType::Float);
    assert_eq!(backend.finish(0), "3 k\n");
}

#[test]
fn test_machine_runs_round_trip() {
    assert_eq!(
        run("int a = 10; float b = 2.5; b = b + a; print b;"),
        vec![Value::Float(12.5)]
    );
}

#[test]
fn test_machine_arithmetic() {
    assert_eq!(
        run("int a = 2 + 3 * 4; print a; int b = (2 + 3) * 4; print b; int c = 10 - 4 - 3; print c;"),
        vec![Value::Int(14), Value::Int(20), Value::Int(3)]
    );
}

#[test]
fn test_machine_int_division_truncates() {
    assert_eq!(
        run("int a = 7 / 2; print a; float f = 7 / 2; print f; float g = 7 / 2.0; print g;"),
        vec![Value::Int(3), Value::Float(3.0), Value::Float(3.5)]
    );
}

#[test]
fn test_machine_unset_slot_reads_zero() {
    assert_eq!(run("int a; print a; float b; print b;"), vec![Value::Int(0), Value::Float(0.0)]);
}

#[test]
fn test_machine_division_by_zero() {
    let error = Machine::new().run(&bytecode("int a = 0; int b = 1 / a;")).unwrap_err();
    assert!(matches!(error, VmError::DivisionByZero { .. }));
}

#[test]
fn test_machine_stack_underflow() {
    let program = BytecodeProgram {
        slots: 0,
        instructions: vec![Instruction::IAdd],
    };
    assert_eq!(
        Machine::new().run(&program).unwrap_err(),
        VmError::StackUnderflow { pc: 0 }
    );
}

#[test]
fn test_machine_rejects_wrong_operand_type() {
    let program = BytecodeProgram {
        slots: 0,
        instructions: vec![Instruction::FPush(1.0), Instruction::IPush(1), Instruction::IAdd],
    };
    assert_eq!(
        Machine::new().run(&program).unwrap_err(),
        VmError::TypeMismatch {
            pc: 2,
            expected: LangType::Int,
            found: LangType::Float,
        }
    );
}

#[test]
fn test_machine_overflow() {
    let program = BytecodeProgram {
        slots: 0,
        instructions: vec![
            Instruction::IPush(i64::MAX),
            Instruction::IPush(1),
            Instruction::IAdd,
        ],
    };
    assert!(matches!(
        Machine::new().run(&program),
        Err(VmError::Overflow { pc: 2 })
    ));
}

#[test]
fn test_value_display() {
    assert_eq!(Value::Int(3).to_string(), "3");
    assert_eq!(Value::Float(3.0).to_string(), "3.0");
    assert_eq!(Value::Float(12.5).to_string(), "12.5");
}
