use super::test_support::*;
use crate::goto_programs::goto_expressions::{Expr, SimplifyingExprBuilder};
use crate::goto_programs::goto_nodes::{Instruction, InstructionId, InstructionKind};
use crate::goto_programs::goto_program::GotoProgram;
use crate::k_induction::assert_to_assume::convert_assert_to_assume;
use crate::k_induction::duplicate_loop_body::duplicate_loop_body;

/// ```text
/// #0  ASSERT x                      before the loop
/// #1  IF !(x > 0) THEN GOTO #5      loop head
/// #2  ASSERT x > 0
/// #3  x := x - 1
/// #4  GOTO #1                       loop exit
/// #5  ASSERT x                      after the loop
/// #6  END_FUNCTION
/// ```
fn loop_with_asserts() -> GotoProgram {
    let mut program = GotoProgram::new();
    program.push_back(at(Instruction::assert(var("x")), 1));
    program.push_back(at(Instruction::goto(InstructionId(5), Expr::not(x_positive())), 2));
    program.push_back(at(Instruction::assert(x_positive()), 3));
    program.push_back(at(decrement("x"), 4));
    program.push_back(at(Instruction::goto(InstructionId(1), Expr::true_expr()), 2));
    program.push_back(at(Instruction::assert(var("x")), 5));
    program.push_back(at(Instruction::end_function(), 6));
    program
}

#[test]
fn asserts_inside_the_loop_become_assumes() {
    let mut program = loop_with_asserts();

    let converted = convert_assert_to_assume(&mut program, InstructionId(1), InstructionId(4)).unwrap();

    assert_eq!(converted, 1);
    let instruction = program.get(InstructionId(2)).unwrap();
    assert_eq!(instruction.kind, InstructionKind::Assume);
    assert_eq!(instruction.guard, x_positive());
    assert_eq!(instruction.location, location(3));
}

#[test]
fn asserts_outside_the_loop_are_kept() {
    let mut program = loop_with_asserts();

    convert_assert_to_assume(&mut program, InstructionId(1), InstructionId(4)).unwrap();

    assert_eq!(program.get(InstructionId(0)).unwrap().kind, InstructionKind::Assert);
    assert_eq!(program.get(InstructionId(5)).unwrap().kind, InstructionKind::Assert);
}

#[test]
fn duplicated_asserts_stay_asserts() {
    let mut program = loop_with_asserts();
    duplicate_loop_body(&mut program, InstructionId(1), InstructionId(4), &SimplifyingExprBuilder)
        .unwrap();

    let converted = convert_assert_to_assume(&mut program, InstructionId(1), InstructionId(4)).unwrap();

    assert_eq!(converted, 1);
    let copied_asserts = program
        .iter()
        .filter(|(_, instruction)| instruction.is_assert() && instruction.guard == x_positive())
        .count();
    assert_eq!(copied_asserts, 1);
}

#[test]
fn loop_without_asserts_is_unchanged() {
    let (mut program, natural_loop) = countdown_loop();
    let before = program.clone();

    let converted = convert_assert_to_assume(
        &mut program,
        natural_loop.original_loop_head(),
        natural_loop.original_loop_exit(),
    )
    .unwrap();

    assert_eq!(converted, 0);
    assert_eq!(program, before);
}
