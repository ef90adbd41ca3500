use crate::goto_programs::goto_expressions::{Expr, ExpressionBuilder};
use crate::goto_programs::goto_nodes::{Instruction, InstructionId, Origin};
use crate::goto_programs::goto_program::GotoProgram;
use crate::induction_messages::induction_errors::InductionError;

/// Cancels double negations, then strips one leading negation.
///
/// Loops usually branch out on `!c`, so the condition that holds inside the loop is `c`.
/// `normalize_loop_cond(!!g) == normalize_loop_cond(g)` for every `g`.
pub fn normalize_loop_cond(loop_cond: &Expr) -> Expr {
    let mut current = loop_cond;

    while let Expr::Not(inner) = current {
        match inner.as_ref() {
            Expr::Not(operand) => current = operand.as_ref(),
            _ => break,
        }
    }

    match current {
        Expr::Not(operand) => operand.as_ref().clone(),
        other => other.clone(),
    }
}

/// Base case: the loop is entered with its condition holding.
pub fn assume_loop_cond_before_loop(
    program: &mut GotoProgram,
    loop_head: InstructionId,
    loop_cond: &Expr,
) -> Result<InstructionId, InductionError> {
    let head = program.instruction(loop_head)?;
    let assume = Instruction::assume(normalize_loop_cond(loop_cond))
        .with_location(head.location.clone())
        .with_function(head.function.as_str())
        .with_origin(Origin::InductionScaffold);

    program.insert_before(loop_head, assume)
}

/// Forward condition: once the unwinding is done, the loop condition must have become false.
pub fn assume_neg_loop_cond_after_loop(
    program: &mut GotoProgram,
    loop_exit: InstructionId,
    loop_cond: &Expr,
    builder: &dyn ExpressionBuilder,
) -> Result<InstructionId, InductionError> {
    let exit = program.instruction(loop_exit)?;
    let negated = builder.negate(&normalize_loop_cond(loop_cond));
    let assume = Instruction::assume(negated)
        .with_location(exit.location.clone())
        .with_function(exit.function.as_str())
        .with_origin(Origin::InductionScaffold);

    program.insert_after(loop_exit, assume)
}
