use crate::goto_programs::goto_expressions::Expr;
use crate::goto_programs::goto_nodes::InstructionId;
use crate::goto_programs::goto_program::GotoProgram;
use crate::induction_messages::induction_errors::InductionError;

/// The guard controlling a loop and the branch it was taken from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopCondition {
    /// Original polarity. For a `while (c)` loop this is usually `!c`,
    /// the condition under which the loop is left.
    pub guard: Expr,
    pub branch: InstructionId,

    /// First target of `branch` outside `[loop_head, loop_exit]`, as it was before any scaffolding.
    /// `None` when the branch only jumps around inside the loop.
    pub exit_target: Option<InstructionId>,
}

/// Finds the first conditional branch of the body `[loop_head, loop_exit)`.
///
/// Returns `None` when the body has no conditional branch before the exit.
/// An exit that can't be reached from the head is a broken invariant.
pub fn get_loop_cond(
    program: &GotoProgram,
    loop_head: InstructionId,
    loop_exit: InstructionId,
) -> Result<Option<LoopCondition>, InductionError> {
    let body = program.range(loop_head, loop_exit)?;

    for &id in &body {
        let instruction = program.instruction(id)?;
        if !instruction.is_conditional_branch() {
            continue;
        }

        let exit_target = instruction
            .targets
            .iter()
            .copied()
            .find(|target| *target != loop_exit && !body.contains(target));

        return Ok(Some(LoopCondition {
            guard: instruction.guard.clone(),
            branch: id,
            exit_target,
        }));
    }

    Ok(None)
}
