use crate::goto_programs::goto_nodes::InstructionId;
use crate::goto_programs::goto_program::GotoProgram;
use crate::induction_messages::induction_errors::InductionError;
use crate::k_induction::loop_condition::LoopCondition;
use crate::return_invariant_error;
use rustc_hash::FxHashSet;

/// Jumps from outside `[loop_head, loop_exit]` that entered the loop at its head
/// now enter at `scaffold_start`, so they run the pre-loop scaffolding too.
/// Jumps from inside the loop keep going to the head.
pub fn redirect_loop_entry(
    program: &mut GotoProgram,
    loop_head: InstructionId,
    loop_exit: InstructionId,
    scaffold_start: InstructionId,
) -> Result<usize, InductionError> {
    let mut inside: FxHashSet<InstructionId> =
        program.range(loop_head, loop_exit)?.into_iter().collect();
    inside.insert(loop_exit);

    Ok(program.redirect_targets(loop_head, scaffold_start, |source| {
        !inside.contains(&source)
    }))
}

/// Re-establishes the loop's own edges after scaffolding was inserted around it.
///
/// The back edge at `loop_exit` goes to `loop_head` and nowhere else.
/// Once `post_loop_assume` sits right after the exit, the condition branch leaves the loop
/// through it: the branch's original exit target is replaced by the assume.
/// Whatever follows the exit (scaffolding or copies of other loops) plays no part in this.
pub fn adjust_loop_head_and_exit(
    program: &mut GotoProgram,
    loop_head: InstructionId,
    loop_exit: InstructionId,
    loop_cond: &LoopCondition,
    post_loop_assume: Option<InstructionId>,
) -> Result<(), InductionError> {
    let back_edge = program.instruction_mut(loop_exit)?;
    if !back_edge.is_goto() {
        return_invariant_error!(
            "Loop exit {} is a {} instead of a backwards GOTO",
            loop_exit,
            back_edge.kind;
            { LoopHead => loop_head.to_string(), LoopExit => loop_exit.to_string() }
        );
    }

    back_edge.targets.clear();
    back_edge.targets.push(loop_head);

    let Some(assume) = post_loop_assume else {
        return Ok(());
    };

    if program.next(loop_exit) != Some(assume) {
        return_invariant_error!(
            "Post-loop assumption {} does not directly follow loop exit {}",
            assume,
            loop_exit;
            { LoopHead => loop_head.to_string(), LoopExit => loop_exit.to_string() }
        );
    }

    let Some(exit_target) = loop_cond.exit_target else {
        return_invariant_error!(
            "Loop condition at {} never leaves the loop, so nothing reaches the assumption at {}",
            loop_cond.branch,
            assume;
            {
                LoopHead => loop_head.to_string(),
                LoopExit => loop_exit.to_string(),
                Instruction => loop_cond.branch.to_string(),
                PrimarySuggestion => "Turn off forward_condition in the [k_induction] config for loops that are only left through a break",
            }
        );
    };

    if !program
        .instruction_mut(loop_cond.branch)?
        .redirect_target(exit_target, assume)
    {
        return_invariant_error!(
            "Loop condition at {} no longer jumps to its exit target {}",
            loop_cond.branch,
            exit_target;
            {
                LoopHead => loop_head.to_string(),
                Instruction => loop_cond.branch.to_string(),
                Target => exit_target.to_string(),
            }
        );
    }

    Ok(())
}
