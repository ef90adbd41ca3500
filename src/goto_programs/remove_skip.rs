use crate::goto_programs::goto_nodes::{Instruction, InstructionId};
use crate::goto_programs::goto_program::GotoProgram;
use crate::induction_messages::induction_errors::InductionError;
use rustc_hash::FxHashSet;

/// Removes the SKIP instructions accepted by `predicate`.
///
/// Jumps to a removed skip are redirected to the first following instruction
/// that survives. A skip with no surviving successor is kept, so nothing ends up
/// without a place to jump to.
/// Returns how many instructions were removed.
pub fn remove_skips_where<F>(program: &mut GotoProgram, predicate: F) -> Result<usize, InductionError>
where
    F: Fn(InstructionId, &Instruction) -> bool,
{
    let candidates: FxHashSet<InstructionId> = program
        .iter()
        .filter(|(id, instruction)| instruction.is_skip() && predicate(*id, instruction))
        .map(|(id, _)| id)
        .collect();

    if candidates.is_empty() {
        return Ok(0);
    }

    let mut removed = 0;
    let order: Vec<InstructionId> = program
        .ids()
        .filter(|id| candidates.contains(id))
        .collect();

    for skip in order {
        let mut successor = program.next(skip);
        while let Some(id) = successor {
            if !candidates.contains(&id) {
                break;
            }
            successor = program.next(id);
        }

        // Nothing left to fall through to
        let Some(successor) = successor else {
            continue;
        };

        program.redirect_targets(skip, successor, |_| true);
        program.remove(skip)?;
        removed += 1;
    }

    Ok(removed)
}

/// Removes every SKIP in the program.
pub fn remove_skips(program: &mut GotoProgram) -> Result<usize, InductionError> {
    remove_skips_where(program, |_, _| true)
}
