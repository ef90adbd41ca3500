use crate::goto_programs::goto_expressions::ExpressionBuilder;
use crate::goto_programs::goto_nodes::{Instruction, InstructionId, Origin};
use crate::goto_programs::goto_program::GotoProgram;
use crate::goto_programs::remove_skip::remove_skips_where;
use crate::induction_messages::induction_errors::InductionError;
use crate::return_invariant_error;
use rustc_hash::{FxHashMap, FxHashSet};

/// Where each unwound iteration ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationPoints {
    /// Marker SKIP placed right after the back edge of the original iteration.
    /// Never removed by the cleanup of the copy.
    pub first_iteration_exit: InstructionId,

    /// Last surviving instruction of the copy.
    /// `None` when the copy consisted of SKIPs only and all of them were cleaned up.
    pub duplicate_exit: Option<InstructionId>,
}

// How a jump of a copied instruction is resolved once the copies have ids
enum CopiedTarget {
    // Index into the copied sequence
    Internal(usize),
    External(InstructionId),
}

/// Splices one copy of the body `[loop_head, loop_exit)` in front of the back edge.
///
/// Scaffolding inside the body is not copied.
/// Branches inside the copy are remapped onto the copy, branches that leave the body are kept.
/// A branch to anything in the body that has no copy can't be resolved and is fatal.
pub fn duplicate_loop_body(
    program: &mut GotoProgram,
    loop_head: InstructionId,
    loop_exit: InstructionId,
    builder: &dyn ExpressionBuilder,
) -> Result<IterationPoints, InductionError> {
    let body = program.range(loop_head, loop_exit)?;
    if body.is_empty() {
        return_invariant_error!(
            "Loop {} has no body to duplicate",
            loop_head;
            { LoopHead => loop_head.to_string(), LoopExit => loop_exit.to_string() }
        );
    }

    let Some(after_exit) = program.next(loop_exit) else {
        return_invariant_error!(
            "Loop exit {} is the last instruction of the function",
            loop_exit;
            { LoopHead => loop_head.to_string(), LoopExit => loop_exit.to_string() }
        );
    };

    // Target map: original instruction -> position in the copied sequence
    let in_body: FxHashSet<InstructionId> = body.iter().copied().collect();
    let mut target_map: FxHashMap<InstructionId, usize> = FxHashMap::default();
    let mut originals = Vec::with_capacity(body.len());

    for id in body {
        if program.instruction(id)?.is_scaffolding() {
            continue;
        }
        target_map.insert(id, originals.len());
        originals.push(id);
    }

    // Every target is classified before the program is touched
    let mut copies = Vec::with_capacity(originals.len());
    let mut copied_targets = Vec::with_capacity(originals.len());

    for id in originals {
        let original = program.instruction(id)?;
        let mut targets = Vec::with_capacity(original.targets.len());

        for target in &original.targets {
            if let Some(index) = target_map.get(target) {
                targets.push(CopiedTarget::Internal(*index));
            } else if in_body.contains(target) {
                return_invariant_error!(
                    "Branch at {} goes to {} inside the loop, which has no copy",
                    id,
                    target;
                    {
                        LoopHead => loop_head.to_string(),
                        Instruction => id.to_string(),
                        Target => target.to_string(),
                    }
                );
            } else if !program.contains(*target) {
                return_invariant_error!(
                    "Branch at {} goes to {}, which is not part of the program",
                    id,
                    target;
                    { Instruction => id.to_string(), Target => target.to_string() }
                );
            } else {
                targets.push(CopiedTarget::External(*target));
            }
        }

        copies.push(original.duplicate());
        copied_targets.push(targets);
    }

    let (location, function) = {
        let exit = program.instruction(loop_exit)?;
        (exit.location.clone(), exit.function.clone())
    };

    // A back edge that isn't always taken would fall through into the copy
    if !program.instruction(loop_exit)?.is_unconditional_goto() {
        let guard = Instruction::goto(after_exit, builder.true_expr())
            .with_location(location.clone())
            .with_function(function.as_str())
            .with_origin(Origin::InductionScaffold);
        program.insert_before(after_exit, guard)?;
    }

    let marker = Instruction::skip()
        .with_location(location)
        .with_function(function.as_str())
        .with_origin(Origin::InductionScaffold);
    let first_iteration_exit = program.insert_before(after_exit, marker)?;

    let new_ids = program.insert_sequence_before(loop_exit, copies)?;

    for (new_id, targets) in new_ids.iter().zip(copied_targets) {
        let resolved = targets
            .into_iter()
            .map(|target| match target {
                CopiedTarget::Internal(index) => new_ids[index],
                CopiedTarget::External(id) => id,
            })
            .collect();

        program.instruction_mut(*new_id)?.targets = resolved;
    }

    // Only the copy is cleaned up, the marker and any original SKIP stay
    let copied: FxHashSet<InstructionId> = new_ids.iter().copied().collect();
    remove_skips_where(program, |id, _| copied.contains(&id))?;

    let duplicate_exit = new_ids.iter().rev().copied().find(|id| program.contains(*id));

    Ok(IterationPoints {
        first_iteration_exit,
        duplicate_exit,
    })
}
