use crate::goto_programs::goto_expressions::NondetSource;
use crate::goto_programs::goto_nodes::{Instruction, InstructionId, Origin};
use crate::goto_programs::goto_program::GotoProgram;
use crate::induction_messages::induction_errors::InductionError;
use crate::k_induction::loop_state::LoopState;
use crate::return_invariant_error;

/// Inserts `var := nondet()` for every field of the state as one block right before the loop head.
/// Returns the ids of the inserted assignments in order.
pub fn make_nondet_assign(
    program: &mut GotoProgram,
    loop_head: InstructionId,
    state: LoopState,
    nondet: &dyn NondetSource,
) -> Result<Vec<InstructionId>, InductionError> {
    let head = program.instruction(loop_head)?;
    let location = head.location.clone();
    let function = head.function.clone();

    let assignments = state
        .into_fields()
        .into_iter()
        .map(|field| {
            let rhs = nondet.nondet_value(&field.ty);
            Instruction::assign(field.as_expr(), rhs)
                .with_location(location.clone())
                .with_function(function.as_str())
                .with_origin(Origin::InductionScaffold)
        })
        .collect();

    program.insert_sequence_before(loop_head, assignments)
}

/// First instruction at or after `from` that the transformation didn't create.
pub fn skip_scaffolding(program: &GotoProgram, from: InstructionId) -> Option<InstructionId> {
    let mut cursor = Some(from);

    while let Some(id) = cursor {
        match program.get(id) {
            Some(instruction) if instruction.is_scaffolding() => cursor = program.next(id),
            Some(_) => return Some(id),
            None => return None,
        }
    }

    None
}

/// The loop head found by skipping over the scaffold block starting at `scaffold_start`.
/// It has to be the head the loop had before anything was inserted.
pub fn updated_loop_head(
    program: &GotoProgram,
    scaffold_start: InstructionId,
    original_head: InstructionId,
) -> Result<InstructionId, InductionError> {
    match skip_scaffolding(program, scaffold_start) {
        Some(head) if head == original_head => Ok(head),
        Some(head) => return_invariant_error!(
            "Scaffolding starting at {} ends at {} instead of the loop head {}",
            scaffold_start,
            head,
            original_head;
            { LoopHead => original_head.to_string() }
        ),
        None => return_invariant_error!(
            "Scaffolding starting at {} runs off the end of the function",
            scaffold_start;
            { LoopHead => original_head.to_string() }
        ),
    }
}
