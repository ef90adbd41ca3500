use crate::goto_programs::goto_nodes::{InstructionId, InstructionKind, Origin};
use crate::goto_programs::goto_program::GotoProgram;
use crate::induction_messages::induction_errors::InductionError;

/// Turns the ASSERTs of `[loop_head, loop_exit)` into ASSUMEs with the same condition.
/// Instructions of the duplicated body are left alone. Returns how many were converted.
pub fn convert_assert_to_assume(
    program: &mut GotoProgram,
    loop_head: InstructionId,
    loop_exit: InstructionId,
) -> Result<usize, InductionError> {
    let mut converted = 0;

    for id in program.range(loop_head, loop_exit)? {
        let instruction = program.instruction_mut(id)?;
        if instruction.is_assert() && instruction.origin == Origin::SourceProgram {
            instruction.kind = InstructionKind::Assume;
            converted += 1;
        }
    }

    Ok(converted)
}
