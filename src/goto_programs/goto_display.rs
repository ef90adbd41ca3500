use crate::goto_programs::goto_nodes::{
    Instruction, InstructionCode, InstructionId, InstructionKind, Origin,
};
use crate::goto_programs::goto_program::GotoProgram;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt::{self, Write};

impl fmt::Display for GotoProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = jump_labels(self);
        for (id, instruction) in self.iter() {
            write_instruction(f, id, instruction, &labels)?;
        }
        Ok(())
    }
}

/// Listing of `[from, end)`, or from `from` to the end of the program.
pub fn display_range(program: &GotoProgram, from: InstructionId, end: Option<InstructionId>) -> String {
    let labels = jump_labels(program);
    let mut listing = String::new();

    let mut cursor = Some(from);
    while let Some(id) = cursor {
        if Some(id) == end {
            break;
        }

        if let Some(instruction) = program.get(id) {
            // Writing into a String can't fail
            let _ = write_instruction(&mut listing, id, instruction, &labels);
        }
        cursor = program.next(id);
    }

    listing
}

/// Label numbers for every jump target, in program order.
fn jump_labels(program: &GotoProgram) -> FxHashMap<InstructionId, u32> {
    let targets: FxHashSet<InstructionId> = program
        .iter()
        .flat_map(|(_, instruction)| instruction.targets.iter().copied())
        .collect();

    let mut labels = FxHashMap::default();
    let mut next_label = 1;
    for id in program.ids() {
        if targets.contains(&id) {
            labels.insert(id, next_label);
            next_label += 1;
        }
    }

    labels
}

fn write_instruction<W: Write>(
    out: &mut W,
    id: InstructionId,
    instruction: &Instruction,
    labels: &FxHashMap<InstructionId, u32>,
) -> fmt::Result {
    write!(out, "        // {id}")?;
    if !instruction.location.is_unknown() {
        write!(out, " {}", instruction.location)?;
    }
    match instruction.origin {
        Origin::SourceProgram => {}
        Origin::InductionScaffold => write!(out, " (k-induction)")?,
        Origin::LoopDuplicate => write!(out, " (loop copy)")?,
    }
    writeln!(out)?;

    match labels.get(&id) {
        Some(label) => write!(out, "{:>6}: ", label)?,
        None => write!(out, "        ")?,
    }

    match instruction.kind {
        InstructionKind::Goto => {
            if !instruction.guard.is_true() {
                write!(out, "IF {} THEN ", instruction.guard)?;
            }
            write!(out, "GOTO ")?;
            for (index, target) in instruction.targets.iter().enumerate() {
                if index > 0 {
                    write!(out, ", ")?;
                }
                match labels.get(target) {
                    Some(label) => write!(out, "{label}")?,
                    None => write!(out, "{target}?")?,
                }
            }
        }

        InstructionKind::Assume | InstructionKind::Assert => {
            write!(out, "{} {}", instruction.kind, instruction.guard)?;
        }

        _ => {
            write!(out, "{}", instruction.kind)?;
            write_code(out, &instruction.code)?;
        }
    }

    writeln!(out)
}

fn write_code<W: Write>(out: &mut W, code: &InstructionCode) -> fmt::Result {
    match code {
        InstructionCode::Nil => Ok(()),
        InstructionCode::Assign { lhs, rhs } => write!(out, " {lhs} := {rhs}"),
        InstructionCode::Decl(symbol) | InstructionCode::Dead(symbol) => {
            write!(out, " {}", symbol.identifier)
        }
        InstructionCode::FunctionCall {
            lhs,
            function,
            arguments,
        } => {
            write!(out, ": ")?;
            if let Some(lhs) = lhs {
                write!(out, "{lhs} := ")?;
            }
            write!(out, "{function}(")?;
            for (index, argument) in arguments.iter().enumerate() {
                if index > 0 {
                    write!(out, ", ")?;
                }
                write!(out, "{argument}")?;
            }
            write!(out, ")")
        }
        InstructionCode::Return(Some(value)) => write!(out, ": {value}"),
        InstructionCode::Return(None) => Ok(()),
        InstructionCode::Expression(expr) => write!(out, " {expr}"),
    }
}
