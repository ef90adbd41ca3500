//! ============================================================
//!                     GOTO Program Nodes
//! ============================================================
//! One instruction per step of a function body.
//!  - Every instruction lives in an arena slot with a stable `InstructionId`
//!  - Jump targets are ids, never positions, so inserting or removing
//!    instructions can't silently shift an edge onto the wrong instruction
//!  - Instructions created by the loop transformations carry an explicit `Origin`
//!
//! A `GOTO` instruction jumps to its targets when its guard holds and falls
//! through to the next instruction otherwise.

use crate::goto_programs::goto_expressions::{Expr, Symbol};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================
// Stable IDs
// ============================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstructionId(pub u32);

impl InstructionId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for InstructionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================
// Provenance
// ============================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Origin {
    /// Came from the front end.
    #[default]
    SourceProgram,

    /// Synthesized by the k-induction transformation (nondet state, guard assumptions, markers).
    InductionScaffold,

    /// A copy of a loop body instruction made for bounded unwinding.
    LoopDuplicate,
}

// ============================================================
// Source locations
// ============================================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        SourceLocation {
            file: file.into(),
            line,
            column,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.file.is_empty() && self.line == 0
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return write!(f, "<unknown>");
        }

        write!(f, "{}:{}", self.file, self.line)?;
        if self.column != 0 {
            write!(f, ":{}", self.column)?;
        }
        Ok(())
    }
}

// ============================================================
// Instructions
// ============================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstructionKind {
    Goto,
    Assume,
    Assert,
    Assign,
    Skip,
    Location,
    Decl,
    Dead,
    FunctionCall,
    Return,
    EndFunction,
    Other,
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstructionKind::Goto => "GOTO",
            InstructionKind::Assume => "ASSUME",
            InstructionKind::Assert => "ASSERT",
            InstructionKind::Assign => "ASSIGN",
            InstructionKind::Skip => "SKIP",
            InstructionKind::Location => "LOCATION",
            InstructionKind::Decl => "DECL",
            InstructionKind::Dead => "DEAD",
            InstructionKind::FunctionCall => "FUNCTION_CALL",
            InstructionKind::Return => "RETURN",
            InstructionKind::EndFunction => "END_FUNCTION",
            InstructionKind::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// The payload of an instruction. Guards live on the instruction itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InstructionCode {
    #[default]
    Nil,

    Assign {
        lhs: Expr,
        rhs: Expr,
    },

    Decl(Symbol),
    Dead(Symbol),

    FunctionCall {
        lhs: Option<Expr>,
        function: String,
        arguments: Vec<Expr>,
    },

    Return(Option<Expr>),

    Expression(Expr),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub kind: InstructionKind,
    #[serde(default = "Expr::true_expr")]
    pub guard: Expr,
    #[serde(default)]
    pub code: InstructionCode,
    #[serde(default)]
    pub location: SourceLocation,

    /// Name of the function owning this instruction.
    #[serde(default)]
    pub function: String,

    /// Ordered, duplicate-free. Only meaningful for GOTO.
    #[serde(default)]
    pub targets: Vec<InstructionId>,
    #[serde(default)]
    pub origin: Origin,

    // Metadata recomputed by `GotoFunctions::update`
    #[serde(default)]
    pub location_number: u32,
    #[serde(default)]
    pub target_number: Option<u32>,
}

impl Instruction {
    pub fn new(kind: InstructionKind) -> Self {
        Instruction {
            kind,
            guard: Expr::true_expr(),
            code: InstructionCode::Nil,
            location: SourceLocation::default(),
            function: String::new(),
            targets: Vec::new(),
            origin: Origin::SourceProgram,
            location_number: 0,
            target_number: None,
        }
    }

    pub fn skip() -> Self {
        Instruction::new(InstructionKind::Skip)
    }

    pub fn assign(lhs: Expr, rhs: Expr) -> Self {
        let mut instruction = Instruction::new(InstructionKind::Assign);
        instruction.code = InstructionCode::Assign { lhs, rhs };
        instruction
    }

    pub fn assume(condition: Expr) -> Self {
        let mut instruction = Instruction::new(InstructionKind::Assume);
        instruction.guard = condition;
        instruction
    }

    pub fn assert(condition: Expr) -> Self {
        let mut instruction = Instruction::new(InstructionKind::Assert);
        instruction.guard = condition;
        instruction
    }

    /// `IF guard THEN GOTO target`
    pub fn goto(target: InstructionId, guard: Expr) -> Self {
        let mut instruction = Instruction::new(InstructionKind::Goto);
        instruction.guard = guard;
        instruction.targets.push(target);
        instruction
    }

    pub fn function_call(lhs: Option<Expr>, function: impl Into<String>, arguments: Vec<Expr>) -> Self {
        let mut instruction = Instruction::new(InstructionKind::FunctionCall);
        instruction.code = InstructionCode::FunctionCall {
            lhs,
            function: function.into(),
            arguments,
        };
        instruction
    }

    pub fn end_function() -> Self {
        Instruction::new(InstructionKind::EndFunction)
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = function.into();
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    #[inline]
    pub fn is_goto(&self) -> bool {
        self.kind == InstructionKind::Goto
    }

    #[inline]
    pub fn is_assert(&self) -> bool {
        self.kind == InstructionKind::Assert
    }

    #[inline]
    pub fn is_assume(&self) -> bool {
        self.kind == InstructionKind::Assume
    }

    #[inline]
    pub fn is_skip(&self) -> bool {
        self.kind == InstructionKind::Skip
    }

    /// A GOTO that may or may not be taken.
    pub fn is_conditional_branch(&self) -> bool {
        self.is_goto() && !self.guard.is_true()
    }

    pub fn is_unconditional_goto(&self) -> bool {
        self.is_goto() && self.guard.is_true()
    }

    #[inline]
    pub fn is_scaffolding(&self) -> bool {
        self.origin == Origin::InductionScaffold
    }

    /// Copy of everything except identity and metadata, tagged as a loop duplicate.
    /// Targets still point at the originals and have to be remapped by the caller.
    pub fn duplicate(&self) -> Instruction {
        Instruction {
            kind: self.kind,
            guard: self.guard.clone(),
            code: self.code.clone(),
            location: self.location.clone(),
            function: self.function.clone(),
            targets: self.targets.clone(),
            origin: Origin::LoopDuplicate,
            location_number: 0,
            target_number: None,
        }
    }

    /// Replaces every occurrence of `from` in the targets with `to`,
    /// keeping the targets free of duplicates.
    pub fn redirect_target(&mut self, from: InstructionId, to: InstructionId) -> bool {
        if !self.targets.contains(&from) {
            return false;
        }

        let mut redirected = Vec::with_capacity(self.targets.len());
        for target in self.targets.drain(..) {
            let target = if target == from { to } else { target };
            if !redirected.contains(&target) {
                redirected.push(target);
            }
        }
        self.targets = redirected;
        true
    }
}
