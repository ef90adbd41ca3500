use crate::goto_programs::goto_display::display_range;
use crate::goto_programs::goto_expressions::Symbol;
use crate::goto_programs::goto_nodes::InstructionId;
use crate::goto_programs::goto_program::GotoProgram;

/// A natural loop as found by loop discovery.
///
/// The body is the half-open range `[head, exit)`.
/// `exit` is the backwards GOTO closing the body.
#[derive(Debug, Clone, PartialEq)]
pub struct NaturalLoop {
    head: InstructionId,
    exit: InstructionId,

    /// Variables assigned anywhere in the body, in discovery order
    loop_vars: Vec<Symbol>,
}

impl NaturalLoop {
    pub fn new(head: InstructionId, exit: InstructionId, loop_vars: Vec<Symbol>) -> Self {
        NaturalLoop {
            head,
            exit,
            loop_vars,
        }
    }

    pub fn original_loop_head(&self) -> InstructionId {
        self.head
    }

    pub fn original_loop_exit(&self) -> InstructionId {
        self.exit
    }

    pub fn loop_vars(&self) -> &[Symbol] {
        &self.loop_vars
    }

    /// Listing of the loop, back edge included, for diagnostics.
    pub fn dump(&self, program: &GotoProgram) -> String {
        let mut listing = format!("{} .. {}\n", self.head, self.exit);
        let end = program.next(self.exit);
        listing.push_str(&display_range(program, self.head, end));
        listing
    }
}

/// Finds the natural loops of one function.
/// Called on the untransformed body before any of its loops is converted.
pub trait LoopDiscovery: Sync {
    fn function_loops(&self, function_name: &str, body: &GotoProgram) -> Vec<NaturalLoop>;
}

impl<F> LoopDiscovery for F
where
    F: Fn(&str, &GotoProgram) -> Vec<NaturalLoop> + Sync,
{
    fn function_loops(&self, function_name: &str, body: &GotoProgram) -> Vec<NaturalLoop> {
        self(function_name, body)
    }
}
