use crate::goto_programs::goto_nodes::SourceLocation;
use crate::induction_messages::display_messages::print_formatted_warning;

#[derive(Clone, Debug, PartialEq)]
pub struct InductionWarning {
    pub msg: String,
    pub location: SourceLocation,
    pub warning_kind: WarningKind,
    pub function: String,

    /// Listing of the instructions the warning refers to
    pub dump: String,
}

impl InductionWarning {
    pub fn new(
        msg: &str,
        location: SourceLocation,
        warning_kind: WarningKind,
        function: &str,
        dump: String,
    ) -> InductionWarning {
        InductionWarning {
            msg: msg.to_owned(),
            location,
            warning_kind,
            function: function.to_owned(),
            dump,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WarningKind {
    LoopConditionNotFound,
}

/// Receives the recoverable problems found while transforming loops.
pub trait DiagnosticSink {
    fn warn(&mut self, warning: InductionWarning);
}

impl DiagnosticSink for Vec<InductionWarning> {
    fn warn(&mut self, warning: InductionWarning) {
        self.push(warning);
    }
}

/// Prints every warning to the terminal as soon as it arrives.
#[derive(Debug, Default)]
pub struct ConsoleDiagnostics {
    pub disabled: bool,
}

impl DiagnosticSink for ConsoleDiagnostics {
    fn warn(&mut self, warning: InductionWarning) {
        if !self.disabled {
            print_formatted_warning(&warning);
        }
    }
}
