pub mod settings;

pub mod induction_messages {
    pub mod display_messages;
    pub mod induction_dev_logging;
    pub mod induction_errors;
    pub mod induction_warnings;
}

pub mod goto_programs;
pub mod k_induction;


pub use goto_programs::goto_expressions::{
    Expr, ExpressionBuilder, GotoType, NondetSource, SideEffectNondet, SimplifyingExprBuilder,
    Symbol,
};
pub use goto_programs::goto_functions::{GotoFunction, GotoFunctions};
pub use goto_programs::goto_nodes::{Instruction, InstructionId, InstructionKind, Origin};
pub use goto_programs::goto_program::GotoProgram;
pub use goto_programs::natural_loops::{LoopDiscovery, NaturalLoop};
pub use induction_messages::induction_errors::{ErrorType, InductionError};
pub use induction_messages::induction_warnings::{
    ConsoleDiagnostics, DiagnosticSink, InductionWarning, WarningKind,
};
pub use k_induction::duplicate_loop_body::IterationPoints;
pub use k_induction::goto_k_induction::{
    GotoKInduction, InductionReport, LoopSummary, goto_k_induction,
};
pub use settings::InductionConfig;
