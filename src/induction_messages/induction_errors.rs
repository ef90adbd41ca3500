use crate::goto_programs::goto_nodes::SourceLocation;
use rustc_hash::FxHashMap;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum ErrorMetaDataKey {
    CompilationStage,
    FunctionName,
    LoopHead,
    LoopExit,
    Instruction,
    Target,

    // Optional suggestions
    PrimarySuggestion,
}

/// Errors are always fatal for the run they come from.
/// A loop without a condition is not an error, it produces an `InductionWarning` instead.
#[derive(Debug, Clone)]
pub struct InductionError {
    pub msg: String,
    pub location: SourceLocation,
    pub error_type: ErrorType,

    // Structured context about where in the pipeline the error was raised
    pub metadata: FxHashMap<ErrorMetaDataKey, String>,
}

impl InductionError {
    pub fn new(
        msg: impl Into<String>,
        location: SourceLocation,
        error_type: ErrorType,
    ) -> InductionError {
        InductionError {
            msg: msg.into(),
            location,
            error_type,
            metadata: FxHashMap::default(),
        }
    }

    /// A structural inconsistency in the program being transformed.
    /// Continuing after one of these would produce an unsound program.
    pub fn invariant_violation(msg: impl Into<String>) -> Self {
        InductionError::new(msg, SourceLocation::default(), ErrorType::InvariantViolation)
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        InductionError::new(msg, SourceLocation::default(), ErrorType::Config)
    }

    pub fn file_error(path: &Path, msg: impl Into<String>) -> Self {
        let location = SourceLocation::new(path.to_string_lossy(), 0, 0);
        InductionError::new(msg, location, ErrorType::File)
    }

    pub fn serialization_error(msg: impl Into<String>) -> Self {
        InductionError::new(msg, SourceLocation::default(), ErrorType::Serialization)
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    pub fn with_metadata(mut self, key: ErrorMetaDataKey, value: impl Into<String>) -> Self {
        self.metadata.insert(key, value.into());
        self
    }

    pub fn new_metadata_entry(&mut self, key: ErrorMetaDataKey, value: impl Into<String>) {
        self.metadata.insert(key, value.into());
    }

    pub fn is_invariant_violation(&self) -> bool {
        self.error_type == ErrorType::InvariantViolation
    }
}

impl fmt::Display for InductionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", error_type_to_str(&self.error_type), self.msg)?;
        if !self.location.is_unknown() {
            write!(f, " ({})", self.location)?;
        }
        Ok(())
    }
}

impl std::error::Error for InductionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    InvariantViolation,
    Config,
    File,
    Serialization,
}

pub fn error_type_to_str(e_type: &ErrorType) -> &'static str {
    match e_type {
        ErrorType::InvariantViolation => "Structural Invariant Violation",
        ErrorType::Config => "Malformed Config",
        ErrorType::File => "File Error",
        ErrorType::Serialization => "Program Serialization Error",
    }
}

/// Returns a new InductionError for a broken structural invariant.
///
/// Usage:
/// `return_invariant_error!("Loop exit {} is not reachable from head {}", exit, head)`;
/// `return_invariant_error!("Dangling target"; { LoopHead => head.to_string() })`;
#[macro_export]
macro_rules! return_invariant_error {
    // Format string, arguments and metadata (with semicolon separator)
    ($fmt:expr, $($arg:expr),+ ; { $( $key:ident => $value:expr ),* $(,)? }) => {{
        let mut error = $crate::induction_messages::induction_errors::InductionError::invariant_violation(
            format!($fmt, $($arg),+),
        );
        $( error.new_metadata_entry(
            $crate::induction_messages::induction_errors::ErrorMetaDataKey::$key,
            $value,
        ); )*
        return Err(error);
    }};
    // Format string and arguments
    ($fmt:expr, $($arg:expr),+ $(,)?) => {{
        return Err(
            $crate::induction_messages::induction_errors::InductionError::invariant_violation(
                format!($fmt, $($arg),+),
            ),
        );
    }};
    // Message and metadata
    ($msg:expr ; { $( $key:ident => $value:expr ),* $(,)? }) => {{
        let mut error =
            $crate::induction_messages::induction_errors::InductionError::invariant_violation($msg);
        $( error.new_metadata_entry(
            $crate::induction_messages::induction_errors::ErrorMetaDataKey::$key,
            $value,
        ); )*
        return Err(error);
    }};
    // Message only
    ($msg:expr) => {{
        return Err(
            $crate::induction_messages::induction_errors::InductionError::invariant_violation($msg),
        );
    }};
}

/// Returns a new InductionError for a config file that doesn't make sense.
#[macro_export]
macro_rules! return_config_error {
    ($fmt:expr, $($arg:expr),+ $(,)?) => {{
        return Err(
            $crate::induction_messages::induction_errors::InductionError::config_error(
                format!($fmt, $($arg),+),
            ),
        );
    }};
    ($msg:expr) => {{
        return Err(
            $crate::induction_messages::induction_errors::InductionError::config_error($msg),
        );
    }};
}
