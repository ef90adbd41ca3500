use crate::induction_messages::induction_errors::{ErrorMetaDataKey, ErrorType, InductionError};
use crate::induction_messages::induction_warnings::{InductionWarning, WarningKind};
use saying::say;

pub fn print_induction_messages(errors: &[InductionError], warnings: &[InductionWarning]) {
    for err in errors {
        print_formatted_error(err);
    }

    for warning in warnings {
        print_formatted_warning(warning);
    }
}

pub fn print_formatted_warning(w: &InductionWarning) {
    say!(Yellow "WARNING: ", Dark Yellow { w.function.as_str() });

    match w.warning_kind {
        WarningKind::LoopConditionNotFound => {
            say!("We couldn't find a loop condition for the following loop, so we're not converting it.");
        }
    }

    if !w.location.is_unknown() {
        say!(Dark Magenta "At ", Bright { w.location.to_string() });
    }

    say!(Bright Black "Loop: ");
    say!(w.dump);
}

pub fn print_formatted_error(e: &InductionError) {
    match e.error_type {
        ErrorType::InvariantViolation => {
            say!(Yellow "LOOP TRANSFORMATION BUG - ");
            say!(Dark Yellow "The program was left in an unknown state and must not be verified");
        }

        ErrorType::Config => {
            say!(Yellow "CONFIG FILE ISSUE - ");
            say!(Dark Yellow "Malformed config file, something doesn't make sense inside it");
        }

        ErrorType::File => {
            say!(Yellow "Can't find/read file: ", { e.location.file.as_str() });
            say!(e.msg);
            return;
        }

        ErrorType::Serialization => {
            say!(Yellow "Couldn't read or write the GOTO program");
        }
    }

    say!(Red e.msg);

    if !e.location.is_unknown() {
        say!(Dark Magenta "At ", Bright { e.location.to_string() });
    }

    for key in [
        ErrorMetaDataKey::CompilationStage,
        ErrorMetaDataKey::FunctionName,
        ErrorMetaDataKey::LoopHead,
        ErrorMetaDataKey::LoopExit,
        ErrorMetaDataKey::Instruction,
        ErrorMetaDataKey::Target,
        ErrorMetaDataKey::PrimarySuggestion,
    ] {
        if let Some(value) = e.metadata.get(&key) {
            say!(Bright Black { format!("{key:?}: ") }, value);
        }
    }
}
