use crate::induction_messages::induction_errors::InductionError;
use crate::return_config_error;
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "k_induction.toml";
pub const CONFIG_TABLE_NAME: &str = "k_induction";

// Rough guesses to avoid reallocations.
// Most loops carry only a handful of variables and most programs call few functions.
pub const LOOP_STATE_CAPACITY: usize = 8;
pub const MINIMUM_CALL_GRAPH_CAPACITY: usize = 16;

/// Which of the optional loop transformation phases run.
///
/// Condition discovery, nondet state and the pre-loop assumption always run
/// for every loop that has a condition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InductionConfig {
    /// Add one copy of the loop body for bounded unwinding
    pub duplicate_loop_body: bool,

    /// After duplicating, assume the negated loop condition after the loop
    pub forward_condition: bool,

    /// Downgrade the asserts of the original iteration to assumes
    pub convert_asserts: bool,
}

impl Default for InductionConfig {
    fn default() -> Self {
        InductionConfig {
            duplicate_loop_body: false,
            forward_condition: true,
            convert_asserts: false,
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    k_induction: InductionConfig,
}

impl InductionConfig {
    /// Every phase enabled.
    pub fn full() -> Self {
        InductionConfig {
            duplicate_loop_body: true,
            forward_condition: true,
            convert_asserts: true,
        }
    }

    pub fn inserts_forward_condition(&self) -> bool {
        self.duplicate_loop_body && self.forward_condition
    }

    /// Reads the `[k_induction]` table of a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, InductionError> {
        let file: ConfigFile = match toml::from_str(source) {
            Ok(file) => file,
            Err(e) => return_config_error!("Couldn't parse the [{}] config: {}", CONFIG_TABLE_NAME, e),
        };

        Ok(file.k_induction)
    }

    /// Reads a config file, or the default config file inside a directory.
    pub fn from_file(path: &Path) -> Result<Self, InductionError> {
        let path = if path.is_dir() {
            path.join(CONFIG_FILE_NAME)
        } else {
            path.to_path_buf()
        };

        let source = std::fs::read_to_string(&path)
            .map_err(|e| InductionError::file_error(&path, e.to_string()))?;

        Self::from_toml_str(&source)
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
