use crate::goto_programs::goto_nodes::InstructionCode;
use crate::goto_programs::goto_program::GotoProgram;
use crate::induction_messages::induction_errors::InductionError;
use crate::settings::MINIMUM_CALL_GRAPH_CAPACITY;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GotoFunction {
    pub body: GotoProgram,

    /// Functions without a body (library stubs, externs) are never transformed
    pub body_available: bool,
}

impl GotoFunction {
    pub fn new(body: GotoProgram) -> Self {
        GotoFunction {
            body,
            body_available: true,
        }
    }

    pub fn without_body() -> Self {
        GotoFunction {
            body: GotoProgram::new(),
            body_available: false,
        }
    }
}

/// Every function of the program, keyed by name.
///
/// Ordered by name so every walk over the program is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GotoFunctions {
    pub functions: BTreeMap<String, GotoFunction>,

    // Cached metadata, only valid after `update`
    #[serde(skip)]
    call_graph: FxHashMap<String, FxHashSet<String>>,
    #[serde(skip)]
    metadata_revision: u64,
}

impl PartialEq for GotoFunctions {
    fn eq(&self, other: &Self) -> bool {
        self.functions == other.functions
    }
}

impl GotoFunctions {
    pub fn new() -> Self {
        GotoFunctions::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, function: GotoFunction) {
        self.functions.insert(name.into(), function);
    }

    pub fn get(&self, name: &str) -> Option<&GotoFunction> {
        self.functions.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut GotoFunction> {
        self.functions.get_mut(name)
    }

    /// Recomputes the whole-program metadata after the bodies changed:
    /// location numbers, jump target labels and the call graph.
    pub fn update(&mut self) {
        let mut location_number = 0;
        let mut call_graph: FxHashMap<String, FxHashSet<String>> =
            FxHashMap::with_capacity_and_hasher(
                self.functions.len().max(MINIMUM_CALL_GRAPH_CAPACITY),
                Default::default(),
            );

        for (name, function) in self.functions.iter_mut() {
            let callees = call_graph.entry(name.to_owned()).or_default();
            let body = &mut function.body;

            let targets: FxHashSet<_> = body
                .iter()
                .flat_map(|(_, instruction)| instruction.targets.iter().copied())
                .collect();

            let ids: Vec<_> = body.ids().collect();
            let mut target_number = 0;

            for id in ids {
                let Some(instruction) = body.get_mut(id) else {
                    continue;
                };

                instruction.location_number = location_number;
                location_number += 1;

                instruction.target_number = if targets.contains(&id) {
                    target_number += 1;
                    Some(target_number)
                } else {
                    None
                };

                if let InstructionCode::FunctionCall { function: callee, .. } = &instruction.code {
                    callees.insert(callee.to_owned());
                }
            }
        }

        self.call_graph = call_graph;
        self.metadata_revision += 1;
    }

    /// Names of the functions called from `name`, as of the last `update`.
    pub fn callees(&self, name: &str) -> Option<&FxHashSet<String>> {
        self.call_graph.get(name)
    }

    /// How many times the metadata has been refreshed.
    pub fn metadata_revision(&self) -> u64 {
        self.metadata_revision
    }

    pub fn from_json(json: &str) -> Result<Self, InductionError> {
        serde_json::from_str(json).map_err(|e| {
            InductionError::serialization_error(format!("Invalid GOTO program JSON: {e}"))
        })
    }

    pub fn to_json(&self) -> Result<String, InductionError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            InductionError::serialization_error(format!("Couldn't serialize GOTO program: {e}"))
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, InductionError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| InductionError::file_error(path, e.to_string()))?;
        Self::from_json(&json)
    }
}
