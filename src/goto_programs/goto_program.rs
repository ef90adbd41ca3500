//! The instruction sequence of one function.
//!
//! Instructions are stored in an arena and linked in program order.
//! An `InstructionId` names a slot for the lifetime of the program:
//! ids are never reused, and removing an instruction only unlinks its slot.

use crate::goto_programs::goto_nodes::{Instruction, InstructionId};
use crate::induction_messages::induction_errors::{ErrorMetaDataKey, InductionError};
use crate::return_invariant_error;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    instruction: Instruction,
    prev: Option<InstructionId>,
    next: Option<InstructionId>,
    live: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "ProgramListing", try_from = "ProgramListing")]
pub struct GotoProgram {
    slots: Vec<Slot>,
    first: Option<InstructionId>,
    last: Option<InstructionId>,
    live_count: usize,
}

impl GotoProgram {
    pub fn new() -> Self {
        GotoProgram::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        GotoProgram {
            slots: Vec::with_capacity(capacity),
            first: None,
            last: None,
            live_count: 0,
        }
    }

    /// Number of live instructions.
    #[inline]
    pub fn len(&self) -> usize {
        self.live_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    pub fn first(&self) -> Option<InstructionId> {
        self.first
    }

    pub fn last(&self) -> Option<InstructionId> {
        self.last
    }

    #[inline]
    pub fn contains(&self, id: InstructionId) -> bool {
        self.slots.get(id.index()).is_some_and(|slot| slot.live)
    }

    pub fn get(&self, id: InstructionId) -> Option<&Instruction> {
        match self.slots.get(id.index()) {
            Some(slot) if slot.live => Some(&slot.instruction),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: InstructionId) -> Option<&mut Instruction> {
        match self.slots.get_mut(id.index()) {
            Some(slot) if slot.live => Some(&mut slot.instruction),
            _ => None,
        }
    }

    /// Like `get`, but a dead or unknown id is a broken invariant.
    pub fn instruction(&self, id: InstructionId) -> Result<&Instruction, InductionError> {
        match self.get(id) {
            Some(instruction) => Ok(instruction),
            None => return_invariant_error!(
                "Instruction {} is not part of the program",
                id;
                { Instruction => id.to_string() }
            ),
        }
    }

    pub fn instruction_mut(&mut self, id: InstructionId) -> Result<&mut Instruction, InductionError> {
        if !self.contains(id) {
            return_invariant_error!(
                "Instruction {} is not part of the program",
                id;
                { Instruction => id.to_string() }
            );
        }

        Ok(&mut self.slots[id.index()].instruction)
    }

    pub fn next(&self, id: InstructionId) -> Option<InstructionId> {
        match self.slots.get(id.index()) {
            Some(slot) if slot.live => slot.next,
            _ => None,
        }
    }

    pub fn prev(&self, id: InstructionId) -> Option<InstructionId> {
        match self.slots.get(id.index()) {
            Some(slot) if slot.live => slot.prev,
            _ => None,
        }
    }

    /// Ids of the live instructions in program order.
    pub fn ids(&self) -> Ids<'_> {
        Ids {
            program: self,
            cursor: self.first,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (InstructionId, &Instruction)> {
        self.ids()
            .map(move |id| (id, &self.slots[id.index()].instruction))
    }

    pub fn push_back(&mut self, instruction: Instruction) -> InstructionId {
        let id = self.allocate(instruction);

        match self.last {
            Some(last) => {
                self.slots[last.index()].next = Some(id);
                self.slots[id.index()].prev = Some(last);
            }
            None => self.first = Some(id),
        }

        self.last = Some(id);
        id
    }

    pub fn insert_before(
        &mut self,
        anchor: InstructionId,
        instruction: Instruction,
    ) -> Result<InstructionId, InductionError> {
        self.require_live(anchor)?;

        let id = self.allocate(instruction);
        let prev = self.slots[anchor.index()].prev;

        self.slots[id.index()].prev = prev;
        self.slots[id.index()].next = Some(anchor);
        self.slots[anchor.index()].prev = Some(id);

        match prev {
            Some(prev) => self.slots[prev.index()].next = Some(id),
            None => self.first = Some(id),
        }

        Ok(id)
    }

    pub fn insert_after(
        &mut self,
        anchor: InstructionId,
        instruction: Instruction,
    ) -> Result<InstructionId, InductionError> {
        self.require_live(anchor)?;

        let id = self.allocate(instruction);
        let next = self.slots[anchor.index()].next;

        self.slots[id.index()].prev = Some(anchor);
        self.slots[id.index()].next = next;
        self.slots[anchor.index()].next = Some(id);

        match next {
            Some(next) => self.slots[next.index()].prev = Some(id),
            None => self.last = Some(id),
        }

        Ok(id)
    }

    /// Inserts the whole sequence, in order, immediately before `anchor`.
    /// No existing target is touched.
    pub fn insert_sequence_before(
        &mut self,
        anchor: InstructionId,
        instructions: Vec<Instruction>,
    ) -> Result<Vec<InstructionId>, InductionError> {
        self.require_live(anchor)?;

        let mut inserted = Vec::with_capacity(instructions.len());
        for instruction in instructions {
            inserted.push(self.insert_before(anchor, instruction)?);
        }

        Ok(inserted)
    }

    /// Unlinks an instruction. Its id stays dead forever.
    /// Callers are responsible for redirecting jumps to it first.
    pub fn remove(&mut self, id: InstructionId) -> Result<Instruction, InductionError> {
        self.require_live(id)?;

        let (prev, next) = {
            let slot = &self.slots[id.index()];
            (slot.prev, slot.next)
        };

        match prev {
            Some(prev) => self.slots[prev.index()].next = next,
            None => self.first = next,
        }
        match next {
            Some(next) => self.slots[next.index()].prev = prev,
            None => self.last = prev,
        }

        self.live_count -= 1;

        let slot = &mut self.slots[id.index()];
        slot.live = false;
        slot.prev = None;
        slot.next = None;

        Ok(std::mem::replace(&mut slot.instruction, Instruction::skip()))
    }

    /// The half-open range `[from, to)` in program order.
    /// `to` has to be reachable by walking forward from `from`.
    pub fn range(
        &self,
        from: InstructionId,
        to: InstructionId,
    ) -> Result<Vec<InstructionId>, InductionError> {
        self.require_live(from)?;
        self.require_live(to)?;

        let mut ids = Vec::new();
        let mut cursor = Some(from);

        while let Some(id) = cursor {
            if id == to {
                return Ok(ids);
            }

            ids.push(id);
            cursor = self.next(id);
        }

        return_invariant_error!(
            "Instruction {} does not follow instruction {}",
            to,
            from;
            { LoopHead => from.to_string(), LoopExit => to.to_string() }
        )
    }

    /// Every live instruction with `target` among its targets.
    pub fn jump_sources(&self, target: InstructionId) -> Vec<InstructionId> {
        self.iter()
            .filter(|(_, instruction)| instruction.targets.contains(&target))
            .map(|(id, _)| id)
            .collect()
    }

    /// Redirects jumps to `from` so they go to `to`,
    /// but only for source instructions accepted by `filter`.
    pub fn redirect_targets<F>(&mut self, from: InstructionId, to: InstructionId, filter: F) -> usize
    where
        F: Fn(InstructionId) -> bool,
    {
        let sources: Vec<InstructionId> = self
            .jump_sources(from)
            .into_iter()
            .filter(|id| filter(*id))
            .collect();

        let mut redirected = 0;
        for source in sources {
            if self.slots[source.index()].instruction.redirect_target(from, to) {
                redirected += 1;
            }
        }

        redirected
    }

    /// Every jump target has to resolve to a live instruction of this program.
    pub fn validate_targets(&self) -> Result<(), InductionError> {
        for (id, instruction) in self.iter() {
            for target in &instruction.targets {
                if !self.contains(*target) {
                    let mut error = InductionError::invariant_violation(format!(
                        "Instruction {id} jumps to {target}, which is not part of the program"
                    ))
                    .with_location(instruction.location.clone())
                    .with_metadata(ErrorMetaDataKey::Instruction, id.to_string())
                    .with_metadata(ErrorMetaDataKey::Target, target.to_string());

                    if !instruction.function.is_empty() {
                        error.new_metadata_entry(
                            ErrorMetaDataKey::FunctionName,
                            instruction.function.as_str(),
                        );
                    }

                    return Err(error);
                }
            }
        }

        Ok(())
    }

    fn allocate(&mut self, instruction: Instruction) -> InstructionId {
        let id = InstructionId(self.slots.len() as u32);
        self.slots.push(Slot {
            instruction,
            prev: None,
            next: None,
            live: true,
        });
        self.live_count += 1;
        id
    }

    fn require_live(&self, id: InstructionId) -> Result<(), InductionError> {
        if !self.contains(id) {
            return_invariant_error!(
                "Instruction {} is not part of the program",
                id;
                { Instruction => id.to_string() }
            );
        }

        Ok(())
    }
}

pub struct Ids<'a> {
    program: &'a GotoProgram,
    cursor: Option<InstructionId>,
}

impl Iterator for Ids<'_> {
    type Item = InstructionId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        self.cursor = self.program.next(current);
        Some(current)
    }
}

/// Serialized form of a program: live instructions in program order, each with its id.
#[derive(Serialize, Deserialize)]
pub struct ProgramListing {
    instructions: Vec<ListedInstruction>,
}

#[derive(Serialize, Deserialize)]
struct ListedInstruction {
    id: InstructionId,
    #[serde(flatten)]
    instruction: Instruction,
}

impl From<GotoProgram> for ProgramListing {
    fn from(program: GotoProgram) -> Self {
        let instructions = program
            .iter()
            .map(|(id, instruction)| ListedInstruction {
                id,
                instruction: instruction.clone(),
            })
            .collect();

        ProgramListing { instructions }
    }
}

impl TryFrom<ProgramListing> for GotoProgram {
    type Error = InductionError;

    /// Ids are reassigned densely in listing order and the targets follow them.
    fn try_from(listing: ProgramListing) -> Result<Self, Self::Error> {
        let mut program = GotoProgram::with_capacity(listing.instructions.len());
        let mut new_ids = FxHashMap::default();

        for listed in &listing.instructions {
            let new_id = InstructionId(new_ids.len() as u32);
            if new_ids.insert(listed.id, new_id).is_some() {
                return_invariant_error!("Instruction id {} is listed twice", listed.id);
            }
        }

        for listed in listing.instructions {
            let mut instruction = listed.instruction;
            for target in instruction.targets.iter_mut() {
                match new_ids.get(&*target) {
                    Some(new_id) => *target = *new_id,
                    None => return_invariant_error!(
                        "Instruction {} jumps to {}, which is not listed",
                        listed.id,
                        target
                    ),
                }
            }
            program.push_back(instruction);
        }

        Ok(program)
    }
}
