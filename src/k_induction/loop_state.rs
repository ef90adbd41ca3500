use crate::goto_programs::goto_expressions::{Expr, GotoType, Symbol};
use crate::goto_programs::natural_loops::NaturalLoop;
use crate::settings::LOOP_STATE_CAPACITY;

#[derive(Debug, Clone, PartialEq)]
pub struct StateField {
    pub name: String,
    pub ty: GotoType,
}

impl StateField {
    pub fn as_expr(&self) -> Expr {
        Expr::Symbol(Symbol::new(self.name.as_str(), self.ty.clone()))
    }
}

/// The loop-carried variables of one loop, one field each, in discovery order.
/// Built fresh for every loop and consumed by the nondet assignments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoopState {
    fields: Vec<StateField>,
}

impl LoopState {
    pub fn fields(&self) -> &[StateField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> Vec<StateField> {
        self.fields
    }
}

pub fn fill_state(natural_loop: &NaturalLoop) -> LoopState {
    let loop_vars = natural_loop.loop_vars();
    let mut fields = Vec::with_capacity(loop_vars.len().max(LOOP_STATE_CAPACITY));

    for var in loop_vars {
        fields.push(StateField {
            name: var.identifier.to_owned(),
            ty: var.ty.clone(),
        });
    }

    LoopState { fields }
}
