// Loop phases, in the order the driver runs them
pub mod loop_condition;
pub mod loop_state;
pub mod nondet_assign;
pub mod assume_loop_cond;
pub mod adjust_targets;
pub mod duplicate_loop_body;
pub mod assert_to_assume;

pub mod goto_k_induction;

#[cfg(test)]
mod tests;
