pub mod goto_expressions;
pub mod goto_functions;
pub mod goto_nodes;
pub mod goto_program;
pub mod natural_loops;

// Listings and cleanup shared by the loop passes
pub mod goto_display;
pub mod remove_skip;

#[cfg(test)]
mod tests;
