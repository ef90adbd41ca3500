
mod assert_to_assume_tests;
mod assume_loop_cond_tests;
mod nondet_assign_tests;
