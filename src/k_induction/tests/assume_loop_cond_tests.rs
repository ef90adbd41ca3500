use super::test_support::*;
use crate::goto_programs::goto_expressions::{BinaryOp, Expr, SimplifyingExprBuilder};
use crate::goto_programs::goto_nodes::{InstructionId, InstructionKind, Origin};
use crate::k_induction::assume_loop_cond::{
    assume_loop_cond_before_loop, assume_neg_loop_cond_after_loop, normalize_loop_cond,
};
use proptest::prelude::*;

#[test]
fn normalization_strips_one_leading_negation() {
    assert_eq!(normalize_loop_cond(&Expr::not(x_positive())), x_positive());
}

#[test]
fn normalization_keeps_unnegated_conditions() {
    assert_eq!(normalize_loop_cond(&x_positive()), x_positive());
}

#[test]
fn double_negations_fold_before_stripping() {
    let twice = Expr::not(Expr::not(x_positive()));
    let three_times = Expr::not(twice.clone());

    assert_eq!(normalize_loop_cond(&twice), x_positive());
    assert_eq!(normalize_loop_cond(&three_times), x_positive());
}

#[test]
fn pre_loop_assume_sits_right_before_the_head() {
    let (mut program, natural_loop) = countdown_loop();
    let head = natural_loop.original_loop_head();

    let assume = assume_loop_cond_before_loop(&mut program, head, &Expr::not(x_positive()))
        .expect("head is live");

    assert_eq!(program.next(assume), Some(head));
    assert_eq!(program.prev(assume), Some(InstructionId(0)));

    let instruction = program.get(assume).unwrap();
    assert_eq!(instruction.kind, InstructionKind::Assume);
    assert_eq!(instruction.guard, x_positive());
    assert_eq!(instruction.origin, Origin::InductionScaffold);
    assert_eq!(instruction.location, location(2));
    assert_eq!(instruction.function, FUNCTION);
}

#[test]
fn post_loop_assume_negates_the_normalized_condition() {
    let (mut program, natural_loop) = countdown_loop();
    let exit = natural_loop.original_loop_exit();

    let assume = assume_neg_loop_cond_after_loop(
        &mut program,
        exit,
        &Expr::not(x_positive()),
        &SimplifyingExprBuilder,
    )
    .unwrap();

    assert_eq!(program.prev(assume), Some(exit));
    assert_eq!(program.next(assume), Some(InstructionId(4)));

    let instruction = program.get(assume).unwrap();
    assert_eq!(instruction.kind, InstructionKind::Assume);
    assert_eq!(instruction.guard, Expr::not(x_positive()));
    assert_eq!(instruction.origin, Origin::InductionScaffold);
}

#[test]
fn post_loop_assume_of_double_negation_is_a_single_negation() {
    let (mut program, natural_loop) = countdown_loop();

    let assume = assume_neg_loop_cond_after_loop(
        &mut program,
        natural_loop.original_loop_exit(),
        &Expr::not(Expr::not(x_positive())),
        &SimplifyingExprBuilder,
    )
    .unwrap();

    assert_eq!(program.get(assume).unwrap().guard, Expr::not(x_positive()));
}

#[test]
fn assume_before_dead_head_fails() {
    let (mut program, _) = countdown_loop();
    program.remove(InstructionId(2)).unwrap();

    let error =
        assume_loop_cond_before_loop(&mut program, InstructionId(2), &x_positive()).unwrap_err();
    assert!(error.is_invariant_violation());
}

fn arb_condition() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        Just(x_positive()),
        Just(Expr::Bool(true)),
        Just(Expr::Bool(false)),
        (0i64..10).prop_map(|n| Expr::binary(BinaryOp::Lt, var("i"), int(n))),
    ];

    leaf.prop_recursive(4, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Expr::not),
            (inner.clone(), inner).prop_map(|(lhs, rhs)| Expr::binary(BinaryOp::And, lhs, rhs)),
        ]
    })
}

proptest! {
    #[test]
    fn normalization_ignores_double_negation(condition in arb_condition()) {
        let wrapped = Expr::not(Expr::not(condition.clone()));
        prop_assert_eq!(normalize_loop_cond(&wrapped), normalize_loop_cond(&condition));
    }

    #[test]
    fn normalized_condition_is_never_a_negation(condition in arb_condition()) {
        prop_assert!(!normalize_loop_cond(&condition).is_not());
    }
}
