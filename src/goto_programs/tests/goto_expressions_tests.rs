#![cfg(test)]

use crate::goto_programs::goto_expressions::{
    BinaryOp, Expr, ExpressionBuilder, GotoType, SimplifyingExprBuilder,
};

fn int_type() -> GotoType {
    GotoType::Signed { width: 32 }
}

#[test]
fn comparisons_and_connectives_are_boolean() {
    for op in [
        BinaryOp::Eq,
        BinaryOp::Ne,
        BinaryOp::Lt,
        BinaryOp::Le,
        BinaryOp::Gt,
        BinaryOp::Ge,
        BinaryOp::And,
        BinaryOp::Or,
    ] {
        assert!(op.is_boolean(), "{op:?}");
    }

    for op in [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div, BinaryOp::Mod] {
        assert!(!op.is_boolean(), "{op:?}");
    }
}

#[test]
fn binary_expressions_take_the_type_of_their_operator() {
    let x = Expr::symbol("x", int_type());
    let zero = Expr::int(0, int_type());

    let compare = Expr::binary(BinaryOp::Gt, x.clone(), zero.clone());
    let both = Expr::binary(BinaryOp::And, compare.clone(), Expr::true_expr());
    let difference = Expr::binary(BinaryOp::Sub, x, zero);

    assert_eq!(compare.ty(), GotoType::Bool);
    assert_eq!(both.ty(), GotoType::Bool);
    assert_eq!(difference.ty(), int_type());
}

#[test]
fn negation_folds_instead_of_stacking() {
    let builder = SimplifyingExprBuilder;
    let x = Expr::symbol("x", int_type());

    assert_eq!(builder.negate(&Expr::not(x.clone())), x);
    assert_eq!(builder.negate(&Expr::true_expr()), Expr::Bool(false));
    assert_eq!(builder.negate(&x), Expr::not(x));
}
