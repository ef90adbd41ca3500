use super::test_support::*;
use crate::goto_programs::goto_expressions::{Expr, GotoType, NondetSource, SideEffectNondet};
use crate::goto_programs::goto_nodes::{InstructionCode, InstructionId, InstructionKind, Origin};
use crate::goto_programs::natural_loops::NaturalLoop;
use crate::goto_programs::goto_expressions::Symbol;
use crate::k_induction::loop_state::fill_state;
use crate::k_induction::nondet_assign::{make_nondet_assign, skip_scaffolding, updated_loop_head};

struct ZeroNondet;

impl NondetSource for ZeroNondet {
    fn nondet_value(&self, ty: &GotoType) -> Expr {
        Expr::int(0, ty.clone())
    }
}

#[test]
fn state_follows_discovery_order() {
    let natural_loop = NaturalLoop::new(
        InstructionId(1),
        InstructionId(3),
        vec![
            symbol("x"),
            Symbol::new("flag", GotoType::Bool),
            symbol("a"),
        ],
    );

    let state = fill_state(&natural_loop);
    let names: Vec<&str> = state.fields().iter().map(|field| field.name.as_str()).collect();

    assert_eq!(names, ["x", "flag", "a"]);
    assert_eq!(state.fields()[1].ty, GotoType::Bool);
    assert_eq!(state.fields()[2].as_expr(), var("a"));
}

#[test]
fn assignments_form_one_block_before_the_head() {
    let (mut program, _) = countdown_loop();
    let natural_loop = NaturalLoop::new(
        InstructionId(1),
        InstructionId(3),
        vec![symbol("x"), symbol("y")],
    );

    let assigns = make_nondet_assign(
        &mut program,
        InstructionId(1),
        fill_state(&natural_loop),
        &SideEffectNondet,
    )
    .unwrap();

    assert_eq!(assigns.len(), 2);
    assert_eq!(order(&program), [0, 5, 6, 1, 2, 3, 4]);

    for (assign, name) in assigns.iter().zip(["x", "y"]) {
        let instruction = program.get(*assign).unwrap();
        assert_eq!(instruction.kind, InstructionKind::Assign);
        assert_eq!(instruction.origin, Origin::InductionScaffold);
        assert_eq!(instruction.location, location(2));
        assert_eq!(
            instruction.code,
            InstructionCode::Assign {
                lhs: var(name),
                rhs: Expr::Nondet(int_type()),
            }
        );
    }
}

#[test]
fn values_come_from_the_nondet_source() {
    let (mut program, natural_loop) = countdown_loop();

    let assigns = make_nondet_assign(
        &mut program,
        natural_loop.original_loop_head(),
        fill_state(&natural_loop),
        &ZeroNondet,
    )
    .unwrap();

    let InstructionCode::Assign { rhs, .. } = &program.get(assigns[0]).unwrap().code else {
        panic!("expected an assignment");
    };
    assert_eq!(*rhs, int(0));
}

#[test]
fn empty_state_inserts_nothing() {
    let (mut program, _) = countdown_loop();
    let before = program.clone();
    let natural_loop = NaturalLoop::new(InstructionId(1), InstructionId(3), Vec::new());

    let assigns =
        make_nondet_assign(&mut program, InstructionId(1), fill_state(&natural_loop), &SideEffectNondet)
            .unwrap();

    assert!(assigns.is_empty());
    assert_eq!(program, before);
}

#[test]
fn head_is_recovered_by_skipping_scaffolding() {
    let (mut program, natural_loop) = countdown_loop();
    let head = natural_loop.original_loop_head();

    let assigns =
        make_nondet_assign(&mut program, head, fill_state(&natural_loop), &SideEffectNondet)
            .unwrap();

    assert_eq!(skip_scaffolding(&program, assigns[0]), Some(head));
    assert_eq!(updated_loop_head(&program, assigns[0], head).unwrap(), head);
}

#[test]
fn head_mismatch_is_an_invariant_violation() {
    let (program, _) = countdown_loop();

    // #0 is not scaffolding, so the walk stops there instead of at #1
    let error = updated_loop_head(&program, InstructionId(0), InstructionId(1)).unwrap_err();
    assert!(error.is_invariant_violation());
}
