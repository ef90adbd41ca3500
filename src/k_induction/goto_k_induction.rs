use crate::goto_programs::goto_expressions::{
    ExpressionBuilder, NondetSource, SideEffectNondet, SimplifyingExprBuilder,
};
use crate::goto_programs::goto_functions::GotoFunctions;
use crate::goto_programs::goto_nodes::InstructionId;
use crate::goto_programs::goto_program::GotoProgram;
use crate::goto_programs::natural_loops::{LoopDiscovery, NaturalLoop};
use crate::induction_messages::induction_errors::{ErrorMetaDataKey, InductionError};
use crate::induction_messages::induction_warnings::{
    DiagnosticSink, InductionWarning, WarningKind,
};
use crate::k_induction::adjust_targets::{adjust_loop_head_and_exit, redirect_loop_entry};
use crate::k_induction::assert_to_assume::convert_assert_to_assume;
use crate::k_induction::assume_loop_cond::{
    assume_loop_cond_before_loop, assume_neg_loop_cond_after_loop,
};
use crate::k_induction::duplicate_loop_body::{IterationPoints, duplicate_loop_body};
use crate::k_induction::loop_condition::get_loop_cond;
use crate::k_induction::loop_state::fill_state;
use crate::k_induction::nondet_assign::{make_nondet_assign, updated_loop_head};
use crate::settings::InductionConfig;
use crate::{goto_log, induction_log, timer_log};
use rayon::prelude::*;
use std::time::Instant;

pub const LOOP_CONDITION_NOT_FOUND: &str =
    "we couldn't find a loop condition for the following loop, so we're not converting it.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopSummary {
    pub function: String,
    pub loop_head: InstructionId,
    pub loop_exit: InstructionId,

    /// Branch the loop condition was taken from
    pub condition_branch: Option<InstructionId>,

    /// Only set when the body was duplicated
    pub iteration_points: Option<IterationPoints>,

    /// Where the condition branch leaves the loop once the forward condition is inserted
    pub post_loop_assume: Option<InstructionId>,
}

impl LoopSummary {
    fn new(function: &str, natural_loop: &NaturalLoop) -> Self {
        LoopSummary {
            function: function.to_owned(),
            loop_head: natural_loop.original_loop_head(),
            loop_exit: natural_loop.original_loop_exit(),
            condition_branch: None,
            iteration_points: None,
            post_loop_assume: None,
        }
    }
}

/// What happened to every discovered loop, in function-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InductionReport {
    pub converted_loops: Vec<LoopSummary>,
    pub skipped_loops: Vec<LoopSummary>,
}

impl InductionReport {
    pub fn loop_count(&self) -> usize {
        self.converted_loops.len() + self.skipped_loops.len()
    }

    fn absorb(&mut self, outcome: FunctionOutcome, diagnostics: &mut dyn DiagnosticSink) {
        self.converted_loops.extend(outcome.converted_loops);
        self.skipped_loops.extend(outcome.skipped_loops);
        for warning in outcome.warnings {
            diagnostics.warn(warning);
        }
    }
}

// Everything one function produces, kept apart until it's merged in name order
#[derive(Default)]
struct FunctionOutcome {
    converted_loops: Vec<LoopSummary>,
    skipped_loops: Vec<LoopSummary>,
    warnings: Vec<InductionWarning>,
}

/// Rewrites the loops of a set of functions for k-induction.
///
/// Every loop with a condition gets nondet assignments to its loop-carried variables
/// and an assumption of its condition in front of it.
/// Depending on the config the body is unwound once more, the negated condition is assumed
/// after the loop, and the asserts of the original iteration become assumptions.
pub struct GotoKInduction<'a> {
    config: &'a InductionConfig,
    nondet: &'a dyn NondetSource,
    expression_builder: &'a dyn ExpressionBuilder,
}

impl<'a> GotoKInduction<'a> {
    pub fn new(
        config: &'a InductionConfig,
        nondet: &'a dyn NondetSource,
        expression_builder: &'a dyn ExpressionBuilder,
    ) -> Self {
        GotoKInduction {
            config,
            nondet,
            expression_builder,
        }
    }

    /// Transforms every function with a body, one after the other.
    /// Whole-program metadata is refreshed once at the end.
    pub fn run(
        &self,
        functions: &mut GotoFunctions,
        discovery: &dyn LoopDiscovery,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Result<InductionReport, InductionError> {
        let _time = Instant::now();
        let mut report = InductionReport::default();

        for (name, function) in functions.functions.iter_mut() {
            if !function.body_available {
                continue;
            }

            let outcome = self.convert_function(name, &mut function.body, discovery)?;
            report.absorb(outcome, diagnostics);
        }

        functions.update();

        timer_log!(_time, "Loops converted in: ");
        Ok(report)
    }

    /// Same as `run`, but functions are transformed on the rayon thread pool.
    /// Warnings reach `diagnostics` in function-name order after all workers finished.
    pub fn run_parallel(
        &self,
        functions: &mut GotoFunctions,
        discovery: &dyn LoopDiscovery,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Result<InductionReport, InductionError> {
        let _time = Instant::now();

        let outcomes: Vec<Result<FunctionOutcome, InductionError>> = functions
            .functions
            .par_iter_mut()
            .filter(|(_, function)| function.body_available)
            .map(|(name, function)| self.convert_function(name, &mut function.body, discovery))
            .collect();

        let mut report = InductionReport::default();
        for outcome in outcomes {
            report.absorb(outcome?, diagnostics);
        }

        functions.update();

        timer_log!(_time, "Loops converted in parallel in: ");
        Ok(report)
    }

    fn convert_function(
        &self,
        function_name: &str,
        body: &mut GotoProgram,
        discovery: &dyn LoopDiscovery,
    ) -> Result<FunctionOutcome, InductionError> {
        let function_loops = discovery.function_loops(function_name, body);
        let mut outcome = FunctionOutcome::default();

        // Enclosing loops first, so their copy is taken before an inner loop gets scaffolding
        let mut by_size = Vec::with_capacity(function_loops.len());
        for natural_loop in function_loops {
            let body_length = body
                .range(natural_loop.original_loop_head(), natural_loop.original_loop_exit())
                .map_err(|e| with_loop_context(e, function_name, &natural_loop))?
                .len();
            by_size.push((body_length, natural_loop));
        }
        by_size.sort_by(|a, b| b.0.cmp(&a.0));

        for (_, natural_loop) in by_size {
            self.convert_loop(function_name, body, &natural_loop, &mut outcome)
                .map_err(|e| with_loop_context(e, function_name, &natural_loop))?;
        }

        goto_log!(format!("[GOTO] {function_name} after k-induction:\n{body}"));
        Ok(outcome)
    }

    fn convert_loop(
        &self,
        function_name: &str,
        program: &mut GotoProgram,
        natural_loop: &NaturalLoop,
        outcome: &mut FunctionOutcome,
    ) -> Result<(), InductionError> {
        let loop_head = natural_loop.original_loop_head();
        let loop_exit = natural_loop.original_loop_exit();
        let mut summary = LoopSummary::new(function_name, natural_loop);

        let Some(loop_cond) = get_loop_cond(program, loop_head, loop_exit)? else {
            let location = program.instruction(loop_head)?.location.clone();
            outcome.warnings.push(InductionWarning::new(
                LOOP_CONDITION_NOT_FOUND,
                location,
                WarningKind::LoopConditionNotFound,
                function_name,
                natural_loop.dump(program),
            ));
            outcome.skipped_loops.push(summary);
            return Ok(());
        };

        induction_log!(format!(
            "[K-INDUCTION] Converting loop {} .. {} in {} with condition {}",
            loop_head, loop_exit, function_name, loop_cond.guard
        ));

        summary.condition_branch = Some(loop_cond.branch);

        let state = fill_state(natural_loop);
        let nondet_assigns = make_nondet_assign(program, loop_head, state, self.nondet)?;
        let pre_assume = assume_loop_cond_before_loop(program, loop_head, &loop_cond.guard)?;

        let scaffold_start = nondet_assigns.first().copied().unwrap_or(pre_assume);
        let loop_head = updated_loop_head(program, scaffold_start, loop_head)?;

        redirect_loop_entry(program, loop_head, loop_exit, scaffold_start)?;
        adjust_loop_head_and_exit(program, loop_head, loop_exit, &loop_cond, None)?;

        if self.config.duplicate_loop_body {
            let iteration_points =
                duplicate_loop_body(program, loop_head, loop_exit, self.expression_builder)?;
            induction_log!(format!(
                "[K-INDUCTION] Duplicated body, first iteration ends at {}",
                iteration_points.first_iteration_exit
            ));

            if self.config.inserts_forward_condition() {
                let post_assume = assume_neg_loop_cond_after_loop(
                    program,
                    loop_exit,
                    &loop_cond.guard,
                    self.expression_builder,
                )?;
                adjust_loop_head_and_exit(
                    program,
                    loop_head,
                    loop_exit,
                    &loop_cond,
                    Some(post_assume),
                )?;
                summary.post_loop_assume = Some(post_assume);
            }

            summary.iteration_points = Some(iteration_points);
        }

        if self.config.convert_asserts {
            let _converted = convert_assert_to_assume(program, loop_head, loop_exit)?;
            induction_log!(format!("[K-INDUCTION] Converted {_converted} asserts to assumptions"));
        }

        program.validate_targets()?;
        outcome.converted_loops.push(summary);
        Ok(())
    }
}

fn with_loop_context(
    error: InductionError,
    function_name: &str,
    natural_loop: &NaturalLoop,
) -> InductionError {
    error
        .with_metadata(ErrorMetaDataKey::FunctionName, function_name)
        .with_metadata(ErrorMetaDataKey::CompilationStage, "k-induction")
        .with_metadata(
            ErrorMetaDataKey::LoopHead,
            natural_loop.original_loop_head().to_string(),
        )
        .with_metadata(
            ErrorMetaDataKey::LoopExit,
            natural_loop.original_loop_exit().to_string(),
        )
}

/// Runs the transformation with the default collaborators,
/// reporting skipped loops to `diagnostics`.
pub fn goto_k_induction(
    functions: &mut GotoFunctions,
    discovery: &dyn LoopDiscovery,
    config: &InductionConfig,
    diagnostics: &mut dyn DiagnosticSink,
) -> Result<InductionReport, InductionError> {
    let nondet = SideEffectNondet;
    let builder = SimplifyingExprBuilder;

    GotoKInduction::new(config, &nondet, &builder).run(functions, discovery, diagnostics)
}
