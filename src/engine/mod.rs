//! Execution engine: replay a manager's command table as subprocesses.
//!
//! Steps run strictly in order, each waiting for the previous one. A failing
//! step is reported and the next step still runs; "nothing to upgrade" is a
//! non-zero exit for several managers and must not block cleanup.

mod runner;

pub use runner::{CommandRunner, StepError, StepOutput, SystemRunner};

use crate::common::shell::command_line;
use crate::context::RunContext;
use crate::privilege::ElevationMethod;
use crate::registry::{CommandStep, ManagerSpec};
use crate::ui::prelude::*;

/// A fully built command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn display(&self) -> String {
        command_line(&self.program, &self.args)
    }
}

/// What happened when one step ran.
#[derive(Debug)]
pub struct ExecutionOutcome {
    pub step: usize,
    pub invocation: Invocation,
    pub stdout: String,
    pub error: Option<StepError>,
}

impl ExecutionOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Build the argv of one step: elevation tool and manager binary, the step's
/// non-empty tokens, then the confirmation token unless the user approves
/// manually or the step rejects it.
pub fn build_invocation(
    spec: &ManagerSpec,
    step: &CommandStep,
    elevation: ElevationMethod,
    manual_approval: bool,
) -> Invocation {
    let mut args = Vec::with_capacity(step.tokens.len() + 2);
    let program = match elevation.program() {
        Some(tool) => {
            args.push(spec.binary().to_string());
            tool
        }
        None => spec.binary(),
    };

    args.extend(step.args().map(str::to_string));

    if !manual_approval && !step.suppress_confirm {
        args.push(spec.confirm_token.to_string());
    }

    Invocation {
        program: program.to_string(),
        args,
    }
}

/// Run every step of the manager, in declared order, to completion.
pub fn execute(
    spec: &ManagerSpec,
    elevation: ElevationMethod,
    manual_approval: bool,
    runner: &dyn CommandRunner,
    ctx: &RunContext,
) -> Vec<ExecutionOutcome> {
    emit(
        Level::Info,
        "engine.manager",
        &format!(
            "\t* Using package manager [{}] on {}",
            spec.binary(),
            ctx.platform
        ),
        Some(serde_json::json!({
            "manager": spec.binary(),
            "tier": spec.tier.name(),
            "steps": spec.steps.len(),
        })),
    );
    ctx.debug("engine.tier", format!("tier: {}", spec.tier));

    let mut outcomes = Vec::with_capacity(spec.steps.len());
    for (index, step) in spec.steps.iter().enumerate() {
        let invocation = build_invocation(spec, step, elevation, manual_approval);
        ctx.debug(
            "engine.step",
            format!(
                "step {}/{}: {}",
                index + 1,
                spec.steps.len(),
                invocation.display()
            ),
        );

        let (output, error) = runner.run(
            &invocation.program,
            &invocation.args,
            &mut |chunk: &str| stream("engine.stdout", chunk),
        );
        end_stream(&output.stdout);
        if let Some(err) = &error {
            emit(
                Level::Warn,
                "engine.step.failed",
                &format!("!! {} {}", invocation.display(), err),
                Some(serde_json::json!({ "manager": spec.binary(), "step": index })),
            );
        }

        outcomes.push(ExecutionOutcome {
            step: index,
            invocation,
            stdout: output.stdout,
            error,
        });
    }

    let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
    ctx.debug(
        "engine.done",
        format!("{}: {} steps, {} failed", spec.binary(), outcomes.len(), failed),
    );
    outcomes
}
