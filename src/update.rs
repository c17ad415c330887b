//! A full update run: preconditions first, then one manager per tier.

use crate::connectivity::{self, Reachability};
use crate::context::RunContext;
use crate::detect::{self, ManagerProbe};
use crate::engine::{self, CommandRunner, ExecutionOutcome};
use crate::error::UpdateError;
use crate::privilege::{self, ElevationMethod, PrivilegeProbe};
use crate::registry::{ManagerId, ManagerSpec, Tier};
use crate::ui::prelude::*;

/// Already-validated choices from the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOptions {
    pub manual_approval: bool,
    pub alt_only: bool,
    pub official_only: bool,
    pub prefer_legacy: bool,
    pub mandatory_domain: String,
    pub custom_domain: Option<String>,
}

/// The system seams a run talks to.
pub struct Services<'a> {
    pub privilege: &'a dyn PrivilegeProbe,
    pub network: &'a dyn Reachability,
    pub managers: &'a dyn ManagerProbe,
    pub runner: &'a dyn CommandRunner,
}

/// One manager that was driven, with its per-step outcomes.
#[derive(Debug)]
pub struct ManagerRun {
    pub manager: ManagerId,
    pub tier: Tier,
    pub outcomes: Vec<ExecutionOutcome>,
}

#[derive(Debug)]
pub struct RunReport {
    pub elevation: ElevationMethod,
    pub runs: Vec<ManagerRun>,
}

impl RunReport {
    pub fn failed_steps(&self) -> usize {
        self.runs
            .iter()
            .flat_map(|run| &run.outcomes)
            .filter(|outcome| !outcome.succeeded())
            .count()
    }
}

/// Drive a full run. Probes and update steps are blocking subprocesses, so the
/// run itself is synchronous; only the connectivity preflight is driven on a
/// current-thread runtime.
pub fn run(
    options: &UpdateOptions,
    services: &Services<'_>,
    ctx: &RunContext,
) -> Result<RunReport, UpdateError> {
    ctx.debug("update.options", format!("{:?}", options));

    if options.alt_only && options.official_only {
        return Err(UpdateError::IncompatibleFlags);
    }
    if let Some(domain) = &options.custom_domain
        && domain.trim().is_empty()
    {
        return Err(UpdateError::EmptyCustomDomain);
    }

    let elevation = privilege::resolve(services.privilege, ctx)?;
    ctx.debug("update.elevation", format!("{:?}", elevation));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(UpdateError::Runtime)?;
    runtime.block_on(connectivity::probe(
        services.network,
        &options.mandatory_domain,
        options.custom_domain.as_deref(),
        ctx,
    ))?;

    let mut report = RunReport {
        elevation,
        runs: Vec::new(),
    };

    if !options.alt_only {
        let selection = detect::select(Tier::Official, services.managers, ctx)?;
        let selection =
            detect::apply_legacy_preference(selection, options.prefer_legacy, services.managers, ctx)?;
        let spec = selection
            .manager
            .ok_or(UpdateError::MissingOfficialManager)?;
        report.runs.push(drive(spec, elevation, options, services, ctx));
    }

    if !options.official_only {
        let selection = detect::select(Tier::Alternative, services.managers, ctx)?;
        match selection.manager {
            Some(spec) => report.runs.push(drive(spec, elevation, options, services, ctx)),
            None if options.alt_only => return Err(UpdateError::MissingAlternativeManager),
            None => emit(
                Level::Info,
                "update.alternative.none",
                "* No alternative package manager found",
                None,
            ),
        }
    }

    Ok(report)
}

fn drive(
    spec: &'static ManagerSpec,
    elevation: ElevationMethod,
    options: &UpdateOptions,
    services: &Services<'_>,
    ctx: &RunContext,
) -> ManagerRun {
    separator(true);
    let outcomes = engine::execute(
        spec,
        elevation,
        options.manual_approval,
        services.runner,
        ctx,
    );
    ManagerRun {
        manager: spec.id,
        tier: spec.tier,
        outcomes,
    }
}
