mod cli;
mod common;
mod connectivity;
mod context;
mod detect;
mod engine;
mod error;
mod privilege;
mod registry;
mod ui;
mod update;

use clap::Parser;
use std::io::{self, IsTerminal};
use std::time::{Duration, Instant};

use crate::cli::Cli;
use crate::common::config::UpdateConfig;
use crate::common::platform::Platform;
use crate::context::RunContext;
use crate::error::{EXIT_ENVIRONMENT, EXIT_SUCCESS, EXIT_USER};
use crate::ui::prelude::*;
use crate::update::{Services, UpdateOptions};

const EXIT_STATEMENT: &str = "I hope this program was useful to you! Please consider reporting \
any bugs or suggestions upstream.";

fn main() {
    let started = Instant::now();
    let cli = Cli::parse();
    ui::init(cli.format, io::stdout().is_terminal());

    let code = if cli.warranty {
        emit(Level::Info, "cli.warranty", cli::WARRANTY, None);
        EXIT_SUCCESS
    } else if cli.flags {
        emit(Level::Info, "cli.flags", cli::FLAGS, None);
        EXIT_SUCCESS
    } else {
        let code = run(&cli);
        emit(
            Level::Info,
            "run.elapsed",
            &format!("Elapsed time: {:.2?}", started.elapsed()),
            Some(serde_json::json!({ "elapsed_ms": started.elapsed().as_millis() as u64 })),
        );
        code
    };

    emit(Level::Info, "run.exit", EXIT_STATEMENT, None);
    std::process::exit(code);
}

fn run(cli: &Cli) -> i32 {
    let config = match UpdateConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            emit(Level::Error, "config.error", &format!("{:#}", e), None);
            return EXIT_USER;
        }
    };

    let ctx = RunContext::new(Platform::detect(), cli.debug);
    let source = cli.config.clone().or_else(UpdateConfig::default_path);
    ctx.debug("config.loaded", format!("{:?} from {:?}", config, source));

    if config.clear_screen
        && !cli.no_clear
        && matches!(get_output_format(), OutputFormat::Text)
        && let Err(e) = common::terminal::clear_screen()
    {
        ctx.debug("terminal.clear", format!("{:#}", e));
    }

    let options = UpdateOptions {
        manual_approval: cli.manual_all || config.manual_all,
        alt_only: cli.alt_only,
        official_only: cli.official_only,
        prefer_legacy: cli.yum_update || config.prefer_legacy,
        mandatory_domain: config.mandatory_domain.clone(),
        custom_domain: cli.custom_domain.clone().or(config.custom_domain.clone()),
    };

    let network = match connectivity::HttpsReachability::new(
        config.network_timeout_secs.map(Duration::from_secs),
    ) {
        Ok(network) => network,
        Err(e) => {
            emit(Level::Error, "connectivity.client", &format!("{:#}", e), None);
            return EXIT_ENVIRONMENT;
        }
    };

    let services = Services {
        privilege: &privilege::SystemPrivilegeProbe,
        network: &network,
        managers: &detect::HelpProbe,
        runner: &engine::SystemRunner,
    };

    match update::run(&options, &services, &ctx) {
        Ok(report) => {
            ctx.debug("run.elevation", format!("elevated with {:?}", report.elevation));
            for run in &report.runs {
                let failed: Vec<_> = run
                    .outcomes
                    .iter()
                    .filter(|o| !o.succeeded())
                    .map(|o| serde_json::json!({ "step": o.step, "command": o.invocation.display() }))
                    .collect();
                emit(
                    Level::Info,
                    "run.manager.done",
                    &format!("* {} ({}) finished", run.manager, run.tier),
                    Some(serde_json::json!({
                        "manager": run.manager.binary(),
                        "tier": run.tier.name(),
                        "steps": run.outcomes.len(),
                        "failed": failed,
                    })),
                );
            }
            let failed = report.failed_steps();
            if failed > 0 {
                emit(
                    Level::Warn,
                    "run.steps.failed",
                    &format!("{} update step(s) reported errors", failed),
                    Some(serde_json::json!({ "failed": failed })),
                );
            }
            emit(Level::Success, "run.done", "Update finished", None);
            EXIT_SUCCESS
        }
        Err(e) => {
            emit(
                Level::Error,
                "run.error",
                &e.to_string(),
                Some(serde_json::json!({
                    "kind": format!("{:?}", e.kind()),
                    "exit_code": e.exit_code(),
                })),
            );
            e.exit_code()
        }
    }
}
