use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

use super::types::{Cli, Commands};
use crate::config::Config;
use crate::error::PipelineError;
use crate::pipeline::{StagingPlan, StagingSummary, TransitionPlanner};
use crate::process::{self, processors, Invocation, ProcessorRunner};

/// Stage inputs for the parsed command and run its processor.
///
/// Returns the processor's exit code. Nothing is staged or spawned when the
/// processor's configuration file is missing.
pub fn dispatch(cli: Cli, config: &Config, runner: &dyn ProcessorRunner) -> Result<i32> {
    let planner = TransitionPlanner::default();

    let (plan, invocation, required) = match &cli.command {
        Commands::Bridge {
            extension,
            mode,
            collection_id,
        } => (
            StagingPlan::default(),
            process::bridge(config, *extension, *mode, collection_id),
            Some(processors::bridge_config_path(
                config,
                *extension,
                collection_id,
            )),
        ),
        Commands::Tea {
            collection_id,
            listener_ip,
            port,
        } => (
            planner.plan_tea(&config.collection(collection_id)),
            process::tea(config, collection_id, listener_ip, *port),
            None,
        ),
        Commands::Gateway {
            collection_id,
            operation,
            mode,
            prev_step,
        } => {
            info!(
                collection = %collection_id,
                operation = %operation,
                mode = %mode,
                prev_step = prev_step.map(|s| s.as_str()).unwrap_or("-"),
                "Preparing gateway operation"
            );
            (
                planner.plan_gateway(&config.collection(collection_id), *operation, *prev_step),
                process::gateway(config, *operation, collection_id),
                Some(processors::gateway_config_path(
                    config,
                    *operation,
                    collection_id,
                )),
            )
        }
    };

    if cli.dry_run {
        print_dry_run(&plan, &invocation, cli.json)?;
        return Ok(0);
    }

    if let Some(path) = &required {
        require_file(path)?;
    }

    let summary = plan
        .apply(planner.patterns())
        .context("Failed to stage input artifacts")?;
    report_summary(&summary);

    let code = runner.run(&invocation)?;
    if code != 0 {
        warn!(code, command = %invocation.command_line(), "Processor failed");
    }
    Ok(code)
}

fn require_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(PipelineError::MissingConfig {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(())
}

fn report_summary(summary: &StagingSummary) {
    info!(
        moved = summary.moved,
        purged = summary.purged,
        "Staging complete"
    );
    for failure in &summary.purge_failures {
        eprintln!(
            "{} could not purge {}: {}",
            "Warning:".yellow().bold(),
            failure.path.display(),
            failure.error
        );
    }
}

#[derive(Serialize)]
struct DryRun<'a> {
    plan: &'a StagingPlan,
    command: &'a Invocation,
}

fn print_dry_run(plan: &StagingPlan, invocation: &Invocation, json: bool) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(&DryRun {
            plan,
            command: invocation,
        })
        .context("Failed to render plan as JSON")?;
        println!("{rendered}");
        return Ok(());
    }

    println!("{}", "Staging plan".bold());
    if plan.is_empty() {
        println!("  (nothing to stage)");
    }
    for step in &plan.moves {
        println!(
            "  move  {} *.{}  {} -> {}",
            step.predecessor,
            step.extension,
            step.source.display(),
            step.destination.display()
        );
    }
    for step in &plan.purges {
        println!("  purge *.{}  {}", step.extension, step.directory.display());
    }

    println!("{}", "Processor".bold());
    println!("  {}", invocation.command_line());
    if let Some(dir) = &invocation.current_dir {
        println!("  (in {})", dir.display());
    }
    Ok(())
}
