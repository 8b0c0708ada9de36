use std::path::Path;

use anyhow::Context;
use livelibs_registry::Registry;

use crate::cli::args::{OutputFormat, RunArgs};
use crate::exit_codes;
use crate::scenario::{Scenario, ScenarioReport};

pub fn run(args: RunArgs, config_path: Option<&Path>) -> anyhow::Result<i32> {
    let config = match super::load_registry_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {e:#}");
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    let scenario = match Scenario::load(&args.scenario) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("scenario error: {e:#}");
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    let registry = Registry::with_config(config);
    let report = scenario.execute(&registry);
    tracing::info!(
        passed = report.passed,
        failed = report.failed,
        "scenario finished"
    );

    match args.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(path) = &args.dump {
        let snapshot = registry.snapshot().to_json_pretty()?;
        std::fs::write(path, snapshot)
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;
    }

    Ok(if report.all_passed() {
        exit_codes::SUCCESS
    } else {
        exit_codes::SCENARIO_FAILED
    })
}

fn print_text(report: &ScenarioReport) {
    if let Some(description) = &report.description {
        println!("{}", description);
    }
    for step in &report.steps {
        let mark = if step.passed { "PASS" } else { "FAIL" };
        println!(
            "[{}] #{} {} {} -> {}",
            mark, step.index, step.op, step.target, step.actual
        );
        for mismatch in &step.mismatches {
            println!("       {}", mismatch);
        }
    }
    println!(
        "{} steps: {} passed, {} failed",
        report.steps.len(),
        report.passed,
        report.failed
    );
}
