//! Replay a scripted sequence of entity steps against a trampling config.
//!
//! Usage: cargo run --bin replay_steps -- --config trample.json --script steps.json
//!
//! If the config file does not exist the built-in default is written there.

use std::path::PathBuf;
use std::process::ExitCode;

use trample::config::{ConfigFile, RuntimeConfig};
use trample::core::logging;
use trample::sim::{ReplayScript, run_replay};
use trample::StepOutcome;

fn arg_value(args: &[String], flag: &str) -> Option<PathBuf> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

fn run(config_path: PathBuf, script_path: PathBuf) -> trample::core::Result<()> {
    let file = ConfigFile::load_or_create(&config_path)?;
    let config = RuntimeConfig::from_file(&file)?;
    let script = ReplayScript::load(&script_path)?;

    println!("=== Replaying {} steps from {} ===", script.steps.len(), script_path.display());
    let report = run_replay(config, &script)?;

    for record in &report.steps {
        let outcome = match &record.outcome {
            StepOutcome::Ignored(reason) => format!("ignored ({:?})", reason),
            StepOutcome::Counted { steps, required, reset: true } => {
                format!("timed out, restarted at {}/{}", steps, required)
            }
            StepOutcome::Counted { steps, required, reset: false } => {
                format!("counted {}/{}", steps, required)
            }
            StepOutcome::Transitioned { from, to } => format!("{} -> {}", from, to),
        };
        println!(
            "tick {:>8}  {:<24} {:<16} {}",
            record.tick, record.entity.to_string(), record.pos.to_string(), outcome
        );
    }

    println!("\nTransitions: {}", report.transitions());
    println!("Blocks:");
    for (pos, block) in &report.blocks {
        println!("  {:<16} {}", pos.to_string(), block);
    }
    if !report.tracked.is_empty() {
        println!("Still tracked:");
        for (pos, history) in &report.tracked {
            println!(
                "  {:<16} {} steps, last at tick {}",
                pos.to_string(), history.step_count, history.last_step_tick
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let (Some(config_path), Some(script_path)) =
        (arg_value(&args, "--config"), arg_value(&args, "--script"))
    else {
        eprintln!("Usage: replay_steps --config <config.json> --script <steps.json>");
        return ExitCode::from(2);
    };

    match run(config_path, script_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
