use std::time::Instant;

use anyhow::Result;
use log::{error, info};

use kanga_assemb_pipeline::cli::parse;
use kanga_assemb_pipeline::config::defs::{PipelineError, RunConfig};
use kanga_assemb_pipeline::pipelines::{assembly, preflight};
use kanga_assemb_pipeline::utils::command::{kanga_presence_check, DryRunner, ProcessRunner};
use kanga_assemb_pipeline::utils::logging::init_logger;

const LOGGER_NAME: &str = env!("CARGO_PKG_NAME");


#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let run_start = Instant::now();

    let args = parse();

    let run_config = match RunConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // nothing can be logged until the logs directory is there
    if let Err(e) = preflight::prepare_logs_dir(&run_config.paths) {
        println!("{}", e);
        std::process::exit(1);
    }
    match init_logger(&run_config.paths.logs, LOGGER_NAME, args.verbose) {
        Ok(log_path) => info!("Startup, logging to {}", log_path.display()),
        Err(e) => {
            eprintln!("Failed to start logging: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = run(&run_config).await {
        error!("Pipeline failed: {} at {} milliseconds.", e, run_start.elapsed().as_millis());
        log::logger().flush();
        std::process::exit(1);
    }

    info!("All completed: {} milliseconds.", run_start.elapsed().as_millis());
    Ok(())
}


async fn run(config: &RunConfig) -> Result<(), PipelineError> {
    preflight::run(config)?;

    let summary = if config.dry_run {
        assembly::run(config, &mut DryRunner).await?
    } else {
        kanga_presence_check(&config.exe).await?;
        assembly::run(config, &mut ProcessRunner).await?
    };

    summary.log();
    Ok(())
}
