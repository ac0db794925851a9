use std::collections::HashSet;

use log::{debug, error, info, warn};

use crate::cli::FailurePolicy;
use crate::config::defs::{Phase, PipelineError, RunConfig, SampleSet};
use crate::utils::command::{generate_cli, ToolOutcome, ToolRunner};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseSummary {
    pub phase: Phase,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl PhaseSummary {
    fn new(phase: Phase) -> Self {
        PhaseSummary { phase, succeeded: 0, failed: 0, skipped: 0 }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub phases: Vec<PhaseSummary>,
}

impl RunSummary {
    pub fn phase(&self, phase: Phase) -> Option<&PhaseSummary> {
        self.phases.iter().find(|p| p.phase == phase)
    }

    pub fn total_failed(&self) -> usize {
        self.phases.iter().map(|p| p.failed).sum()
    }

    pub fn log(&self) {
        for p in &self.phases {
            info!(
                "Phase {}: {} succeeded, {} failed, {} skipped",
                p.phase, p.succeeded, p.failed, p.skipped
            );
        }
        if self.total_failed() > 0 {
            warn!("{} biokanga invocation(s) failed; check the per sample set logs", self.total_failed());
        }
    }
}

fn start_message(phase: Phase, sample: &str) -> String {
    match phase {
        Phase::Ngsqc => format!("Starting to quality check reads in '{}'", sample),
        Phase::Filter => format!("Starting to filter PE reads in '{}'", sample),
        Phase::Assemb => format!("Starting to assemble filtered PE reads from '{}'", sample),
        Phase::Scaffold => format!("Starting to scaffold contigs from '{}'", sample),
        Phase::ReassembAssemb => {
            format!("Starting to reassemble contigs previously generated for '{}'", sample)
        }
        Phase::ReassembScaffold => format!("Starting to scaffold reassembled contigs from '{}'", sample),
    }
}

fn completed_message(phase: Phase, sample: &str) -> String {
    match phase {
        Phase::Ngsqc => format!("Completed quality checking reads for '{}'", sample),
        Phase::Filter => format!("Filtering '{}' completed", sample),
        Phase::Assemb => format!("Assembly of '{}' completed", sample),
        Phase::Scaffold => format!("Scaffolding of '{}' completed", sample),
        Phase::ReassembAssemb => format!("Reassembly of '{}' completed", sample),
        Phase::ReassembScaffold => format!("Scaffolding of reassembled '{}' completed", sample),
    }
}

fn phase_completed_message(phase: Phase) -> &'static str {
    match phase {
        Phase::Ngsqc => "All quality checking completed",
        Phase::Filter => "All filtering completed",
        Phase::Assemb => "All assembly completed",
        Phase::Scaffold => "All Scaffolding completed",
        Phase::ReassembAssemb => "All reassembly completed",
        Phase::ReassembScaffold => "All reassembly scaffolding completed",
    }
}

/// Runs every enabled phase in order, one invocation per sample set, each awaited before the next.
///
/// # Arguments
///
/// * `config` - RunConfig built in main.
/// * `runner` - Starts each command line; the real process runner outside of tests and dry runs.
///
/// # Returns
/// RunSummary with per-phase counts, or the first error that stops the run.
pub async fn run<R: ToolRunner>(config: &RunConfig, runner: &mut R) -> Result<RunSummary, PipelineError> {
    let mut summary = RunSummary::default();
    // sample sets dropped under FailurePolicy::SkipSample
    let mut dropped: HashSet<String> = HashSet::new();

    for phase in Phase::ALL {
        if !config.toggles.is_enabled(phase) {
            debug!("Phase {} disabled, skipping", phase);
            continue;
        }
        let phase_summary = run_phase(config, runner, phase, &mut dropped).await?;
        summary.phases.push(phase_summary);
    }

    Ok(summary)
}

async fn run_phase<R: ToolRunner>(
    config: &RunConfig,
    runner: &mut R,
    phase: Phase,
    dropped: &mut HashSet<String>,
) -> Result<PhaseSummary, PipelineError> {
    let mut phase_summary = PhaseSummary::new(phase);

    for sample_set in &config.sample_sets {
        if dropped.contains(&sample_set.name) {
            warn!("Skipping {} of '{}' after an earlier failure", phase, sample_set.name);
            phase_summary.skipped += 1;
            continue;
        }

        match run_sample_set(config, runner, phase, sample_set).await? {
            ToolOutcome::Success | ToolOutcome::DryRun => phase_summary.succeeded += 1,
            outcome => {
                phase_summary.failed += 1;
                handle_failure(config.on_failure, phase, sample_set, &outcome, config.exe.as_str(), dropped)?;
            }
        }
    }

    info!("{}", phase_completed_message(phase));
    Ok(phase_summary)
}

async fn run_sample_set<R: ToolRunner>(
    config: &RunConfig,
    runner: &mut R,
    phase: Phase,
    sample_set: &SampleSet,
) -> Result<ToolOutcome, PipelineError> {
    info!("{}", start_message(phase, &sample_set.name));

    // a bad pairing suffix surfaces here, before anything is spawned for this sample set
    let args = generate_cli(phase, config, sample_set)?;
    debug!("{:?}", args.to_vec());

    let outcome = runner.run(&args).await;
    info!("{}", completed_message(phase, &sample_set.name));
    Ok(outcome)
}

fn handle_failure(
    policy: FailurePolicy,
    phase: Phase,
    sample_set: &SampleSet,
    outcome: &ToolOutcome,
    exe: &str,
    dropped: &mut HashSet<String>,
) -> Result<(), PipelineError> {
    let detail = format!(
        "{} {} for '{}' {}",
        exe,
        phase.subcommand(),
        sample_set.name,
        outcome.describe()
    );

    match policy {
        FailurePolicy::Abort => {
            error!("{}, aborting", detail);
            Err(PipelineError::ToolExecution { tool: exe.to_string(), error: detail })
        }
        FailurePolicy::SkipSample => {
            warn!("{}, '{}' is dropped from the remaining phases", detail, sample_set.name);
            dropped.insert(sample_set.name.clone());
            Ok(())
        }
        FailurePolicy::Continue => {
            warn!("{}, continuing regardless", detail);
            Ok(())
        }
    }
}
