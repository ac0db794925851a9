/// Functions and structs for building biokanga command lines and running them

use std::path::Path;
use std::process::Stdio;

use log::{debug, info};
use tokio::process::Command;

use crate::config::defs::{KangaSubcommand, Phase, PipelineError, RunConfig, SampleSet};
use crate::config::paths::PathSet;
use crate::utils::fastx::{classify_read, ReadRole};

/// Symbolic biokanga options. The switch letter depends on the subcommand, see `switch_for`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KangaFlag {
    Threads,
    MinPhred,
    Trim5,
    LogFile,
    Output,
    DistsOutput,
    AdaptorSeqs,
    Pe1Input,
    Pe2Input,
    ContigsInput,
    MaxSubs,
    MinInsert,
    MaxInsert,
}

fn switch_for(subcommand: KangaSubcommand, flag: KangaFlag) -> Option<&'static str> {
    use KangaFlag::*;
    use KangaSubcommand::*;

    let switch = match (subcommand, flag) {
        (_, Threads) => "-T",
        (_, LogFile) => "-F",
        (_, Output) => "-o",

        (Ngsqc, MinPhred) => "-p",
        (Ngsqc | Filter, AdaptorSeqs) => "-c",
        (Ngsqc | Filter, Pe1Input) => "-i",
        (Ngsqc, Pe2Input) => "-u",

        (Filter, Trim5) => "-x",
        (Filter, DistsOutput) => "-O",
        (Filter, Pe2Input) => "-I",

        (Assemb | Scaffold, Pe1Input) => "-a",
        (Assemb | Scaffold, Pe2Input) => "-A",
        (Assemb | Scaffold, ContigsInput) => "-c",
        (Assemb | Scaffold, MaxSubs) => "-s",

        (Scaffold, MinInsert) => "-p",
        (Scaffold, MaxInsert) => "-P",

        _ => return None,
    };
    Some(switch)
}

/// A biokanga command line. Flags serialise as `<switch><value>` tokens, in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KangaArgs {
    exe: String,
    subcommand: KangaSubcommand,
    flags: Vec<(KangaFlag, String)>,
}

impl KangaArgs {
    pub fn new(exe: &str, subcommand: KangaSubcommand) -> Self {
        KangaArgs {
            exe: exe.to_string(),
            subcommand,
            flags: Vec::new(),
        }
    }

    pub fn flag<V: ToString>(mut self, flag: KangaFlag, value: V) -> Result<Self, PipelineError> {
        if switch_for(self.subcommand, flag).is_none() {
            return Err(PipelineError::UnsupportedFlag { subcommand: self.subcommand, flag });
        }
        self.flags.push((flag, value.to_string()));
        Ok(self)
    }

    pub fn path_flag(self, flag: KangaFlag, path: &Path) -> Result<Self, PipelineError> {
        self.flag(flag, path.to_string_lossy())
    }

    pub fn program(&self) -> &str {
        &self.exe
    }

    pub fn subcommand(&self) -> KangaSubcommand {
        self.subcommand
    }

    /// Everything after the program name.
    pub fn args(&self) -> Vec<String> {
        let mut args_vec: Vec<String> = Vec::with_capacity(self.flags.len() + 1);
        args_vec.push(self.subcommand.as_str().to_string());
        for (flag, value) in &self.flags {
            // checked in `flag`
            if let Some(switch) = switch_for(self.subcommand, *flag) {
                args_vec.push(format!("{}{}", switch, value));
            }
        }
        args_vec
    }

    pub fn to_vec(&self) -> Vec<String> {
        let mut full = vec![self.exe.clone()];
        full.extend(self.args());
        full
    }

    pub fn values_of(&self, flag: KangaFlag) -> Vec<&str> {
        self.flags
            .iter()
            .filter(|(f, _)| *f == flag)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// Adds one `-i`/`-u` (or `-i`/`-I`) flag per raw reads file, by pairing suffix.
fn add_raw_read_inputs(
    mut args: KangaArgs,
    config: &RunConfig,
    sample_set: &SampleSet,
) -> Result<KangaArgs, PipelineError> {
    for read in &sample_set.reads {
        let flag = match classify_read(read, &config.suffixes)? {
            ReadRole::Pe1 => KangaFlag::Pe1Input,
            ReadRole::Pe2 => KangaFlag::Pe2Input,
        };
        args = args.path_flag(flag, &config.paths.raw_reads(read))?;
    }
    Ok(args)
}

fn add_adaptor_seqs(args: KangaArgs, config: &RunConfig) -> Result<KangaArgs, PipelineError> {
    if config.toggles.filter_adaptors {
        args.path_flag(KangaFlag::AdaptorSeqs, &config.paths.adaptor_seqs)
    } else {
        Ok(args)
    }
}

pub mod ngsqc {
    use super::*;

    pub fn arg_generator(config: &RunConfig, sample_set: &SampleSet) -> Result<KangaArgs, PipelineError> {
        let paths = &config.paths;
        let args = KangaArgs::new(&config.exe, KangaSubcommand::Ngsqc)
            .flag(KangaFlag::Threads, config.params.threads)?
            .flag(KangaFlag::MinPhred, config.params.qc_min_phred)?
            .path_flag(KangaFlag::LogFile, &paths.tool_log(&config.exe, &sample_set.name))?
            .path_flag(KangaFlag::Output, &paths.ngsqc_output(&sample_set.name))?;
        let args = add_adaptor_seqs(args, config)?;
        add_raw_read_inputs(args, config, sample_set)
    }
}

pub mod filter {
    use super::*;

    pub fn arg_generator(config: &RunConfig, sample_set: &SampleSet) -> Result<KangaArgs, PipelineError> {
        let paths = &config.paths;
        let trim5 = config.params.trim5;
        let args = KangaArgs::new(&config.exe, KangaSubcommand::Filter)
            .flag(KangaFlag::Threads, config.params.threads)?
            .flag(KangaFlag::Trim5, trim5)?
            .path_flag(KangaFlag::LogFile, &paths.tool_log(&config.exe, &sample_set.name))?
            .path_flag(KangaFlag::DistsOutput, &paths.filter_dists(&sample_set.name, trim5))?
            .path_flag(KangaFlag::Output, &paths.filter_output(&sample_set.name, trim5))?;
        let args = add_adaptor_seqs(args, config)?;
        add_raw_read_inputs(args, config, sample_set)
    }
}

pub mod assemb {
    use super::*;

    /// First pass: assemble the filtered read pairs.
    pub fn arg_generator(config: &RunConfig, sample_set: &SampleSet) -> Result<KangaArgs, PipelineError> {
        let paths = &config.paths;
        let name = &sample_set.name;
        let trim5 = config.params.trim5;
        KangaArgs::new(&config.exe, KangaSubcommand::Assemb)
            .flag(KangaFlag::Threads, config.params.threads)?
            .path_flag(KangaFlag::LogFile, &paths.tool_log(&config.exe, name))?
            .path_flag(KangaFlag::Pe1Input, &paths.filtered_reads(name, trim5, ReadRole::Pe1))?
            .path_flag(KangaFlag::Pe2Input, &paths.filtered_reads(name, trim5, ReadRole::Pe2))?
            .path_flag(KangaFlag::Output, &PathSet::assemb_output(&paths.assembled, name, trim5))
    }

    /// Second pass: reassemble the first-pass contigs alone, tolerating more substitutions.
    pub fn reassembly_arg_generator(
        config: &RunConfig,
        sample_set: &SampleSet,
    ) -> Result<KangaArgs, PipelineError> {
        let paths = &config.paths;
        let name = &sample_set.name;
        let trim5 = config.params.trim5;
        KangaArgs::new(&config.exe, KangaSubcommand::Assemb)
            .flag(KangaFlag::Threads, config.params.threads)?
            .path_flag(KangaFlag::LogFile, &paths.tool_log(&config.exe, name))?
            .flag(KangaFlag::MaxSubs, config.params.reassemb_max_subs)?
            .path_flag(KangaFlag::ContigsInput, &PathSet::assemb_contigs(&paths.assembled, name, trim5))?
            .path_flag(KangaFlag::Output, &PathSet::assemb_output(&paths.reassemb_assembled, name, trim5))
    }
}

pub mod scaffold {
    use super::*;

    /// Scaffolds the contigs found in `contigs_dir` into `output_dir`, using the filtered pairs.
    pub fn arg_generator(
        config: &RunConfig,
        sample_set: &SampleSet,
        contigs_dir: &Path,
        output_dir: &Path,
    ) -> Result<KangaArgs, PipelineError> {
        let paths = &config.paths;
        let name = &sample_set.name;
        let trim5 = config.params.trim5;
        KangaArgs::new(&config.exe, KangaSubcommand::Scaffold)
            .flag(KangaFlag::MaxSubs, config.params.scaffold_max_subs)?
            .flag(KangaFlag::Threads, config.params.threads)?
            .flag(KangaFlag::MinInsert, config.params.scaff_min_insert)?
            .flag(KangaFlag::MaxInsert, config.params.scaff_max_insert)?
            .path_flag(KangaFlag::LogFile, &paths.tool_log(&config.exe, name))?
            .path_flag(KangaFlag::Pe1Input, &paths.filtered_reads(name, trim5, ReadRole::Pe1))?
            .path_flag(KangaFlag::Pe2Input, &paths.filtered_reads(name, trim5, ReadRole::Pe2))?
            .path_flag(KangaFlag::ContigsInput, &PathSet::assemb_contigs(contigs_dir, name, trim5))?
            .path_flag(KangaFlag::Output, &PathSet::scaffold_output(output_dir, name, trim5))
    }
}

pub fn generate_cli(
    phase: Phase,
    config: &RunConfig,
    sample_set: &SampleSet,
) -> Result<KangaArgs, PipelineError> {
    let paths = &config.paths;
    match phase {
        Phase::Ngsqc => ngsqc::arg_generator(config, sample_set),
        Phase::Filter => filter::arg_generator(config, sample_set),
        Phase::Assemb => assemb::arg_generator(config, sample_set),
        Phase::Scaffold => scaffold::arg_generator(config, sample_set, &paths.assembled, &paths.scaffolded),
        Phase::ReassembAssemb => assemb::reassembly_arg_generator(config, sample_set),
        Phase::ReassembScaffold => scaffold::arg_generator(
            config,
            sample_set,
            &paths.reassemb_assembled,
            &paths.reassemb_scaffolded,
        ),
    }
}


/// How one biokanga invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    Success,
    /// Non-zero exit; `None` when the process was killed by a signal.
    Failed(Option<i32>),
    SpawnFailed(String),
    /// Nothing was run.
    DryRun,
}

impl ToolOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Success | ToolOutcome::DryRun)
    }

    pub fn describe(&self) -> String {
        match self {
            ToolOutcome::Success => "exited successfully".to_string(),
            ToolOutcome::Failed(Some(code)) => format!("exited with status {}", code),
            ToolOutcome::Failed(None) => "was terminated by a signal".to_string(),
            ToolOutcome::SpawnFailed(e) => format!("could not be started: {}", e),
            ToolOutcome::DryRun => "was not run (dry run)".to_string(),
        }
    }
}

/// Runs one command line to completion.
#[allow(async_fn_in_trait)]
pub trait ToolRunner {
    async fn run(&mut self, args: &KangaArgs) -> ToolOutcome;
}

/// Spawns the real executable and waits for it. Output goes straight to the driver's stdout/stderr.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    async fn run(&mut self, args: &KangaArgs) -> ToolOutcome {
        let status = Command::new(args.program())
            .args(args.args())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await;

        match status {
            Ok(status) if status.success() => ToolOutcome::Success,
            Ok(status) => ToolOutcome::Failed(status.code()),
            Err(e) => ToolOutcome::SpawnFailed(e.to_string()),
        }
    }
}

#[derive(Debug, Default)]
pub struct DryRunner;

impl ToolRunner for DryRunner {
    async fn run(&mut self, args: &KangaArgs) -> ToolOutcome {
        info!("Dry run, not starting: {}", args.to_vec().join(" "));
        ToolOutcome::DryRun
    }
}


/// Makes sure the toolchain executable can be started at all, before any phase commits to it.
/// biokanga without arguments prints its usage, so the exit status is not inspected.
pub async fn kanga_presence_check(exe: &str) -> Result<(), PipelineError> {
    let status = Command::new(exe)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|e| PipelineError::ToolExecution {
            tool: exe.to_string(),
            error: format!("Failed to spawn: {}. Is {} installed?", e, exe),
        })?;
    debug!("{} presence check exited with {:?}", exe, status.code());
    Ok(())
}
