use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::cli::{Arguments, FailurePolicy};
use crate::config::catalog::{default_catalog, select_sample_sets};
use crate::config::paths::{PathSet, Platform};
use crate::utils::command::KangaFlag;
use crate::utils::system::resolve_threads;

// External software
pub const BIOKANGA_TAG: &str = "biokanga";

// Static Parameters
pub const DEFAULT_THREADS: usize = 48;
pub const DEFAULT_TRIM5: u32 = 0;
pub const DEFAULT_QC_MIN_PHRED: u32 = 0;
pub const DEFAULT_SCAFF_MIN_INSERT: u32 = 110;
pub const DEFAULT_SCAFF_MAX_INSERT: u32 = 1500;
pub const SCAFFOLD_MAX_SUBS: u32 = 0;
pub const DEFAULT_REASSEMB_MAX_SUBS: u32 = 5;

// Filenames ending in these are the first / second read of a pair
pub const PE1_SUFFIXES: &[&str] = &["_1_sequence.fastq.gz", "_R1.fastq.gz"];
pub const PE2_SUFFIXES: &[&str] = &["_2_sequence.fastq.gz", "_R2.fastq.gz"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KangaSubcommand {
    Ngsqc,
    Filter,
    Assemb,
    Scaffold,
}

impl KangaSubcommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            KangaSubcommand::Ngsqc => "ngsqc",
            KangaSubcommand::Filter => "filter",
            KangaSubcommand::Assemb => "assemb",
            KangaSubcommand::Scaffold => "scaffold",
        }
    }
}

impl fmt::Display for KangaSubcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stage of the pipeline. Stages always execute in `Phase::ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Ngsqc,
    Filter,
    Assemb,
    Scaffold,
    ReassembAssemb,
    ReassembScaffold,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::Ngsqc,
        Phase::Filter,
        Phase::Assemb,
        Phase::Scaffold,
        Phase::ReassembAssemb,
        Phase::ReassembScaffold,
    ];

    pub fn subcommand(&self) -> KangaSubcommand {
        match self {
            Phase::Ngsqc => KangaSubcommand::Ngsqc,
            Phase::Filter => KangaSubcommand::Filter,
            Phase::Assemb | Phase::ReassembAssemb => KangaSubcommand::Assemb,
            Phase::Scaffold | Phase::ReassembScaffold => KangaSubcommand::Scaffold,
        }
    }

    /// Phases that take the raw read files as input and so need pairing roles.
    pub fn consumes_raw_reads(&self) -> bool {
        matches!(self, Phase::Ngsqc | Phase::Filter)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Ngsqc => "quality check",
            Phase::Filter => "filter",
            Phase::Assemb => "assembly",
            Phase::Scaffold => "scaffolding",
            Phase::ReassembAssemb => "reassembly",
            Phase::ReassembScaffold => "reassembly scaffolding",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSet {
    pub name: String,
    pub reads: Vec<String>,
}

impl SampleSet {
    pub fn new(name: &str, reads: &[&str]) -> Self {
        SampleSet {
            name: name.to_string(),
            reads: reads.iter().map(|r| r.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseParams {
    pub threads: usize,
    pub trim5: u32,
    pub qc_min_phred: u32,
    pub scaff_min_insert: u32,
    pub scaff_max_insert: u32,
    pub scaffold_max_subs: u32,
    pub reassemb_max_subs: u32,
}

impl Default for PhaseParams {
    fn default() -> Self {
        PhaseParams {
            threads: DEFAULT_THREADS,
            trim5: DEFAULT_TRIM5,
            qc_min_phred: DEFAULT_QC_MIN_PHRED,
            scaff_min_insert: DEFAULT_SCAFF_MIN_INSERT,
            scaff_max_insert: DEFAULT_SCAFF_MAX_INSERT,
            scaffold_max_subs: SCAFFOLD_MAX_SUBS,
            reassemb_max_subs: DEFAULT_REASSEMB_MAX_SUBS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseToggles {
    pub ngsqc: bool,
    pub filter: bool,
    pub filter_adaptors: bool,
    pub assemb: bool,
    pub scaffold: bool,
    /// Covers both the reassembly and the reassembly scaffolding phase.
    pub reassembly: bool,
}

impl Default for PhaseToggles {
    fn default() -> Self {
        PhaseToggles {
            ngsqc: true,
            filter: true,
            filter_adaptors: true,
            assemb: true,
            scaffold: true,
            reassembly: true,
        }
    }
}

impl PhaseToggles {
    pub fn is_enabled(&self, phase: Phase) -> bool {
        match phase {
            Phase::Ngsqc => self.ngsqc,
            Phase::Filter => self.filter,
            Phase::Assemb => self.assemb,
            Phase::Scaffold => self.scaffold,
            Phase::ReassembAssemb | Phase::ReassembScaffold => self.reassembly,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingSuffixes {
    pub pe1: Vec<String>,
    pub pe2: Vec<String>,
}

impl Default for PairingSuffixes {
    fn default() -> Self {
        PairingSuffixes {
            pe1: PE1_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            pe2: PE2_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingRead {
    pub sample_set: String,
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{} '{}' exists but is a file", .label, .path.display())]
    PathIsFile { label: &'static str, path: PathBuf },

    #[error("{} '{}' does not exist", .label, .path.display())]
    MissingDirectory { label: &'static str, path: PathBuf },

    #[error("AdaptorSeqs '{}' is not a file", .0.display())]
    MissingAdaptorFile(PathBuf),

    #[error("{} reads file(s) missing from '{}'", .missing.len(), .dir.display())]
    MissingReads { dir: PathBuf, missing: Vec<MissingRead> },

    #[error(
        "Input reads file '{}' does not have PE1 ({}) or PE2 ({}) suffix",
        .file,
        .pe1.join(", "),
        .pe2.join(", ")
    )]
    UnrecognisedPairing { file: String, pe1: Vec<String>, pe2: Vec<String> },

    #[error("Flag {:?} is not accepted by '{}'", .flag, .subcommand)]
    UnsupportedFlag { subcommand: KangaSubcommand, flag: KangaFlag },

    #[error("Tool {} failed: {}", .tool, .error)]
    ToolExecution { tool: String, error: String },

    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
}

/// Everything a run needs, fixed once at startup and shared by reference with every phase.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub exe: String,
    pub paths: PathSet,
    pub sample_sets: Vec<SampleSet>,
    pub params: PhaseParams,
    pub toggles: PhaseToggles,
    pub suffixes: PairingSuffixes,
    pub on_failure: FailurePolicy,
    pub dry_run: bool,
}

impl RunConfig {
    pub fn with_defaults(paths: PathSet, sample_sets: Vec<SampleSet>) -> Self {
        RunConfig {
            exe: BIOKANGA_TAG.to_string(),
            paths,
            sample_sets,
            params: PhaseParams::default(),
            toggles: PhaseToggles::default(),
            suffixes: PairingSuffixes::default(),
            on_failure: FailurePolicy::default(),
            dry_run: false,
        }
    }

    pub fn from_args(args: &Arguments) -> Result<Self, PipelineError> {
        let paths = match &args.root {
            Some(root) => PathSet::from_root(root),
            None => PathSet::resolve(Platform::current()),
        };

        if args.exe.trim().is_empty() {
            return Err(PipelineError::InvalidConfig("executable name is empty".to_string()));
        }
        if args.min_insert > args.max_insert {
            return Err(PipelineError::InvalidConfig(format!(
                "scaffold min insert size {} exceeds max insert size {}",
                args.min_insert, args.max_insert
            )));
        }

        let sample_sets = select_sample_sets(&default_catalog(), &args.sample_sets)?;

        let params = PhaseParams {
            threads: resolve_threads(args.threads),
            trim5: args.trim5,
            qc_min_phred: args.min_phred,
            scaff_min_insert: args.min_insert,
            scaff_max_insert: args.max_insert,
            scaffold_max_subs: SCAFFOLD_MAX_SUBS,
            reassemb_max_subs: args.reassemb_max_subs,
        };

        let toggles = PhaseToggles {
            ngsqc: !args.skip_ngsqc,
            filter: !args.skip_filter,
            filter_adaptors: !args.no_adaptor_filter,
            assemb: !args.skip_assemb,
            scaffold: !args.skip_scaffold,
            reassembly: !args.skip_reassembly,
        };

        Ok(RunConfig {
            exe: args.exe.clone(),
            paths,
            sample_sets,
            params,
            toggles,
            suffixes: PairingSuffixes::default(),
            on_failure: args.on_failure,
            dry_run: args.dry_run,
        })
    }
}
