use clap::{Parser, ValueEnum};

use crate::config::defs::{
    BIOKANGA_TAG, DEFAULT_QC_MIN_PHRED, DEFAULT_REASSEMB_MAX_SUBS, DEFAULT_SCAFF_MAX_INSERT,
    DEFAULT_SCAFF_MIN_INSERT, DEFAULT_THREADS, DEFAULT_TRIM5,
};

/// What to do when a biokanga invocation does not exit cleanly.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the whole run at the first failed invocation.
    #[default]
    Abort,
    /// Drop the failing sample set from every later phase, keep going with the rest.
    SkipSample,
    /// Log a warning and carry on as if the invocation had succeeded.
    Continue,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "kanga-assemb-pipeline",
    version,
    about = "Runs biokanga ngsqc, filter, assemb and scaffold over the GSS sample sets"
)]
pub struct Arguments {
    #[arg(short = 'v', long = "verbose", action)]
    pub verbose: bool,

    #[arg(
        long,
        help = "Root directory holding GSS_AssembReads. Defaults to /data1/Wheat, or c:\\wheat on Windows."
    )]
    pub root: Option<String>,

    #[arg(long = "exe", default_value = BIOKANGA_TAG)]
    pub exe: String,

    #[arg(
        short = 'T',
        long,
        default_value_t = DEFAULT_THREADS,
        help = "Threads handed to biokanga; 0 uses every physical core"
    )]
    pub threads: usize,

    #[arg(long, default_value_t = DEFAULT_TRIM5)]
    pub trim5: u32,

    #[arg(long, default_value_t = DEFAULT_QC_MIN_PHRED)]
    pub min_phred: u32,

    #[arg(long, default_value_t = DEFAULT_SCAFF_MIN_INSERT)]
    pub min_insert: u32,

    #[arg(long, default_value_t = DEFAULT_SCAFF_MAX_INSERT)]
    pub max_insert: u32,

    #[arg(long, default_value_t = DEFAULT_REASSEMB_MAX_SUBS)]
    pub reassemb_max_subs: u32,

    #[arg(long, default_value_t = false)]
    pub skip_ngsqc: bool,

    #[arg(long, default_value_t = false)]
    pub skip_filter: bool,

    #[arg(long, default_value_t = false)]
    pub no_adaptor_filter: bool,

    #[arg(long, default_value_t = false)]
    pub skip_assemb: bool,

    #[arg(long, default_value_t = false)]
    pub skip_scaffold: bool,

    #[arg(long, default_value_t = false)]
    pub skip_reassembly: bool,

    #[arg(long = "sample-set", help = "Only process the named sample set(s); may be repeated")]
    pub sample_sets: Vec<String>,

    #[arg(long = "on-failure", default_value = "abort", value_enum)]
    pub on_failure: FailurePolicy,

    #[arg(
        long,
        default_value_t = false,
        help = "Validate and log every command line without running biokanga"
    )]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_invocation_uses_baked_in_values() {
        let args = Arguments::parse_from(["kanga-assemb-pipeline"]);
        assert_eq!(args.exe, "biokanga");
        assert_eq!(args.threads, 48);
        assert_eq!(args.trim5, 0);
        assert_eq!(args.min_insert, 110);
        assert_eq!(args.max_insert, 1500);
        assert_eq!(args.reassemb_max_subs, 5);
        assert_eq!(args.on_failure, FailurePolicy::Abort);
        assert!(args.root.is_none());
        assert!(args.sample_sets.is_empty());
        assert!(!args.dry_run);
    }

    #[test]
    fn test_failure_policy_and_sample_sets() {
        let args = Arguments::parse_from([
            "kanga-assemb-pipeline",
            "--on-failure",
            "skip-sample",
            "--sample-set",
            "GSS_1AL",
            "--sample-set",
            "GSS_1DS",
            "--skip-assemb",
        ]);
        assert_eq!(args.on_failure, FailurePolicy::SkipSample);
        assert_eq!(args.sample_sets, vec!["GSS_1AL", "GSS_1DS"]);
        assert!(args.skip_assemb);
        assert!(!args.skip_scaffold);
    }
}
