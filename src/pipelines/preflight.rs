//! Checks run before any biokanga phase starts.
//!
//! Nothing here is destructive, so a failure needs no cleanup: the run just stops.
//! Every raw reads file in the catalog is checked up front, since finding a missing one
//! after days of assembly is far more expensive.

use std::path::PathBuf;

use log::{debug, error, info};

use crate::config::defs::{MissingRead, Phase, PipelineError, RunConfig};
use crate::config::paths::PathSet;
use crate::utils::fastx::classify_read;
use crate::utils::file::{ensure_dir, require_dir, DirStatus};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PreflightReport {
    pub created_dirs: Vec<PathBuf>,
    pub reads_checked: usize,
}

/// The logger writes into the logs directory, so it has to exist before anything else.
/// No logger is installed yet, so creating it is reported on stdout.
pub fn prepare_logs_dir(paths: &PathSet) -> Result<DirStatus, PipelineError> {
    let status = ensure_dir("LogsPath", &paths.logs)?;
    if status == DirStatus::Created {
        println!("LogsPath '{}' does not exist, creating path", paths.logs.display());
    }
    Ok(status)
}

pub fn run(config: &RunConfig) -> Result<PreflightReport, PipelineError> {
    let paths = &config.paths;
    let mut report = PreflightReport::default();

    for (label, dir) in paths.output_dirs() {
        if ensure_dir(label, dir)? == DirStatus::Created {
            report.created_dirs.push(dir.to_path_buf());
        }
    }

    if config.toggles.filter_adaptors && !paths.adaptor_seqs.is_file() {
        return Err(PipelineError::MissingAdaptorFile(paths.adaptor_seqs.clone()));
    }

    require_dir("SrcReadsPath", &paths.src_reads)?;

    report.reads_checked = check_raw_reads(config)?;

    if Phase::ALL
        .iter()
        .any(|p| p.consumes_raw_reads() && config.toggles.is_enabled(*p))
    {
        check_pairing(config)?;
    }

    info!(
        "Preflight passed: {} reads files across {} sample sets, {} directories created",
        report.reads_checked,
        config.sample_sets.len(),
        report.created_dirs.len()
    );
    Ok(report)
}

/// Looks for every catalog file under the source reads directory and reports all that are missing.
fn check_raw_reads(config: &RunConfig) -> Result<usize, PipelineError> {
    let mut missing = Vec::new();
    let mut checked = 0;

    for sample_set in &config.sample_sets {
        for read in &sample_set.reads {
            let path = config.paths.raw_reads(read);
            checked += 1;
            if !path.is_file() {
                error!(
                    "Reads file '{}' for sample set '{}' does not exist or is a directory",
                    path.display(),
                    sample_set.name
                );
                missing.push(MissingRead { sample_set: sample_set.name.clone(), path });
            }
        }
    }

    if !missing.is_empty() {
        return Err(PipelineError::MissingReads { dir: config.paths.src_reads.clone(), missing });
    }
    debug!("All {} raw reads files present", checked);
    Ok(checked)
}

fn check_pairing(config: &RunConfig) -> Result<(), PipelineError> {
    for sample_set in &config.sample_sets {
        for read in &sample_set.reads {
            classify_read(read, &config.suffixes)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;
    use crate::config::defs::SampleSet;

    const ALL_READS: &[&str] =
        &["a_R1.fastq.gz", "a_R2.fastq.gz", "b_R1.fastq.gz", "b_R2.fastq.gz"];

    fn stage(root: &Path, reads: &[&str]) -> anyhow::Result<RunConfig> {
        let paths = PathSet::from_root(root);
        fs::create_dir_all(&paths.src_reads)?;
        fs::create_dir_all(paths.adaptor_seqs.parent().unwrap())?;
        fs::write(&paths.adaptor_seqs, b">adaptor\nAGATCGGAAGAGC\n")?;
        for read in reads {
            fs::write(paths.raw_reads(read), b"")?;
        }
        Ok(RunConfig::with_defaults(
            paths,
            vec![SampleSet::new("S", ALL_READS)],
        ))
    }

    #[test]
    fn test_preflight_creates_output_dirs() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let config = stage(tmp.path(), ALL_READS)?;

        let report = run(&config)?;
        assert_eq!(report.reads_checked, 4);
        // experiments already existed because the reads were staged under it
        assert_eq!(report.created_dirs.len(), 7);
        for (_, dir) in config.paths.output_dirs() {
            assert!(dir.is_dir(), "{}", dir.display());
        }

        let again = run(&config)?;
        assert!(again.created_dirs.is_empty());
        Ok(())
    }

    #[test]
    fn test_preflight_reports_every_missing_read() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let config = stage(tmp.path(), &["a_R1.fastq.gz", "b_R2.fastq.gz"])?;

        match run(&config) {
            Err(PipelineError::MissingReads { missing, .. }) => {
                let names: Vec<String> = missing
                    .iter()
                    .map(|m| m.path.file_name().unwrap().to_string_lossy().into_owned())
                    .collect();
                assert_eq!(names, vec!["a_R2.fastq.gz", "b_R1.fastq.gz"]);
                assert!(missing.iter().all(|m| m.sample_set == "S"));
            }
            other => panic!("expected MissingReads, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_preflight_missing_read_that_is_a_directory() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let config = stage(tmp.path(), &["a_R1.fastq.gz", "a_R2.fastq.gz", "b_R1.fastq.gz"])?;
        fs::create_dir(config.paths.raw_reads("b_R2.fastq.gz"))?;
        assert!(matches!(run(&config), Err(PipelineError::MissingReads { .. })));
        Ok(())
    }

    #[test]
    fn test_preflight_missing_adaptor_file() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let mut config = stage(tmp.path(), ALL_READS)?;
        fs::remove_file(&config.paths.adaptor_seqs)?;

        assert!(matches!(run(&config), Err(PipelineError::MissingAdaptorFile(_))));

        config.toggles.filter_adaptors = false;
        run(&config)?;
        Ok(())
    }

    #[test]
    fn test_preflight_output_dir_is_a_file() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let config = stage(tmp.path(), ALL_READS)?;
        fs::write(&config.paths.scaffolded, b"")?;

        let err = run(&config).unwrap_err();
        assert!(matches!(err, PipelineError::PathIsFile { label: "ScaffoldPath", .. }));
        Ok(())
    }

    #[test]
    fn test_preflight_source_reads_never_created() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let mut config = RunConfig::with_defaults(PathSet::from_root(tmp.path()), vec![]);
        config.toggles.filter_adaptors = false;

        assert!(matches!(
            run(&config),
            Err(PipelineError::MissingDirectory { label: "SrcReadsPath", .. })
        ));
        assert!(!config.paths.src_reads.exists());
        Ok(())
    }

    #[test]
    fn test_preflight_checks_pairing_when_reads_are_consumed() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let mut reads = ALL_READS.to_vec();
        reads.push("c.fastq.gz");
        let mut config = stage(tmp.path(), &reads)?;
        config.sample_sets[0].reads.push("c.fastq.gz".to_string());

        assert!(matches!(run(&config), Err(PipelineError::UnrecognisedPairing { .. })));

        config.toggles.ngsqc = false;
        config.toggles.filter = false;
        run(&config)?;
        Ok(())
    }

    #[test]
    fn test_prepare_logs_dir_creates_once() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let paths = PathSet::from_root(tmp.path());

        assert_eq!(prepare_logs_dir(&paths)?, DirStatus::Created);
        assert!(paths.logs.is_dir());
        assert_eq!(prepare_logs_dir(&paths)?, DirStatus::Existing);
        Ok(())
    }

    #[test]
    fn test_prepare_logs_dir_rejects_a_file() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let paths = PathSet::from_root(tmp.path());
        fs::create_dir_all(&paths.experiments)?;
        fs::write(&paths.logs, b"")?;

        assert!(matches!(
            prepare_logs_dir(&paths),
            Err(PipelineError::PathIsFile { label: "LogsPath", .. })
        ));
        Ok(())
    }
}
