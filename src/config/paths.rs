//! Directory layout of an experiment and the file naming shared between phases.
//!
//! Later phases never ask earlier ones where their output went; they rebuild the same
//! name from the sample set and the trim length. Every such name is produced here.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::defs::BIOKANGA_TAG;
use crate::utils::fastx::ReadRole;

pub const POSIX_ROOT: &str = "/data1/Wheat";
pub const WINDOWS_ROOT: &str = "c:\\wheat";

pub const EXPERIMENTS_DIR: &str = "GSS_AssembReads";
pub const SRC_READS_DIR: &str = "Data";
pub const NGSQC_DIR: &str = "NGSqc";
pub const FILTER_DIR: &str = "Filtered";
pub const ASSEMB_DIR: &str = "Assembled";
pub const SCAFFOLD_DIR: &str = "Scaffolded";
pub const LOGS_DIR: &str = "Logs";
pub const RESOURCES_DIR: &str = "Resources";
pub const ADAPTOR_SEQS_FILE: &str = "IlluminaAdaptersAllpXENpQ108_nodup.fasta";
/// Appended to the first-pass directory names to get the reassembly directories.
pub const REASSEMB_SUFFIX: &str = "Reassemb";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Posix,
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) { Platform::Windows } else { Platform::Posix }
    }

    pub fn root(&self) -> &'static str {
        match self {
            Platform::Posix => POSIX_ROOT,
            Platform::Windows => WINDOWS_ROOT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSet {
    pub root: PathBuf,
    pub experiments: PathBuf,
    pub src_reads: PathBuf,
    pub ngsqc: PathBuf,
    pub filtered: PathBuf,
    pub assembled: PathBuf,
    pub scaffolded: PathBuf,
    pub logs: PathBuf,
    pub adaptor_seqs: PathBuf,
    pub reassemb_assembled: PathBuf,
    pub reassemb_scaffolded: PathBuf,
}

impl PathSet {
    pub fn resolve(platform: Platform) -> Self {
        PathSet::from_root(platform.root())
    }

    pub fn from_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let experiments = root.join(EXPERIMENTS_DIR);
        PathSet {
            src_reads: experiments.join(SRC_READS_DIR),
            ngsqc: experiments.join(NGSQC_DIR),
            filtered: experiments.join(FILTER_DIR),
            assembled: experiments.join(ASSEMB_DIR),
            scaffolded: experiments.join(SCAFFOLD_DIR),
            logs: experiments.join(LOGS_DIR),
            adaptor_seqs: experiments.join(RESOURCES_DIR).join(ADAPTOR_SEQS_FILE),
            reassemb_assembled: experiments.join(format!("{}{}", ASSEMB_DIR, REASSEMB_SUFFIX)),
            reassemb_scaffolded: experiments.join(format!("{}{}", SCAFFOLD_DIR, REASSEMB_SUFFIX)),
            experiments,
            root,
        }
    }

    /// Directories the pipeline writes into, labelled for diagnostics, in the order preflight checks them.
    pub fn output_dirs(&self) -> Vec<(&'static str, &Path)> {
        vec![
            ("ExperimentsPath", self.experiments.as_path()),
            ("NGSqcPath", self.ngsqc.as_path()),
            ("FilterPath", self.filtered.as_path()),
            ("AssembPath", self.assembled.as_path()),
            ("ScaffoldPath", self.scaffolded.as_path()),
            ("ReassembAssembPath", self.reassemb_assembled.as_path()),
            ("ReassembScaffoldPath", self.reassemb_scaffolded.as_path()),
            ("LogsPath", self.logs.as_path()),
        ]
    }

    pub fn raw_reads(&self, file_name: &str) -> PathBuf {
        self.src_reads.join(file_name)
    }

    /// Log file biokanga appends to for every phase of one sample set.
    /// Only the executable's file name is used, so `--exe /opt/bin/biokanga` still logs under `logs`.
    pub fn tool_log(&self, exe: &str, sample: &str) -> PathBuf {
        let tool = Path::new(exe)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(BIOKANGA_TAG);
        self.logs.join(format!("{}_{}.log", tool, sample))
    }

    pub fn ngsqc_output(&self, sample: &str) -> PathBuf {
        self.ngsqc.join(format!("{}.ngsqc", sample))
    }

    pub fn filter_dists(&self, sample: &str, trim5: u32) -> PathBuf {
        self.filtered.join(format!("{}.dists.csv", trimmed_stem(sample, trim5)))
    }

    /// Output prefix handed to `filter -o`; biokanga appends `.R1.fasta` / `.R2.fasta`.
    pub fn filter_output(&self, sample: &str, trim5: u32) -> PathBuf {
        self.filtered.join(format!("{}.Filtered", trimmed_stem(sample, trim5)))
    }

    pub fn filtered_reads(&self, sample: &str, trim5: u32, role: ReadRole) -> PathBuf {
        append_to_path(&self.filter_output(sample, trim5), &format!(".{}.fasta", role.tag()))
    }

    /// Output prefix handed to `assemb -o` when writing into `dir`.
    pub fn assemb_output(dir: &Path, sample: &str, trim5: u32) -> PathBuf {
        dir.join(format!("{}.Filtered.assemb", trimmed_stem(sample, trim5)))
    }

    /// Single-end contigs biokanga writes next to the `assemb -o` prefix.
    pub fn assemb_contigs(dir: &Path, sample: &str, trim5: u32) -> PathBuf {
        append_to_path(&PathSet::assemb_output(dir, sample, trim5), ".SE.fasta")
    }

    pub fn scaffold_output(dir: &Path, sample: &str, trim5: u32) -> PathBuf {
        append_to_path(&PathSet::assemb_output(dir, sample, trim5), ".scaffold")
    }
}

fn trimmed_stem(sample: &str, trim5: u32) -> String {
    format!("{}.x{}", sample, trim5)
}

fn append_to_path(path: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_roots() {
        assert_eq!(PathSet::resolve(Platform::Posix).root, PathBuf::from("/data1/Wheat"));
        assert_eq!(PathSet::resolve(Platform::Windows).root, PathBuf::from("c:\\wheat"));
    }

    #[test]
    fn test_derived_dirs() {
        let paths = PathSet::from_root("/data1/Wheat");
        assert_eq!(paths.experiments, PathBuf::from("/data1/Wheat/GSS_AssembReads"));
        assert_eq!(paths.src_reads, PathBuf::from("/data1/Wheat/GSS_AssembReads/Data"));
        assert_eq!(paths.logs, PathBuf::from("/data1/Wheat/GSS_AssembReads/Logs"));
        assert_eq!(
            paths.adaptor_seqs,
            PathBuf::from("/data1/Wheat/GSS_AssembReads/Resources/IlluminaAdaptersAllpXENpQ108_nodup.fasta")
        );
        assert_eq!(paths.reassemb_assembled, PathBuf::from("/data1/Wheat/GSS_AssembReads/AssembledReassemb"));
        assert_eq!(paths.reassemb_scaffolded, PathBuf::from("/data1/Wheat/GSS_AssembReads/ScaffoldedReassemb"));
        assert_eq!(paths.output_dirs().len(), 8);
    }

    #[test]
    fn test_filter_outputs_feed_assembly_inputs() {
        let paths = PathSet::from_root("/data1/Wheat");
        let prefix = paths.filter_output("GSS_1AL", 0);
        assert_eq!(prefix, PathBuf::from("/data1/Wheat/GSS_AssembReads/Filtered/GSS_1AL.x0.Filtered"));

        let r1 = paths.filtered_reads("GSS_1AL", 0, ReadRole::Pe1);
        let r2 = paths.filtered_reads("GSS_1AL", 0, ReadRole::Pe2);
        assert_eq!(r1, PathBuf::from("/data1/Wheat/GSS_AssembReads/Filtered/GSS_1AL.x0.Filtered.R1.fasta"));
        assert_eq!(r2, PathBuf::from("/data1/Wheat/GSS_AssembReads/Filtered/GSS_1AL.x0.Filtered.R2.fasta"));
        assert_eq!(
            paths.filter_dists("GSS_1AL", 0),
            PathBuf::from("/data1/Wheat/GSS_AssembReads/Filtered/GSS_1AL.x0.dists.csv")
        );
    }

    #[test]
    fn test_assembly_and_scaffold_names() {
        let paths = PathSet::from_root("/data1/Wheat");
        assert_eq!(
            PathSet::assemb_contigs(&paths.assembled, "GSS_1DS", 7),
            PathBuf::from("/data1/Wheat/GSS_AssembReads/Assembled/GSS_1DS.x7.Filtered.assemb.SE.fasta")
        );
        assert_eq!(
            PathSet::scaffold_output(&paths.reassemb_scaffolded, "GSS_1DS", 7),
            PathBuf::from("/data1/Wheat/GSS_AssembReads/ScaffoldedReassemb/GSS_1DS.x7.Filtered.assemb.scaffold")
        );
        assert_eq!(
            paths.tool_log("biokanga", "GSS_1DS"),
            PathBuf::from("/data1/Wheat/GSS_AssembReads/Logs/biokanga_GSS_1DS.log")
        );
    }

    #[test]
    fn test_tool_log_stays_in_logs_dir_for_path_exe() {
        let paths = PathSet::from_root("/data1/Wheat");
        let expected = PathBuf::from("/data1/Wheat/GSS_AssembReads/Logs/biokanga_GSS_1AL.log");

        assert_eq!(paths.tool_log("/opt/biokanga/bin/biokanga", "GSS_1AL"), expected);
        assert_eq!(paths.tool_log("bin/biokanga", "GSS_1AL"), expected);
        // nothing usable as a file name
        assert_eq!(paths.tool_log("..", "GSS_1AL"), expected);
    }
}
