//! The GSS read sets this pipeline was built for.
//!
//! Each sample set lists its raw read files as consecutive PE1/PE2 pairs. Outputs of every
//! phase are prefixed with the sample set name.

use lazy_static::lazy_static;

use crate::config::defs::{PipelineError, SampleSet};

const GSS_1AL: &[&str] = &[
    "1AL_001_5_1_sequence.fastq.gz", "1AL_001_5_2_sequence.fastq.gz",
    "1AL_002_2_1_sequence.fastq.gz", "1AL_002_2_2_sequence.fastq.gz",
    "1AL_003_4_1_sequence.fastq.gz", "1AL_003_4_2_sequence.fastq.gz",
    "1AL_004_3_1_sequence.fastq.gz", "1AL_004_3_2_sequence.fastq.gz",
    "1AL_005_4_1_sequence.fastq.gz", "1AL_005_4_2_sequence.fastq.gz",
    "1AL_006_L003_R1.fastq.gz", "1AL_006_L003_R2.fastq.gz",
    "1AL_007_L004_R1.fastq.gz", "1AL_007_L004_R2.fastq.gz",
];

const GSS_1AS: &[&str] = &[
    "1AS_001_1_1_sequence.fastq.gz", "1AS_001_1_2_sequence.fastq.gz",
    "1AS_002_2_1_sequence.fastq.gz", "1AS_002_2_2_sequence.fastq.gz",
    "1AS_003_L001_R1.fastq.gz", "1AS_003_L001_R2.fastq.gz",
    "1AS_004_L002_R1.fastq.gz", "1AS_004_L002_R2.fastq.gz",
];

const GSS_1BL: &[&str] = &[
    "1BL_001_7_1_sequence.fastq.gz", "1BL_001_7_2_sequence.fastq.gz",
    "1BL_002_3_1_sequence.fastq.gz", "1BL_002_3_2_sequence.fastq.gz",
    "1BL_003_4_1_sequence.fastq.gz", "1BL_003_4_2_sequence.fastq.gz",
    "1BL_004_L001_R1.fastq.gz", "1BL_004_L001_R2.fastq.gz",
];

const GSS_1BS: &[&str] = &[
    "1BS_001_2_1_sequence.fastq.gz", "1BS_001_2_2_sequence.fastq.gz",
    "1BS_002_3_1_sequence.fastq.gz", "1BS_002_3_2_sequence.fastq.gz",
    "1BS_003_6_1_sequence.fastq.gz", "1BS_003_6_2_sequence.fastq.gz",
];

const GSS_1DL: &[&str] = &[
    "1DL_001_L006_R1.fastq.gz", "1DL_001_L006_R2.fastq.gz",
    "1DL_002_L007_R1.fastq.gz", "1DL_002_L007_R2.fastq.gz",
    "1DL_003_L008_R1.fastq.gz", "1DL_003_L008_R2.fastq.gz",
];

const GSS_1DS: &[&str] = &[
    "1DS_001_6_1_sequence.fastq.gz", "1DS_001_6_2_sequence.fastq.gz",
    "1DS_002_6_1_sequence.fastq.gz", "1DS_002_6_2_sequence.fastq.gz",
    "1DS_003_7_1_sequence.fastq.gz", "1DS_003_7_2_sequence.fastq.gz",
];

lazy_static! {
    pub static ref SAMPLE_CATALOG: Vec<SampleSet> = {
        // The combined set pools every arm, in arm order
        let combined: Vec<&str> = [GSS_1AL, GSS_1AS, GSS_1BL, GSS_1BS, GSS_1DL, GSS_1DS]
            .concat();

        vec![
            SampleSet::new("GSS_1A_1B_1D", &combined),
            SampleSet::new("GSS_1AL", GSS_1AL),
            SampleSet::new("GSS_1AS", GSS_1AS),
            SampleSet::new("GSS_1BL", GSS_1BL),
            SampleSet::new("GSS_1BS", GSS_1BS),
            SampleSet::new("GSS_1DL", GSS_1DL),
            SampleSet::new("GSS_1DS", GSS_1DS),
        ]
    };
}

pub fn default_catalog() -> Vec<SampleSet> {
    SAMPLE_CATALOG.clone()
}

/// Restricts `catalog` to the requested names, keeping catalog order.
/// An empty request selects the whole catalog.
pub fn select_sample_sets(catalog: &[SampleSet], names: &[String]) -> Result<Vec<SampleSet>, PipelineError> {
    if names.is_empty() {
        return Ok(catalog.to_vec());
    }

    if let Some(unknown) = names.iter().find(|n| !catalog.iter().any(|s| &s.name == *n)) {
        let known: Vec<&str> = catalog.iter().map(|s| s.name.as_str()).collect();
        return Err(PipelineError::InvalidConfig(format!(
            "unknown sample set '{}' (known: {})",
            unknown,
            known.join(", ")
        )));
    }

    Ok(catalog
        .iter()
        .filter(|s| names.contains(&s.name))
        .cloned()
        .collect())
}
