use crate::config::defs::{PairingSuffixes, PipelineError};

/// Which end of a paired-end fragment a read file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadRole {
    Pe1,
    Pe2,
}

impl ReadRole {
    /// Tag biokanga uses in the names of its paired outputs.
    pub fn tag(&self) -> &'static str {
        match self {
            ReadRole::Pe1 => "R1",
            ReadRole::Pe2 => "R2",
        }
    }
}


/// Decides whether a raw reads file is PE1 or PE2 from its name alone.
/// Position within the sample set is never consulted.
///
/// # Arguments
///
/// * `file_name` - Reads file name, as listed in the sample catalog.
/// * `suffixes` - Accepted PE1 and PE2 name endings.
///
/// # Returns
/// Result<ReadRole>. Err if the name ends with neither set, or with both.
///
pub fn classify_read(file_name: &str, suffixes: &PairingSuffixes) -> Result<ReadRole, PipelineError> {
    let is_pe1 = suffixes.pe1.iter().any(|s| file_name.ends_with(s.as_str()));
    let is_pe2 = suffixes.pe2.iter().any(|s| file_name.ends_with(s.as_str()));

    match (is_pe1, is_pe2) {
        (true, false) => Ok(ReadRole::Pe1),
        (false, true) => Ok(ReadRole::Pe2),
        (true, true) => Err(PipelineError::InvalidConfig(format!(
            "Input reads file '{}' matches both PE1 and PE2 suffixes",
            file_name
        ))),
        (false, false) => Err(PipelineError::UnrecognisedPairing {
            file: file_name.to_string(),
            pe1: suffixes.pe1.clone(),
            pe2: suffixes.pe2.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_read_by_suffix() {
        let suffixes = PairingSuffixes::default();
        assert_eq!(classify_read("1AL_001_5_1_sequence.fastq.gz", &suffixes).unwrap(), ReadRole::Pe1);
        assert_eq!(classify_read("1AL_001_5_2_sequence.fastq.gz", &suffixes).unwrap(), ReadRole::Pe2);
        assert_eq!(classify_read("1DL_001_L006_R1.fastq.gz", &suffixes).unwrap(), ReadRole::Pe1);
        assert_eq!(classify_read("1DL_001_L006_R2.fastq.gz", &suffixes).unwrap(), ReadRole::Pe2);
    }

    #[test]
    fn test_classify_read_ignores_position_markers_mid_name() {
        let suffixes = PairingSuffixes::default();
        // "_R1" appears in the name but the suffix says PE2
        assert_eq!(classify_read("sample_R1_lane_R2.fastq.gz", &suffixes).unwrap(), ReadRole::Pe2);
    }

    #[test]
    fn test_classify_read_unrecognised() {
        let suffixes = PairingSuffixes::default();
        let err = classify_read("1AL_001_5_sequence.fastq.gz", &suffixes).unwrap_err();
        assert!(matches!(err, PipelineError::UnrecognisedPairing { .. }));
        assert!(err.to_string().contains("1AL_001_5_sequence.fastq.gz"));

        // uncompressed reads are not accepted either
        assert!(classify_read("1DL_001_L006_R1.fastq", &suffixes).is_err());
    }

    #[test]
    fn test_classify_read_ambiguous() {
        let suffixes = PairingSuffixes {
            pe1: vec![".fastq.gz".to_string()],
            pe2: vec!["_R2.fastq.gz".to_string()],
        };
        assert!(matches!(
            classify_read("x_R2.fastq.gz", &suffixes),
            Err(PipelineError::InvalidConfig(_))
        ));
    }
}
