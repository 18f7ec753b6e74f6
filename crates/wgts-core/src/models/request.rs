use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ResolveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phenotype {
    Tumor,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SampleType {
    Dna,
    Rna,
}

impl Phenotype {
    /// Lowercase form used in samplesheet rows.
    pub fn samplesheet_name(self) -> &'static str {
        match self {
            Phenotype::Tumor => "tumor",
            Phenotype::Normal => "normal",
        }
    }
}

impl SampleType {
    pub fn samplesheet_name(self) -> &'static str {
        match self {
            SampleType::Dna => "dna",
            SampleType::Rna => "rna",
        }
    }
}

impl fmt::Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Phenotype::Tumor => f.write_str("TUMOR"),
            Phenotype::Normal => f.write_str("NORMAL"),
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SampleType::Dna => f.write_str("DNA"),
            SampleType::Rna => f.write_str("RNA"),
        }
    }
}

/// Event for the outputs resolver: which result set to build for which run.
///
/// Library ids are only required for the combinations that use them, so all
/// three are optional on the wire. An empty string counts as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputsRequest {
    pub portal_run_id: String,
    pub phenotype: Phenotype,
    pub sample_type: SampleType,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub tumor_dna_library_id: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub normal_dna_library_id: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub tumor_rna_library_id: Option<String>,
}

/// A validated request: one of the three supported result sets with exactly
/// the identifiers it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputsTarget<'a> {
    TumorDna { tumor: &'a str, normal: &'a str },
    NormalDna { tumor: &'a str, normal: &'a str },
    TumorRna { tumor_rna: &'a str },
}

impl OutputsTarget<'_> {
    pub fn sample_type(&self) -> SampleType {
        match self {
            OutputsTarget::TumorDna { .. } | OutputsTarget::NormalDna { .. } => SampleType::Dna,
            OutputsTarget::TumorRna { .. } => SampleType::Rna,
        }
    }
}

impl OutputsRequest {
    /// Check the (sample type, phenotype) combination and its identifiers.
    pub fn target(&self) -> Result<OutputsTarget<'_>, ResolveError> {
        match (self.sample_type, self.phenotype) {
            (SampleType::Dna, phenotype) => {
                let (Some(tumor), Some(normal)) = (
                    self.tumor_dna_library_id.as_deref(),
                    self.normal_dna_library_id.as_deref(),
                ) else {
                    return Err(ResolveError::InvalidRequest(format!(
                        "both tumorDnaLibraryId and normalDnaLibraryId must be provided for DNA {phenotype}"
                    )));
                };
                Ok(match phenotype {
                    Phenotype::Tumor => OutputsTarget::TumorDna { tumor, normal },
                    Phenotype::Normal => OutputsTarget::NormalDna { tumor, normal },
                })
            }
            (SampleType::Rna, Phenotype::Tumor) => {
                let tumor_rna = self.tumor_rna_library_id.as_deref().ok_or_else(|| {
                    ResolveError::InvalidRequest(
                        "tumorRnaLibraryId must be provided for RNA TUMOR".to_string(),
                    )
                })?;
                Ok(OutputsTarget::TumorRna { tumor_rna })
            }
            (SampleType::Rna, Phenotype::Normal) => Err(ResolveError::InvalidRequest(
                "unsupported combination: RNA NORMAL".to_string(),
            )),
        }
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
