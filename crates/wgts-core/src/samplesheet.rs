//! Ready-event inputs to WES inputs.
//!
//! The ready event carries resolved outputs grouped per sample
//! (`tumorDnaInputs`, ...). The WES launcher wants a flat oncoanalyser
//! samplesheet plus snake_case run parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{NormalDnaOutput, OutputKind, TumorDnaOutput, TumorRnaOutput};
use crate::error::ConvertError;
use crate::models::request::{Phenotype, SampleType};
use crate::outputs::OutputSet;

pub const DEFAULT_MODE: &str = "wgts";
pub const DEFAULT_MONOCHROME_LOGS: bool = true;
pub const DEFAULT_GENOME: &str = "GRCh38_hmf";
pub const DEFAULT_GENOME_VERSION: &str = "38";
pub const DEFAULT_GENOME_TYPE: &str = "no_alt";

/// File types that get a companion `.bai` row.
const BAM_FILETYPES: [&str; 2] = ["bam_redux", "bam"];
const BAI_FILETYPE: &str = "bai";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyInputs {
    pub group_id: Option<String>,
    pub subject_id: Option<String>,
    pub tumor_dna_sample_id: Option<String>,
    pub normal_dna_sample_id: Option<String>,
    pub tumor_rna_sample_id: Option<String>,
    pub tumor_dna_inputs: Option<OutputSet<TumorDnaOutput>>,
    pub normal_dna_inputs: Option<OutputSet<NormalDnaOutput>>,
    pub tumor_rna_inputs: Option<OutputSet<TumorRnaOutput>>,
    pub mode: Option<String>,
    pub monochrome_logs: Option<bool>,
    pub processes_list: Option<Vec<String>>,
    pub genome: Option<String>,
    pub genome_version: Option<String>,
    pub genome_type: Option<String>,
    pub force_genome: Option<bool>,
    pub ref_data_hmf_data_path: Option<String>,
    pub genomes: Option<BTreeMap<String, BTreeMap<String, String>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplesheetRow {
    pub group_id: String,
    pub subject_id: String,
    pub sample_id: String,
    pub sample_type: String,
    pub sequence_type: String,
    pub filetype: String,
    pub filepath: String,
}

impl SamplesheetRow {
    fn bai(&self) -> Self {
        Self {
            filetype: BAI_FILETYPE.to_string(),
            filepath: format!("{}.bai", self.filepath),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WesInputs {
    pub mode: String,
    pub monochrome_logs: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processes_manual: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processes_include: Option<String>,
    pub samplesheet: Vec<SamplesheetRow>,
    pub genome: String,
    pub genome_version: String,
    pub genome_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_genome: Option<bool>,
    pub ref_data_hmf_data_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genomes: Option<BTreeMap<String, BTreeMap<String, String>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadyEvent {
    pub inputs: ReadyInputs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WesEvent {
    pub inputs: WesInputs,
}

/// `bamRedux` -> `bam_redux`.
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_uppercase() {
            out.push('_');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out.trim_start_matches('_').to_string()
}

/// Genome file keys: `bwamem2Index` -> `bwamem2_index`, `fasta` -> `fasta`.
pub fn genome_key(name: &str) -> String {
    name.replace("Index", "_index").to_lowercase()
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ConvertError> {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConvertError::MissingField(field.to_string()))
}

struct RowContext<'a> {
    group_id: &'a str,
    subject_id: &'a str,
}

fn group_rows<K: OutputKind>(
    ctx: &RowContext<'_>,
    set: Option<&OutputSet<K>>,
    sample_id: &Option<String>,
    sample_id_field: &str,
    phenotype: Phenotype,
    sample_type: SampleType,
) -> Result<Vec<SamplesheetRow>, ConvertError> {
    let Some(set) = set.filter(|set| !set.is_empty()) else {
        return Ok(Vec::new());
    };
    let sample_id = required(sample_id, sample_id_field)?;

    Ok(K::ALL
        .iter()
        .filter_map(|&kind| set.get(kind).map(|uri| (kind, uri)))
        .map(|(kind, uri)| SamplesheetRow {
            group_id: ctx.group_id.to_string(),
            subject_id: ctx.subject_id.to_string(),
            sample_id: sample_id.to_string(),
            sample_type: phenotype.samplesheet_name().to_string(),
            sequence_type: sample_type.samplesheet_name().to_string(),
            filetype: camel_to_snake(kind.key()),
            filepath: uri.to_string(),
        })
        .collect())
}

/// Build the samplesheet: tumor DNA, normal DNA and tumor RNA rows in catalog
/// order, followed by one index row per BAM.
pub fn samplesheet(inputs: &ReadyInputs) -> Result<Vec<SamplesheetRow>, ConvertError> {
    let ctx = RowContext {
        group_id: required(&inputs.group_id, "groupId")?,
        subject_id: required(&inputs.subject_id, "subjectId")?,
    };

    let mut rows = group_rows(
        &ctx,
        inputs.tumor_dna_inputs.as_ref(),
        &inputs.tumor_dna_sample_id,
        "tumorDnaSampleId",
        Phenotype::Tumor,
        SampleType::Dna,
    )?;
    rows.extend(group_rows(
        &ctx,
        inputs.normal_dna_inputs.as_ref(),
        &inputs.normal_dna_sample_id,
        "normalDnaSampleId",
        Phenotype::Normal,
        SampleType::Dna,
    )?);
    rows.extend(group_rows(
        &ctx,
        inputs.tumor_rna_inputs.as_ref(),
        &inputs.tumor_rna_sample_id,
        "tumorRnaSampleId",
        Phenotype::Tumor,
        SampleType::Rna,
    )?);

    let bai_rows: Vec<_> = rows
        .iter()
        .filter(|row| BAM_FILETYPES.contains(&row.filetype.as_str()))
        .map(SamplesheetRow::bai)
        .collect();
    rows.extend(bai_rows);

    Ok(rows)
}

pub fn convert(inputs: &ReadyInputs) -> Result<WesInputs, ConvertError> {
    let ref_data_hmf_data_path = required(&inputs.ref_data_hmf_data_path, "refDataHmfDataPath")?;
    let samplesheet = samplesheet(inputs)?;

    let genomes = inputs.genomes.as_ref().map(|genomes| {
        genomes
            .iter()
            .map(|(name, files)| {
                let files: BTreeMap<String, String> = files
                    .iter()
                    .map(|(key, path)| (genome_key(key), path.clone()))
                    .collect();
                (name.clone(), files)
            })
            .collect::<BTreeMap<_, _>>()
    });

    let processes_include = inputs.processes_list.as_ref().map(|list| list.join(","));

    tracing::debug!(
        rows = samplesheet.len(),
        genomes = genomes.as_ref().map_or(0, BTreeMap::len),
        "built oncoanalyser samplesheet"
    );

    Ok(WesInputs {
        mode: inputs.mode.clone().unwrap_or_else(|| DEFAULT_MODE.to_string()),
        monochrome_logs: inputs.monochrome_logs.unwrap_or(DEFAULT_MONOCHROME_LOGS),
        processes_manual: processes_include.as_ref().map(|_| true),
        processes_include,
        samplesheet,
        genome: inputs.genome.clone().unwrap_or_else(|| DEFAULT_GENOME.to_string()),
        genome_version: inputs
            .genome_version
            .clone()
            .unwrap_or_else(|| DEFAULT_GENOME_VERSION.to_string()),
        genome_type: inputs
            .genome_type
            .clone()
            .unwrap_or_else(|| DEFAULT_GENOME_TYPE.to_string()),
        force_genome: inputs.force_genome,
        ref_data_hmf_data_path: ref_data_hmf_data_path.to_string(),
        genomes,
    })
}

/// Convert a raw ready event (`{"inputs": {...}}`).
pub fn convert_event(event: serde_json::Value) -> Result<WesEvent, ConvertError> {
    let event: ReadyEvent = serde_json::from_value(event)?;
    Ok(WesEvent {
        inputs: convert(&event.inputs)?,
    })
}
