//! Oncoanalyser output resolution.
//!
//! Rebuilds the S3 locations of a finished oncoanalyser-wgts run from its
//! portal run id and library ids:
//!
//! 1. root prefix of the run, from the file manager listing
//! 2. analysis path relative to that root, from the latest payload
//! 3. catalog snapshot for the producing workflow version (DNA only)
//! 4. render and anchor every catalog entry
//!
//! Requests are validated before any service call is made.

use tracing::{debug, info};

use crate::catalog::{Catalog, NormalDnaOutput, OutputKind, TumorDnaOutput, TumorRnaOutput};
use crate::error::ResolveError;
use crate::models::object::StoredObject;
use crate::models::request::{OutputsRequest, OutputsTarget, SampleType};
use crate::models::workflow::Payload;
use crate::outputs::{OutputSet, ResolvedInputs};
use crate::s3_uri::S3Uri;
use crate::services::{ObjectListing, WorkflowMetadata};
use crate::template::{self, TemplateValues};
use crate::version::WorkflowVersion;

/// Key segment marking transient work files that are never canonical outputs.
pub const CACHE_SEGMENT: &str = "cache";

pub const DNA_REL_PATH_FIELD: &str = "dnaOncoanalyserAnalysisRelPath";
pub const DNA_URI_FIELD: &str = "dnaOncoanalyserAnalysisUri";
pub const RNA_REL_PATH_FIELD: &str = "rnaOncoanalyserAnalysisRelPath";
pub const OUTPUT_URI_FIELD: &str = "engineParameters.outputUri";

fn is_cache_object(object: &StoredObject) -> bool {
    object.key.split('/').any(|segment| segment == CACHE_SEGMENT)
}

/// Root prefix from an already fetched listing.
///
/// Uses the first non-cache object in listing order.
pub fn root_from_objects(
    objects: &[StoredObject],
    portal_run_id: &str,
) -> Result<S3Uri, ResolveError> {
    let object = objects
        .iter()
        .find(|object| !is_cache_object(object))
        .ok_or_else(|| ResolveError::NotFound(portal_run_id.to_string()))?;

    Ok(S3Uri::run_root(&object.bucket, &object.key, portal_run_id))
}

pub fn root_prefix(
    listing: &dyn ObjectListing,
    portal_run_id: &str,
) -> Result<S3Uri, ResolveError> {
    let objects = listing.list_objects(portal_run_id)?;
    let root = root_from_objects(&objects, portal_run_id)?;
    debug!(portal_run_id, objects = objects.len(), root = %root, "resolved run root prefix");
    Ok(root)
}

/// Analysis path relative to the run root, read from a payload.
pub fn relative_path_from_payload(
    payload: &Payload,
    sample_type: SampleType,
) -> Result<String, ResolveError> {
    let data = &payload.data;
    match sample_type {
        SampleType::Rna => data
            .output_str(RNA_REL_PATH_FIELD)
            .map(str::to_string)
            .ok_or_else(|| ResolveError::MissingField(RNA_REL_PATH_FIELD.to_string())),
        SampleType::Dna => {
            if let Some(rel_path) = data.output_str(DNA_REL_PATH_FIELD) {
                return Ok(rel_path.to_string());
            }
            let (Some(analysis_uri), Some(output_uri)) =
                (data.output_str(DNA_URI_FIELD), data.output_uri())
            else {
                let missing = if data.output_str(DNA_URI_FIELD).is_none() {
                    format!("{DNA_REL_PATH_FIELD} or {DNA_URI_FIELD}")
                } else {
                    OUTPUT_URI_FIELD.to_string()
                };
                return Err(ResolveError::MissingField(missing));
            };

            let invalid = || ResolveError::InvalidPath {
                uri: analysis_uri.to_string(),
                root: output_uri.to_string(),
            };
            let analysis = S3Uri::parse(analysis_uri).ok_or_else(invalid)?;
            let root = S3Uri::parse(output_uri).ok_or_else(invalid)?;
            analysis.relative_to(&root).ok_or_else(invalid)
        }
    }
}

pub fn relative_output_path(
    metadata: &dyn WorkflowMetadata,
    portal_run_id: &str,
    sample_type: SampleType,
) -> Result<String, ResolveError> {
    let payload = metadata.latest_payload(portal_run_id)?;
    let rel_path = relative_path_from_payload(&payload, sample_type)?;
    debug!(portal_run_id, %sample_type, rel_path = %rel_path, "resolved analysis relative path");
    Ok(rel_path)
}

pub fn workflow_version(
    metadata: &dyn WorkflowMetadata,
    portal_run_id: &str,
) -> Result<WorkflowVersion, ResolveError> {
    let run = metadata.workflow_run(portal_run_id)?;
    Ok(WorkflowVersion::parse(&run.workflow.workflow_version)?)
}

/// Tumor and normal DNA catalogs for the workflow version that produced the run.
pub fn dna_catalogs(
    metadata: &dyn WorkflowMetadata,
    portal_run_id: &str,
) -> Result<(Catalog<TumorDnaOutput>, Catalog<NormalDnaOutput>), ResolveError> {
    let version = workflow_version(metadata, portal_run_id)?;
    debug!(portal_run_id, %version, "selecting DNA catalogs");
    Ok((
        Catalog::for_version(&version),
        Catalog::for_version(&version),
    ))
}

/// Render every catalog entry and anchor it below `root`.
pub fn render_outputs<K: OutputKind>(
    catalog: &Catalog<K>,
    root: &S3Uri,
    values: &TemplateValues<'_>,
) -> Result<OutputSet<K>, ResolveError> {
    catalog
        .entries()
        .iter()
        .map(|&(kind, template)| -> Result<(K, String), ResolveError> {
            let relative = template::render(template, values)?;
            Ok((kind, root.join(&relative).to_string()))
        })
        .collect()
}

/// Resolve the full result set requested by `request`.
pub fn get_inputs(
    listing: &dyn ObjectListing,
    metadata: &dyn WorkflowMetadata,
    request: &OutputsRequest,
) -> Result<ResolvedInputs, ResolveError> {
    let target = request.target()?;
    let portal_run_id = request.portal_run_id.as_str();

    let root = root_prefix(listing, portal_run_id)?;
    let rel_path = relative_output_path(metadata, portal_run_id, target.sample_type())?;

    let inputs = match target {
        OutputsTarget::TumorDna { tumor, normal } => {
            let (catalog, _) = dna_catalogs(metadata, portal_run_id)?;
            let values = TemplateValues::dna(&rel_path, tumor, normal);
            ResolvedInputs::TumorDna(render_outputs(&catalog, &root, &values)?)
        }
        OutputsTarget::NormalDna { tumor, normal } => {
            let (_, catalog) = dna_catalogs(metadata, portal_run_id)?;
            let values = TemplateValues::dna(&rel_path, tumor, normal);
            ResolvedInputs::NormalDna(render_outputs(&catalog, &root, &values)?)
        }
        OutputsTarget::TumorRna { tumor_rna } => {
            let catalog = Catalog::<TumorRnaOutput>::base();
            let values = TemplateValues::rna(&rel_path, tumor_rna);
            ResolvedInputs::TumorRna(render_outputs(&catalog, &root, &values)?)
        }
    };

    info!(
        portal_run_id,
        phenotype = %request.phenotype,
        sample_type = %request.sample_type,
        group = inputs.group(),
        outputs = inputs.len(),
        "resolved oncoanalyser outputs"
    );

    Ok(inputs)
}
