//! File manager: objects recorded for a portal run.

use serde::Deserialize;
use tracing::debug;
use wgts_core::error::ServiceError;
use wgts_core::models::object::StoredObject;
use wgts_core::services::ObjectListing;

use crate::client::OrcabusClient;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
struct Links {
    #[serde(default)]
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FileObject {
    bucket: String,
    key: String,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    links: Links,
    #[serde(default)]
    results: Vec<FileObject>,
}

impl OrcabusClient {
    /// Current objects tagged with `portal_run_id`, following `links.next`.
    pub fn file_objects(&self, portal_run_id: &str) -> Result<Vec<StoredObject>, ApiError> {
        let url = self.file_url("s3/attributes");
        let mut page: Page = self.get_json(
            &url,
            &[("portalRunId", portal_run_id), ("currentState", "true")],
        )?;

        let mut objects = Vec::new();
        let mut pages = 1;
        loop {
            objects.extend(
                page.results
                    .into_iter()
                    .map(|object| StoredObject::new(object.bucket, object.key)),
            );
            match page.links.next {
                Some(next) => {
                    page = self.get_json(&next, &[])?;
                    pages += 1;
                }
                None => break,
            }
        }

        debug!(portal_run_id, pages, objects = objects.len(), "listed file manager objects");
        Ok(objects)
    }
}

impl ObjectListing for OrcabusClient {
    fn list_objects(&self, portal_run_id: &str) -> Result<Vec<StoredObject>, ServiceError> {
        Ok(self.file_objects(portal_run_id)?)
    }
}
