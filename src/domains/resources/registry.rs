//! Resource Registry - central registration of all resources.
//!
//! When adding a new resource:
//! 1. Create the resource file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_resources()`

use rmcp::model::{AnnotateAble, RawResource};

use super::definitions::{ResourceDefinition, ToolGuideResource, WorkspaceInfoResource};
use super::service::ResourceEntry;

fn build_resource<R: ResourceDefinition>() -> ResourceEntry {
    let mut raw = RawResource::new(R::URI, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());

    ResourceEntry {
        resource: raw.no_annotation(),
        source: R::source(),
    }
}

/// Get all registered resources.
pub fn get_all_resources() -> Vec<ResourceEntry> {
    vec![
        build_resource::<WorkspaceInfoResource>(),
        build_resource::<ToolGuideResource>(),
    ]
}

/// Get the list of all resource URIs.
pub fn resource_uris() -> Vec<&'static str> {
    vec![WorkspaceInfoResource::URI, ToolGuideResource::URI]
}
