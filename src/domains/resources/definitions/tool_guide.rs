//! Tool guide resource definition.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceSource;

/// The module catalog, role presets and filtering variables as one document.
pub struct ToolGuideResource;

impl ResourceDefinition for ToolGuideResource {
    const URI: &'static str = "databricks://tools/guide";
    const NAME: &'static str = "Tool Guide";
    const DESCRIPTION: &'static str =
        "Available tool modules, role presets and how to select modules";
    const MIME_TYPE: &'static str = "application/json";

    fn source() -> ResourceSource {
        ResourceSource::ToolGuide
    }
}
