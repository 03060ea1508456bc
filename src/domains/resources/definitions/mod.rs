//! Resource definitions module.
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file (e.g., `my_resource.rs`)
//! 2. Implement the `ResourceDefinition` trait
//! 3. Add a variant to `ResourceSource` and resolve it in the service
//! 4. Register in `registry.rs`

mod tool_guide;
mod workspace_info;

pub use tool_guide::ToolGuideResource;
pub use workspace_info::WorkspaceInfoResource;

use super::service::ResourceSource;

/// Trait for resource definitions.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    /// Where the content of this resource comes from.
    fn source() -> ResourceSource;
}
