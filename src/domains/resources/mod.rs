//! Resources domain module.
//!
//! Resources are read-only documents exposed next to the tools. The server
//! always publishes two of them, whatever modules are filtered:
//!
//! - `databricks://workspace/info` - host, current identity and auth type
//! - `databricks://tools/guide` - the module catalog and role presets
//!
//! ## Architecture
//!
//! - `definitions/` - One file per resource
//! - `registry.rs` - Central resource registration
//! - `service.rs` - Listing and reading

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::ResourceDefinition;
pub use error::ResourceError;
pub use registry::{get_all_resources, resource_uris};
pub use service::{ResourceEntry, ResourceService, ResourceSource};
