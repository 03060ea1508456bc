//! Tools domain module.
//!
//! Every tool is a [`ToolEntry`] owned by a [`ToolModule`]. The static
//! [`Catalog`] holds all modules; at startup the [`ToolRegistry`] keeps only
//! the modules selected by the include/exclude configuration and the router
//! exposes them to the protocol runtime.
//!
//! ## Architecture
//!
//! - `definitions/` - One file per service domain, mostly REST descriptors
//! - `operation.rs` - Declarative REST operations and list paging
//! - `entry.rs` - Tool entries, invocation context and outcomes
//! - `catalog.rs` - Module catalog and descriptors
//! - `presets.rs` - Role presets
//! - `filter.rs` - Include/exclude module resolution
//! - `registry.rs` - Active tool set and dispatch
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `error.rs` - Tool and composition error types
//!
//! ## Adding a New Tool
//!
//! 1. Add a `RestOperation` to the module's file in `definitions/`
//!    (or a new file plus an entry in `definitions::all_modules`)
//! 2. Name it `databricks_<verb>_<noun>` and mark it `.started()` if it only
//!    kicks off remote work
//!
//! The router and the HTTP dispatcher pick it up from the registry.

pub mod catalog;
pub mod definitions;
mod entry;
mod error;
pub mod filter;
pub mod operation;
mod presets;
mod registry;
pub mod router;

pub use catalog::{Catalog, ModuleDescriptor, ToolModule};
pub use entry::{
    Arguments, Completion, DEFAULT_MAX_ITEMS, InvocationContext, Operation, ToolEntry, ToolOutcome,
};
pub use error::{CompositionError, ToolError};
pub use presets::{RolePreset, standard_presets};
pub use registry::ToolRegistry;
pub use router::build_tool_router;
