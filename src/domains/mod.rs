//! Domains module containing business logic organized by bounded contexts.
//!
//! `client` is the only domain that talks to the network. `tools` owns the
//! catalog and the registry; `workflows` and `guide` contribute entries to
//! it, and `resources` and `prompts` sit next to it on the protocol surface.

pub mod client;
pub mod guide;
pub mod prompts;
pub mod resources;
pub mod tools;
pub mod workflows;
