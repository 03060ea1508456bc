//! Tool Registry - the immutable set of tools registered for this process.
//!
//! The registry is composed once at startup from the catalog and the module
//! configuration, then shared by every transport:
//! - the rmcp `ToolRouter` (STDIO/TCP) is built from its entries
//! - the HTTP transport dispatches through [`ToolRegistry::call_tool`]

use std::collections::HashMap;
use tracing::{info, warn};

use super::catalog::Catalog;
use super::entry::{Arguments, InvocationContext, ToolEntry, ToolOutcome};
use super::error::{CompositionError, ToolError};
use super::filter;
use crate::core::config::ModulesConfig;

/// Tool registry - all tools callable in this process.
pub struct ToolRegistry {
    entries: Vec<ToolEntry>,
    index: HashMap<&'static str, usize>,
    active_modules: Vec<&'static str>,
    ctx: InvocationContext,
}

impl ToolRegistry {
    /// Compose the registry.
    ///
    /// Resolves the active module set, registers each active module's
    /// entries in catalog order, then the cross-cutting `always` entries.
    /// Any name claimed twice aborts composition.
    pub fn compose(
        catalog: &Catalog,
        modules: &ModulesConfig,
        always: Vec<ToolEntry>,
        ctx: InvocationContext,
    ) -> Result<Self, CompositionError> {
        let active = filter::resolve(
            &catalog.module_names(),
            modules.include.as_ref(),
            modules.exclude.as_ref(),
        )?;

        let mut registry = Self {
            entries: Vec::new(),
            index: HashMap::new(),
            active_modules: Vec::new(),
            ctx,
        };

        for module in catalog.modules() {
            if !active.contains(module.name()) {
                continue;
            }
            registry.active_modules.push(module.name());
            for entry in module.entries() {
                registry.register(entry.clone())?;
            }
        }
        for entry in always {
            registry.register(entry)?;
        }

        info!(
            "Registered {} tools from {} modules",
            registry.entries.len(),
            registry.active_modules.len()
        );
        Ok(registry)
    }

    fn register(&mut self, entry: ToolEntry) -> Result<(), CompositionError> {
        if let Some(&existing) = self.index.get(entry.name()) {
            return Err(CompositionError::NameCollision {
                name: entry.name().to_string(),
                first_module: self.entries[existing].module().to_string(),
                second_module: entry.module().to_string(),
            });
        }
        self.index.insert(entry.name(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Get all tool names in registration order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name()).collect()
    }

    /// Names of the modules that passed the filter, in catalog order.
    pub fn active_modules(&self) -> &[&'static str] {
        &self.active_modules
    }

    pub fn entries(&self) -> &[ToolEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&ToolEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Invoke a tool on the blocking pool.
    ///
    /// Only an unknown name is an error; everything that happens inside the
    /// tool, including a panic, comes back as a `Failure` outcome.
    pub async fn call_tool(&self, name: &str, args: Arguments) -> Result<ToolOutcome, ToolError> {
        let entry = self.get(name).cloned().ok_or_else(|| {
            warn!("Unknown tool requested: {}", name);
            ToolError::not_found(name)
        })?;
        let ctx = self.ctx.clone();

        match tokio::task::spawn_blocking(move || entry.invoke(&ctx, &args)).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                warn!("{} aborted: {}", name, e);
                Ok(ToolOutcome::Failure(format!(
                    "Error calling {}: {}",
                    name,
                    ToolError::internal(e.to_string())
                )))
            }
        }
    }
}
