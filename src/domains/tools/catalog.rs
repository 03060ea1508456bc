//! The static module catalog.
//!
//! The catalog is built once by [`Catalog::build`] from module factories and
//! the preset table, and is immutable afterwards. It is the only source of
//! module metadata for the filter, the registry and the tool guide.

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

use super::entry::ToolEntry;
use super::error::CompositionError;
use super::presets::{RolePreset, standard_presets};

/// A group of tools under one module name.
#[derive(Debug, Clone)]
pub struct ToolModule {
    name: &'static str,
    description: &'static str,
    use_cases: &'static [&'static str],
    entries: Vec<ToolEntry>,
}

impl ToolModule {
    pub fn new(
        name: &'static str,
        description: &'static str,
        use_cases: &'static [&'static str],
        entries: Vec<ToolEntry>,
    ) -> Self {
        Self {
            name,
            description,
            use_cases,
            entries,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn use_cases(&self) -> &'static [&'static str] {
        self.use_cases
    }

    pub fn entries(&self) -> &[ToolEntry] {
        &self.entries
    }
}

/// Serializable module metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    /// Informational only.
    pub tool_count: usize,
    pub use_cases: Vec<&'static str>,
    pub role_tags: Vec<&'static str>,
}

/// Immutable mapping from module name to descriptor and entries.
#[derive(Debug)]
pub struct Catalog {
    modules: Vec<ToolModule>,
    descriptors: Vec<ModuleDescriptor>,
    presets: Vec<RolePreset>,
}

impl Catalog {
    /// Validate and assemble a catalog.
    ///
    /// Module names must be unique and every preset must reference known
    /// modules. Role tags are derived from the presets.
    pub fn build(
        modules: Vec<ToolModule>,
        presets: Vec<RolePreset>,
    ) -> Result<Self, CompositionError> {
        let mut seen = HashSet::new();
        for module in &modules {
            if !seen.insert(module.name) {
                return Err(CompositionError::DuplicateModule(module.name.to_string()));
            }
        }

        let unknown: BTreeSet<String> = presets
            .iter()
            .flat_map(|p| p.module_names.iter())
            .filter(|name| !seen.contains(*name))
            .map(|name| name.to_string())
            .collect();
        if !unknown.is_empty() {
            return Err(CompositionError::UnknownModule {
                names: unknown.into_iter().collect(),
            });
        }

        let descriptors = modules
            .iter()
            .map(|module| ModuleDescriptor {
                name: module.name,
                description: module.description,
                tool_count: module.entries.len(),
                use_cases: module.use_cases.to_vec(),
                role_tags: presets
                    .iter()
                    .filter(|p| p.module_names.contains(&module.name))
                    .map(|p| p.role_id)
                    .collect(),
            })
            .collect();

        Ok(Self {
            modules,
            descriptors,
            presets,
        })
    }

    /// The built-in catalog of every service domain.
    pub fn standard() -> Result<Self, CompositionError> {
        Self::build(super::definitions::all_modules(), standard_presets())
    }

    /// All module names.
    pub fn module_names(&self) -> BTreeSet<String> {
        self.modules.iter().map(|m| m.name.to_string()).collect()
    }

    /// Modules in catalog order.
    pub fn modules(&self) -> &[ToolModule] {
        &self.modules
    }

    pub fn module(&self, name: &str) -> Option<&ToolModule> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn descriptor(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    /// Descriptors in catalog order.
    pub fn descriptors(&self) -> &[ModuleDescriptor] {
        &self.descriptors
    }

    pub fn presets(&self) -> &[RolePreset] {
        &self.presets
    }

    pub fn preset(&self, role_id: &str) -> Option<&RolePreset> {
        self.presets.iter().find(|p| p.role_id == role_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(name: &'static str) -> ToolModule {
        ToolModule::new(name, "Test module.", &["testing"], Vec::new())
    }

    #[test]
    fn test_standard_catalog_builds() {
        let catalog = Catalog::standard().unwrap();
        assert_eq!(catalog.modules().len(), 28);
        assert!(catalog.module("sql").is_some());
        assert!(catalog.module("workflows").is_some());
    }

    #[test]
    fn test_role_tags_follow_presets() {
        let catalog = Catalog::standard().unwrap();
        let sql = catalog.descriptor("sql").unwrap();
        assert!(sql.role_tags.contains(&"data_engineer"));
        assert!(sql.role_tags.contains(&"data_analyst"));
        assert!(!sql.role_tags.contains(&"platform_admin"));

        for preset in catalog.presets() {
            for name in preset.module_names {
                let descriptor = catalog.descriptor(name).unwrap();
                assert!(descriptor.role_tags.contains(&preset.role_id));
            }
        }
    }

    #[test]
    fn test_tool_count_matches_entries() {
        let catalog = Catalog::standard().unwrap();
        for module in catalog.modules() {
            let descriptor = catalog.descriptor(module.name()).unwrap();
            assert_eq!(descriptor.tool_count, module.entries().len());
            assert!(descriptor.tool_count > 0, "{} has no tools", module.name());
            assert!(!descriptor.use_cases.is_empty(), "{}", module.name());
        }
    }

    #[test]
    fn test_tools_are_namespaced_and_owned() {
        let catalog = Catalog::standard().unwrap();
        for module in catalog.modules() {
            for entry in module.entries() {
                assert!(entry.name().starts_with("databricks_"), "{}", entry.name());
                assert_eq!(entry.module(), module.name());
            }
        }
    }

    #[test]
    fn test_duplicate_module_rejected() {
        let err = Catalog::build(vec![module("a"), module("a")], Vec::new()).unwrap_err();
        assert_eq!(err, CompositionError::DuplicateModule("a".into()));
    }

    #[test]
    fn test_preset_with_unknown_module_rejected() {
        let preset = RolePreset {
            role_id: "tester",
            description: "",
            module_names: &["a", "ghost"],
        };
        let err = Catalog::build(vec![module("a")], vec![preset]).unwrap_err();
        assert_eq!(
            err,
            CompositionError::UnknownModule {
                names: vec!["ghost".into()]
            }
        );
    }
}
