//! Tool guide domain module.
//!
//! The guide answers "which modules do I need?" from a free-text task, a
//! role preset, or both. It reads the full static catalog, never the active
//! module set, so it can recommend modules that are not loaded yet.

mod matcher;

pub use matcher::{ModuleMatch, keywords, score};

use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

use crate::domains::tools::operation::{Param, params_schema, resolve_params};
use crate::domains::tools::{
    Arguments, Catalog, Completion, InvocationContext, ModuleDescriptor, Operation, RolePreset,
    ToolEntry, ToolError,
};

/// Name of the always-registered guide tool.
pub const GUIDE_TOOL: &str = "databricks_tool_guide";

/// Module name the guide tool is registered under.
pub const GUIDE_MODULE: &str = "guide";

/// Which question the guide answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideMode {
    /// No task and no role: the whole catalog.
    Summary,
    Task,
    Role,
    /// Task ranking restricted to a role's preset.
    TaskInRole,
}

/// One recommended module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSuggestion {
    pub module_name: &'static str,
    pub description: &'static str,
    /// Use cases backing the suggestion. Outside task matching this is the
    /// module's full use case list.
    pub matched_use_cases: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<usize>,
}

impl ModuleSuggestion {
    fn listed(descriptor: &ModuleDescriptor) -> Self {
        Self {
            module_name: descriptor.name,
            description: descriptor.description,
            matched_use_cases: descriptor.use_cases.clone(),
            score: None,
        }
    }

    fn matched(descriptor: &ModuleDescriptor, found: ModuleMatch) -> Self {
        Self {
            module_name: descriptor.name,
            description: descriptor.description,
            matched_use_cases: found.matched_use_cases,
            score: Some(found.score),
        }
    }
}

/// The guide's answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideResponse {
    pub mode: GuideMode,
    pub suggestions: Vec<ModuleSuggestion>,
    /// Value for `DATABRICKS_MCP_TOOLS_INCLUDE` that loads the suggestions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl GuideResponse {
    fn new(mode: GuideMode, suggestions: Vec<ModuleSuggestion>) -> Self {
        let include = (!suggestions.is_empty()).then(|| {
            suggestions
                .iter()
                .map(|s| s.module_name)
                .collect::<Vec<_>>()
                .join(",")
        });
        Self {
            mode,
            suggestions,
            include,
            hint: None,
        }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn module_names(&self) -> Vec<&'static str> {
        self.suggestions.iter().map(|s| s.module_name).collect()
    }
}

/// Query index over the module catalog.
#[derive(Debug, Clone)]
pub struct ToolGuide {
    catalog: Arc<Catalog>,
}

impl ToolGuide {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Suggest modules for a task, a role, or both.
    ///
    /// Blank inputs count as absent. An unknown role yields no suggestions
    /// and a hint listing the known roles; the guide never fails.
    pub fn suggest(&self, task: Option<&str>, role: Option<&str>) -> GuideResponse {
        let task = task.map(str::trim).filter(|t| !t.is_empty());
        let role = role.map(str::trim).filter(|r| !r.is_empty());
        debug!("Tool guide query: task={:?} role={:?}", task, role);

        let preset = match role {
            Some(role_id) => match self.catalog.preset(role_id) {
                Some(preset) => Some(preset),
                None => {
                    let mode = if task.is_some() { GuideMode::TaskInRole } else { GuideMode::Role };
                    return GuideResponse::new(mode, Vec::new()).with_hint(format!(
                        "Unknown role '{}'. Known roles: {}",
                        role_id,
                        self.role_ids().join(", ")
                    ));
                }
            },
            None => None,
        };

        match (task, preset) {
            (None, None) => self.summary(),
            (None, Some(preset)) => GuideResponse::new(GuideMode::Role, self.preset_modules(preset))
                .with_hint(preset.description),
            (Some(task), None) => {
                let ranked = self.rank(task, self.catalog.descriptors().iter());
                if ranked.is_empty() {
                    GuideResponse::new(GuideMode::Task, ranked).with_hint(
                        "No module matched the task. Call without arguments to browse the catalog.",
                    )
                } else {
                    GuideResponse::new(GuideMode::Task, ranked)
                }
            }
            (Some(task), Some(preset)) => {
                let in_preset = self
                    .catalog
                    .descriptors()
                    .iter()
                    .filter(|d| preset.module_names.contains(&d.name));
                let ranked = self.rank(task, in_preset);
                if ranked.is_empty() {
                    GuideResponse::new(GuideMode::TaskInRole, self.preset_modules(preset)).with_hint(
                        format!(
                            "Nothing in the {} preset matched the task; showing the whole preset.",
                            preset.role_id
                        ),
                    )
                } else {
                    GuideResponse::new(GuideMode::TaskInRole, ranked)
                }
            }
        }
    }

    /// Every module in catalog order.
    pub fn summary(&self) -> GuideResponse {
        let all = self
            .catalog
            .descriptors()
            .iter()
            .map(ModuleSuggestion::listed)
            .collect();
        GuideResponse::new(GuideMode::Summary, all)
            .with_hint(format!("Roles: {}", self.role_ids().join(", ")))
    }

    /// Catalog summary with role presets, served as a resource.
    pub fn catalog_document(&self) -> Value {
        json!({
            "modules": self.catalog.descriptors(),
            "roles": self.catalog.presets(),
            "configuration": {
                "include": "DATABRICKS_MCP_TOOLS_INCLUDE=<module>,<module>",
                "exclude": "DATABRICKS_MCP_TOOLS_EXCLUDE=<module>,<module>",
            },
        })
    }

    /// The `databricks_tool_guide` tool entry.
    pub fn tool_entry(&self) -> ToolEntry {
        let params = guide_params();
        let schema = Arc::new(params_schema(&params));
        ToolEntry::new(
            GUIDE_TOOL,
            GUIDE_MODULE,
            "Recommend which tool modules fit a task description and/or a role (data_engineer, data_analyst, ml_engineer, platform_admin, app_developer, data_governance). Without arguments, lists every module.",
            schema,
            Completion::Immediate,
            Arc::new(GuideOperation {
                guide: self.clone(),
                params,
            }),
        )
    }

    fn rank<'a>(
        &self,
        task: &str,
        candidates: impl Iterator<Item = &'a ModuleDescriptor>,
    ) -> Vec<ModuleSuggestion> {
        let keywords = keywords(task);
        let mut ranked: Vec<ModuleSuggestion> = candidates
            .filter_map(|d| score(d, &keywords).map(|m| ModuleSuggestion::matched(d, m)))
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.module_name.cmp(b.module_name))
        });
        ranked
    }

    fn preset_modules(&self, preset: &RolePreset) -> Vec<ModuleSuggestion> {
        preset
            .module_names
            .iter()
            .filter_map(|name| self.catalog.descriptor(name))
            .map(ModuleSuggestion::listed)
            .collect()
    }

    fn role_ids(&self) -> Vec<&'static str> {
        self.catalog.presets().iter().map(|p| p.role_id).collect()
    }
}

fn guide_params() -> Vec<Param> {
    vec![
        Param::string("task", "What you want to do, e.g. 'run a SQL query'").optional(),
        Param::string("role", "Role preset id").optional(),
    ]
}

struct GuideOperation {
    guide: ToolGuide,
    params: Vec<Param>,
}

impl Operation for GuideOperation {
    fn invoke(&self, _ctx: &InvocationContext, args: &Arguments) -> Result<Value, ToolError> {
        let args = resolve_params(&self.params, args)?;
        let task = args.get("task").and_then(Value::as_str);
        let role = args.get("role").and_then(Value::as_str);
        serde_json::to_value(self.guide.suggest(task, role))
            .map_err(|e| ToolError::internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::client::testing::UnconfiguredProvider;
    use crate::domains::tools::ToolOutcome;
    use crate::domains::tools::operation::arguments;

    fn guide() -> ToolGuide {
        ToolGuide::new(Arc::new(Catalog::standard().unwrap()))
    }

    #[test]
    fn test_sql_task_ranks_sql_first() {
        let guide = guide();
        let first = guide.suggest(Some("run a SQL query"), None);
        assert_eq!(first.mode, GuideMode::Task);
        assert_eq!(first.suggestions[0].module_name, "sql");
        assert!(first.suggestions[0].matched_use_cases.contains(&"run a sql query"));
        assert_eq!(guide.suggest(Some("run a SQL query"), None), first);
    }

    #[test]
    fn test_apostrophes_do_not_change_ranking() {
        let guide = guide();
        let plain = guide.suggest(Some("what is the job schedule"), None);
        let possessive = guide.suggest(Some("what's the job's schedule"), None);
        assert_eq!(possessive.module_names(), plain.module_names());
        assert!(plain.module_names().contains(&"jobs"));
    }

    #[test]
    fn test_ranking_is_by_score_then_name() {
        let response = guide().suggest(Some("run a SQL query"), None);
        for pair in response.suggestions.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.score > b.score || (a.score == b.score && a.module_name < b.module_name));
        }
    }

    #[test]
    fn test_role_returns_preset_in_order() {
        let response = guide().suggest(None, Some("data_engineer"));
        assert_eq!(response.mode, GuideMode::Role);
        assert_eq!(
            response.module_names(),
            vec!["unity_catalog", "sql", "compute", "jobs", "pipelines", "workspace", "files", "workflows"]
        );
        assert_eq!(
            response.include.as_deref(),
            Some("unity_catalog,sql,compute,jobs,pipelines,workspace,files,workflows")
        );
    }

    #[test]
    fn test_unknown_role_is_advisory() {
        let response = guide().suggest(None, Some("astronaut"));
        assert!(response.suggestions.is_empty());
        let hint = response.hint.unwrap();
        assert!(hint.contains("astronaut"));
        assert!(hint.contains("data_analyst"));
    }

    #[test]
    fn test_no_arguments_is_full_catalog() {
        let guide = guide();
        for (task, role) in [(None, None), (Some("  "), Some(""))] {
            let response = guide.suggest(task, role);
            assert_eq!(response.mode, GuideMode::Summary);
            assert_eq!(response.suggestions.len(), guide.catalog.modules().len());
        }
    }

    #[test]
    fn test_task_within_role() {
        let guide = guide();
        let response = guide.suggest(Some("schedule a notebook job"), Some("data_analyst"));
        assert_eq!(response.mode, GuideMode::TaskInRole);
        let preset = guide.catalog.preset("data_analyst").unwrap();
        assert!(response
            .module_names()
            .iter()
            .all(|m| preset.module_names.contains(m)));

        let fallback = guide.suggest(Some("zzzz"), Some("data_analyst"));
        assert_eq!(fallback.module_names(), preset.module_names.to_vec());
        assert!(fallback.hint.is_some());
    }

    #[test]
    fn test_unmatched_task() {
        let response = guide().suggest(Some("zzzz qqqq"), None);
        assert!(response.suggestions.is_empty());
        assert!(response.include.is_none());
        assert!(response.hint.is_some());
    }

    #[test]
    fn test_tool_entry_needs_no_workspace() {
        let entry = guide().tool_entry();
        assert_eq!(entry.name(), GUIDE_TOOL);
        let ctx = InvocationContext::new(Arc::new(UnconfiguredProvider), 100);
        let ToolOutcome::Success(value) =
            entry.invoke(&ctx, &arguments(json!({"role": "ml_engineer"})))
        else {
            panic!("guide must not fail");
        };
        assert_eq!(value["mode"], json!("role"));
        assert_eq!(value["suggestions"][0]["module_name"], json!("experiments"));
    }

    #[test]
    fn test_catalog_document_lists_roles() {
        let doc = guide().catalog_document();
        assert_eq!(doc["roles"].as_array().unwrap().len(), 6);
        assert!(doc["modules"]
            .as_array()
            .unwrap()
            .iter()
            .any(|m| m["name"] == json!("workflows")));
    }
}
