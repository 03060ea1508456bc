//! Role presets: curated module sets for common personas.

use serde::Serialize;

/// A named set of modules suited to one user role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolePreset {
    pub role_id: &'static str,
    pub description: &'static str,
    /// Modules in recommendation order.
    pub module_names: &'static [&'static str],
}

/// The built-in preset table.
pub fn standard_presets() -> Vec<RolePreset> {
    vec![
        RolePreset {
            role_id: "data_engineer",
            description: "Build and operate pipelines, jobs and the tables they feed",
            module_names: &[
                "unity_catalog",
                "sql",
                "compute",
                "jobs",
                "pipelines",
                "workspace",
                "files",
                "workflows",
            ],
        },
        RolePreset {
            role_id: "data_analyst",
            description: "Query data, build dashboards and ask questions in natural language",
            module_names: &["sql", "unity_catalog", "dashboards", "genie", "workflows"],
        },
        RolePreset {
            role_id: "ml_engineer",
            description: "Track experiments, serve models and build retrieval indexes",
            module_names: &[
                "experiments",
                "serving",
                "vector_search",
                "unity_catalog",
                "compute",
                "online_tables",
                "workflows",
            ],
        },
        RolePreset {
            role_id: "platform_admin",
            description: "Manage identities, credentials, storage and workspace-wide settings",
            module_names: &[
                "iam",
                "secrets",
                "tokens",
                "grants",
                "storage",
                "metastores",
                "global_init_scripts",
                "compute",
                "connections",
            ],
        },
        RolePreset {
            role_id: "app_developer",
            description: "Build and deploy Databricks Apps backed by Lakebase and model endpoints",
            module_names: &[
                "apps",
                "database",
                "serving",
                "secrets",
                "workspace",
                "git_credentials",
            ],
        },
        RolePreset {
            role_id: "data_governance",
            description: "Control access, sharing and data quality across the catalog",
            module_names: &[
                "unity_catalog",
                "grants",
                "sharing",
                "connections",
                "storage",
                "metastores",
                "quality_monitors",
            ],
        },
    ]
}
