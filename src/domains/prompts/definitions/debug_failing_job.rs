//! Failing job diagnosis prompt definition.

use super::{PromptDefinition, required_arg};
use rmcp::model::PromptArgument;

pub struct DebugFailingJobPrompt;

impl PromptDefinition for DebugFailingJobPrompt {
    const NAME: &'static str = "debug_failing_job";
    const DESCRIPTION: &'static str = "Diagnose why a Databricks job is failing";

    fn template() -> &'static str {
        "Job {{job_id}} is failing. Please diagnose the issue:
1. Call databricks_get_job(job_id={{job_id}}) to see the job configuration
2. Call databricks_list_runs(job_id={{job_id}}) to find recent failed runs
3. For the most recent failed run, call databricks_get_run to see the error state
4. Call databricks_get_run_output for the failed run to see error messages and logs
5. Check if the cluster used is still available (databricks_get_cluster if cluster_id is specified)
6. Summarize the root cause and suggest a fix
7. If appropriate, offer to run the job again with databricks_run_job"
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![required_arg("job_id", "Id of the failing job")]
    }
}
