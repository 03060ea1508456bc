//! Aggregation of independent constituent calls.
//!
//! A composite workflow runs every [`Step`] regardless of how the others
//! fare and reports each outcome under the step's name, together with an
//! overall [`WorkflowStatus`].

use serde::Serialize;
use serde_json::Value;
use std::thread;
use tracing::{debug, warn};

use crate::domains::tools::ToolError;

type StepFn<'a> = Box<dyn FnOnce() -> Result<Value, ToolError> + Send + 'a>;

/// One constituent call of a workflow.
pub struct Step<'a> {
    name: &'static str,
    run: StepFn<'a>,
}

impl<'a> Step<'a> {
    pub fn new(
        name: &'static str,
        run: impl FnOnce() -> Result<Value, ToolError> + Send + 'a,
    ) -> Self {
        Self {
            name,
            run: Box::new(run),
        }
    }
}

/// Overall status of a composite run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    /// Every constituent succeeded.
    Complete,
    /// At least one constituent failed and at least one succeeded.
    Degraded,
    /// Every constituent failed.
    Failed,
}

/// Outcome of one constituent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Success { result: Value },
    Failure { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub step: &'static str,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

impl StepReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, StepOutcome::Success { .. })
    }
}

/// Aggregated result of a workflow run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeResult {
    pub status: WorkflowStatus,
    pub steps: Vec<StepReport>,
}

impl CompositeResult {
    /// Build the aggregate from per-step reports.
    pub fn from_reports(steps: Vec<StepReport>) -> Self {
        let succeeded = steps.iter().filter(|s| s.is_success()).count();
        let status = if succeeded == steps.len() {
            WorkflowStatus::Complete
        } else if succeeded == 0 {
            WorkflowStatus::Failed
        } else {
            WorkflowStatus::Degraded
        };
        Self { status, steps }
    }

    /// The report of a named step.
    pub fn step(&self, name: &str) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.step == name)
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Run all steps concurrently and aggregate their outcomes in step order.
///
/// A step that panics is reported as a failure of that step only.
pub fn run_all(steps: Vec<Step<'_>>) -> CompositeResult {
    let reports = thread::scope(|scope| {
        let handles: Vec<_> = steps
            .into_iter()
            .map(|step| {
                let name = step.name;
                (name, scope.spawn(step.run))
            })
            .collect();

        handles
            .into_iter()
            .map(|(name, handle)| {
                let outcome = match handle.join() {
                    Ok(Ok(result)) => StepOutcome::Success { result },
                    Ok(Err(e)) => {
                        warn!("Workflow step {} failed: {}", name, e);
                        StepOutcome::Failure {
                            error: e.to_string(),
                        }
                    }
                    Err(_) => StepOutcome::Failure {
                        error: "step panicked".to_string(),
                    },
                };
                StepReport {
                    step: name,
                    outcome,
                }
            })
            .collect::<Vec<_>>()
    });

    let result = CompositeResult::from_reports(reports);
    debug!("Workflow finished with status {:?}", result.status);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::client::RemoteError;
    use serde_json::json;

    fn ok(name: &'static str, value: Value) -> Step<'static> {
        Step::new(name, move || Ok(value))
    }

    fn failing(name: &'static str) -> Step<'static> {
        Step::new(name, || {
            Err(RemoteError::api(503, Some("TEMPORARILY_UNAVAILABLE".into()), "try later").into())
        })
    }

    #[test]
    fn test_one_failure_among_four_is_degraded() {
        let result = run_all(vec![
            ok("clusters", json!({"total": 3})),
            failing("sql_warehouses"),
            ok("jobs", json!({"total": 7})),
            ok("serving_endpoints", json!({"total": 1})),
        ]);

        assert_eq!(result.status, WorkflowStatus::Degraded);
        assert_eq!(result.steps.len(), 4);
        assert_eq!(
            result.steps.iter().map(|s| s.step).collect::<Vec<_>>(),
            vec!["clusters", "sql_warehouses", "jobs", "serving_endpoints"]
        );
        assert_eq!(
            result.step("jobs").unwrap().outcome,
            StepOutcome::Success {
                result: json!({"total": 7})
            }
        );
        assert_eq!(
            result.step("sql_warehouses").unwrap().outcome,
            StepOutcome::Failure {
                error: "ApiError: [TEMPORARILY_UNAVAILABLE] try later".into()
            }
        );
    }

    #[test]
    fn test_complete_and_failed() {
        assert_eq!(
            run_all(vec![ok("a", json!(1)), ok("b", json!(2))]).status,
            WorkflowStatus::Complete
        );
        assert_eq!(
            run_all(vec![failing("a"), failing("b")]).status,
            WorkflowStatus::Failed
        );
    }

    #[test]
    fn test_panicking_step_is_isolated() {
        let result = run_all(vec![
            ok("a", json!(1)),
            Step::new("b", || panic!("boom")),
        ]);
        assert_eq!(result.status, WorkflowStatus::Degraded);
        assert!(!result.step("b").unwrap().is_success());
    }

    #[test]
    fn test_serialized_status_is_part_of_output() {
        let value = run_all(vec![ok("auth", json!({"user": "a"})), failing("jobs")]).to_value();
        assert_eq!(value["status"], json!("degraded"));
        assert_eq!(value["steps"][0], json!({"step": "auth", "outcome": "success", "result": {"user": "a"}}));
        assert_eq!(value["steps"][1]["outcome"], json!("failure"));
    }
}
