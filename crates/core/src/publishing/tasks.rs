//! Remote task creation from meeting outcomes.

use std::sync::Arc;

use reviewbot_domain::{MeetingOutcome, PlannerTask};
use tracing::{error, info};

use crate::graph_ports::GraphCapability;

/// Creates one remote task per outcome task.
pub struct TaskPublisher {
    graph: Arc<dyn GraphCapability>,
}

impl TaskPublisher {
    pub fn new(graph: Arc<dyn GraphCapability>) -> Self {
        Self { graph }
    }

    /// Create the tasks of `outcome` in the given plan bucket.
    ///
    /// Each task is attempted once; a failure is logged and the remaining
    /// tasks are still created.
    pub async fn create_tasks(&self, plan_id: &str, bucket_id: &str, outcome: &MeetingOutcome) {
        let mut created = 0usize;

        for task in &outcome.tasks {
            let planner_task = PlannerTask::from_outcome_task(plan_id, bucket_id, task);
            match self.graph.create_planner_task(&planner_task).await {
                Ok(()) => {
                    created += 1;
                    info!(plan_id, bucket_id, title = %planner_task.title, "task created");
                }
                Err(err) => {
                    error!(
                        plan_id,
                        bucket_id,
                        title = %planner_task.title,
                        error = %err,
                        "failed to create task"
                    );
                }
            }
        }

        info!(plan_id, created, requested = outcome.tasks.len(), "task creation finished");
    }
}
