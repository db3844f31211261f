use super::Coordinator;
use crate::core::classify::classify_role;
use crate::core::{Task, TaskState};
use crate::errors::Error;
use colored::*;
use tracing::{info, warn};

impl Coordinator {
    /// Drives a goal from decomposition to the final progress review.
    ///
    /// Planner and reviewer failures degrade the run instead of aborting
    /// it: an empty or failed decomposition falls back to a single
    /// goal-sized task, and a failed review counts as a rejection.
    pub async fn process_goal(&mut self, goal: &str) -> Result<(), Error> {
        info!("Processing goal: {}", goal);
        self.spinner.set_message("Decomposing the goal into tasks...".to_string());

        let mut tasks = match self.planner.decompose_goal(goal).await {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!("Goal decomposition failed: {}", e);
                Vec::new()
            }
        };
        if tasks.is_empty() {
            warn!("Decomposition produced no tasks, falling back to a single task");
            tasks = vec![Task::fallback(goal)];
        }

        for task in &mut tasks {
            task.assigned_role = Some(classify_role(&task.description));
        }
        self.stats.total_tasks = tasks.len();

        for mut task in tasks {
            self.spinner.set_message(format!(
                "Task {}/{}: {}",
                task.id, self.stats.total_tasks, task.description
            ));
            self.process_task(&mut task, goal).await;
            self.tasks.push(task);
        }

        self.spinner.set_message("Reviewing overall progress...".to_string());
        match self.reviewer.review_overall_progress(&self.tasks, goal).await {
            Ok(review) => {
                info!("Progress: {}", review.progress);
                if !review.missing.is_empty() {
                    info!("Missing: {}", review.missing);
                }
                if !review.next_steps.is_empty() {
                    info!("Next steps: {}", review.next_steps);
                }
            }
            Err(e) => warn!("Overall progress review failed: {}", e),
        }

        self.stats.completed_tasks = self.tasks.iter().filter(|t| t.completed).count();
        self.stats.report();

        self.spinner.finish_and_clear();
        println!(
            "{}",
            format!(
                "✅ Goal processed: {}/{} tasks completed",
                self.stats.completed_tasks, self.stats.total_tasks
            )
            .bold()
            .green()
        );
        Ok(())
    }

    /// Runs one task through the execute/review/retry cycle.
    ///
    /// Execution errors and review rejections both consume one retry and
    /// feed their message back into the next attempt; the task is abandoned
    /// once the retry budget is exhausted.
    pub(super) async fn process_task(&mut self, task: &mut Task, goal: &str) {
        if task.state.is_terminal() {
            return;
        }
        let role = task.assigned_role.unwrap_or(crate::agents::RoleKind::Coder);
        let mut retry_count = 0;

        loop {
            if retry_count >= self.max_retries {
                warn!(
                    "Task {} abandoned after {} attempts",
                    task.id, self.max_retries
                );
                task.state = TaskState::Abandoned;
                return;
            }

            task.state = TaskState::Executing;
            let executor = match self.executor_for(role) {
                Some(executor) => executor,
                None => {
                    warn!("No executor available for role {}", role);
                    task.state = TaskState::Abandoned;
                    return;
                }
            };

            let outcome = match executor.execute_task(task, goal).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Task {} execution failed: {}", task.id, e);
                    task.append_feedback(&format!("Error: {}", e));
                    task.state = TaskState::Pending;
                    retry_count += 1;
                    continue;
                }
            };
            if let Some(tool_name) = &outcome.tool_name {
                self.stats.record_tool(tool_name);
            }

            task.state = TaskState::Reviewing;
            let verdict = match self.reviewer.review_task(task, &outcome, goal).await {
                Ok(verdict) => verdict,
                Err(e) => {
                    warn!("Task {} review failed: {}", task.id, e);
                    task.append_feedback(&format!("Error: {}", e));
                    task.state = TaskState::Pending;
                    retry_count += 1;
                    continue;
                }
            };

            if verdict.approved {
                task.completed = true;
                task.state = TaskState::Completed;
                info!("Task {} completed", task.id);
                return;
            }

            warn!("Task {} rejected: {}", task.id, verdict.feedback);
            task.append_feedback(&verdict.feedback);
            task.state = TaskState::Pending;
            retry_count += 1;
        }
    }
}
