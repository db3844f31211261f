use super::{
    extract_json_object, AgentBehavior, ContextLog, ProgressReview, ReviewVerdict, RoleKind,
    TaskOutcome,
};
use crate::constants::{
    PROGRESS_REVIEW_SYSTEM_PROMPT, PROGRESS_REVIEW_USER_PROMPT, REVIEWER_FORMAT_REMINDER,
    REVIEWER_SYSTEM_PROMPT, REVIEWER_USER_PROMPT,
};
use crate::core::Task;
use crate::errors::Error;
use crate::llm::{ChatMessage, LlmClient};
use crate::sandbox::ExecutionResult;
use async_trait::async_trait;
use tracing::{debug, info};

/// Role executor that gates task completion and assesses overall progress.
pub struct ReviewerAgent {
    pub name: String,
    llm_client: LlmClient,
    system_prompt: String,
    context: ContextLog,
}

impl ReviewerAgent {
    pub fn new(name: &str, system_prompt: Option<&str>, llm_client: LlmClient) -> Self {
        Self {
            name: name.to_string(),
            llm_client,
            system_prompt: system_prompt.unwrap_or(REVIEWER_SYSTEM_PROMPT).to_string(),
            context: ContextLog::new(),
        }
    }
}

/// Extracts the approve/reject decision from a review reply.
///
/// Only the leading alphabetic token counts: "Yes" and "Approved" approve,
/// anything else rejects. "Yesterday..." must not approve. A rejection with
/// no further text carries the whole reply as feedback so the executor
/// always has something to retry against.
pub fn parse_verdict(response: &str) -> ReviewVerdict {
    let trimmed = response.trim();
    let token: String = trimmed
        .chars()
        .take_while(|c| c.is_alphabetic())
        .collect::<String>()
        .to_lowercase();

    if token == "yes" || token == "approved" {
        let rest = trimmed[token.len()..].trim_start_matches([':', '.', ',', '-']).trim();
        return ReviewVerdict {
            approved: true,
            feedback: rest.to_string(),
        };
    }

    let rest = if token == "no" {
        trimmed[token.len()..].trim_start_matches([':', '.', ',', '-']).trim()
    } else {
        ""
    };
    ReviewVerdict {
        approved: false,
        feedback: if rest.is_empty() {
            trimmed.to_string()
        } else {
            rest.to_string()
        },
    }
}

/// Forces rejection whenever the attached sandbox run exited non-zero,
/// regardless of the textual verdict.
pub fn apply_sandbox_veto(mut verdict: ReviewVerdict, execution: Option<&ExecutionResult>) -> ReviewVerdict {
    if let Some(result) = execution {
        if !result.success() {
            verdict.approved = false;
            if !verdict.feedback.is_empty() {
                verdict.feedback.push('\n');
            }
            verdict
                .feedback
                .push_str(&format!("Sandbox execution failed and must be fixed. {}", result.summary()));
        }
    }
    verdict
}

fn validate_reviewer_response(resp: &str) -> bool {
    let token: String = resp
        .trim()
        .chars()
        .take_while(|c| c.is_alphabetic())
        .collect::<String>()
        .to_lowercase();
    matches!(token.as_str(), "yes" | "no" | "approved")
}

#[async_trait]
impl AgentBehavior for ReviewerAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> RoleKind {
        RoleKind::Reviewer
    }

    /// Reviews a single task attempt and returns the gate decision.
    async fn review_task(
        &mut self,
        task: &Task,
        outcome: &TaskOutcome,
        goal: &str,
    ) -> Result<ReviewVerdict, Error> {
        debug!("ReviewerAgent: reviewing task {}...", task.id);

        let mut prompt = format!(
            "{}\n\nTask: {}\n\nResult:\n{}\n\nOverall goal: {}",
            REVIEWER_USER_PROMPT,
            task.description_with_feedback(),
            outcome.content,
            goal
        );
        if let Some(result) = &outcome.execution {
            prompt.push_str(&format!("\n\nSandbox execution:\n{}", result.summary()));
        }

        let mut messages = vec![
            ChatMessage::new("system", &self.system_prompt),
            ChatMessage::new("user", &prompt),
        ];
        let response = self
            .llm_client
            .call_llm_with_format_check(
                &mut messages,
                validate_reviewer_response,
                REVIEWER_FORMAT_REMINDER,
                2,
            )
            .await?;

        let verdict = apply_sandbox_veto(parse_verdict(&response), outcome.execution.as_ref());
        self.context.append(
            "task_review",
            &format!(
                "task {} {}: {}",
                task.id,
                if verdict.approved { "approved" } else { "rejected" },
                verdict.feedback
            ),
        );
        info!(
            "Task {} review: {}",
            task.id,
            if verdict.approved { "approved" } else { "rejected" }
        );
        Ok(verdict)
    }

    /// Produces the end-of-run assessment of the whole task history.
    async fn review_overall_progress(
        &mut self,
        tasks: &[Task],
        goal: &str,
    ) -> Result<ProgressReview, Error> {
        debug!("ReviewerAgent: reviewing overall progress...");

        let history = tasks
            .iter()
            .map(|t| {
                format!(
                    "- [{}] task {} ({}): {}",
                    if t.completed { "x" } else { " " },
                    t.id,
                    t.state,
                    t.description
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = format!(
            "{}\n\nOverall goal: {}\n\nTask history:\n{}",
            PROGRESS_REVIEW_USER_PROMPT, goal, history
        );

        let messages = vec![
            ChatMessage::new("system", PROGRESS_REVIEW_SYSTEM_PROMPT),
            ChatMessage::new("user", &prompt),
        ];
        let response = self.llm_client.call_llm_api(messages).await?;
        let json = extract_json_object(&response).unwrap_or(&response);
        let review: ProgressReview = serde_json::from_str(json)?;
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Complexity, TaskSpec};
    use crate::llm::testing::ScriptedProvider;

    #[test]
    fn plain_yes_approves() {
        let verdict = parse_verdict("Yes");
        assert!(verdict.approved);
        assert!(verdict.feedback.is_empty());
    }

    #[test]
    fn yes_with_comment_keeps_the_comment() {
        let verdict = parse_verdict("Yes: looks fine, the function handles both branches.");
        assert!(verdict.approved);
        assert!(verdict.feedback.contains("both branches"));
    }

    #[test]
    fn approved_is_an_accepted_synonym() {
        assert!(parse_verdict("Approved. Good structure.").approved);
    }

    #[test]
    fn yesterday_does_not_approve() {
        let verdict = parse_verdict("Yesterday's code was better, this version drops edge cases.");
        assert!(!verdict.approved);
        assert!(verdict.feedback.contains("edge cases"));
    }

    #[test]
    fn bare_no_carries_full_text_as_feedback() {
        let verdict = parse_verdict("No.");
        assert!(!verdict.approved);
        assert_eq!(verdict.feedback, "No.");
    }

    #[test]
    fn no_with_reason_keeps_only_the_reason() {
        let verdict = parse_verdict("No\nThe error path is unhandled.");
        assert!(!verdict.approved);
        assert_eq!(verdict.feedback, "The error path is unhandled.");
    }

    #[test]
    fn sandbox_failure_vetoes_a_yes() {
        let execution = ExecutionResult {
            exit_code: 2,
            stdout: String::new(),
            stderr: "SyntaxError: invalid syntax".into(),
        };
        let verdict = apply_sandbox_veto(parse_verdict("Yes: looks fine"), Some(&execution));
        assert!(!verdict.approved);
        assert!(verdict.feedback.contains("Sandbox execution failed"));
        assert!(verdict.feedback.contains("SyntaxError"));
    }

    #[test]
    fn clean_sandbox_run_leaves_the_verdict_alone() {
        let execution = ExecutionResult {
            exit_code: 0,
            stdout: "ok".into(),
            stderr: String::new(),
        };
        assert!(apply_sandbox_veto(parse_verdict("Yes"), Some(&execution)).approved);
    }

    fn sample_task() -> Task {
        Task::from_spec(
            1,
            TaskSpec {
                description: "Implement add".into(),
                estimated_complexity: Complexity::Low,
                file_path: "src/add.py".into(),
            },
        )
    }

    #[tokio::test]
    async fn review_task_retries_on_bad_format() {
        let provider = ScriptedProvider::new([
            "I think this is mostly fine overall.",
            "No\nMissing input validation.",
        ]);
        let mut reviewer = ReviewerAgent::new(
            "ReviewAgent",
            None,
            LlmClient::from_provider(Box::new(provider)),
        );
        let outcome = TaskOutcome::text("def add(a, b): return a + b");
        let verdict = reviewer
            .review_task(&sample_task(), &outcome, "add two numbers")
            .await
            .unwrap();
        assert!(!verdict.approved);
        assert_eq!(verdict.feedback, "Missing input validation.");
    }

    #[tokio::test]
    async fn overall_progress_decodes_wrapped_json() {
        let provider = ScriptedProvider::new([
            "Here you go:\n{\"progress\": \"both tasks done\", \"missing\": \"\", \"next_steps\": \"ship it\"}",
        ]);
        let mut reviewer = ReviewerAgent::new(
            "ReviewAgent",
            None,
            LlmClient::from_provider(Box::new(provider)),
        );
        let review = reviewer
            .review_overall_progress(&[sample_task()], "add two numbers")
            .await
            .unwrap();
        assert_eq!(review.progress, "both tasks done");
        assert_eq!(review.next_steps, "ship it");
    }
}
