//! Per-conversation mutable state, held explicitly.
//!
//! The orchestrator threads this value object through every turn; there
//! is no hidden closure or re-render state. Mutations happen only after
//! every external call for the turn has succeeded.

use crate::core::score::Score;
use crate::diagnostic::workflow::{Exchange, Workflow};
use crate::session::entities::Turn;
use serde::{Deserialize, Serialize};

/// Live conversation state for one diagnostic session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    turns: Vec<Turn>,
    /// The most recent bot question; the user's next answer pairs with it
    last_question: Option<String>,
    current_transcript: Vec<Exchange>,
    depth: usize,
    closed_workflows: Vec<Workflow>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last_question(&self) -> Option<&str> {
        self.last_question.as_deref()
    }

    pub fn current_transcript(&self) -> &[Exchange] {
        &self.current_transcript
    }

    /// Question/answer rounds recorded in the current workflow
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn closed_workflows(&self) -> &[Workflow] {
        &self.closed_workflows
    }

    pub fn workflow_count(&self) -> usize {
        self.closed_workflows.len()
    }

    /// Record the user's answer to the last question as one exchange.
    pub fn record_answer(&mut self, answer: impl Into<String>) {
        let answer = answer.into();
        let question = self.last_question.clone().unwrap_or_default();
        self.turns.push(Turn::user(answer.clone()));
        self.current_transcript.push(Exchange::new(question, answer));
        self.depth += 1;
    }

    /// Append a bot question, suppressing a repeat of the question the
    /// user just answered. Returns whether the turn was appended.
    pub fn push_bot_turn(&mut self, question: impl Into<String>) -> bool {
        let question = question.into();
        let duplicate = self
            .last_question
            .as_deref()
            .is_some_and(|previous| previous == question);
        if !duplicate {
            self.turns.push(Turn::bot(question.clone()));
        }
        // Either way the user is now answering this question
        self.last_question = Some(question);
        !duplicate
    }

    /// Append an informational bot turn (pattern notices, completion
    /// summaries) without touching the question flow.
    pub fn push_notice(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::bot(content));
    }

    /// Append a user-visible error turn. The last question stays in
    /// place so the user can resubmit the same answer.
    pub fn push_error_turn(&mut self, message: impl Into<String>) {
        self.turns.push(Turn::bot(message));
    }

    /// Close the current workflow with its final cascade score and reset
    /// the transcript and depth for the next one.
    pub fn close_workflow(&mut self, cascade_score: Score) -> Workflow {
        let transcript = std::mem::take(&mut self.current_transcript);
        self.depth = 0;
        let workflow = Workflow::close(transcript, cascade_score);
        self.closed_workflows.push(workflow.clone());
        workflow
    }
}
