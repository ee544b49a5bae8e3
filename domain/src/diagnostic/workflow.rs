//! Workflow entities: one coordination task explored as a transcript.

use crate::core::score::Score;
use serde::{Deserialize, Serialize};

/// One question/answer round in a workflow transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

impl Exchange {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// One coordination task explored within a session (Entity).
///
/// Closed workflows are immutable: the transcript, the cascade score from
/// the last scoring pass before closure, and the round count are frozen
/// when the workflow is appended to the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    transcript: Vec<Exchange>,
    cascade_score: Score,
    depth: usize,
}

impl Workflow {
    /// Freeze a transcript into a closed workflow.
    pub fn close(transcript: Vec<Exchange>, cascade_score: Score) -> Self {
        let depth = transcript.len();
        Self {
            transcript,
            cascade_score,
            depth,
        }
    }

    pub fn transcript(&self) -> &[Exchange] {
        &self.transcript
    }

    pub fn cascade_score(&self) -> Score {
        self.cascade_score
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }

    /// Render the transcript as pretty JSON for prompt embedding
    pub fn transcript_json(&self) -> String {
        serde_json::to_string_pretty(&self.transcript).unwrap_or_else(|_| "[]".to_string())
    }
}
