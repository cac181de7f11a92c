//! Structured warning accumulation across pipeline stages.
//!
//! Non-fatal conditions are logged as they happen and also collected here
//! so a batch caller can surface them without wiring up a logger.

use serde::{Deserialize, Serialize};

/// Pipeline stage a diagnostic originated from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Stage {
    Import,
    Retarget,
    Background,
    Retime,
    Render,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    pub stage: Stage,
    pub message: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and emit it through the logger.
    pub fn warn(&mut self, stage: Stage, message: impl Into<String>) {
        let message = message.into();
        log::warn!("[{stage:?}] {message}");
        self.entries.push(Diagnostic { stage, message });
    }

    /// Absorb pre-collected warning strings from a stage.
    pub fn absorb(&mut self, stage: Stage, messages: &[String]) {
        for message in messages {
            self.entries.push(Diagnostic {
                stage,
                message: message.clone(),
            });
        }
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
