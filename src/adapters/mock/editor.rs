//! Mock external editor for testing.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::traits::{EditorError, ExternalEditor};

/// One recorded call to [`ExternalEditor::edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCall {
    pub initial: String,
    pub suffix: String,
}

/// Editor that returns scripted results.
///
/// With nothing scripted, the initial text comes back unchanged.
#[derive(Debug, Clone, Default)]
pub struct MockEditor {
    results: Arc<Mutex<VecDeque<Result<String, EditorError>>>>,
    calls: Arc<Mutex<Vec<EditCall>>>,
}

impl MockEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next edit returns `text`.
    pub fn respond_with(&self, text: impl Into<String>) {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(text.into()));
    }

    /// The next edit fails as if the editor exited with status 1.
    pub fn fail_next(&self) {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(EditorError::NonZeroExit { code: Some(1) }));
    }

    pub fn calls(&self) -> Vec<EditCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ExternalEditor for MockEditor {
    fn edit(&mut self, initial: &str, suffix: &str) -> Result<String, EditorError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(EditCall {
                initial: initial.to_string(),
                suffix: suffix.to_string(),
            });

        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Ok(initial.to_string()))
    }
}
