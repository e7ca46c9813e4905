//! Application and submission state.
//!
//! Both are plain values updated by pure functions so the rules can be
//! tested without a DOM:
//!
//! - [`AppState`] - the last result or the last error, never both
//! - [`SubmissionMachine`] - `Idle` / `Submitting`, tracking which request
//!   is pending

use crate::types::ExtractionResult;

// =============================================================================
// App state
// =============================================================================

/// Outcome of the last completed submission.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Result(ExtractionResult),
    Error(String),
}

/// What the shell displays below the upload form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    last: Option<Outcome>,
}

impl AppState {
    /// Store a result, clearing any error.
    pub fn apply_result(self, result: ExtractionResult) -> Self {
        Self {
            last: Some(Outcome::Result(result)),
        }
    }

    /// Store an error message, clearing any result.
    pub fn apply_error(self, message: impl Into<String>) -> Self {
        Self {
            last: Some(Outcome::Error(message.into())),
        }
    }

    pub fn last_result(&self) -> Option<&ExtractionResult> {
        match &self.last {
            Some(Outcome::Result(result)) => Some(result),
            _ => None,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        match &self.last {
            Some(Outcome::Error(message)) => Some(message),
            _ => None,
        }
    }
}

// =============================================================================
// Submission state machine
// =============================================================================

/// Identity of one upload request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestId(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting { request: RequestId },
}

/// Result of feeding a response back into the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The pending request finished; its outcome should be shown.
    Apply,
    /// Not the pending request; the outcome must be dropped.
    Stale,
}

/// Upload form lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionMachine {
    state: SubmissionState,
    next_id: u64,
    last_file_name: Option<String>,
}

impl Default for SubmissionMachine {
    fn default() -> Self {
        Self {
            state: SubmissionState::Idle,
            next_id: 1,
            last_file_name: None,
        }
    }
}

impl SubmissionMachine {
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SubmissionState::Submitting { .. })
    }

    /// Name of the most recently accepted file.
    pub fn last_file_name(&self) -> Option<&str> {
        self.last_file_name.as_deref()
    }

    /// A file was selected. Returns the id of the new request, or `None`
    /// when a request is already pending and the selection is ignored.
    pub fn begin(&mut self, file_name: &str) -> Option<RequestId> {
        if self.is_submitting() {
            log::debug!("Ignoring '{}': a submission is already in flight", file_name);
            return None;
        }

        let request = RequestId(self.next_id);
        self.next_id += 1;
        self.last_file_name = Some(file_name.to_string());
        self.state = SubmissionState::Submitting { request };
        Some(request)
    }

    /// A request finished, successfully or not.
    pub fn finish(&mut self, request: RequestId) -> Resolution {
        match &self.state {
            SubmissionState::Submitting { request: pending, .. } if *pending == request => {
                self.state = SubmissionState::Idle;
                Resolution::Apply
            }
            _ => {
                log::warn!("Dropping response for stale request {:?}", request);
                Resolution::Stale
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExtractedFields;

    fn result(subject: &str) -> ExtractionResult {
        ExtractionResult {
            sender: "a@b.com".to_string(),
            subject: subject.to_string(),
            classification: None,
            fields: ExtractedFields::from_lookup(|_| None),
            raw_body: String::new(),
        }
    }

    fn is_exclusive(state: &AppState) -> bool {
        state.last_result().is_some() != state.last_error().is_some()
    }

    #[test]
    fn test_initial_state_is_empty() {
        let state = AppState::default();
        assert!(state.last_result().is_none());
        assert!(state.last_error().is_none());
    }

    #[test]
    fn test_reducers_are_mutually_exclusive() {
        let state = AppState::default().apply_result(result("first"));
        assert!(is_exclusive(&state));
        assert_eq!(state.last_result().map(|r| r.subject.as_str()), Some("first"));

        let state = state.apply_error("Upload failed (500): server error");
        assert!(is_exclusive(&state));
        assert!(state.last_result().is_none());
        assert_eq!(state.last_error(), Some("Upload failed (500): server error"));

        let state = state.apply_result(result("second"));
        assert!(is_exclusive(&state));
        assert!(state.last_error().is_none());
    }

    #[test]
    fn test_any_sequence_keeps_exclusion() {
        let mut state = AppState::default();
        for step in 0..20 {
            state = if step % 3 == 0 {
                state.apply_error(format!("error {}", step))
            } else {
                state.apply_result(result(&format!("result {}", step)))
            };
            assert!(is_exclusive(&state), "step {}", step);
        }
    }

    #[test]
    fn test_submission_lifecycle() {
        let mut machine = SubmissionMachine::default();
        assert_eq!(machine.state(), &SubmissionState::Idle);

        let request = machine.begin("inquiry.eml").unwrap();
        assert!(machine.is_submitting());
        assert_eq!(machine.last_file_name(), Some("inquiry.eml"));

        assert_eq!(machine.finish(request), Resolution::Apply);
        assert_eq!(machine.state(), &SubmissionState::Idle);
    }

    #[test]
    fn test_second_selection_is_ignored_while_submitting() {
        let mut machine = SubmissionMachine::default();
        let first = machine.begin("inquiry.eml").unwrap();

        assert_eq!(machine.begin("other.msg"), None);
        assert!(machine.is_submitting());
        assert_eq!(machine.last_file_name(), Some("inquiry.eml"));

        assert_eq!(machine.finish(first), Resolution::Apply);
        assert!(!machine.is_submitting());
    }

    #[test]
    fn test_late_response_is_stale() {
        let mut machine = SubmissionMachine::default();
        let first = machine.begin("one.eml").unwrap();
        assert_eq!(machine.finish(first), Resolution::Apply);

        let second = machine.begin("two.eml").unwrap();
        assert_ne!(first, second);

        // A duplicate resolution of the first request must not end the second.
        assert_eq!(machine.finish(first), Resolution::Stale);
        assert!(machine.is_submitting());
        assert_eq!(machine.finish(second), Resolution::Apply);
    }

    #[test]
    fn test_end_to_end_failure_then_success() {
        let mut machine = SubmissionMachine::default();
        let mut app = AppState::default();

        let request = machine.begin("broken.eml").unwrap();
        if machine.finish(request) == Resolution::Apply {
            app = app.apply_error("Upload failed (422): Could not extract text body from file");
        }
        assert!(app.last_error().is_some());

        let request = machine.begin("inquiry.eml").unwrap();
        if machine.finish(request) == Resolution::Apply {
            app = app.apply_result(result("Fire policy"));
        }
        assert!(app.last_error().is_none());
        assert!(is_exclusive(&app));
    }
}
