use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::{
    classifier::SubmitError,
    domain::{Phase, PredictionResult, ToggleLabel, UiState},
};

pub const CHECKING_TEXT: &str = "Checking...";
pub const SERVER_ERROR_TEXT: &str = "Server error — try again later.";
pub const NETWORK_ERROR_TEXT: &str = "Network error — could not reach detection server.";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").expect("valid whitespace regex"));

/// Identifies one in-flight submission. Monotonically increasing; only the
/// outcome carrying the latest token is applied, so a slow earlier response
/// can never overwrite a newer submission.
pub type RequestToken = u64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a URL.")]
    Empty,
    #[error("Please enter only one URL at a time (no spaces).")]
    ContainsWhitespace,
}

/// Validates raw user input: trimmed, non-empty, no interior whitespace.
pub fn validate_url(raw: &str) -> Result<&str, ValidationError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(ValidationError::Empty);
    }
    if WHITESPACE.is_match(url) {
        return Err(ValidationError::ContainsWhitespace);
    }
    Ok(url)
}

/// Owns the [`UiState`] and applies every submit / outcome / toggle / reset
/// transition to it. Never touches the network itself; the caller issues the
/// request for a token handed out by [`begin_submit`](Self::begin_submit) and
/// feeds the result back through [`apply_outcome`](Self::apply_outcome).
pub struct SubmissionController {
    state: UiState,
    next_token: RequestToken,
    latest: Option<RequestToken>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self {
            state: UiState::hidden(),
            next_token: 0,
            latest: None,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Validates the input and, if accepted, moves the UI into the transient
    /// checking state and hands out the token for the outbound request.
    /// On rejection the UI state is left untouched and no token is consumed.
    pub fn begin_submit(&mut self, raw: &str) -> Result<(RequestToken, String), ValidationError> {
        let url = validate_url(raw)?.to_string();

        self.state.input = url.clone();
        self.state.checked_url = url.clone();
        self.state.checked_url_visible = true;
        self.state.result_text = CHECKING_TEXT.to_string();
        self.state.result_visible = true;
        self.state.hide_reason_regions();
        self.state.phase = Phase::Checking;

        self.next_token += 1;
        self.latest = Some(self.next_token);
        Ok((self.next_token, url))
    }

    /// Applies a classification outcome to the UI. Returns false when the
    /// token is stale (a newer submission or a reset superseded it) and the
    /// outcome was discarded.
    pub fn apply_outcome(
        &mut self,
        token: RequestToken,
        outcome: Result<PredictionResult, SubmitError>,
    ) -> bool {
        if self.latest != Some(token) {
            tracing::debug!(target: "controller", token, "discarding stale classification outcome");
            return false;
        }

        match outcome {
            Ok(prediction) => self.apply_prediction(prediction),
            Err(SubmitError::Server { status, body }) => {
                tracing::error!(
                    target: "classifier",
                    %status,
                    body,
                    "classification endpoint returned an error"
                );
                self.state.result_text = SERVER_ERROR_TEXT.to_string();
                self.state.result_visible = true;
                self.state.hide_reason_regions();
                self.state.phase = Phase::ServerError;
            }
            Err(err) => {
                tracing::error!(target: "classifier", error = %err, "classification request failed");
                self.state.result_text = NETWORK_ERROR_TEXT.to_string();
                self.state.result_visible = true;
                self.state.hide_reason_regions();
                self.state.phase = Phase::NetworkError;
            }
        }
        true
    }

    fn apply_prediction(&mut self, prediction: PredictionResult) {
        self.state.result_text = prediction.verdict.clone();
        self.state.result_visible = true;

        // Reasons and the toggle only surface for a phishing verdict that
        // actually carries at least one extracted reason.
        if prediction.is_phishing() && !prediction.reasons.is_empty() {
            self.state.reasons = prediction.reasons;
            self.state.reasons_visible = true;
            self.state.details_visible = false;
            self.state.toggle_label = ToggleLabel::ShowMore;
            self.state.toggle_visible = true;
        } else {
            self.state.hide_reason_regions();
        }
        self.state.phase = Phase::Resolved;
    }

    /// Pure visibility flip of the details box and its toggle label.
    pub fn toggle_details(&mut self) {
        if self.state.details_visible {
            self.state.details_visible = false;
            self.state.toggle_label = ToggleLabel::ShowMore;
        } else {
            self.state.details_visible = true;
            self.state.toggle_label = ToggleLabel::Hide;
        }
    }

    /// Clears the input and returns every region to its initial hidden state.
    /// Any in-flight submission is orphaned; its outcome will be discarded.
    pub fn reset(&mut self) {
        self.state = UiState::hidden();
        self.latest = None;
    }
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new()
    }
}
