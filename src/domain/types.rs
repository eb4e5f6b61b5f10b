use serde::Serialize;

/// Upper bound on reasons carried per classification.
pub const MAX_REASONS: usize = 6;

/// Verdict and supporting reasons extracted from one classification response.
/// Reasons are de-duplicated by exact text and capped at [`MAX_REASONS`],
/// preserving first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionResult {
    pub verdict: String,
    pub reasons: Vec<String>,
}

impl PredictionResult {
    pub fn new(verdict: String, raw_reasons: Vec<String>) -> Self {
        let mut reasons: Vec<String> = Vec::new();
        for reason in raw_reasons {
            if reasons.len() == MAX_REASONS {
                break;
            }
            if !reason.is_empty() && !reasons.contains(&reason) {
                reasons.push(reason);
            }
        }
        Self { verdict, reasons }
    }

    pub fn is_phishing(&self) -> bool {
        self.verdict.to_lowercase().contains("phish")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Checking,
    Resolved,
    ServerError,
    NetworkError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleLabel {
    #[default]
    ShowMore,
    Hide,
}

impl ToggleLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleLabel::ShowMore => "▼ Show More Details",
            ToggleLabel::Hide => "▲ Hide Details",
        }
    }
}
