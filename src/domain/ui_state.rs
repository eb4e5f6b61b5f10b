use super::types::{Phase, ToggleLabel};

/// Everything the terminal surface shows, as one value object owned by the
/// controller. Visibility is explicit per region so a render pass never has
/// to infer it from other fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UiState {
    pub input: String,
    pub checked_url_visible: bool,
    pub checked_url: String,
    pub result_visible: bool,
    pub result_text: String,
    pub reasons_visible: bool,
    pub reasons: Vec<String>,
    pub details_visible: bool,
    pub toggle_visible: bool,
    pub toggle_label: ToggleLabel,
    pub phase: Phase,
}

impl UiState {
    /// Initial state: empty input, every region hidden.
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Hides the reason section, details box and toggle control and drops any
    /// rendered reasons. The result box is left alone so an error message can
    /// stay on screen.
    pub fn hide_reason_regions(&mut self) {
        self.reasons_visible = false;
        self.reasons.clear();
        self.details_visible = false;
        self.toggle_visible = false;
        self.toggle_label = ToggleLabel::ShowMore;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_state_shows_nothing() {
        let state = UiState::hidden();
        assert!(!state.checked_url_visible);
        assert!(!state.result_visible);
        assert!(!state.reasons_visible);
        assert!(!state.details_visible);
        assert!(!state.toggle_visible);
        assert_eq!(state.phase, Phase::Idle);
    }

    #[test]
    fn hiding_reason_regions_keeps_result_box() {
        let mut state = UiState::hidden();
        state.result_visible = true;
        state.result_text = "Checking...".into();
        state.reasons_visible = true;
        state.reasons = vec!["a".into()];
        state.hide_reason_regions();
        assert!(state.result_visible);
        assert!(state.reasons.is_empty());
        assert_eq!(state.toggle_label, ToggleLabel::ShowMore);
    }
}
