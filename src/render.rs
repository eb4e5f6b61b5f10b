use std::fmt::Write;

use crate::domain::UiState;

/// Pure rendering of the visible UI regions to terminal text. State decides
/// visibility; this function only formats, so it stays trivially testable.
pub fn render(state: &UiState) -> String {
    let mut out = String::new();

    if state.checked_url_visible {
        let _ = writeln!(out, "Checked URL: {}", state.checked_url);
    }
    if state.result_visible {
        let _ = writeln!(out, "Result: {}", state.result_text);
    }
    if state.reasons_visible {
        let _ = writeln!(out, "Reasons:");
        for reason in &state.reasons {
            let _ = writeln!(out, "  - {reason}");
        }
    }
    if state.details_visible {
        let _ = writeln!(out, "Details:");
        let _ = writeln!(out, "  URL checked: {}", state.checked_url);
        let _ = writeln!(out, "  Contributing signals: {}", state.reasons.len());
    }
    if state.toggle_visible {
        let _ = writeln!(out, "[{}]  (/details)", state.toggle_label.as_str());
    }

    out
}
