pub mod types;
pub mod ui_state;

pub use types::{Phase, PredictionResult, ToggleLabel, MAX_REASONS};
pub use ui_state::UiState;
