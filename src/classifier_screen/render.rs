use crate::classification_pipeline::format::{format_error, format_top_results, CLASSIFYING, IDLE};
use crate::classifier_screen::core::State;

pub fn render(state: &State, top_k: usize) -> String {
    match state {
        State::Idle => IDLE.to_string(),
        State::Classifying { .. } => CLASSIFYING.to_string(),
        State::Classified { result, .. } => format_top_results(result, top_k),
        State::Failed { error, .. } => format_error(error),
    }
}
