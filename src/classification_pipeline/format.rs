use crate::classification_pipeline::error::PipelineError;
use crate::image_classifier::interface::{Classification, ClassificationResult};

pub const HEADER: &str = "Classifications:";
pub const NOTHING_RECOGNIZED: &str = "Nothing recognized";
pub const CLASSIFYING: &str = "Classifying...";
pub const IDLE: &str = "Choose or drop a photo to classify";
pub const GENERIC_FAILURE: &str = "Something went wrong...\nPlease try again";

pub fn format_classification(classification: &Classification) -> String {
    format!(
        "{:.2}% - {}",
        classification.confidence as f64 * 100.0,
        classification.label
    )
}

/// The first `k` entries as they were ranked, under a header line.
pub fn format_top_results(result: &ClassificationResult, k: usize) -> String {
    if result.is_empty() {
        return NOTHING_RECOGNIZED.to_string();
    }

    let lines: Vec<String> = result.top(k).iter().map(format_classification).collect();

    format!("{}\n{}", HEADER, lines.join("\n"))
}

pub fn format_error(err: &PipelineError) -> String {
    match err {
        PipelineError::InvalidImage(_) => GENERIC_FAILURE.to_string(),
        PipelineError::ClassifierFailure(description) => {
            format!("Unable to classify image.\n{}", description)
        }
        PipelineError::StartFailure(description) => {
            format!("Failed to perform classification.\n{}", description)
        }
    }
}
