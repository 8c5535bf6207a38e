use crate::image_classifier::interface::{Classification, ClassificationResult};
use crate::image_classifier::labels::Labels;
use crate::image_classifier::models::model_config::OutputActivation;

const DISTRIBUTION_TOLERANCE: f32 = 1e-3;

pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum == 0.0 || !sum.is_finite() {
        return vec![0.0; scores.len()];
    }
    exps.into_iter().map(|e| e / sum).collect()
}

fn is_distribution(scores: &[f32]) -> bool {
    let sum: f32 = scores.iter().sum();
    scores.iter().all(|s| (0.0..=1.0).contains(s)) && (sum - 1.0).abs() < DISTRIBUTION_TOLERANCE
}

pub fn activate(scores: &[f32], activation: OutputActivation) -> Vec<f32> {
    match activation {
        OutputActivation::None => scores.to_vec(),
        OutputActivation::Softmax => softmax(scores),
        OutputActivation::Auto if is_distribution(scores) => scores.to_vec(),
        OutputActivation::Auto => softmax(scores),
    }
}

/// Highest confidence first, at most `max_results` entries, confidences clamped to [0, 1].
pub fn rank(confidences: &[f32], labels: &Labels, max_results: usize) -> ClassificationResult {
    let mut indexed: Vec<(usize, f32)> = confidences
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, confidence)| !confidence.is_nan())
        .collect();

    indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
    indexed.truncate(max_results);

    ClassificationResult::new(
        indexed
            .into_iter()
            .map(|(index, confidence)| {
                Classification::new(labels.name(index), confidence.clamp(0.0, 1.0))
            })
            .collect(),
    )
}
