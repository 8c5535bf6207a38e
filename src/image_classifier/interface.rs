use crate::photo::interface::OrientedImage;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

impl Classification {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Classifications in the order the classifier ranked them, highest
/// confidence first. Consumers trust this order and never re-sort.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationResult(Vec<Classification>);

impl ClassificationResult {
    pub fn new(ranked: Vec<Classification>) -> Self {
        Self(ranked)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn top(&self, k: usize) -> &[Classification] {
        &self.0[..k.min(self.0.len())]
    }

    #[cfg(test)]
    pub fn iter(&self) -> std::slice::Iter<'_, Classification> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    #[error("failed to load model {path}: {reason}")]
    ModelLoad { path: String, reason: String },
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("unexpected model output: {0}")]
    UnexpectedOutput(String),
}

pub trait ImageClassifier: Send + Sync {
    fn classify(&self, image: &OrientedImage) -> Result<ClassificationResult, ClassifierError>;
}
