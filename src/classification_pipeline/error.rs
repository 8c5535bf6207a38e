use crate::image_classifier::interface::ClassifierError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidImageReason {
    #[error("no bitmap")]
    MissingBitmap,
    #[error("bitmap is {width}x{height}")]
    EmptyBitmap { width: u32, height: u32 },
    #[error("unsupported orientation {0}")]
    UnsupportedOrientation(u32),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("invalid image: {0}")]
    InvalidImage(InvalidImageReason),
    #[error("{0}")]
    ClassifierFailure(String),
    #[error("{0}")]
    StartFailure(String),
}

impl From<ClassifierError> for PipelineError {
    fn from(err: ClassifierError) -> Self {
        PipelineError::ClassifierFailure(err.to_string())
    }
}

impl From<InvalidImageReason> for PipelineError {
    fn from(reason: InvalidImageReason) -> Self {
        PipelineError::InvalidImage(reason)
    }
}
