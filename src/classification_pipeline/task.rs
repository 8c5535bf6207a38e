use crate::classification_pipeline::error::PipelineError;
use crate::image_classifier::interface::ClassificationResult;
use image::DynamicImage;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;

pub type PipelineResult = Result<ClassificationResult, PipelineError>;

/// Handle to one in-flight classification. The owner polls it from the UI
/// thread; the upright preview and the result are each taken at most once.
pub struct ClassificationTask {
    photo_name: String,
    preview: Receiver<Arc<DynamicImage>>,
    receiver: Receiver<PipelineResult>,
}

/// Sending half, moved onto the background thread.
pub struct TaskCompleter {
    preview: Sender<Arc<DynamicImage>>,
    sender: Sender<PipelineResult>,
}

impl ClassificationTask {
    pub fn pending(photo_name: impl Into<String>) -> (Self, TaskCompleter) {
        let (preview_sender, preview) = channel();
        let (sender, receiver) = channel();
        (
            Self {
                photo_name: photo_name.into(),
                preview,
                receiver,
            },
            TaskCompleter {
                preview: preview_sender,
                sender,
            },
        )
    }

    pub fn completed(photo_name: impl Into<String>, result: PipelineResult) -> Self {
        let (task, completer) = Self::pending(photo_name);
        completer.complete(result);
        task
    }

    pub fn photo_name(&self) -> &str {
        &self.photo_name
    }

    /// The bitmap after orientation was applied, once the background thread
    /// has produced it. Tasks rejected before starting never have one.
    pub fn try_take_preview(&self) -> Option<Arc<DynamicImage>> {
        self.preview.try_recv().ok()
    }

    pub fn try_take(&self) -> Option<PipelineResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(Self::abandoned())),
        }
    }

    pub fn wait(&self) -> PipelineResult {
        self.receiver.recv().unwrap_or_else(|_| Err(Self::abandoned()))
    }

    fn abandoned() -> PipelineError {
        PipelineError::ClassifierFailure("classification ended without a result".to_string())
    }
}

impl TaskCompleter {
    pub fn preview(&self, upright: Arc<DynamicImage>) {
        let _ = self.preview.send(upright);
    }

    pub fn complete(self, result: PipelineResult) {
        // The task may already be dropped; nobody is left to show the result.
        let _ = self.sender.send(result);
    }
}
