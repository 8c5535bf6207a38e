use crate::classification_pipeline::error::PipelineError;
use crate::classification_pipeline::task::PipelineResult;
use crate::image_classifier::interface::ClassificationResult;
use crate::photo::interface::Photo;
use image::DynamicImage;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum State {
    Idle,
    Classifying {
        photo_name: String,
    },
    Classified {
        photo_name: String,
        result: ClassificationResult,
    },
    Failed {
        photo_name: String,
        error: PipelineError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PhotoPicked(Photo),
    PreviewReady {
        photo_name: String,
        upright: Arc<DynamicImage>,
    },
    ClassifyDone {
        photo_name: String,
        result: PipelineResult,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ClearPreview,
    ShowPreview {
        photo_name: String,
        upright: Arc<DynamicImage>,
    },
    Classify(Photo),
}

impl Event {
    pub fn to_display_string(&self) -> String {
        match self {
            Event::PhotoPicked(photo) => format!("PhotoPicked({})", photo.name),
            Event::PreviewReady { photo_name, .. } => format!("PreviewReady({})", photo_name),
            Event::ClassifyDone {
                photo_name,
                result: Ok(result),
            } => format!("ClassifyDone({}, {} results)", photo_name, result.len()),
            Event::ClassifyDone {
                photo_name,
                result: Err(err),
            } => format!("ClassifyDone({}, error: {})", photo_name, err),
        }
    }
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::ClearPreview => "ClearPreview".to_string(),
            Effect::ShowPreview { photo_name, .. } => format!("ShowPreview({})", photo_name),
            Effect::Classify(photo) => format!("Classify({})", photo.name),
        }
    }
}

impl State {
    pub fn to_display_string(&self) -> String {
        match self {
            State::Idle => "Idle".to_string(),
            State::Classifying { photo_name } => format!("Classifying({})", photo_name),
            State::Classified { photo_name, result } => {
                format!("Classified({}, {} results)", photo_name, result.len())
            }
            State::Failed { photo_name, error } => format!("Failed({}, {})", photo_name, error),
        }
    }
}

pub fn init() -> (State, Vec<Effect>) {
    (State::Idle, vec![])
}

/// A new photo always starts a new request and older requests keep running.
/// Whatever result arrives last decides what is shown.
pub fn transition(state: State, event: Event) -> (State, Vec<Effect>) {
    match event {
        Event::PhotoPicked(photo) => (
            State::Classifying {
                photo_name: photo.name.clone(),
            },
            vec![Effect::ClearPreview, Effect::Classify(photo)],
        ),
        Event::PreviewReady {
            photo_name,
            upright,
        } => (
            state,
            vec![Effect::ShowPreview {
                photo_name,
                upright,
            }],
        ),
        Event::ClassifyDone {
            photo_name,
            result: Ok(result),
        } => (State::Classified { photo_name, result }, vec![]),
        Event::ClassifyDone {
            photo_name,
            result: Err(error),
        } => (State::Failed { photo_name, error }, vec![]),
    }
}
