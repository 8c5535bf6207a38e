use crate::classification_pipeline::error::{InvalidImageReason, PipelineError};
use crate::classifier_screen::core::{init, transition, Effect, Event, State};
use crate::classifier_screen::render::render;
use crate::classifier_screen::tests::fixture::solid_photo;
use crate::image_classifier::interface::{Classification, ClassificationResult};
use image::DynamicImage;
use std::sync::Arc;

fn classified(photo_name: &str, label: &str) -> State {
    State::Classified {
        photo_name: photo_name.to_string(),
        result: ClassificationResult::new(vec![Classification::new(label, 0.9)]),
    }
}

#[test]
fn test_init() {
    let (state, effects) = init();

    assert_eq!(state, State::Idle);
    assert!(effects.is_empty());
    assert_eq!(render(&state, 2), "Choose or drop a photo to classify");
}

#[test]
fn test_photo_picked_starts_classifying() {
    let photo = solid_photo("cat.png", [10, 20, 30]);

    let (state, effects) = transition(State::Idle, Event::PhotoPicked(photo.clone()));

    assert_eq!(
        state,
        State::Classifying {
            photo_name: "cat.png".into()
        }
    );
    assert_eq!(
        effects,
        vec![Effect::ClearPreview, Effect::Classify(photo)]
    );
    assert_eq!(render(&state, 2), "Classifying...");
}

#[test]
fn test_new_photo_while_classifying_starts_another_request() {
    let (state, _) = transition(
        State::Idle,
        Event::PhotoPicked(solid_photo("first.png", [1, 1, 1])),
    );

    let (state, effects) = transition(
        state,
        Event::PhotoPicked(solid_photo("second.png", [2, 2, 2])),
    );

    assert_eq!(
        state,
        State::Classifying {
            photo_name: "second.png".into()
        }
    );
    assert!(matches!(
        effects.as_slice(),
        [Effect::ClearPreview, Effect::Classify(p)] if p.name == "second.png"
    ));
}

#[test]
fn test_preview_ready_keeps_state() {
    let classifying = State::Classifying {
        photo_name: "cat.png".into(),
    };
    let upright = Arc::new(DynamicImage::new_rgb8(4, 6));

    let (state, effects) = transition(
        classifying.clone(),
        Event::PreviewReady {
            photo_name: "cat.png".into(),
            upright: upright.clone(),
        },
    );

    assert_eq!(state, classifying);
    assert_eq!(
        effects,
        vec![Effect::ShowPreview {
            photo_name: "cat.png".into(),
            upright,
        }]
    );
    assert_eq!(render(&state, 2), "Classifying...");
}

#[test]
fn test_stale_result_overwrites_display() {
    let state = classified("second.png", "dog");

    let (state, effects) = transition(
        state,
        Event::ClassifyDone {
            photo_name: "first.png".into(),
            result: Ok(ClassificationResult::new(vec![Classification::new("cat", 0.5)])),
        },
    );

    assert_eq!(
        state,
        State::Classified {
            photo_name: "first.png".into(),
            result: ClassificationResult::new(vec![Classification::new("cat", 0.5)]),
        }
    );
    assert!(effects.is_empty());
    assert_eq!(render(&state, 2), "Classifications:\n50.00% - cat");
}

#[test]
fn test_error_moves_to_failed() {
    let (state, _) = transition(
        State::Classifying {
            photo_name: "x.png".into(),
        },
        Event::ClassifyDone {
            photo_name: "x.png".into(),
            result: Err(PipelineError::InvalidImage(InvalidImageReason::MissingBitmap)),
        },
    );

    assert!(matches!(state, State::Failed { .. }));
    assert_eq!(render(&state, 2), "Something went wrong...\nPlease try again");
}

#[test]
fn test_empty_result_renders_nothing_recognized() {
    let (state, _) = transition(
        State::Idle,
        Event::ClassifyDone {
            photo_name: "night.png".into(),
            result: Ok(ClassificationResult::empty()),
        },
    );

    assert_eq!(render(&state, 2), "Nothing recognized");
}
