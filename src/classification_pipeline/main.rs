use crate::classification_pipeline::error::{InvalidImageReason, PipelineError};
use crate::classification_pipeline::spawner::{Spawner, ThreadSpawner};
use crate::classification_pipeline::task::{ClassificationTask, PipelineResult};
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use crate::photo::interface::{OrientedImage, Photo};
use crate::photo::orientation::ImageOrientation;
use image::DynamicImage;
use std::sync::Arc;
use std::time::Instant;

/// Asks the UI-owning context to run its next update.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

const WORKER_THREAD_NAME: &str = "classifier";

#[derive(Clone)]
pub struct ClassificationPipeline {
    classifier: Arc<dyn ImageClassifier + Send + Sync>,
    spawner: Arc<dyn Spawner + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ClassificationPipeline {
    pub fn new(
        classifier: Arc<dyn ImageClassifier + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            classifier,
            spawner: Arc::new(ThreadSpawner),
            logger: logger.with_namespace("pipeline"),
        }
    }

    #[cfg(test)]
    pub fn with_spawner(self, spawner: Arc<dyn Spawner + Send + Sync>) -> Self {
        Self { spawner, ..self }
    }

    /// Checks the picker's photo without touching its pixels.
    pub fn validate(photo: &Photo) -> Result<(Arc<DynamicImage>, ImageOrientation), PipelineError> {
        let bitmap = photo
            .bitmap
            .as_ref()
            .ok_or(InvalidImageReason::MissingBitmap)?;

        if bitmap.width() == 0 || bitmap.height() == 0 {
            return Err(InvalidImageReason::EmptyBitmap {
                width: bitmap.width(),
                height: bitmap.height(),
            }
            .into());
        }

        let orientation = ImageOrientation::from_raw(photo.orientation)
            .ok_or(InvalidImageReason::UnsupportedOrientation(photo.orientation))?;

        Ok((bitmap.clone(), orientation))
    }

    /// Rotates or mirrors the bitmap upright. An `Up` bitmap is shared as is.
    pub fn orient(bitmap: Arc<DynamicImage>, orientation: ImageOrientation) -> OrientedImage {
        let pixels = match orientation {
            ImageOrientation::Up => bitmap,
            _ => Arc::new(orientation.apply(&bitmap)),
        };

        OrientedImage {
            pixels,
            source_orientation: orientation,
        }
    }

    /// Converts the picker's photo into upright pixels the classifier accepts.
    #[cfg(test)]
    pub fn prepare(photo: &Photo) -> Result<OrientedImage, PipelineError> {
        let (bitmap, orientation) = Self::validate(photo)?;
        Ok(Self::orient(bitmap, orientation))
    }

    #[cfg(test)]
    pub fn classify_blocking(&self, photo: &Photo) -> PipelineResult {
        let image = Self::prepare(photo)?;
        run_classifier(self.classifier.as_ref(), self.logger.as_ref(), &photo.name, &image)
    }

    /// Starts classifying on a background thread. Only the cheap checks run
    /// on the caller; orientation is applied on the worker, which hands the
    /// upright bitmap back as the preview. Failures to validate the photo or
    /// to start the thread come back as an already-completed task, and the
    /// waker still runs so the owner picks them up.
    pub fn spawn(&self, photo: Photo, waker: Waker) -> ClassificationTask {
        let (bitmap, orientation) = match Self::validate(&photo) {
            Ok(valid) => valid,
            Err(err) => {
                let _ = self
                    .logger
                    .error(&format!("Rejected {}: {}", photo.name, err));
                let task = ClassificationTask::completed(photo.name, Err(err));
                waker();
                return task;
            }
        };

        let (task, completer) = ClassificationTask::pending(photo.name.clone());
        let classifier = self.classifier.clone();
        let logger = self.logger.clone();
        let name = photo.name.clone();
        let job_waker = waker.clone();

        let job = Box::new(move || {
            let image = Self::orient(bitmap, orientation);
            completer.preview(image.pixels.clone());
            job_waker();

            let result = run_classifier(classifier.as_ref(), logger.as_ref(), &name, &image);
            completer.complete(result);
            job_waker();
        });

        match self.spawner.spawn(WORKER_THREAD_NAME, job) {
            Ok(()) => task,
            Err(err) => {
                let _ = self.logger.error(&format!(
                    "Failed to perform classification of {}: {}",
                    photo.name, err
                ));
                let task = ClassificationTask::completed(
                    photo.name,
                    Err(PipelineError::StartFailure(err.to_string())),
                );
                waker();
                task
            }
        }
    }
}

fn run_classifier(
    classifier: &dyn ImageClassifier,
    logger: &dyn Logger,
    name: &str,
    image: &OrientedImage,
) -> PipelineResult {
    let _ = logger.info(&format!(
        "Classifying {} (orientation {:?})",
        name, image.source_orientation
    ));
    let started = Instant::now();

    match classifier.classify(image) {
        Ok(result) => {
            let _ = logger.info(&format!(
                "Classified {} in {} ms: {} results",
                name,
                started.elapsed().as_millis(),
                result.len()
            ));
            Ok(result)
        }
        Err(err) => {
            let _ = logger.error(&format!("Classifier failed on {}: {}", name, err));
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification_pipeline::spawner::{FailingSpawner, ManualSpawner};
    use crate::image_classifier::impl_fake::ImageClassifierFake;
    use crate::image_classifier::interface::{ClassificationResult, ClassifierError};
    use crate::library::logger::impl_fake::LoggerFake;
    use image::{ImageBuffer, Rgb};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn solid_photo(name: &str, color: [u8; 3]) -> Photo {
        let bitmap = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(8, 4, Rgb(color)));
        Photo::new(name, bitmap, ImageOrientation::Up)
    }

    fn pipeline(classifier: ImageClassifierFake, logger: &LoggerFake) -> ClassificationPipeline {
        ClassificationPipeline::new(Arc::new(classifier), Arc::new(logger.clone()))
    }

    fn no_op_waker() -> Waker {
        Arc::new(|| {})
    }

    fn counting_waker() -> (Waker, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        (
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
            count,
        )
    }

    #[test]
    fn test_prepare_applies_orientation() {
        let mut photo = solid_photo("wide.png", [255, 0, 0]);
        photo.orientation = ImageOrientation::Right.raw();

        let image = ClassificationPipeline::prepare(&photo).unwrap();

        assert_eq!((image.pixels.width(), image.pixels.height()), (4, 8));
        assert_eq!(image.source_orientation, ImageOrientation::Right);
    }

    #[test]
    fn test_missing_bitmap_is_invalid_image() {
        let logger = LoggerFake::new();
        let pipeline = pipeline(ImageClassifierFake::new(Arc::new(logger.clone())), &logger);

        assert_eq!(
            pipeline.classify_blocking(&Photo::missing("gone.jpg")),
            Err(PipelineError::InvalidImage(InvalidImageReason::MissingBitmap))
        );
    }

    #[test]
    fn test_unsupported_orientation_is_invalid_image() {
        let logger = LoggerFake::new();
        let pipeline = pipeline(ImageClassifierFake::new(Arc::new(logger.clone())), &logger);
        let mut photo = solid_photo("odd.png", [0, 255, 0]);
        photo.orientation = 8;

        let result = pipeline.spawn(photo, no_op_waker()).wait();

        assert_eq!(
            result,
            Err(PipelineError::InvalidImage(
                InvalidImageReason::UnsupportedOrientation(8)
            ))
        );
    }

    #[test]
    fn test_zero_sized_bitmap_is_invalid_image() {
        let photo = Photo::new("empty.png", DynamicImage::new_rgb8(0, 0), ImageOrientation::Up);

        assert!(matches!(
            ClassificationPipeline::prepare(&photo),
            Err(PipelineError::InvalidImage(InvalidImageReason::EmptyBitmap { .. }))
        ));
    }

    #[test]
    fn test_classifier_failure_is_reported() {
        let logger = LoggerFake::new();
        let classifier = ImageClassifierFake::new(Arc::new(logger.clone()))
            .with_scripted(vec![Err(ClassifierError::Inference("engine offline".into()))]);
        let pipeline = pipeline(classifier, &logger);

        let result = pipeline
            .spawn(solid_photo("cat.png", [1, 1, 1]), no_op_waker())
            .wait();

        assert_eq!(
            result,
            Err(PipelineError::ClassifierFailure(
                "inference failed: engine offline".into()
            ))
        );
        assert!(logger
            .lines()
            .iter()
            .any(|line| line.starts_with("ERROR pipeline: Classifier failed on cat.png")));
    }

    #[test]
    fn test_empty_result_is_success() {
        let logger = LoggerFake::new();
        let pipeline = pipeline(ImageClassifierFake::new(Arc::new(logger.clone())), &logger);

        let result = pipeline.classify_blocking(&solid_photo("night.png", [0, 0, 0]));

        assert_eq!(result, Ok(ClassificationResult::empty()));
    }

    #[test]
    fn test_sequential_calls_do_not_share_state() {
        let logger = LoggerFake::new();
        let pipeline = pipeline(ImageClassifierFake::new(Arc::new(logger.clone())), &logger);

        let red = pipeline
            .spawn(solid_photo("red.png", [200, 10, 10]), no_op_waker())
            .wait()
            .unwrap();
        let blue = pipeline
            .spawn(solid_photo("blue.png", [10, 10, 200]), no_op_waker())
            .wait()
            .unwrap();

        assert_eq!(red.top(1)[0].label, "red");
        assert_eq!(blue.top(1)[0].label, "blue");
    }

    #[test]
    fn test_waker_runs_after_completion() {
        let logger = LoggerFake::new();
        let pipeline = pipeline(ImageClassifierFake::new(Arc::new(logger.clone())), &logger);
        let (woken_sender, woken_receiver) = std::sync::mpsc::channel();
        let waker: Waker = Arc::new(move || {
            let _ = woken_sender.send(());
        });

        let task = pipeline.spawn(solid_photo("red.png", [255, 0, 0]), waker);

        woken_receiver.recv().unwrap();
        assert!(task.try_take().unwrap().is_ok());
    }

    #[test]
    fn test_start_failure_is_reported_and_logged() {
        let logger = LoggerFake::new();
        let pipeline = pipeline(ImageClassifierFake::new(Arc::new(logger.clone())), &logger)
            .with_spawner(Arc::new(FailingSpawner));

        let result = pipeline
            .spawn(solid_photo("cat.png", [1, 2, 3]), no_op_waker())
            .wait();

        assert_eq!(
            result,
            Err(PipelineError::StartFailure("thread limit reached".into()))
        );
        assert!(logger.lines().iter().any(|line| line
            .starts_with("ERROR pipeline: Failed to perform classification of cat.png")));
    }

    #[test]
    fn test_waker_runs_for_tasks_completed_before_starting() {
        let logger = LoggerFake::new();
        let (waker, woken) = counting_waker();

        let rejected = pipeline(ImageClassifierFake::new(Arc::new(logger.clone())), &logger)
            .spawn(Photo::missing("gone.jpg"), waker.clone());
        assert_eq!(woken.load(Ordering::SeqCst), 1);
        assert!(rejected.try_take().unwrap().is_err());

        let not_started = pipeline(ImageClassifierFake::new(Arc::new(logger.clone())), &logger)
            .with_spawner(Arc::new(FailingSpawner))
            .spawn(solid_photo("cat.png", [1, 2, 3]), waker);
        assert_eq!(woken.load(Ordering::SeqCst), 2);
        assert!(matches!(
            not_started.try_take(),
            Some(Err(PipelineError::StartFailure(_)))
        ));
    }

    #[test]
    fn test_orientation_is_applied_on_the_worker() {
        let logger = LoggerFake::new();
        let spawner = Arc::new(ManualSpawner::default());
        let pipeline = pipeline(ImageClassifierFake::new(Arc::new(logger.clone())), &logger)
            .with_spawner(spawner.clone());
        let (waker, woken) = counting_waker();
        let mut photo = solid_photo("wide.png", [255, 0, 0]);
        photo.orientation = ImageOrientation::Right.raw();

        let task = pipeline.spawn(photo, waker);
        assert!(task.try_take_preview().is_none());
        assert!(task.try_take().is_none());
        assert_eq!(woken.load(Ordering::SeqCst), 0);

        assert_eq!(spawner.run_all(), 1);

        let preview = task.try_take_preview().unwrap();
        assert_eq!((preview.width(), preview.height()), (4, 8));
        assert_eq!(task.try_take().unwrap().unwrap().top(1)[0].label, "red");
        assert_eq!(woken.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalid_photo_is_rejected_before_spawning() {
        let logger = LoggerFake::new();
        let spawner = Arc::new(ManualSpawner::default());
        let pipeline = pipeline(ImageClassifierFake::new(Arc::new(logger.clone())), &logger)
            .with_spawner(spawner.clone());
        let mut photo = solid_photo("odd.png", [0, 255, 0]);
        photo.orientation = 9;

        let task = pipeline.spawn(photo, no_op_waker());

        assert_eq!(spawner.run_all(), 0);
        assert_eq!(
            task.try_take(),
            Some(Err(PipelineError::InvalidImage(
                InvalidImageReason::UnsupportedOrientation(9)
            )))
        );
        assert!(task.try_take_preview().is_none());
    }

    #[test]
    fn test_upright_bitmap_is_shared_without_copying() {
        let photo = solid_photo("up.png", [1, 2, 3]);

        let image = ClassificationPipeline::prepare(&photo).unwrap();

        assert!(Arc::ptr_eq(&image.pixels, photo.bitmap.as_ref().unwrap()));
    }
}
