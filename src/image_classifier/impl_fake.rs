use crate::image_classifier::interface::{
    Classification, ClassificationResult, ClassifierError, ImageClassifier,
};
use crate::library::logger::interface::Logger;
use crate::photo::interface::OrientedImage;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Ranks `red`, `green` and `blue` by their share of the image's total
/// intensity, so different photos get different answers. Scripted responses
/// take precedence, in order, until they run out.
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    delay: Duration,
    scripted: Mutex<VecDeque<Result<ClassificationResult, ClassifierError>>>,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            delay: Duration::ZERO,
            scripted: Mutex::new(VecDeque::new()),
        }
    }

    #[cfg(test)]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[cfg(test)]
    pub fn with_scripted(
        self,
        responses: Vec<Result<ClassificationResult, ClassifierError>>,
    ) -> Self {
        Self {
            scripted: Mutex::new(responses.into()),
            ..self
        }
    }

    fn by_color(image: &OrientedImage) -> ClassificationResult {
        let rgb = image.pixels.to_rgb8();
        let mut totals = [0u64; 3];
        for pixel in rgb.pixels() {
            for (total, &channel) in totals.iter_mut().zip(pixel.0.iter()) {
                *total += channel as u64;
            }
        }

        let sum: u64 = totals.iter().sum();
        if sum == 0 {
            return ClassificationResult::empty();
        }

        let mut ranked: Vec<Classification> = ["red", "green", "blue"]
            .iter()
            .zip(totals)
            .filter(|(_, total)| *total > 0)
            .map(|(label, total)| Classification::new(*label, total as f32 / sum as f32))
            .collect();
        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        ClassificationResult::new(ranked)
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, image: &OrientedImage) -> Result<ClassificationResult, ClassifierError> {
        let _ = self.logger.info(&format!(
            "Classifying {}x{} image with fake classifier...",
            image.pixels.width(),
            image.pixels.height()
        ));

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        let scripted = self
            .scripted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();

        match scripted {
            Some(response) => response,
            None => Ok(Self::by_color(image)),
        }
    }
}
