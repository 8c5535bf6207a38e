use crate::image_classifier::interface::{ClassificationResult, ClassifierError, ImageClassifier};
use crate::image_classifier::labels::Labels;
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::ranking::{activate, rank};
use crate::image_classifier::tract::image::resize_image_to_tensor;
use crate::photo::interface::OrientedImage;
use std::path::Path;
use tract_onnx::prelude::*;

pub struct ImageClassifierTractOnnx {
    model: TypedRunnableModel<TypedModel>,
    labels: Labels,
    config: ModelConfig,
}

impl ImageClassifierTractOnnx {
    pub fn new(config: ModelConfig) -> Result<Self, ClassifierError> {
        let (height, width) = config.input_shape;
        let model_load_error = |e: TractError| ClassifierError::ModelLoad {
            path: config.onnx_model_path.clone(),
            reason: e.to_string(),
        };

        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)
            .and_then(|model| {
                model.with_input_fact(0, f32::fact([1, 3, height as usize, width as usize]).into())
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(model_load_error)?;

        let labels = match &config.labels_path {
            Some(path) => Labels::load(Path::new(path))?,
            None => Labels::default(),
        };

        Ok(Self {
            model,
            labels,
            config,
        })
    }

    fn scores(&self, outputs: TVec<TValue>) -> Result<Vec<f32>, ClassifierError> {
        let output = outputs
            .first()
            .ok_or_else(|| ClassifierError::UnexpectedOutput("model produced no outputs".into()))?;

        let view = output
            .to_array_view::<f32>()
            .map_err(|e| ClassifierError::UnexpectedOutput(e.to_string()))?;

        score_vector(view)
    }
}

/// Flattens a model output into one score per class. Accepts `[N]`,
/// `[1, N]`, `[1, N, 1, 1]` and other shapes with a single non-unit axis.
pub fn score_vector(view: tract_ndarray::ArrayViewD<f32>) -> Result<Vec<f32>, ClassifierError> {
    let non_unit_axes = view.shape().iter().filter(|&&dim| dim != 1).count();
    if non_unit_axes > 1 {
        return Err(ClassifierError::UnexpectedOutput(format!(
            "expected a score vector, got shape {:?}",
            view.shape()
        )));
    }

    Ok(view.iter().copied().collect())
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(&self, image: &OrientedImage) -> Result<ClassificationResult, ClassifierError> {
        let (height, width) = self.config.input_shape;

        let input = resize_image_to_tensor(
            &image.pixels,
            width,
            height,
            self.config.crop_mode,
            &self.config.normalization,
        );

        let outputs = self
            .model
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let scores = self.scores(outputs)?;
        let confidences = activate(&scores, self.config.activation);

        Ok(rank(&confidences, &self.labels, self.config.max_results))
    }
}
