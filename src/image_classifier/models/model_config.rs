#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropMode {
    /// Scale to cover the input, then crop the center.
    CenterCrop,
    /// Scale to fit inside the input and pad with black.
    ScaleFit,
    /// Stretch to the input size.
    ScaleFill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputActivation {
    /// Softmax unless the scores already form a probability distribution.
    Auto,
    Softmax,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub mean: [f32; 3],
    pub std: [f32; 3],
}

impl Normalization {
    pub const IMAGENET: Normalization = Normalization {
        mean: [0.485, 0.456, 0.406],
        std: [0.229, 0.224, 0.225],
    };

    #[cfg(test)]
    pub const UNIT: Normalization = Normalization {
        mean: [0.0, 0.0, 0.0],
        std: [1.0, 1.0, 1.0],
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: String,
    pub labels_path: Option<String>,
    /// (height, width)
    pub input_shape: (u32, u32),
    pub crop_mode: CropMode,
    pub normalization: Normalization,
    pub activation: OutputActivation,
    pub max_results: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            onnx_model_path: "./models/mobilenetv2-7.onnx".to_string(),
            labels_path: Some("./models/imagenet_labels.txt".to_string()),
            input_shape: (224, 224),
            crop_mode: CropMode::CenterCrop,
            normalization: Normalization::IMAGENET,
            activation: OutputActivation::Auto,
            max_results: 10,
        }
    }
}
