use crate::cli::{ActivationArg, Cli, CropArg};
use crate::image_classifier::models::model_config::{CropMode, ModelConfig, OutputActivation};
use chrono::{FixedOffset, Offset, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid input size {0:?}, expected WIDTHxHEIGHT")]
    InvalidInputSize(String),
    #[error("invalid UTC offset of {0} hours")]
    InvalidUtcOffset(i32),
    #[error("top-k must be at least 1")]
    InvalidTopK,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub logger_timezone: FixedOffset,
    pub model: ModelConfig,
    pub use_fake_classifier: bool,
    pub top_k: usize,
    pub window_size: [f32; 2],
    pub corner_radius: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_timezone: Utc.fix(),
            model: ModelConfig::default(),
            use_fake_classifier: false,
            top_k: 2,
            window_size: [480.0, 640.0],
            corner_radius: 10.0,
        }
    }
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(model) = &cli.model {
            config.model.onnx_model_path = model.clone();
        }
        if let Some(labels) = &cli.labels {
            config.model.labels_path = Some(labels.clone());
        }
        if let Some(size) = &cli.input_size {
            let (width, height) = parse_input_size(size)?;
            config.model.input_shape = (height, width);
        }
        if let Some(crop) = cli.crop {
            config.model.crop_mode = match crop {
                CropArg::Center => CropMode::CenterCrop,
                CropArg::Fit => CropMode::ScaleFit,
                CropArg::Fill => CropMode::ScaleFill,
            };
        }
        if let Some(activation) = cli.activation {
            config.model.activation = match activation {
                ActivationArg::Auto => OutputActivation::Auto,
                ActivationArg::Softmax => OutputActivation::Softmax,
                ActivationArg::None => OutputActivation::None,
            };
        }
        if let Some(top_k) = cli.top_k {
            if top_k == 0 {
                return Err(ConfigError::InvalidTopK);
            }
            config.top_k = top_k;
        }
        if let Some(hours) = cli.utc_offset_hours {
            config.logger_timezone = hours
                .checked_mul(3600)
                .and_then(FixedOffset::east_opt)
                .ok_or(ConfigError::InvalidUtcOffset(hours))?;
        }
        config.use_fake_classifier = cli.fake;

        Ok(config)
    }
}

/// Parses `WIDTHxHEIGHT`, e.g. `224x224`.
fn parse_input_size(value: &str) -> Result<(u32, u32), ConfigError> {
    let invalid = || ConfigError::InvalidInputSize(value.to_string());

    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(invalid)?;
    let width: u32 = width.trim().parse().map_err(|_| invalid())?;
    let height: u32 = height.trim().parse().map_err(|_| invalid())?;

    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}
