use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "animal-classifier", version, about = "Classify photos with an on-device model")]
pub struct Cli {
    /// ONNX classification model
    #[arg(long)]
    pub model: Option<String>,

    /// Labels file, one class name per line
    #[arg(long)]
    pub labels: Option<String>,

    /// Model input size as WIDTHxHEIGHT
    #[arg(long)]
    pub input_size: Option<String>,

    #[arg(long, value_enum)]
    pub crop: Option<CropArg>,

    /// Activation applied to the model's raw scores
    #[arg(long, value_enum)]
    pub activation: Option<ActivationArg>,

    /// How many classifications to show
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Offset applied to log timestamps
    #[arg(long, allow_hyphen_values = true)]
    pub utc_offset_hours: Option<i32>,

    /// Use the built-in color classifier instead of loading a model
    #[arg(long)]
    pub fake: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CropArg {
    Center,
    Fit,
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ActivationArg {
    /// Softmax unless the scores already sum to one
    Auto,
    Softmax,
    None,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Open the classifier window (default)
    Gui,
    /// Classify photos one after another and print each status
    Classify {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}
