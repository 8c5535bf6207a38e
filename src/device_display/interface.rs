use image::DynamicImage;
use std::error::Error;

/// Where the classifier screen puts its status label and photo preview.
pub trait DeviceDisplay: Send + Sync {
    /// Replace the status label's text. Lines are separated by `\n`.
    fn show_status(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Show the picked photo, already upright.
    fn show_preview(&mut self, image: &DynamicImage) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn clear_preview(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;
}
