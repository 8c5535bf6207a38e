use crate::device_display::interface::DeviceDisplay;
use image::DynamicImage;
use std::error::Error;

#[derive(Debug, Default)]
pub struct DeviceDisplayFake {
    pub statuses: Vec<String>,
    /// Dimensions of each preview shown, `None` for a cleared preview.
    pub previews: Vec<Option<(u32, u32)>>,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_status(&self) -> Option<&str> {
        self.statuses.last().map(String::as_str)
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn show_status(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.statuses.push(text.to_string());
        Ok(())
    }

    fn show_preview(&mut self, image: &DynamicImage) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.previews.push(Some((image.width(), image.height())));
        Ok(())
    }

    fn clear_preview(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.previews.push(None);
        Ok(())
    }
}
