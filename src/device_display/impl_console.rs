use crate::device_display::interface::DeviceDisplay;
use image::DynamicImage;
use std::error::Error;

/// Prints each status inside a box with the panel's two rounded corners.
pub struct DeviceDisplayConsole {
    width: usize,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self { width: 40 }
    }

    fn framed(&self, text: &str) -> String {
        let inner = text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
            .max(self.width);

        let mut out = format!("╭{}┐\n", "─".repeat(inner + 2));
        for line in text.lines() {
            let padding = inner - line.chars().count();
            out.push_str(&format!("│ {}{} │\n", line, " ".repeat(padding)));
        }
        out.push_str(&format!("└{}╯", "─".repeat(inner + 2)));
        out
    }
}

impl Default for DeviceDisplayConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn show_status(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("{}", self.framed(text));
        Ok(())
    }

    fn show_preview(&mut self, image: &DynamicImage) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("[photo {}x{}]", image.width(), image.height());
        Ok(())
    }

    fn clear_preview(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}
