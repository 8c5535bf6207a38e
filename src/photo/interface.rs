use crate::photo::orientation::ImageOrientation;
use image::DynamicImage;
use std::sync::Arc;

/// A photo as handed over by the picker: the bitmap may be missing and the
/// orientation is the picker's raw value.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub name: String,
    pub bitmap: Option<Arc<DynamicImage>>,
    pub orientation: u32,
}

impl Photo {
    pub fn new(name: impl Into<String>, bitmap: DynamicImage, orientation: ImageOrientation) -> Self {
        Self {
            name: name.into(),
            bitmap: Some(Arc::new(bitmap)),
            orientation: orientation.raw(),
        }
    }

    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bitmap: None,
            orientation: ImageOrientation::Up.raw(),
        }
    }
}

/// Upright pixels in the format the classifiers consume. Shared with the
/// preview so the photo is only rotated once.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedImage {
    pub pixels: Arc<DynamicImage>,
    pub source_orientation: ImageOrientation,
}
