use crate::image_classifier::models::model_config::{CropMode, Normalization};
use image::{imageops, DynamicImage};
use tract_onnx::prelude::*;

pub fn crop_and_scale(image: &DynamicImage, width: u32, height: u32, mode: CropMode) -> DynamicImage {
    match mode {
        CropMode::CenterCrop => image.resize_to_fill(width, height, imageops::FilterType::Triangle),
        CropMode::ScaleFill => image.resize_exact(width, height, imageops::FilterType::Triangle),
        CropMode::ScaleFit => {
            let scaled = image.resize(width, height, imageops::FilterType::Triangle).to_rgb8();

            let mut padded = DynamicImage::new_rgb8(width, height).to_rgb8();
            let x_offset = (width - scaled.width()) / 2;
            let y_offset = (height - scaled.height()) / 2;
            imageops::overlay(&mut padded, &scaled, x_offset as i64, y_offset as i64);

            DynamicImage::from(padded)
        }
    }
}

/// NCHW tensor with values `(pixel / 255 - mean) / std` per channel.
pub fn image_to_tensor(image: &DynamicImage, normalization: &Normalization) -> Tensor {
    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    tract_ndarray::Array4::from_shape_fn((1, 3, height, width), |(_, c, y, x)| {
        let pixel = rgb.get_pixel(x as u32, y as u32);
        (pixel[c] as f32 / 255.0 - normalization.mean[c]) / normalization.std[c]
    })
    .into_tensor()
}

pub fn resize_image_to_tensor(
    image: &DynamicImage,
    width: u32,
    height: u32,
    mode: CropMode,
    normalization: &Normalization,
) -> Tensor {
    let resized = crop_and_scale(image, width, height, mode);
    image_to_tensor(&resized, normalization)
}
