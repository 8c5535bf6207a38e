use crate::photo::interface::Photo;
use crate::photo::orientation::ImageOrientation;
use image::{DynamicImage, ImageDecoder, ImageReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Decodes a photo file, keeping the EXIF orientation as the photo's tag
/// instead of applying it.
pub fn load_photo(path: &Path) -> Result<Photo, PhotoError> {
    let display = path.display().to_string();
    let io_error = |source| PhotoError::Io {
        path: display.clone(),
        source,
    };
    let decode_error = |source| PhotoError::Decode {
        path: display.clone(),
        source,
    };

    let reader = ImageReader::open(path)
        .map_err(io_error)?
        .with_guessed_format()
        .map_err(io_error)?;
    let mut decoder = reader.into_decoder().map_err(decode_error)?;

    let orientation = decoder
        .orientation()
        .ok()
        .and_then(|o| ImageOrientation::from_exif(o.to_exif()))
        .unwrap_or(ImageOrientation::Up);

    let bitmap = DynamicImage::from_decoder(decoder).map_err(decode_error)?;

    Ok(Photo::new(file_name(path), bitmap, orientation))
}

/// Like [`load_photo`], but an unreadable file becomes a photo without a
/// bitmap so the pipeline reports it as invalid input.
pub fn load_photo_or_missing(path: &Path) -> (Photo, Option<PhotoError>) {
    match load_photo(path) {
        Ok(photo) => (photo, None),
        Err(err) => (Photo::missing(file_name(path)), Some(err)),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
