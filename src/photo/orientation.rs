use image::DynamicImage;

/// Rotation/mirroring needed to show a bitmap upright.
///
/// Raw values follow the picker's native ordering (0 through 7). EXIF
/// orientation tags (1 through 8) map onto the same eight cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrientation {
    Up,
    Down,
    Left,
    Right,
    UpMirrored,
    DownMirrored,
    LeftMirrored,
    RightMirrored,
}

impl ImageOrientation {
    pub const ALL: [ImageOrientation; 8] = [
        ImageOrientation::Up,
        ImageOrientation::Down,
        ImageOrientation::Left,
        ImageOrientation::Right,
        ImageOrientation::UpMirrored,
        ImageOrientation::DownMirrored,
        ImageOrientation::LeftMirrored,
        ImageOrientation::RightMirrored,
    ];

    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    pub fn raw(self) -> u32 {
        match self {
            ImageOrientation::Up => 0,
            ImageOrientation::Down => 1,
            ImageOrientation::Left => 2,
            ImageOrientation::Right => 3,
            ImageOrientation::UpMirrored => 4,
            ImageOrientation::DownMirrored => 5,
            ImageOrientation::LeftMirrored => 6,
            ImageOrientation::RightMirrored => 7,
        }
    }

    pub fn from_exif(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(ImageOrientation::Up),
            2 => Some(ImageOrientation::UpMirrored),
            3 => Some(ImageOrientation::Down),
            4 => Some(ImageOrientation::DownMirrored),
            5 => Some(ImageOrientation::LeftMirrored),
            6 => Some(ImageOrientation::Right),
            7 => Some(ImageOrientation::RightMirrored),
            8 => Some(ImageOrientation::Left),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn exif(self) -> u8 {
        match self {
            ImageOrientation::Up => 1,
            ImageOrientation::UpMirrored => 2,
            ImageOrientation::Down => 3,
            ImageOrientation::DownMirrored => 4,
            ImageOrientation::LeftMirrored => 5,
            ImageOrientation::Right => 6,
            ImageOrientation::RightMirrored => 7,
            ImageOrientation::Left => 8,
        }
    }

    /// Returns the bitmap transformed so it displays upright.
    pub fn apply(self, image: &DynamicImage) -> DynamicImage {
        match self {
            ImageOrientation::Up => image.clone(),
            ImageOrientation::Down => image.rotate180(),
            ImageOrientation::Left => image.rotate270(),
            ImageOrientation::Right => image.rotate90(),
            ImageOrientation::UpMirrored => image.fliph(),
            ImageOrientation::DownMirrored => image.flipv(),
            ImageOrientation::LeftMirrored => image.rotate90().fliph(),
            ImageOrientation::RightMirrored => image.rotate270().fliph(),
        }
    }
}
