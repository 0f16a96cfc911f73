use common_types::ImageFormat;
use image::RgbaImage;

/// A decoded frame as tightly packed RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl RawFrame {
    #[must_use]
    pub const fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            pixels,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[must_use]
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

impl From<RgbaImage> for RawFrame {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw())
    }
}

/// Encoder output, tagged with the codec that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Vec<u8>,
    format: ImageFormat,
}

impl EncodedImage {
    #[must_use]
    pub const fn new(bytes: Vec<u8>, format: ImageFormat) -> Self {
        Self { bytes, format }
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub const fn format(&self) -> ImageFormat {
        self.format
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
