//=========================================================================
// Image
//
// Decoded RGBA8 image handle. Images are immutable once decoded and are
// shared between sprites through `Arc`.
//
//=========================================================================

//=== External Dependencies ===============================================

use ::image::{Rgba, RgbaImage};

//=== Internal Dependencies ===============================================

use crate::core::color::Color;

//=== Image ===============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pixels: RgbaImage,
}

impl Image {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Solid-color image, mostly useful for placeholders and tests.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba(color.rgba())),
        }
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> Color,
    {
        Self {
            pixels: RgbaImage::from_fn(width, height, |x, y| Rgba(f(x, y).rgba())),
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Natural width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Natural height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixels.get_pixel_checked(x, y).map(|px| Color::from(px.0))
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_image_reports_natural_size() {
        let image = Image::filled(12, 5, Color::RED);
        assert_eq!((image.width(), image.height()), (12, 5));
        assert_eq!(image.pixel(11, 4), Some(Color::RED));
        assert_eq!(image.pixel(12, 0), None);
    }

    #[test]
    fn from_fn_places_pixels() {
        let image = Image::from_fn(2, 2, |x, y| if x == y { Color::WHITE } else { Color::BLACK });
        assert_eq!(image.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(image.pixel(1, 0), Some(Color::BLACK));
    }
}
