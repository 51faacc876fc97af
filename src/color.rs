/// Color matrix utilities
///
/// A color matrix maps the RGB channels of a pixel through a fixed affine
/// transform: `out = M * rgb + offset`. This is the RGB part of the classic
/// 4x5 color matrix; alpha always passes through untouched.
///
/// Coefficients work on the 0-255 channel scale, so offsets are in channel
/// units too (the negative filter uses an offset of 255).

use cgmath::{Matrix3, Vector3};
use image::{Rgba, RgbaImage};

/// Sepia tone coefficients (row-major, one row per output channel)
const SEPIA_ROWS: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Saturation-zero coefficients (perceptual luminance weights)
const LUMINANCE_ROWS: [[f32; 3]; 3] = [
    [0.213, 0.715, 0.072],
    [0.213, 0.715, 0.072],
    [0.213, 0.715, 0.072],
];

const NEGATIVE_ROWS: [[f32; 3]; 3] = [
    [-1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, -1.0],
];

const IDENTITY_ROWS: [[f32; 3]; 3] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Round a channel value and clamp it into [0, 255]
pub fn clamp_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// An affine RGB color transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix {
    linear: Matrix3<f32>,
    offset: Vector3<f32>,
}

impl ColorMatrix {
    /// Build a color matrix from row-major coefficients and an offset
    pub fn new(rows: [[f32; 3]; 3], offset: [f32; 3]) -> Self {
        // cgmath is column-major
        let linear = Matrix3::new(
            rows[0][0], rows[1][0], rows[2][0], // Column 0
            rows[0][1], rows[1][1], rows[2][1], // Column 1
            rows[0][2], rows[1][2], rows[2][2], // Column 2
        );

        Self {
            linear,
            offset: Vector3::new(offset[0], offset[1], offset[2]),
        }
    }

    pub fn identity() -> Self {
        Self::new(IDENTITY_ROWS, [0.0; 3])
    }

    pub fn sepia() -> Self {
        Self::new(SEPIA_ROWS, [0.0; 3])
    }

    /// Inverts every channel: `255 - c`
    pub fn negative() -> Self {
        Self::new(NEGATIVE_ROWS, [255.0; 3])
    }

    /// Desaturates to perceptual luminance (saturation 0)
    pub fn greyscale_luminance() -> Self {
        Self::new(LUMINANCE_ROWS, [0.0; 3])
    }

    /// Check if this matrix leaves every pixel unchanged
    ///
    /// Exact comparison: a near-identity matrix can still move a channel
    /// by one after rounding.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Transform a single pixel, keeping its alpha
    pub fn apply(&self, pixel: Rgba<u8>) -> Rgba<u8> {
        let [r, g, b, a] = pixel.0;
        let rgb = Vector3::new(r as f32, g as f32, b as f32);
        let out = self.linear * rgb + self.offset;

        Rgba([
            clamp_channel(out.x),
            clamp_channel(out.y),
            clamp_channel(out.z),
            a,
        ])
    }

    /// Transform every pixel of an image into a new image of the same size
    pub fn apply_image(&self, image: &RgbaImage) -> RgbaImage {
        if self.is_identity() {
            return image.clone();
        }

        let mut output = image.clone();
        for pixel in output.pixels_mut() {
            *pixel = self.apply(*pixel);
        }
        output
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: u8, expected: u8) -> bool {
        (actual as i16 - expected as i16).abs() <= 1
    }

    #[test]
    fn test_identity_matrix_detection() {
        assert!(ColorMatrix::identity().is_identity());
        assert!(ColorMatrix::default().is_identity());
        assert!(!ColorMatrix::sepia().is_identity());
        assert!(!ColorMatrix::negative().is_identity());

        // Same linear part, non-zero offset
        assert!(!ColorMatrix::new(IDENTITY_ROWS, [10.0, 0.0, 0.0]).is_identity());
    }

    #[test]
    fn test_near_identity_image_matches_per_pixel() {
        let matrix = ColorMatrix::new(
            [
                [0.99901, -0.00099, -0.00099],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0],
            ],
            [0.0; 3],
        );
        assert!(!matrix.is_identity());

        let white = Rgba([255, 255, 255, 255]);
        let image = RgbaImage::from_pixel(2, 2, white);
        let out = matrix.apply_image(&image);

        assert_eq!(*out.get_pixel(1, 1), matrix.apply(white));
        assert_eq!(out.get_pixel(1, 1)[0], 254);
    }

    #[test]
    fn test_sepia_reference_pixel() {
        let out = ColorMatrix::sepia().apply(Rgba([200, 150, 100, 255]));

        // 212.85, 189.5, 147.6
        assert!(close(out[0], 213), "red was {}", out[0]);
        assert!(close(out[1], 190), "green was {}", out[1]);
        assert!(close(out[2], 148), "blue was {}", out[2]);
        assert_eq!(out[3], 255);
    }

    #[test]
    fn test_sepia_clamps_white() {
        // Row sums exceed 1.0 for red and green
        let out = ColorMatrix::sepia().apply(Rgba([255, 255, 255, 255]));
        assert_eq!(out[0], 255);
        assert_eq!(out[1], 255);
        assert_eq!(out[2], clamp_channel(0.937 * 255.0));
    }

    #[test]
    fn test_negative_inverts_and_keeps_alpha() {
        let out = ColorMatrix::negative().apply(Rgba([0, 128, 255, 42]));
        assert_eq!(out, Rgba([255, 127, 0, 42]));
    }

    #[test]
    fn test_luminance_weights() {
        let out = ColorMatrix::greyscale_luminance().apply(Rgba([0, 255, 0, 255]));
        let expected = clamp_channel(0.715 * 255.0);
        assert_eq!(out, Rgba([expected, expected, expected, 255]));
    }

    #[test]
    fn test_clamp_channel() {
        assert_eq!(clamp_channel(-12.0), 0);
        assert_eq!(clamp_channel(300.0), 255);
        assert_eq!(clamp_channel(127.4), 127);
        assert_eq!(clamp_channel(127.6), 128);
    }

    #[test]
    fn test_apply_image_keeps_dimensions() {
        let image = RgbaImage::from_pixel(7, 3, Rgba([10, 20, 30, 255]));
        let out = ColorMatrix::negative().apply_image(&image);

        assert_eq!(out.dimensions(), (7, 3));
        assert_eq!(*out.get_pixel(6, 2), Rgba([245, 235, 225, 255]));
    }
}
