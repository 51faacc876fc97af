/// Radial vignette
///
/// A black mask is drawn over the image, transparent at the center and
/// reaching `edge_alpha` at `width / radius_divisor`. Past the radius the
/// mask stays at `edge_alpha`, so corners are darkened but never black
/// with the default settings.

use image::{Rgba, RgbaImage};

use crate::color::clamp_channel;
use crate::state::settings::{Falloff, VignetteParams};

/// Opacity of the darkening mask at a given distance from the center
pub fn mask_alpha(distance: f32, radius: f32, params: &VignetteParams) -> f32 {
    let edge = params.edge_alpha.clamp(0.0, 1.0);
    if radius <= 0.0 {
        return edge;
    }

    let t = (distance / radius).clamp(0.0, 1.0);
    let eased = match params.falloff {
        Falloff::Linear => t,
        Falloff::Smoothstep => t * t * (3.0 - 2.0 * t),
    };

    eased * edge
}

/// Composite black at opacity `mask` over a pixel (source-over)
fn darken(pixel: Rgba<u8>, mask: f32) -> Rgba<u8> {
    let [r, g, b, a] = pixel.0;
    let src_alpha = a as f32 / 255.0;
    let out_alpha = mask + src_alpha * (1.0 - mask);

    if out_alpha <= 0.0 {
        return pixel;
    }

    let keep = src_alpha * (1.0 - mask) / out_alpha;
    Rgba([
        clamp_channel(r as f32 * keep),
        clamp_channel(g as f32 * keep),
        clamp_channel(b as f32 * keep),
        clamp_channel(out_alpha * 255.0),
    ])
}

/// Apply the vignette, returning a new image of the same size
pub fn apply(image: &RgbaImage, params: &VignetteParams) -> RgbaImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let radius = params.radius_for(width);
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let mut output = image.clone();
    for (x, y, pixel) in output.enumerate_pixels_mut() {
        // Measure from the pixel center
        let dx = x as f32 + 0.5 - center_x;
        let dy = y as f32 + 0.5 - center_y;
        let distance = (dx * dx + dy * dy).sqrt();

        *pixel = darken(*pixel, mask_alpha(distance, radius, params));
    }
    output
}
