//! Geometry stages: rotation with optional canvas expansion, and mirroring.

use glam::{Mat2, Vec2};
use image::{DynamicImage, ImageBuffer, Pixel};

/// Angles closer than this to a multiple of 90° take the exact transposition path.
const QUARTER_TURN_TOLERANCE: f32 = 1e-4;

/// Rotate counter-clockwise by `degrees` about the image centre.
///
/// Multiples of 360° return the input. Quarter and half turns are exact pixel
/// transpositions whenever the output canvas can hold them (always for 180°;
/// for ±90° only when expanding or when the image is square). Every other
/// angle is resampled with a Catmull-Rom bicubic filter.
///
/// With `expand_canvas` the output grows to the rotated bounding box; without
/// it the output keeps the input size and corners are cropped. Uncovered area
/// is black for RGB and fully transparent for RGBA.
pub fn rotate(image: &DynamicImage, degrees: f32, expand_canvas: bool) -> DynamicImage {
    let turn = degrees.rem_euclid(360.0);
    let quarters = (turn / 90.0).round();

    if (turn - quarters * 90.0).abs() < QUARTER_TURN_TOLERANCE {
        let square = image.width() == image.height();
        match quarters as u32 % 4 {
            0 => return image.clone(),
            2 => return image.rotate180(),
            // `image` rotates clockwise; a counter-clockwise quarter is its 270.
            1 if expand_canvas || square => return image.rotate270(),
            3 if expand_canvas || square => return image.rotate90(),
            _ => {}
        }
    }

    let radians = turn.to_radians();
    match image {
        DynamicImage::ImageRgba8(buffer) => {
            DynamicImage::ImageRgba8(rotate_bicubic(buffer, radians, expand_canvas))
        }
        DynamicImage::ImageRgb8(buffer) => {
            DynamicImage::ImageRgb8(rotate_bicubic(buffer, radians, expand_canvas))
        }
        other if other.color().has_alpha() => {
            DynamicImage::ImageRgba8(rotate_bicubic(&other.to_rgba8(), radians, expand_canvas))
        }
        other => DynamicImage::ImageRgb8(rotate_bicubic(&other.to_rgb8(), radians, expand_canvas)),
    }
}

/// Size of the axis-aligned box holding a `width × height` rectangle rotated by `radians`.
pub fn rotated_bounds(width: u32, height: u32, radians: f32) -> (u32, u32) {
    let (sin, cos) = radians.sin_cos();
    let (w, h) = (width as f32, height as f32);
    let bound_w = w * cos.abs() + h * sin.abs();
    let bound_h = w * sin.abs() + h * cos.abs();
    // Trim float noise so 90.0000001° does not add a column.
    let snap = |v: f32| ((v - 1e-3).ceil().max(1.0)) as u32;
    (snap(bound_w), snap(bound_h))
}

fn rotate_bicubic<P>(
    src: &ImageBuffer<P, Vec<u8>>,
    radians: f32,
    expand_canvas: bool,
) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = src.dimensions();
    if width == 0 || height == 0 {
        return src.clone();
    }

    let (out_width, out_height) = if expand_canvas {
        rotated_bounds(width, height, radians)
    } else {
        (width, height)
    };

    let src_centre = Vec2::new(width as f32, height as f32) * 0.5;
    let dst_centre = Vec2::new(out_width as f32, out_height as f32) * 0.5;
    // Maps a destination offset back into the source (image y axis points down).
    let inverse = Mat2::from_angle(radians);
    let channels = usize::from(P::CHANNEL_COUNT);

    ImageBuffer::from_fn(out_width, out_height, |x, y| {
        let offset = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - dst_centre;
        let position = inverse * offset + src_centre;
        let mut out = [0u8; 4];
        sample_bicubic(src, position, &mut out[..channels]);
        *P::from_slice(&out[..channels])
    })
}

/// Sample `src` at continuous `position` (pixel corners at integers).
///
/// Positions outside the source leave `out` zeroed. Taps falling off the
/// edge are clamped to the nearest row or column.
fn sample_bicubic<P>(src: &ImageBuffer<P, Vec<u8>>, position: Vec2, out: &mut [u8])
where
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = src.dimensions();
    if position.x < 0.0
        || position.y < 0.0
        || position.x >= width as f32
        || position.y >= height as f32
    {
        return;
    }

    // Shift to pixel-centre coordinates.
    let sx = position.x - 0.5;
    let sy = position.y - 0.5;
    let x0 = sx.floor();
    let y0 = sy.floor();
    let fx = sx - x0;
    let fy = sy - y0;

    let max_x = width as i64 - 1;
    let max_y = height as i64 - 1;
    // Colour is accumulated premultiplied by alpha so transparent taps add no colour.
    let has_alpha = out.len() == 4;
    let mut acc = [0.0_f32; 4];

    for j in -1..=2_i64 {
        let wy = catmull_rom(j as f32 - fy);
        let ty = (y0 as i64 + j).clamp(0, max_y) as u32;
        for i in -1..=2_i64 {
            let wx = catmull_rom(i as f32 - fx);
            let tx = (x0 as i64 + i).clamp(0, max_x) as u32;
            let weight = wx * wy;
            let tap = src.get_pixel(tx, ty).channels();
            let coverage = if has_alpha { f32::from(tap[3]) / 255.0 } else { 1.0 };
            for (c, value) in tap.iter().enumerate() {
                let premultiplied = if c < 3 { f32::from(*value) * coverage } else { f32::from(*value) };
                acc[c] += premultiplied * weight;
            }
        }
    }

    if has_alpha {
        let alpha = acc[3];
        if alpha <= 0.0 {
            return;
        }
        for value in &mut acc[..3] {
            *value *= 255.0 / alpha;
        }
    }

    for (c, slot) in out.iter_mut().enumerate() {
        *slot = super::to_u8(acc[c]);
    }
}

/// Catmull-Rom cubic convolution kernel (`a = -0.5`).
fn catmull_rom(t: f32) -> f32 {
    let t = t.abs();
    if t < 1.0 {
        (1.5 * t - 2.5) * t * t + 1.0
    } else if t < 2.0 {
        ((-0.5 * t + 2.5) * t - 4.0) * t + 2.0
    } else {
        0.0
    }
}

/// Mirror left-to-right.
pub fn flip_horizontal(image: &DynamicImage) -> DynamicImage {
    image.fliph()
}

/// Mirror top-to-bottom.
pub fn flip_vertical(image: &DynamicImage) -> DynamicImage {
    image.flipv()
}
