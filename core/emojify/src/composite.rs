use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{EmojifyError, Result};
use crate::placement::Placement;
use crate::sprite::Sprite;

/// How sprite pixels are sampled when scaled or rotated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sampling {
    /// Nearest sprite texel. Hard edges, exact colors.
    Nearest,
    /// Bilinear interpolation with transparent texels beyond the sprite edge.
    #[default]
    Bilinear,
}

/// Straight-alpha color with channels in 0..=255 and alpha in 0..=1.
type Sample = [f32; 4];

const TRANSPARENT: Sample = [0.0, 0.0, 0.0, 0.0];

/// Copy `photo` into a freshly allocated buffer.
///
/// Allocation failure is reported instead of aborting so the caller never
/// sees a partially written image.
pub(crate) fn allocate_canvas(photo: &RgbaImage) -> Result<RgbaImage> {
    let (width, height) = photo.dimensions();
    let raw = photo.as_raw();

    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(raw.len())
        .map_err(|_| EmojifyError::BufferAllocation { width, height })?;
    buffer.extend_from_slice(raw);

    RgbaImage::from_raw(width, height, buffer)
        .ok_or(EmojifyError::BufferAllocation { width, height })
}

/// Draw `sprite` onto `canvas` at `placement`.
///
/// Every canvas pixel inside the transformed sprite's footprint is mapped
/// back into sprite space and blended with straight alpha. Samples that fall
/// outside the sprite are transparent and leave the canvas untouched.
pub(crate) fn draw_sprite(
    canvas: &mut RgbaImage,
    sprite: &Sprite,
    placement: &Placement,
    sampling: Sampling,
) {
    let (canvas_w, canvas_h) = canvas.dimensions();
    let (min_x, min_y, max_x, max_y) = placement.footprint(sprite);

    let x_start = min_x.floor().max(0.0) as u32;
    let y_start = min_y.floor().max(0.0) as u32;
    let x_end = (max_x.ceil().max(0.0) as u32).min(canvas_w);
    let y_end = (max_y.ceil().max(0.0) as u32).min(canvas_h);

    for y in y_start..y_end {
        for x in x_start..x_end {
            // Sample at the pixel center
            let (sx, sy) = placement.photo_to_sprite(x as f64 + 0.5, y as f64 + 0.5);
            let sample = match sampling {
                Sampling::Nearest => sample_nearest(sprite.image(), sx, sy),
                Sampling::Bilinear => sample_bilinear(sprite.image(), sx, sy),
            };
            blend(canvas.get_pixel_mut(x, y), sample);
        }
    }
}

fn texel(image: &RgbaImage, x: i64, y: i64) -> Sample {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return TRANSPARENT;
    }
    let [r, g, b, a] = image.get_pixel(x as u32, y as u32).0;
    [r as f32, g as f32, b as f32, a as f32 / 255.0]
}

fn sample_nearest(image: &RgbaImage, sx: f64, sy: f64) -> Sample {
    texel(image, sx.floor() as i64, sy.floor() as i64)
}

fn sample_bilinear(image: &RgbaImage, sx: f64, sy: f64) -> Sample {
    // Texel centers sit at half-integer coordinates
    let fx = sx - 0.5;
    let fy = sy - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = (fx - x0) as f32;
    let ty = (fy - y0) as f32;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let taps = [
        (texel(image, x0, y0), (1.0 - tx) * (1.0 - ty)),
        (texel(image, x0 + 1, y0), tx * (1.0 - ty)),
        (texel(image, x0, y0 + 1), (1.0 - tx) * ty),
        (texel(image, x0 + 1, y0 + 1), tx * ty),
    ];

    // Interpolate premultiplied so transparent texels do not darken edges
    let mut premultiplied = [0.0f32; 3];
    let mut alpha = 0.0f32;
    for (t, weight) in taps {
        let w = weight * t[3];
        premultiplied[0] += t[0] * w;
        premultiplied[1] += t[1] * w;
        premultiplied[2] += t[2] * w;
        alpha += w;
    }
    if alpha <= 0.0 {
        return TRANSPARENT;
    }
    [
        premultiplied[0] / alpha,
        premultiplied[1] / alpha,
        premultiplied[2] / alpha,
        alpha.min(1.0),
    ]
}

/// `out = src.rgb * src.a + out.rgb * (1 - src.a)`, per channel.
fn blend(dst: &mut Rgba<u8>, src: Sample) {
    let alpha = src[3];
    if alpha <= 0.0 {
        return;
    }
    let inv_alpha = 1.0 - alpha;
    let [r, g, b, a] = dst.0;
    let mix = |s: f32, d: u8| (s * alpha + d as f32 * inv_alpha).round().clamp(0.0, 255.0) as u8;
    let out_a = (alpha * 255.0 + a as f32 * inv_alpha).round().clamp(0.0, 255.0) as u8;
    *dst = Rgba([mix(src[0], r), mix(src[1], g), mix(src[2], b), out_a]);
}
