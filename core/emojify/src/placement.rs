use crate::face_detector::FaceDescriptor;
use crate::sprite::Sprite;

/// Where and how a sprite is drawn over one face.
///
/// The sprite's anchor lands on `center`, the sprite is scaled uniformly by
/// `scale` and rotated by `rotation_degrees` (clockwise on screen).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Target point in photo coordinates for the sprite anchor.
    pub center: (f64, f64),
    /// Sprite-to-photo size ratio, applied to both axes.
    pub scale: f64,
    /// Rotation in degrees, mirroring the head tilt.
    pub rotation_degrees: f64,
    anchor: (f64, f64),
}

/// Fit `sprite` to the face: match the box width, center on the box, follow the tilt.
pub fn solve(face: &FaceDescriptor, sprite: &Sprite) -> Placement {
    Placement {
        center: face.bounds.center(),
        scale: face.bounds.width / sprite.width() as f64,
        rotation_degrees: face.head_tilt,
        anchor: sprite.anchor(),
    }
}

impl Placement {
    /// Size of the drawn sprite before rotation. Height follows the same scale as width.
    pub fn scaled_size(&self, sprite: &Sprite) -> (f64, f64) {
        (
            sprite.width() as f64 * self.scale,
            sprite.height() as f64 * self.scale,
        )
    }

    /// Map a sprite coordinate into the photo.
    pub fn sprite_to_photo(&self, sx: f64, sy: f64) -> (f64, f64) {
        let (sin, cos) = self.rotation_degrees.to_radians().sin_cos();
        let dx = (sx - self.anchor.0) * self.scale;
        let dy = (sy - self.anchor.1) * self.scale;
        (
            self.center.0 + dx * cos - dy * sin,
            self.center.1 + dx * sin + dy * cos,
        )
    }

    /// Map a photo coordinate back into sprite space.
    pub fn photo_to_sprite(&self, px: f64, py: f64) -> (f64, f64) {
        let (sin, cos) = self.rotation_degrees.to_radians().sin_cos();
        let dx = px - self.center.0;
        let dy = py - self.center.1;
        (
            (dx * cos + dy * sin) / self.scale + self.anchor.0,
            (-dx * sin + dy * cos) / self.scale + self.anchor.1,
        )
    }

    /// Axis-aligned photo-space box covering the transformed sprite,
    /// as `(min_x, min_y, max_x, max_y)`.
    pub fn footprint(&self, sprite: &Sprite) -> (f64, f64, f64, f64) {
        let (w, h) = (sprite.width() as f64, sprite.height() as f64);
        let corners = [
            self.sprite_to_photo(0.0, 0.0),
            self.sprite_to_photo(w, 0.0),
            self.sprite_to_photo(0.0, h),
            self.sprite_to_photo(w, h),
        ];
        corners.iter().fold(
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face_detector::FaceBounds;
    use image::RgbaImage;

    const EPS: f64 = 1e-9;

    fn sprite(width: u32, height: u32) -> Sprite {
        Sprite::new(RgbaImage::new(width, height))
    }

    fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < EPS && (actual.1 - expected.1).abs() < EPS,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn upright_face_scales_to_box_width() {
        // 1000x1000 photo, face at (400, 300) 200x200
        let face = FaceDescriptor::new(FaceBounds::new(400.0, 300.0, 200.0, 200.0));
        let placement = solve(&face, &sprite(100, 100));
        assert_eq!(placement.center, (500.0, 400.0));
        assert_eq!(placement.scale, 2.0);
        assert_eq!(placement.rotation_degrees, 0.0);
        assert_eq!(placement.scaled_size(&sprite(100, 100)), (200.0, 200.0));
    }

    #[test]
    fn height_follows_width_scale() {
        // Tall face box does not stretch a square sprite
        let face = FaceDescriptor::new(FaceBounds::new(0.0, 0.0, 50.0, 120.0));
        let s = sprite(100, 100);
        let placement = solve(&face, &s);
        assert_eq!(placement.scaled_size(&s), (50.0, 50.0));
    }

    #[test]
    fn rotation_mirrors_head_tilt() {
        let face = FaceDescriptor::new(FaceBounds::new(0.0, 0.0, 10.0, 10.0)).head_tilt(-15.0);
        assert_eq!(solve(&face, &sprite(10, 10)).rotation_degrees, -15.0);
    }

    #[test]
    fn anchor_maps_to_face_center() {
        let face = FaceDescriptor::new(FaceBounds::new(20.0, 40.0, 60.0, 60.0)).head_tilt(33.0);
        let s = sprite(30, 20).with_anchor(5.0, 7.0);
        let placement = solve(&face, &s);
        assert_close(placement.sprite_to_photo(5.0, 7.0), (50.0, 70.0));
    }

    #[test]
    fn quarter_turn_is_clockwise() {
        let face = FaceDescriptor::new(FaceBounds::new(0.0, 0.0, 100.0, 100.0)).head_tilt(90.0);
        let placement = solve(&face, &sprite(100, 100));
        // The sprite's right edge ends up below the center
        assert_close(placement.sprite_to_photo(100.0, 50.0), (50.0, 100.0));
    }

    #[test]
    fn inverse_undoes_forward() {
        let face = FaceDescriptor::new(FaceBounds::new(10.0, 10.0, 80.0, 80.0)).head_tilt(27.5);
        let placement = solve(&face, &sprite(64, 48));
        for (sx, sy) in [(0.0, 0.0), (64.0, 48.0), (12.5, 30.25)] {
            let (px, py) = placement.sprite_to_photo(sx, sy);
            assert_close(placement.photo_to_sprite(px, py), (sx, sy));
        }
    }

    #[test]
    fn footprint_of_upright_sprite_matches_face_box() {
        let face = FaceDescriptor::new(FaceBounds::new(400.0, 300.0, 200.0, 200.0));
        let s = sprite(100, 100);
        let (x0, y0, x1, y1) = solve(&face, &s).footprint(&s);
        assert_close((x0, y0), (400.0, 300.0));
        assert_close((x1, y1), (600.0, 500.0));
    }

    #[test]
    fn footprint_grows_when_rotated() {
        let face = FaceDescriptor::new(FaceBounds::new(0.0, 0.0, 100.0, 100.0)).head_tilt(45.0);
        let s = sprite(100, 100);
        let (x0, _, x1, _) = solve(&face, &s).footprint(&s);
        let expected = 100.0 * std::f64::consts::SQRT_2;
        assert!(((x1 - x0) - expected).abs() < 1e-6);
    }
}
