use std::path::Path;

use image::RgbaImage;

use crate::error::{EmojifyError, Result};
use crate::face_detector::{FaceBounds, FaceDescriptor, FaceDetector};

/// Face detector backed by the `rustface` crate (SeetaFace engine).
///
/// SeetaFace only reports bounding boxes, so descriptors carry no tilt and
/// no expression signals; every face classifies as a plain smile.
pub struct RustfaceDetector {
    model: rustface::Model,
}

impl RustfaceDetector {
    /// Load a SeetaFace frontal model (e.g. `seeta_fd_frontal_v1.0.bin`).
    pub fn from_model_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let model = rustface::read_model(std::io::BufReader::new(file))
            .map_err(|e| EmojifyError::Detection(format!("{e:?}")))?;
        Ok(Self { model })
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(&self, photo: &RgbaImage) -> Vec<FaceDescriptor> {
        let gray = image::imageops::grayscale(photo);
        let (width, height) = gray.dimensions();

        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(20);
        detector.set_score_thresh(2.0);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        let faces = detector.detect(&rustface::ImageData::new(gray.as_raw(), width, height));

        faces
            .iter()
            .filter_map(|face| {
                // Boxes near the border can extend past the photo
                let bbox = face.bbox();
                let x0 = (bbox.x() as f64).max(0.0);
                let y0 = (bbox.y() as f64).max(0.0);
                let x1 = (bbox.x() as f64 + bbox.width() as f64).min(width as f64);
                let y1 = (bbox.y() as f64 + bbox.height() as f64).min(height as f64);
                (x1 > x0 && y1 > y0)
                    .then(|| FaceDescriptor::new(FaceBounds::new(x0, y0, x1 - x0, y1 - y0)))
            })
            .collect()
    }
}
