use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::{EmojifyError, Result};

/// Bounding box of a detected face within a photo, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceBounds {
    /// X coordinate of the top-left corner (pixels).
    pub x: f64,
    /// Y coordinate of the top-left corner (pixels).
    pub y: f64,
    /// Width of the bounding box (pixels).
    pub width: f64,
    /// Height of the bounding box (pixels).
    pub height: f64,
}

impl FaceBounds {
    /// Create a bounding box from its top-left corner and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center of the box in photo coordinates.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Expression probabilities reported by a detector.
///
/// Each signal is optional: backends that cannot estimate an expression
/// leave it unset, and the classifier treats a missing eye as open and a
/// missing smile as smiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpressionSignals {
    /// Probability that the face is smiling.
    #[serde(rename = "smilingProbability")]
    pub smiling: Option<f32>,
    /// Probability that the left eye is open.
    #[serde(rename = "leftEyeOpenProbability")]
    pub left_eye_open: Option<f32>,
    /// Probability that the right eye is open.
    #[serde(rename = "rightEyeOpenProbability")]
    pub right_eye_open: Option<f32>,
}

impl ExpressionSignals {
    /// Signals with all three probabilities present.
    pub const fn new(smiling: f32, left_eye_open: f32, right_eye_open: f32) -> Self {
        Self {
            smiling: Some(smiling),
            left_eye_open: Some(left_eye_open),
            right_eye_open: Some(right_eye_open),
        }
    }

    fn named(&self) -> [(&'static str, Option<f32>); 3] {
        [
            ("smilingProbability", self.smiling),
            ("leftEyeOpenProbability", self.left_eye_open),
            ("rightEyeOpenProbability", self.right_eye_open),
        ]
    }
}

/// One face as reported by a detector: location, head tilt and expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceDescriptor {
    /// Face bounding box in photo pixel coordinates.
    pub bounds: FaceBounds,
    /// Head tilt in degrees; positive values tilt clockwise on screen.
    #[serde(rename = "headTiltAngle", default)]
    pub head_tilt: f64,
    /// Expression probabilities.
    #[serde(flatten)]
    pub signals: ExpressionSignals,
}

impl FaceDescriptor {
    /// Descriptor with no tilt and no expression signals.
    pub fn new(bounds: FaceBounds) -> Self {
        Self {
            bounds,
            head_tilt: 0.0,
            signals: ExpressionSignals::default(),
        }
    }

    /// Set the head tilt angle in degrees.
    pub fn head_tilt(mut self, degrees: f64) -> Self {
        self.head_tilt = degrees;
        self
    }

    /// Set the expression signals.
    pub fn signals(mut self, signals: ExpressionSignals) -> Self {
        self.signals = signals;
        self
    }

    /// Check that the descriptor can be placed on a `photo_width` × `photo_height` photo.
    ///
    /// Rejects non-finite geometry, zero-area boxes, boxes that leave the
    /// photo, and probabilities outside `[0, 1]`.
    pub fn validate(&self, photo_width: u32, photo_height: u32) -> Result<()> {
        let FaceBounds {
            x,
            y,
            width,
            height,
        } = self.bounds;

        if ![x, y, width, height, self.head_tilt]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(EmojifyError::InvalidInput(
                "non-finite geometry".to_string(),
            ));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(EmojifyError::InvalidInput(format!(
                "zero-area bounds {width}x{height}"
            )));
        }
        if x < 0.0
            || y < 0.0
            || x + width > photo_width as f64
            || y + height > photo_height as f64
        {
            return Err(EmojifyError::InvalidInput(format!(
                "bounds ({x}, {y}, {width}x{height}) exceed {photo_width}x{photo_height} photo"
            )));
        }
        for (name, value) in self.signals.named() {
            if let Some(p) = value {
                if !(0.0..=1.0).contains(&p) {
                    return Err(EmojifyError::InvalidInput(format!(
                        "{name} out of range: {p}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Pluggable face detection backend.
///
/// Implement this trait to feed descriptors from any vision engine
/// (ML Kit, ONNX, dlib) into [`crate::Emojifier::detect_and_overlay`].
pub trait FaceDetector: Send + Sync {
    /// Detect faces in an RGBA photo. Coordinates are in the photo's pixel space.
    fn detect(&self, photo: &RgbaImage) -> Vec<FaceDescriptor>;
}
