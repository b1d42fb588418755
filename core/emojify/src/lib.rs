//! Expression-matched emoji overlays: classify each detected face, place the
//! matching sprite over it, and composite the result onto a copy of the photo.
//!
//! # Example
//!
//! ```no_run
//! use emojify::{Emojifier, ExpressionSignals, FaceBounds, FaceDescriptor};
//!
//! let photo = image::open("selfie.jpg").unwrap().to_rgba8();
//! let faces = vec![FaceDescriptor::new(FaceBounds::new(400.0, 300.0, 200.0, 200.0))
//!     .signals(ExpressionSignals::new(0.9, 0.9, 0.9))];
//!
//! let result = Emojifier::new().unwrap().overlay_emoji(&photo, &faces).unwrap();
//! result.save("emojified.png").unwrap();
//! ```
#![warn(missing_docs)]

mod classify;
mod composite;
mod error;
/// Face descriptor types and the detector trait.
pub mod face_detector;
mod placement;
#[cfg(feature = "rustface")]
/// Built-in SeetaFace-based face detector backend.
pub mod rustface_backend;
mod sprite;
mod viewport;

use std::sync::Arc;

use image::RgbaImage;

pub use classify::{classify, classify_with, ClosedEyes, EmojiCategory, Thresholds};
pub use composite::Sampling;
/// Error type returned by emojify operations.
pub use error::{EmojifyError, Result};
/// Face descriptor, bounds, signals, and the detector trait.
pub use face_detector::{ExpressionSignals, FaceBounds, FaceDescriptor, FaceDetector};
pub use placement::{solve, Placement};
#[cfg(feature = "rustface")]
/// Built-in detector that loads a SeetaFace model file.
pub use rustface_backend::RustfaceDetector;
pub use sprite::{Sprite, SpriteCatalog};
pub use viewport::fit_within;

/// One face that received an emoji.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedEmoji {
    /// Position of the face in the input sequence.
    pub index: usize,
    /// Category chosen for the face.
    pub category: EmojiCategory,
    /// Where the sprite was drawn.
    pub placement: Placement,
}

/// Result of an overlay operation.
#[derive(Debug, Clone)]
pub struct EmojifiedPhoto {
    /// The composited image; same dimensions and format as the input photo.
    pub image: RgbaImage,
    /// Faces that were drawn, in drawing order.
    pub applied: Vec<AppliedEmoji>,
    /// Input positions of descriptors dropped as invalid.
    pub dropped: Vec<usize>,
}

/// Overlay bundled emoji on `faces` with default settings.
///
/// Shorthand for `Emojifier::new()?.overlay_emoji(photo, faces)`.
pub fn overlay_emoji(photo: &RgbaImage, faces: &[FaceDescriptor]) -> Result<RgbaImage> {
    Emojifier::new()?.overlay_emoji(photo, faces)
}

/// Configured emoji compositing engine.
///
/// Holds a shared, read-only sprite catalog plus classification and sampling
/// settings. Calls never mutate the engine, so one instance can serve many
/// threads.
#[derive(Debug, Clone)]
pub struct Emojifier {
    catalog: Arc<SpriteCatalog>,
    thresholds: Thresholds,
    sampling: Sampling,
}

impl Emojifier {
    /// Create an engine using the bundled sprites.
    ///
    /// Fails with [`EmojifyError::MissingAsset`] if any bundled sprite cannot be decoded.
    pub fn new() -> Result<Self> {
        Ok(Self::with_catalog(SpriteCatalog::bundled()?))
    }

    /// Create an engine around an existing catalog.
    pub fn with_catalog(catalog: Arc<SpriteCatalog>) -> Self {
        Self {
            catalog,
            thresholds: Thresholds::default(),
            sampling: Sampling::default(),
        }
    }

    /// Replace the sprite catalog.
    pub fn catalog(mut self, catalog: Arc<SpriteCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the classification thresholds (default: 0.5 / 0.5).
    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set the sprite sampling mode (default: `Sampling::Bilinear`).
    pub fn sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// The sprite catalog in use.
    pub fn sprites(&self) -> &SpriteCatalog {
        &self.catalog
    }

    /// Composite an emoji over every valid face and return the new image.
    ///
    /// `photo` is never modified. Faces are drawn in input order, so where
    /// boxes overlap the later face wins. Invalid descriptors are logged and
    /// skipped; an empty or fully invalid face list yields an exact copy.
    pub fn overlay_emoji(&self, photo: &RgbaImage, faces: &[FaceDescriptor]) -> Result<RgbaImage> {
        self.overlay(photo, faces).map(|result| result.image)
    }

    /// Like [`Emojifier::overlay_emoji`], also reporting what was drawn and dropped.
    pub fn overlay(&self, photo: &RgbaImage, faces: &[FaceDescriptor]) -> Result<EmojifiedPhoto> {
        self.thresholds.validate()?;

        let mut canvas = composite::allocate_canvas(photo)?;
        let mut applied = Vec::with_capacity(faces.len());
        let mut dropped = Vec::new();

        for (index, face) in faces.iter().enumerate() {
            if let Err(e) = face.validate(photo.width(), photo.height()) {
                tracing::warn!(index, error = %e, "dropping face descriptor");
                dropped.push(index);
                continue;
            }

            let category = classify_with(face, &self.thresholds);
            let sprite = self.catalog.sprite_for(category);
            let placement = solve(face, sprite);
            tracing::debug!(
                index,
                ?category,
                center = ?placement.center,
                scale = placement.scale,
                rotation = placement.rotation_degrees,
                "placing emoji"
            );

            composite::draw_sprite(&mut canvas, sprite, &placement, self.sampling);
            applied.push(AppliedEmoji {
                index,
                category,
                placement,
            });
        }

        if !faces.is_empty() && applied.is_empty() {
            tracing::warn!(count = faces.len(), "no valid faces to emojify");
        }

        Ok(EmojifiedPhoto {
            image: canvas,
            applied,
            dropped,
        })
    }

    /// Run `detector` on `photo`, then overlay emoji on whatever it finds.
    pub fn detect_and_overlay(
        &self,
        photo: &RgbaImage,
        detector: &dyn FaceDetector,
    ) -> Result<EmojifiedPhoto> {
        let faces = detector.detect(photo);
        if faces.is_empty() {
            tracing::info!("no faces detected");
        } else {
            tracing::debug!(count = faces.len(), "faces detected");
        }
        self.overlay(photo, &faces)
    }
}
