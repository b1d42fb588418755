use std::path::Path;
use std::sync::{Arc, OnceLock};

use image::{ImageFormat, RgbaImage};

use crate::classify::EmojiCategory;
use crate::error::{EmojifyError, Result};

macro_rules! bundled_asset {
    ($name:literal) => {
        &include_bytes!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../assets/emoji/",
            $name,
            ".png"
        ))[..]
    };
}

/// PNG bytes of the sprite bundled for `category`.
fn bundled_bytes(category: EmojiCategory) -> &'static [u8] {
    match category {
        EmojiCategory::Smile => bundled_asset!("smile"),
        EmojiCategory::Frown => bundled_asset!("frown"),
        EmojiCategory::SmileWink => bundled_asset!("smile_wink"),
        EmojiCategory::FrownWink => bundled_asset!("frown_wink"),
        EmojiCategory::LeftWink => bundled_asset!("left_wink"),
        EmojiCategory::RightWink => bundled_asset!("right_wink"),
        EmojiCategory::ClosedEyeSmile => bundled_asset!("closed_eye_smile"),
        EmojiCategory::ClosedEyeFrown => bundled_asset!("closed_eye_frown"),
    }
}

static BUNDLED: OnceLock<Arc<SpriteCatalog>> = OnceLock::new();

/// An emoji image and the point that is aligned with the face center.
#[derive(Debug, Clone)]
pub struct Sprite {
    image: RgbaImage,
    anchor: (f64, f64),
}

impl Sprite {
    /// Wrap an RGBA image, anchored at its center.
    pub fn new(image: RgbaImage) -> Self {
        let anchor = (image.width() as f64 / 2.0, image.height() as f64 / 2.0);
        Self { image, anchor }
    }

    /// Override the anchor point (sprite pixel coordinates).
    pub fn with_anchor(mut self, x: f64, y: f64) -> Self {
        self.anchor = (x, y);
        self
    }

    /// Sprite pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Native width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Native height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Anchor point in sprite pixel coordinates.
    pub fn anchor(&self) -> (f64, f64) {
        self.anchor
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width() as f64 / self.height() as f64
    }
}

/// Read-only mapping from every [`EmojiCategory`] to its sprite.
///
/// A catalog is always complete: every constructor fails with
/// [`EmojifyError::MissingAsset`] rather than returning a partial set.
#[derive(Debug, Clone)]
pub struct SpriteCatalog {
    /// Indexed by `EmojiCategory::index`.
    sprites: Vec<Sprite>,
}

impl SpriteCatalog {
    /// The sprite set embedded in the crate.
    ///
    /// Decoded on first use and shared process-wide afterwards.
    pub fn bundled() -> Result<Arc<SpriteCatalog>> {
        if let Some(catalog) = BUNDLED.get() {
            return Ok(Arc::clone(catalog));
        }
        let catalog = Arc::new(Self::from_fn(|category| {
            decode_png(bundled_bytes(category), category)
        })?);
        tracing::debug!("decoded bundled emoji sprites");
        Ok(Arc::clone(BUNDLED.get_or_init(|| catalog)))
    }

    /// Load `<asset_name>.png` for every category from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Self::from_fn(|category| {
            let path = dir.join(format!("{}.png", category.asset_name()));
            let bytes = std::fs::read(&path).map_err(|e| EmojifyError::MissingAsset {
                category,
                reason: format!("{}: {e}", path.display()),
            })?;
            decode_png(&bytes, category)
        })
    }

    /// Build a catalog by asking `load` for each category in turn.
    ///
    /// The first error aborts construction. Zero-sized sprites are rejected.
    pub fn from_fn<F>(mut load: F) -> Result<Self>
    where
        F: FnMut(EmojiCategory) -> Result<Sprite>,
    {
        let mut sprites = Vec::with_capacity(EmojiCategory::ALL.len());
        for category in EmojiCategory::ALL {
            let sprite = load(category)?;
            if sprite.width() == 0 || sprite.height() == 0 {
                return Err(EmojifyError::MissingAsset {
                    category,
                    reason: "sprite has zero dimensions".to_string(),
                });
            }
            sprites.push(sprite);
        }
        Ok(Self { sprites })
    }

    /// Sprite for `category`.
    pub fn sprite_for(&self, category: EmojiCategory) -> &Sprite {
        &self.sprites[category.index()]
    }
}

fn decode_png(bytes: &[u8], category: EmojiCategory) -> Result<Sprite> {
    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png).map_err(|e| {
        EmojifyError::MissingAsset {
            category,
            reason: e.to_string(),
        }
    })?;
    Ok(Sprite::new(decoded.to_rgba8()))
}
