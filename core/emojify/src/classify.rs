use serde::{Deserialize, Serialize};

use crate::error::{EmojifyError, Result};
use crate::face_detector::FaceDescriptor;

/// Emoji chosen for a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmojiCategory {
    /// Both eyes open, smiling.
    Smile,
    /// Both eyes open, not smiling.
    Frown,
    /// Right eye closed, smiling.
    SmileWink,
    /// Left eye closed, not smiling.
    FrownWink,
    /// Left eye closed, smiling.
    LeftWink,
    /// Right eye closed, not smiling.
    RightWink,
    /// Both eyes closed, smiling.
    ClosedEyeSmile,
    /// Both eyes closed, not smiling.
    ClosedEyeFrown,
}

/// Which eyes a category shows closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosedEyes {
    /// Both eyes open.
    None,
    /// Only the left eye closed.
    Left,
    /// Only the right eye closed.
    Right,
    /// Both eyes closed.
    Both,
}

impl EmojiCategory {
    /// Every category, in declaration order.
    pub const ALL: [EmojiCategory; 8] = [
        EmojiCategory::Smile,
        EmojiCategory::Frown,
        EmojiCategory::SmileWink,
        EmojiCategory::FrownWink,
        EmojiCategory::LeftWink,
        EmojiCategory::RightWink,
        EmojiCategory::ClosedEyeSmile,
        EmojiCategory::ClosedEyeFrown,
    ];

    /// File stem of the sprite asset for this category.
    pub fn asset_name(self) -> &'static str {
        match self {
            EmojiCategory::Smile => "smile",
            EmojiCategory::Frown => "frown",
            EmojiCategory::SmileWink => "smile_wink",
            EmojiCategory::FrownWink => "frown_wink",
            EmojiCategory::LeftWink => "left_wink",
            EmojiCategory::RightWink => "right_wink",
            EmojiCategory::ClosedEyeSmile => "closed_eye_smile",
            EmojiCategory::ClosedEyeFrown => "closed_eye_frown",
        }
    }

    /// Whether the category depicts a smile.
    pub fn is_smiling(self) -> bool {
        matches!(
            self,
            EmojiCategory::Smile
                | EmojiCategory::SmileWink
                | EmojiCategory::LeftWink
                | EmojiCategory::ClosedEyeSmile
        )
    }

    /// Which eyes the category depicts closed.
    pub fn closed_eyes(self) -> ClosedEyes {
        match self {
            EmojiCategory::Smile | EmojiCategory::Frown => ClosedEyes::None,
            EmojiCategory::LeftWink | EmojiCategory::FrownWink => ClosedEyes::Left,
            EmojiCategory::SmileWink | EmojiCategory::RightWink => ClosedEyes::Right,
            EmojiCategory::ClosedEyeSmile | EmojiCategory::ClosedEyeFrown => ClosedEyes::Both,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    fn from_expression(closed: ClosedEyes, smiling: bool) -> Self {
        match (closed, smiling) {
            (ClosedEyes::None, true) => EmojiCategory::Smile,
            (ClosedEyes::None, false) => EmojiCategory::Frown,
            (ClosedEyes::Left, true) => EmojiCategory::LeftWink,
            (ClosedEyes::Left, false) => EmojiCategory::FrownWink,
            (ClosedEyes::Right, true) => EmojiCategory::SmileWink,
            (ClosedEyes::Right, false) => EmojiCategory::RightWink,
            (ClosedEyes::Both, true) => EmojiCategory::ClosedEyeSmile,
            (ClosedEyes::Both, false) => EmojiCategory::ClosedEyeFrown,
        }
    }
}

/// Probability cut-offs used by [`classify_with`].
///
/// A face is smiling when `smilingProbability >= smiling`; an eye is closed
/// when its open probability is `< eye_open`. Ties therefore go to the
/// smiling, eyes-open side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Thresholds {
    /// Minimum smiling probability to count as smiling (default: 0.5).
    pub smiling: f32,
    /// Open probability below which an eye counts as closed (default: 0.5).
    pub eye_open: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            smiling: 0.5,
            eye_open: 0.5,
        }
    }
}

impl Thresholds {
    pub(crate) fn validate(&self) -> Result<()> {
        for t in [self.smiling, self.eye_open] {
            if !(0.0..=1.0).contains(&t) {
                return Err(EmojifyError::InvalidThreshold(t));
            }
        }
        Ok(())
    }
}

/// Classify a face with the default 0.5 thresholds.
pub fn classify(face: &FaceDescriptor) -> EmojiCategory {
    classify_with(face, &Thresholds::default())
}

/// Classify a face into exactly one [`EmojiCategory`].
///
/// Missing eye signals count as open and a missing smile signal counts as
/// smiling, so a descriptor without signals maps to [`EmojiCategory::Smile`].
pub fn classify_with(face: &FaceDescriptor, thresholds: &Thresholds) -> EmojiCategory {
    let signals = &face.signals;
    let left_closed = signals
        .left_eye_open
        .is_some_and(|p| p < thresholds.eye_open);
    let right_closed = signals
        .right_eye_open
        .is_some_and(|p| p < thresholds.eye_open);
    let smiling = signals.smiling.map_or(true, |p| p >= thresholds.smiling);

    let closed = match (left_closed, right_closed) {
        (false, false) => ClosedEyes::None,
        (true, false) => ClosedEyes::Left,
        (false, true) => ClosedEyes::Right,
        (true, true) => ClosedEyes::Both,
    };
    EmojiCategory::from_expression(closed, smiling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face_detector::{ExpressionSignals, FaceBounds};

    fn face(smiling: f32, left: f32, right: f32) -> FaceDescriptor {
        FaceDescriptor::new(FaceBounds::new(0.0, 0.0, 10.0, 10.0))
            .signals(ExpressionSignals::new(smiling, left, right))
    }

    #[test]
    fn eyes_open_smiling_is_smile() {
        for smiling in [0.5, 0.51, 0.75, 1.0] {
            assert_eq!(classify(&face(smiling, 0.9, 0.9)), EmojiCategory::Smile);
        }
    }

    #[test]
    fn eyes_open_not_smiling_is_frown() {
        for smiling in [0.0, 0.2, 0.4999] {
            assert_eq!(classify(&face(smiling, 0.9, 0.9)), EmojiCategory::Frown);
        }
    }

    #[test]
    fn both_eyes_closed_depends_only_on_smile() {
        for (left, right) in [(0.0, 0.0), (0.1, 0.49), (0.4999, 0.3)] {
            assert_eq!(
                classify(&face(0.8, left, right)),
                EmojiCategory::ClosedEyeSmile
            );
            assert_eq!(
                classify(&face(0.2, left, right)),
                EmojiCategory::ClosedEyeFrown
            );
        }
    }

    #[test]
    fn single_eye_closed_mapping() {
        assert_eq!(classify(&face(0.8, 0.1, 0.9)), EmojiCategory::LeftWink);
        assert_eq!(classify(&face(0.2, 0.1, 0.9)), EmojiCategory::FrownWink);
        assert_eq!(classify(&face(0.8, 0.9, 0.1)), EmojiCategory::SmileWink);
        assert_eq!(classify(&face(0.2, 0.9, 0.1)), EmojiCategory::RightWink);
    }

    #[test]
    fn boundary_values_favor_smiling_and_open_eyes() {
        assert_eq!(classify(&face(0.5, 0.5, 0.5)), EmojiCategory::Smile);
    }

    #[test]
    fn missing_signals_default_to_smile() {
        let bare = FaceDescriptor::new(FaceBounds::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(classify(&bare), EmojiCategory::Smile);

        let only_frown = bare.clone().signals(ExpressionSignals {
            smiling: Some(0.1),
            ..Default::default()
        });
        assert_eq!(classify(&only_frown), EmojiCategory::Frown);
    }

    #[test]
    fn classification_is_repeatable() {
        let f = face(0.3, 0.2, 0.7);
        assert_eq!(classify(&f), classify(&f));
    }

    #[test]
    fn custom_thresholds() {
        let strict = Thresholds {
            smiling: 0.9,
            eye_open: 0.2,
        };
        assert_eq!(classify_with(&face(0.8, 0.3, 0.3), &strict), EmojiCategory::Frown);
        assert_eq!(
            classify_with(&face(0.95, 0.1, 0.3), &strict),
            EmojiCategory::LeftWink
        );
    }

    #[test]
    fn thresholds_must_be_probabilities() {
        assert!(Thresholds::default().validate().is_ok());
        let bad = Thresholds {
            smiling: 1.5,
            eye_open: 0.5,
        };
        assert!(matches!(
            bad.validate(),
            Err(EmojifyError::InvalidThreshold(t)) if t == 1.5
        ));
    }

    #[test]
    fn category_helpers_agree_with_classifier() {
        for category in EmojiCategory::ALL {
            assert_eq!(
                EmojiCategory::from_expression(category.closed_eyes(), category.is_smiling()),
                category
            );
        }
    }

    #[test]
    fn index_matches_all_order() {
        for (i, category) in EmojiCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }
}
