use image::DynamicImage;
use rand::distr::{Distribution, Uniform};
use tracing::debug;

use crate::classifier::{ClassificationResult, Classify};
use crate::error::ClassifierError;
use crate::label::LABELS;

/// Placeholder with no learned behaviour: a uniformly random label and a
/// confidence uniformly drawn from `[50, 95)`.
#[derive(Debug, Clone)]
pub struct RandomClassifier {
    index: Uniform<usize>,
    confidence: Uniform<f32>,
}

impl RandomClassifier {
    pub const MIN_CONFIDENCE: f32 = 50.;
    pub const MAX_CONFIDENCE: f32 = 95.;

    pub fn new() -> Result<Self, ClassifierError> {
        let invalid = |e: rand::distr::uniform::Error| {
            ClassifierError::Initialization(format!("invalid stub distribution: {e}"))
        };
        Ok(Self {
            index: Uniform::new(0, LABELS.len()).map_err(invalid)?,
            confidence: Uniform::new(Self::MIN_CONFIDENCE, Self::MAX_CONFIDENCE)
                .map_err(invalid)?,
        })
    }
}

impl Classify for RandomClassifier {
    fn classify(&self, _image: &DynamicImage) -> Result<ClassificationResult, ClassifierError> {
        let mut rng = rand::rng();
        let label = LABELS[self.index.sample(&mut rng)];
        let result = ClassificationResult::new(label, self.confidence.sample(&mut rng))?;
        debug!("stub prediction {result}");
        Ok(result)
    }
}
