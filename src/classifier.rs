use std::fmt;

use image::DynamicImage;
use serde::Serialize;
use tracing::debug;

use crate::error::ClassifierError;
use crate::label::Label;
use crate::network::Network;
use crate::preprocess::Preprocessor;

/// Maps one decoded image to one labeled prediction.
pub trait Classify: Send + Sync {
    fn classify(&self, image: &DynamicImage) -> Result<ClassificationResult, ClassifierError>;
}

impl<C: Classify + ?Sized> Classify for Box<C> {
    fn classify(&self, image: &DynamicImage) -> Result<ClassificationResult, ClassifierError> {
        (**self).classify(image)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationResult {
    label: Label,
    /// Percentage in `[0, 100]`.
    confidence: f32,
}

impl ClassificationResult {
    pub fn new(label: Label, confidence: f32) -> Result<Self, ClassifierError> {
        if !(0.0..=100.0).contains(&confidence) {
            return Err(ClassifierError::Inference(format!(
                "confidence {confidence} is outside [0, 100]"
            )));
        }
        Ok(Self { label, confidence })
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (confidence: {:.2}%)", self.label, self.confidence)
    }
}

pub fn softmax<const N: usize>(logits: [f32; N]) -> [f32; N] {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps = logits.map(|v| (v - max).exp());
    let sum: f32 = exps.iter().sum();
    exps.map(|e| e / sum)
}

/// Index and value of the largest element; ties keep the lowest index.
pub fn argmax(values: &[f32]) -> Option<(usize, f32)> {
    values
        .iter()
        .copied()
        .enumerate()
        .reduce(|accum, item| if item.1 > accum.1 { item } else { accum })
}

/// Real inference: preprocess, forward pass, softmax, arg-max.
#[derive(Debug)]
pub struct NetworkClassifier<N> {
    network: N,
    preprocessor: Preprocessor,
}

impl<N: Network> NetworkClassifier<N> {
    pub fn new(network: N) -> Self {
        Self {
            network,
            preprocessor: Preprocessor::new(),
        }
    }
}

impl<N: Network> Classify for NetworkClassifier<N> {
    fn classify(&self, image: &DynamicImage) -> Result<ClassificationResult, ClassifierError> {
        let input = self.preprocessor.preprocess(image)?;
        let logits = self.network.forward(input.view())?;
        if logits.iter().any(|v| !v.is_finite()) {
            return Err(ClassifierError::Inference(format!(
                "network produced non-finite scores {logits:?}"
            )));
        }

        let probs = softmax(logits);
        let (class_id, prob) = argmax(&probs)
            .ok_or_else(|| ClassifierError::Inference("network produced no scores".into()))?;
        let label = Label::from_class_id(class_id).ok_or_else(|| {
            ClassifierError::Inference(format!("class id {class_id} has no label"))
        })?;
        let result = ClassificationResult::new(label, prob * 100.)?;
        debug!("logits {logits:?} -> {result}");
        Ok(result)
    }
}
