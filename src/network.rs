use ndarray::ArrayView4;

use crate::error::ClassifierError;
use crate::label::LABELS;
use crate::preprocess::INPUT_SIZE;

/// A loaded two-class network. Implementations must be read-only during
/// `forward` so one instance can serve concurrent callers.
pub trait Network: Send + Sync {
    /// Runs one forward pass and returns the unnormalized class scores.
    fn forward(&self, input: ArrayView4<f32>) -> Result<[f32; 2], ClassifierError>;
}

impl<N: Network + ?Sized> Network for Box<N> {
    fn forward(&self, input: ArrayView4<f32>) -> Result<[f32; 2], ClassifierError> {
        (**self).forward(input)
    }
}

pub fn check_input_shape(input: &ArrayView4<f32>) -> Result<(), ClassifierError> {
    let size = INPUT_SIZE as usize;
    if input.shape() != [1, 3, size, size] {
        return Err(ClassifierError::Inference(format!(
            "expected input of shape [1, 3, {size}, {size}], got {:?}",
            input.shape()
        )));
    }
    Ok(())
}

/// Collects a network output into exactly one score per label.
pub fn two_scores(values: impl IntoIterator<Item = f32>) -> Result<[f32; 2], ClassifierError> {
    let values: Vec<f32> = values.into_iter().collect();
    match values.as_slice() {
        &[recyclable, non_recyclable] => Ok([recyclable, non_recyclable]),
        _ => Err(ClassifierError::Inference(format!(
            "expected {} class scores, got {}",
            LABELS.len(),
            values.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array4;

    #[test]
    fn accepts_network_shape() {
        let input = Array4::<f32>::zeros((1, 3, 224, 224));
        assert!(check_input_shape(&input.view()).is_ok());
    }

    #[test]
    fn rejects_other_shapes() {
        for shape in [(2, 3, 224, 224), (1, 1, 224, 224), (1, 3, 640, 640)] {
            let input = Array4::<f32>::zeros(shape);
            let err = check_input_shape(&input.view()).unwrap_err();
            assert!(matches!(err, ClassifierError::Inference(_)), "{shape:?}");
        }
    }

    #[test]
    fn two_scores_requires_two_values() {
        assert_eq!(two_scores([0.25, -1.0]).unwrap(), [0.25, -1.0]);
        assert!(two_scores([1.0]).is_err());
        assert!(two_scores([1.0, 2.0, 3.0]).is_err());
        assert!(two_scores(Vec::new()).is_err());
    }
}
