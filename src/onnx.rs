use std::path::Path;

use ndarray::ArrayView4;
use ort::{inputs, GraphOptimizationLevel, Session};
use tracing::info;

use crate::error::ClassifierError;
use crate::label::LABELS;
use crate::network::{check_input_shape, two_scores, Network};

#[derive(Debug, Clone, Default)]
pub struct OnnxOptions {
    /// Intra-op threads; `None` lets ONNX Runtime use every core.
    pub intra_threads: Option<usize>,
}

/// A pretrained two-class CNN running on ONNX Runtime.
#[derive(Debug)]
pub struct OnnxNetwork {
    model: Session,
    input_name: String,
    output_name: String,
}

impl OnnxNetwork {
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        Self::load_with(path, &OnnxOptions::default())
    }

    pub fn load_with(path: &Path, options: &OnnxOptions) -> Result<Self, ClassifierError> {
        let model = Self::session(path, options).map_err(|source| ClassifierError::ModelLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let input = model
            .inputs
            .first()
            .ok_or_else(|| ClassifierError::Initialization("model has no inputs".into()))?;
        match input.input_type.tensor_dimensions() {
            Some(dims) if dims.len() == 4 => {}
            other => {
                return Err(ClassifierError::Initialization(format!(
                    "input '{}' must be a rank-4 image tensor, got {other:?}",
                    input.name
                )))
            }
        }

        let output = model
            .outputs
            .first()
            .ok_or_else(|| ClassifierError::Initialization("model has no outputs".into()))?;
        // 动态维度为 -1，只校验静态的类别数
        if let Some(&classes) = output
            .output_type
            .tensor_dimensions()
            .and_then(|dims| dims.last())
        {
            if classes > 0 && classes as usize != LABELS.len() {
                return Err(ClassifierError::Initialization(format!(
                    "output '{}' has {classes} classes, expected {}",
                    output.name,
                    LABELS.len()
                )));
            }
        }

        let input_name = input.name.clone();
        let output_name = output.name.clone();
        info!(
            "Loaded model {} (input: {input_name}, output: {output_name})",
            path.display()
        );

        Ok(Self {
            model,
            input_name,
            output_name,
        })
    }

    fn session(path: &Path, options: &OnnxOptions) -> ort::Result<Session> {
        let mut builder =
            Session::builder()?.with_optimization_level(GraphOptimizationLevel::Level3)?;
        if let Some(threads) = options.intra_threads {
            builder = builder.with_intra_threads(threads)?;
        }
        builder.commit_from_file(path)
    }

    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }
}

impl Network for OnnxNetwork {
    fn forward(&self, input: ArrayView4<f32>) -> Result<[f32; 2], ClassifierError> {
        check_input_shape(&input)?;
        let outputs = self
            .model
            .run(inputs![self.input_name.as_str() => input.view()]?)?;
        let scores = outputs[self.output_name.as_str()].try_extract_tensor::<f32>()?;
        two_scores(scores.iter().copied())
    }
}
