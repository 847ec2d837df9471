use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    /// 模型不可用，无法提供任何分类服务
    #[error("classifier initialization failed: {0}")]
    Initialization(String),
    #[error("failed to load model {}: {source}", .path.display())]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: ort::Error,
    },
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("ONNX Runtime error: {0}")]
    Runtime(#[from] ort::Error),
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("resize failed: {0}")]
    Resize(#[from] fast_image_resize::ResizeError),
}

impl ClassifierError {
    /// Startup failures are fatal, everything else is per call.
    pub fn is_initialization(&self) -> bool {
        matches!(
            self,
            ClassifierError::Initialization(_) | ClassifierError::ModelLoad { .. }
        )
    }
}
