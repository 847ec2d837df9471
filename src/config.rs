use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::classifier::{Classify, NetworkClassifier};
use crate::error::ClassifierError;
use crate::onnx::{OnnxNetwork, OnnxOptions};
use crate::stub::RandomClassifier;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which classifier implementation to construct.
///
/// ```json
/// { "backend": "onnx", "model_path": "models/recycle.onnx", "intra_threads": 2 }
/// { "backend": "stub" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum ClassifierConfig {
    Stub,
    Onnx {
        model_path: PathBuf,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        intra_threads: Option<usize>,
    },
}

impl ClassifierConfig {
    pub fn stub() -> Self {
        ClassifierConfig::Stub
    }

    pub fn onnx(model_path: impl Into<PathBuf>) -> Self {
        ClassifierConfig::Onnx {
            model_path: model_path.into(),
            intra_threads: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn uses_onnx(&self) -> bool {
        matches!(self, ClassifierConfig::Onnx { .. })
    }

    /// Constructs the selected classifier. Model weights are loaded here, so
    /// a bad model path fails before the first request.
    pub fn build(&self) -> Result<Box<dyn Classify>, ClassifierError> {
        match self {
            ClassifierConfig::Stub => {
                info!("Using random stub classifier");
                Ok(Box::new(RandomClassifier::new()?))
            }
            ClassifierConfig::Onnx {
                model_path,
                intra_threads,
            } => {
                let options = OnnxOptions {
                    intra_threads: *intra_threads,
                };
                let network = OnnxNetwork::load_with(model_path, &options)?;
                Ok(Box::new(NetworkClassifier::new(network)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    #[test]
    fn parses_onnx_backend() {
        let config = ClassifierConfig::from_json_str(
            r#"{ "backend": "onnx", "model_path": "models/recycle.onnx", "intra_threads": 2 }"#,
        )
        .unwrap();
        assert_eq!(
            config,
            ClassifierConfig::Onnx {
                model_path: "models/recycle.onnx".into(),
                intra_threads: Some(2),
            }
        );
        assert!(config.uses_onnx());
    }

    #[test]
    fn intra_threads_is_optional() {
        let config =
            ClassifierConfig::from_json_str(r#"{ "backend": "onnx", "model_path": "m.onnx" }"#)
                .unwrap();
        assert_eq!(config, ClassifierConfig::onnx("m.onnx"));
    }

    #[test]
    fn parses_stub_backend() {
        let config = ClassifierConfig::from_json_str(r#"{ "backend": "stub" }"#).unwrap();
        assert_eq!(config, ClassifierConfig::stub());
        assert!(!config.uses_onnx());
    }

    #[test]
    fn rejects_unknown_backend() {
        let err = ClassifierConfig::from_json_str(r#"{ "backend": "tflite" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn onnx_requires_model_path() {
        assert!(ClassifierConfig::from_json_str(r#"{ "backend": "onnx" }"#).is_err());
    }

    #[test]
    fn missing_config_file() {
        let err = ClassifierConfig::from_json_file(Path::new("no/such/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn serialization_skips_unset_threads() {
        let config = ClassifierConfig::onnx("models/recycle.onnx");
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"backend":"onnx","model_path":"models/recycle.onnx"}"#);
    }

    #[test]
    fn builds_stub() {
        let classifier = ClassifierConfig::stub().build().unwrap();
        let result = classifier.classify(&DynamicImage::new_rgb8(2, 2)).unwrap();
        assert!((50.0..95.0).contains(&result.confidence()));
    }

    #[test]
    fn bad_model_path_fails_to_build() {
        let err = ClassifierConfig::onnx("models/missing.onnx")
            .build()
            .err()
            .unwrap();
        assert!(err.is_initialization());
    }
}
