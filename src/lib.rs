pub mod classifier;
pub mod config;
pub mod error;
pub mod input;
pub mod label;
pub mod network;
pub mod onnx;
pub mod preprocess;
pub mod stub;
pub mod utils;

pub use classifier::{ClassificationResult, Classify, NetworkClassifier};
pub use config::{ClassifierConfig, ConfigError};
pub use error::ClassifierError;
pub use input::{decode_image, load_image, InputError};
pub use label::{Label, LABELS};
pub use network::Network;
pub use onnx::{OnnxNetwork, OnnxOptions};
pub use preprocess::Preprocessor;
pub use stub::RandomClassifier;
