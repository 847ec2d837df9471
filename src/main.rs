use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use serde_json::json;
use tracing::{error, info};

use waste_classifier::utils::{ort_init, tracing_subscriber_init};
use waste_classifier::{load_image, ClassifierConfig};

/// Classify images as Recyclable or Non-Recyclable.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("backend").required(true).args(["config", "model", "stub"])))]
struct Args {
    /// Images to classify (PNG or JPEG).
    #[arg(required = true, value_name = "IMAGE")]
    images: Vec<PathBuf>,

    /// JSON file selecting the classifier backend.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// ONNX model file, shorthand for an `onnx` backend config.
    #[arg(long, value_name = "FILE")]
    model: Option<PathBuf>,

    /// Use the random stub instead of a trained network.
    #[arg(long)]
    stub: bool,

    /// Print one JSON object per image.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn classifier_config(&self) -> anyhow::Result<ClassifierConfig> {
        Ok(match (&self.config, &self.model) {
            (Some(path), _) => ClassifierConfig::from_json_file(path)?,
            (None, Some(model)) => ClassifierConfig::onnx(model),
            (None, None) => ClassifierConfig::stub(),
        })
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber_init();

    let config = args.classifier_config()?;
    if config.uses_onnx() {
        ort_init()?;
    }
    // 模型载入失败直接退出
    let classifier = config.build()?;

    let mut failed = 0;
    for path in &args.images {
        let image = match load_image(path) {
            Ok(image) => image,
            Err(e) => {
                error!("{}: {e}", path.display());
                failed += 1;
                continue;
            }
        };
        let result = match classifier.classify(&image) {
            Ok(result) => result,
            Err(e) => {
                error!("{}: {e}", path.display());
                failed += 1;
                continue;
            }
        };

        if args.json {
            println!(
                "{}",
                json!({
                    "image": path.display().to_string(),
                    "label": result.label(),
                    "confidence": result.confidence(),
                })
            );
        } else {
            println!("{}", path.display());
            println!("{} {}", result.label().icon(), result.label());
            println!("Confidence: {:.2}%", result.confidence());
        }
    }

    check_summary(args.images.len() - failed, args.images.len())
}

/// 一张都没有分类成功时以非零状态退出
fn check_summary(classified: usize, total: usize) -> anyhow::Result<()> {
    info!("Classified {classified} of {total} images");
    anyhow::ensure!(classified > 0, "none of the {total} images could be classified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_failures_still_succeed() {
        assert!(check_summary(1, 3).is_ok());
        assert!(check_summary(2, 2).is_ok());
    }

    #[test]
    fn all_failures_exit_with_error() {
        let err = check_summary(0, 2).unwrap_err();
        assert_eq!(err.to_string(), "none of the 2 images could be classified");
    }

    #[test]
    fn backend_flags_are_exclusive() {
        assert!(Args::try_parse_from(["waste-classifier", "--stub", "a.png"]).is_ok());
        assert!(Args::try_parse_from(["waste-classifier", "a.png"]).is_err());
        assert!(Args::try_parse_from([
            "waste-classifier",
            "--stub",
            "--model",
            "m.onnx",
            "a.png"
        ])
        .is_err());
    }
}
