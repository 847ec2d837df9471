use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use ndarray::Array4;
use tracing::info;

use waste_classifier::preprocess::INPUT_SIZE;
use waste_classifier::utils::{ort_init, tracing_subscriber_init};
use waste_classifier::{Network, OnnxNetwork, OnnxOptions};

/// Time repeated forward passes of an ONNX model.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// ONNX model file.
    #[arg(long, value_name = "FILE")]
    model: PathBuf,

    #[arg(long, default_value_t = 30)]
    count: u32,

    /// Intra-op threads, defaults to all cores.
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber_init();
    ort_init()?;
    anyhow::ensure!(args.count > 0, "--count must be at least 1");

    let options = OnnxOptions {
        intra_threads: args.threads,
    };
    let model = OnnxNetwork::load_with(&args.model, &options)?;
    info!(
        "Model input: {}, output: {}",
        model.input_name(),
        model.output_name()
    );

    let size = INPUT_SIZE as usize;
    let input = Array4::<f32>::zeros((1, 3, size, size));

    let mut avg = Duration::new(0, 0);
    for _ in 0..args.count {
        let start = Instant::now();
        model.forward(input.view())?;
        let dura = start.elapsed();
        avg += dura / args.count;
        info!("Time: {:?}", dura);
    }
    info!("Avg Time: {:?}", avg);

    Ok(())
}
