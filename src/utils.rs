use tracing_subscriber::EnvFilter;

/// 默认 info 级别，可通过 RUST_LOG 覆盖；日志写到 stderr，stdout 只留给结果
pub fn tracing_subscriber_init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// 需在加载模型之前调用，否则 ONNX Runtime 使用默认环境
pub fn ort_init() -> Result<(), ort::Error> {
    ort::init().with_name("waste-classifier").commit()
}
