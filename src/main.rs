//! fruitrun CLI entry point

fn main() {
    // Logs go to stderr so the summary on stdout stays clean
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    fruitrun::cli::run();
}
