use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber when `RUST_LOG` is set.
///
/// Without it nothing is logged, so a failing run leaves exactly one
/// diagnostic line on stderr.
pub fn init() {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_none() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
