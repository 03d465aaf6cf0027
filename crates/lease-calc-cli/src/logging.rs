use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a compact stderr subscriber so log lines never mix with the
/// JSON/CSV written to stdout.
pub fn init(verbose: bool) {
    let default = if verbose {
        "leasecalc=debug,lease_calc_core=debug"
    } else {
        "leasecalc=warn,lease_calc_core=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .init();
}
