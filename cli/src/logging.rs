use tracing_subscriber::EnvFilter;

const VERBOSE_DIRECTIVES: &str = "goproxy_client=debug,goproxyclient=debug";
const QUIET_DIRECTIVES: &str = "warn";

/// Filter directives: `RUST_LOG` when set, else a default that `--verbose` raises to debug
fn directives(verbose: bool, rust_log: Option<String>) -> String {
    rust_log
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| {
            if verbose {
                VERBOSE_DIRECTIVES
            } else {
                QUIET_DIRECTIVES
            }
            .to_string()
        })
}

/// Install the stderr subscriber
pub fn init(verbose: bool) {
    let directives = directives(verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(QUIET_DIRECTIVES));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}
