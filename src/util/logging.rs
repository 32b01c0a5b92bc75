/// Initialize env_logger once. Idempotent: subsequent calls are no-ops.
///
/// Default filter is `hts_dispatch=info` (`debug` with `verbose`); `RUST_LOG` overrides.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "hts_dispatch=debug"
    } else {
        "hts_dispatch=info"
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_millis()
        .try_init();
}
