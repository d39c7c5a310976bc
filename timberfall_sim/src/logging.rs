// Logging helpers.
//
// The crate logs through the `log` facade. Per-step traces of the searches
// and the removal loop are only emitted when `debug-mode` is on, under the
// `timberfall::debug` target, so a host can route them separately.
// `init()` installs `env_logger` for the `chop` binary.

/// Log target of the `debug-mode` traces.
pub const DEBUG_TARGET: &str = "timberfall::debug";

/// Emit a trace line when `$config.debug_mode` is set.
#[macro_export]
macro_rules! debug_trace {
    ($config:expr, $($arg:tt)+) => {
        if $config.debug_mode {
            log::info!(target: $crate::logging::DEBUG_TARGET, "[Debug] {}", format_args!($($arg)+));
        }
    };
}

/// Install `env_logger` with a default filter of `info`. Override with
/// `RUST_LOG`.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
