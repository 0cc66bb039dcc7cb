//! Logger setup.

/// Installs the global logger. Verbose runs trace every pipeline step; quiet
/// runs still show warnings about tolerated failures.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .format_timestamp(None)
        .init();
}
