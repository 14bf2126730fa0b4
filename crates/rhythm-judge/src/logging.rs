use env_logger::Env;

/// Initialize logging to stderr.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects debug output for the
/// judgement crates.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "rhythm_model=debug,rhythm_input=debug,rhythm_rule=debug,rhythm_judge=debug,warn"
    } else {
        "rhythm_judge=info,warn"
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
