/// Verbosity knob for the `tracing` subscriber the harness binary installs
/// (§9a). Mirrors the teacher's own `Verbosity` enum: a `clap::ValueEnum`
/// mapped onto a `tracing::Level`.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Silent,
    Normal,
    Verbose,
    Debug,
}

impl From<Verbosity> for tracing::Level {
    fn from(verbosity: Verbosity) -> Self {
        match verbosity {
            // `tracing` has no "off" level; `Silent` settles for the
            // quietest level it does have.
            Verbosity::Silent => tracing::Level::ERROR,
            Verbosity::Normal => tracing::Level::INFO,
            Verbosity::Verbose => tracing::Level::DEBUG,
            Verbosity::Debug => tracing::Level::TRACE,
        }
    }
}
