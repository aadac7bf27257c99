use crate::network::family::IgnoreOption;

#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Suppresses informational output; only warnings and errors are shown.
    pub quiet: bool,
    /// Family exclusion applied to every converter that does not set its own.
    pub only: IgnoreOption,
    /// Treats a missing remove target as an error instead of a warning.
    pub strict: bool,
}
