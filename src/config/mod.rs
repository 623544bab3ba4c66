pub const DEFAULT_EDITOR: &str = "vi";

/// Runtime configuration, resolved once at startup from the environment
/// and threaded into every function that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Echo every git invocation and dump raw listing output (DEBUG).
    pub debug: bool,
    /// Print deletion commands instead of running them (DRY_RUN).
    pub dry_run: bool,
    /// Editor program for the interactive listing (EDITOR).
    pub editor: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            debug: std::env::var("DEBUG").is_ok(),
            dry_run: std::env::var("DRY_RUN").is_ok(),
            editor: std::env::var("EDITOR").unwrap_or_else(|_| DEFAULT_EDITOR.to_string()),
        }
    }

    /// Fold the --dry-run flag into the environment-derived value.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = self.dry_run || dry_run;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            dry_run: false,
            editor: DEFAULT_EDITOR.to_string(),
        }
    }
}
