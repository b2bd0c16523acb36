/// Presentation settings for the stderr backends. The file format is fixed
/// and does not read any of this.
#[derive(Debug, Clone)]
pub struct Config {
    pub enabled: bool,
    pub datetime_format: String,
    pub use_ansi: bool,
}

impl Config {
    pub fn new() -> Self {
        Self {
            enabled: true,
            datetime_format: "%Y-%m-%d %H:%M:%S".to_string(),
            use_ansi: yansi::Condition::stderr_is_tty(),
        }
    }

    pub fn with_ansi(self, use_ansi: bool) -> Self {
        Self { use_ansi, ..self }
    }

    pub fn with_datetime_format(self, datetime_format: impl Into<String>) -> Self {
        Self {
            datetime_format: datetime_format.into(),
            ..self
        }
    }

    pub fn with_enabled(self, enabled: bool) -> Self {
        Self { enabled, ..self }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
