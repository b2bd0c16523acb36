use std::io::{self, Write};

use crate::{
    config::Config,
    formatters::{DefaultFormatter, LogFormatter},
    handler::{LogHandler, Record},
    Level, Metadata, MetadataValue,
};

/// Writes `line` plus a newline. A failed write is reported through
/// `tracing` and otherwise ignored, since emit has no error channel.
pub(crate) fn write_line(writer: &mut impl Write, line: &str) -> bool {
    match writeln!(writer, "{}", line) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(target: "filelog", "failed writing log line to stderr: {}", e);
            false
        }
    }
}

/// Writes one line per record to stderr. This is what a [`crate::Logger`]
/// uses when no factory has been bootstrapped.
pub struct StderrLogHandler {
    label: String,
    log_level: Level,
    metadata: Metadata,
    pretty_metadata: String,
    formatter: Box<dyn LogFormatter>,
    config: Config,
}

impl StderrLogHandler {
    pub fn new(label: &str) -> Self {
        Self::with_config(label, Config::new())
    }

    pub fn with_config(label: &str, config: Config) -> Self {
        Self {
            label: label.to_string(),
            log_level: Level::Info,
            metadata: Metadata::new(),
            pretty_metadata: String::new(),
            formatter: Box::new(DefaultFormatter::new(config.clone())),
            config,
        }
    }

    fn format(&self, record: &Record<'_>) -> String {
        match record.metadata {
            Some(per_call) if !per_call.is_empty() => {
                let merged = self.metadata.merged(per_call).prettify();
                self.formatter.format(&self.label, record, &merged)
            }
            _ => self
                .formatter
                .format(&self.label, record, &self.pretty_metadata),
        }
    }
}

impl LogHandler for StderrLogHandler {
    fn log_level(&self) -> Level {
        self.log_level
    }

    fn set_log_level(&mut self, level: Level) {
        self.log_level = level;
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn set_metadata(&mut self, metadata: Metadata) {
        self.pretty_metadata = metadata.prettify();
        self.metadata = metadata;
    }

    fn set_metadata_value(&mut self, key: &str, value: Option<MetadataValue>) {
        self.metadata.set(key, value);
        self.pretty_metadata = self.metadata.prettify();
    }

    fn emit(&self, record: &Record<'_>) {
        if !self.config.enabled {
            return;
        }

        let line = self.format(record);
        write_line(&mut io::stderr().lock(), &line);
    }
}
