use std::{path::Path, sync::Arc};

use crate::{
    error::Result,
    formatters::{FileFormatter, LogFormatter},
    handler::{HandlerFactory, LogHandler, Record},
    logger::Logger,
    sinks::{Encoding, FileOutputStream},
    Level, Metadata, MetadataValue,
};

/// A log file that any number of handlers append to.
#[derive(Debug, Clone)]
pub struct FileLogging {
    stream: Arc<FileOutputStream>,
}

impl FileLogging {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_encoding(path, Encoding::Utf8)
    }

    pub fn with_encoding(path: impl AsRef<Path>, encoding: Encoding) -> Result<Self> {
        let stream = FileOutputStream::new(path, encoding)?;
        Ok(Self {
            stream: Arc::new(stream),
        })
    }

    pub fn path(&self) -> &Path {
        self.stream.path()
    }

    pub fn handler(&self, label: &str) -> FileLogHandler {
        FileLogHandler::with_stream(label, Arc::clone(&self.stream))
    }

    pub fn factory(&self) -> HandlerFactory {
        let logging = self.clone();
        Arc::new(move |label: &str| -> Box<dyn LogHandler> {
            Box::new(logging.handler(label))
        })
    }

    /// Opens `path` and returns a logger for `label` writing to it.
    pub fn logger(label: &str, path: impl AsRef<Path>) -> Result<Logger> {
        let logging = Self::new(path)?;
        Ok(Logger::with_factory(label, &logging.factory()))
    }
}

/// Appends one line per record to a shared log file.
#[derive(Debug)]
pub struct FileLogHandler {
    label: String,
    log_level: Level,
    metadata: Metadata,
    pretty_metadata: String,
    stream: Arc<FileOutputStream>,
}

impl FileLogHandler {
    fn with_stream(label: &str, stream: Arc<FileOutputStream>) -> Self {
        Self {
            label: label.to_string(),
            log_level: Level::Info,
            metadata: Metadata::new(),
            pretty_metadata: String::new(),
            stream,
        }
    }

    /// A handler with a private stream to `path`, not shared with any
    /// `FileLogging`.
    pub fn open(label: &str, path: impl AsRef<Path>) -> Result<Self> {
        let stream = FileOutputStream::new(path, Encoding::Utf8)?;
        Ok(Self::with_stream(label, Arc::new(stream)))
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl LogHandler for FileLogHandler {
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
        let line = match record.metadata {
            Some(per_call) if !per_call.is_empty() => {
                let merged = self.metadata.merged(per_call).prettify();
                FileFormatter.format(&self.label, record, &merged)
            }
            _ => FileFormatter.format(&self.label, record, &self.pretty_metadata),
        };

        self.stream.write(&line);
    }
}
