use std::{
    panic::Location,
    sync::{Arc, OnceLock},
};

use crate::{
    error::{FileLoggingError, Result},
    handler::{HandlerFactory, LogHandler, Record},
    stream::StderrLogHandler,
    Level, Metadata, MetadataValue,
};

static FACTORY: OnceLock<HandlerFactory> = OnceLock::new();

/// Installs the factory used by [`Logger::new`]. Works once per process.
pub fn bootstrap(factory: HandlerFactory) -> Result<()> {
    FACTORY
        .set(factory)
        .map_err(|_| FileLoggingError::AlreadyBootstrapped)?;

    tracing::debug!(target: "filelog", "logging system bootstrapped");
    Ok(())
}

fn current_factory() -> HandlerFactory {
    match FACTORY.get() {
        Some(factory) => Arc::clone(factory),
        None => Arc::new(|label: &str| -> Box<dyn LogHandler> {
            Box::new(StderrLogHandler::new(label))
        }),
    }
}

/// A labelled entry point in front of one handler. Records below the
/// handler's level are dropped here, before the handler sees them.
pub struct Logger {
    label: String,
    handler: Box<dyn LogHandler>,
}

impl Logger {
    /// Logger built by the bootstrapped factory, or logging to stderr when
    /// nothing was bootstrapped.
    pub fn new(label: &str) -> Self {
        Self::with_factory(label, &current_factory())
    }

    pub fn with_factory(label: &str, factory: &HandlerFactory) -> Self {
        Self::with_handler(label, factory(label))
    }

    pub fn with_handler(label: &str, handler: Box<dyn LogHandler>) -> Self {
        Self {
            label: label.to_string(),
            handler,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn log_level(&self) -> Level {
        self.handler.log_level()
    }

    pub fn set_log_level(&mut self, level: Level) {
        self.handler.set_log_level(level);
    }

    pub fn metadata_value(&self, key: &str) -> Option<&MetadataValue> {
        self.handler.metadata_value(key)
    }

    pub fn set_metadata_value(&mut self, key: &str, value: impl Into<MetadataValue>) {
        self.handler.set_metadata_value(key, Some(value.into()));
    }

    pub fn remove_metadata_value(&mut self, key: &str) {
        self.handler.set_metadata_value(key, None);
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.handler.log_level()
    }

    /// Hands a fully built record to the handler if its level passes.
    pub fn emit(&self, record: &Record<'_>) {
        if self.is_enabled(record.level) {
            self.handler.emit(record);
        }
    }

    #[track_caller]
    pub fn log(&self, level: Level, message: &str, metadata: Option<&Metadata>) {
        if !self.is_enabled(level) {
            return;
        }

        let location = Location::caller();
        let record = Record {
            level,
            message,
            metadata,
            source: &self.label,
            file: location.file(),
            function: "",
            line: location.line(),
        };
        self.handler.emit(&record);
    }

    #[track_caller]
    pub fn trace(&self, message: &str) {
        self.log(Level::Trace, message, None);
    }

    #[track_caller]
    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message, None);
    }

    #[track_caller]
    pub fn info(&self, message: &str) {
        self.log(Level::Info, message, None);
    }

    #[track_caller]
    pub fn notice(&self, message: &str) {
        self.log(Level::Notice, message, None);
    }

    #[track_caller]
    pub fn warning(&self, message: &str) {
        self.log(Level::Warning, message, None);
    }

    #[track_caller]
    pub fn error(&self, message: &str) {
        self.log(Level::Error, message, None);
    }

    #[track_caller]
    pub fn critical(&self, message: &str) {
        self.log(Level::Critical, message, None);
    }
}
