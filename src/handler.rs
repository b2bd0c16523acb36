use std::sync::Arc;

use crate::{Level, Metadata, MetadataValue};

/// One log call as it reaches a handler. Level filtering has already
/// happened by the time a handler sees it.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub level: Level,
    pub message: &'a str,
    pub metadata: Option<&'a Metadata>,
    pub source: &'a str,
    pub file: &'a str,
    pub function: &'a str,
    pub line: u32,
}

impl<'a> Record<'a> {
    pub fn new(level: Level, message: &'a str) -> Self {
        Self {
            level,
            message,
            metadata: None,
            source: "",
            file: "",
            function: "",
            line: 0,
        }
    }

    pub fn with_metadata(self, metadata: &'a Metadata) -> Self {
        Self {
            metadata: Some(metadata),
            ..self
        }
    }

    pub fn with_source(self, source: &'a str) -> Self {
        Self { source, ..self }
    }

    pub fn with_location(self, file: &'a str, function: &'a str, line: u32) -> Self {
        Self {
            file,
            function,
            line,
            ..self
        }
    }
}

/// A logging backend: a level threshold, a metadata mapping and an emit
/// entry point. `emit` has no error channel; backends deal with their own
/// failures.
pub trait LogHandler: Send + Sync {
    fn log_level(&self) -> Level;
    fn set_log_level(&mut self, level: Level);

    fn metadata(&self) -> &Metadata;
    fn set_metadata(&mut self, metadata: Metadata);

    fn metadata_value(&self, key: &str) -> Option<&MetadataValue> {
        self.metadata().get(key)
    }

    fn set_metadata_value(&mut self, key: &str, value: Option<MetadataValue>) {
        let mut metadata = self.metadata().clone();
        metadata.set(key, value);
        self.set_metadata(metadata);
    }

    fn emit(&self, record: &Record<'_>);
}

/// Builds the handler for a logger label.
pub type HandlerFactory = Arc<dyn Fn(&str) -> Box<dyn LogHandler> + Send + Sync>;
