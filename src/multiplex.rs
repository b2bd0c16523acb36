use crate::{
    handler::{LogHandler, Record},
    Level, Metadata, MetadataValue,
};

/// Sends every record to several handlers, e.g. a file and stderr at once.
///
/// The effective level is the most verbose of the children; each child still
/// only receives records at or above its own level.
pub struct MultiplexLogHandler {
    handlers: Vec<Box<dyn LogHandler>>,
    metadata: Metadata,
}

impl MultiplexLogHandler {
    pub fn new(handlers: Vec<Box<dyn LogHandler>>) -> Self {
        let mut multiplex = Self {
            handlers,
            metadata: Metadata::new(),
        };
        multiplex.refresh_metadata();
        multiplex
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    // Earlier handlers win on conflicting keys.
    fn refresh_metadata(&mut self) {
        let mut metadata = Metadata::new();
        for handler in &self.handlers {
            for (key, value) in handler.metadata().iter() {
                if !metadata.contains_key(key) {
                    metadata.insert(key, value.clone());
                }
            }
        }
        self.metadata = metadata;
    }
}

impl LogHandler for MultiplexLogHandler {
    fn log_level(&self) -> Level {
        self.handlers
            .iter()
            .map(|handler| handler.log_level())
            .min()
            .unwrap_or_default()
    }

    fn set_log_level(&mut self, level: Level) {
        for handler in &mut self.handlers {
            handler.set_log_level(level);
        }
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn set_metadata(&mut self, metadata: Metadata) {
        for handler in &mut self.handlers {
            handler.set_metadata(metadata.clone());
        }
        self.metadata = metadata;
    }

    fn metadata_value(&self, key: &str) -> Option<&MetadataValue> {
        self.handlers
            .iter()
            .find_map(|handler| handler.metadata_value(key))
    }

    fn set_metadata_value(&mut self, key: &str, value: Option<MetadataValue>) {
        for handler in &mut self.handlers {
            handler.set_metadata_value(key, value.clone());
        }
        self.refresh_metadata();
    }

    fn emit(&self, record: &Record<'_>) {
        for handler in &self.handlers {
            if record.level >= handler.log_level() {
                handler.emit(record);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileLogging;

    #[test]
    fn fans_out_by_child_level() {
        let dir = tempfile::tempdir().unwrap();
        let verbose_path = dir.path().join("verbose.log");
        let errors_path = dir.path().join("errors.log");

        let verbose = FileLogging::new(&verbose_path).unwrap().handler("m");
        let mut errors = FileLogging::new(&errors_path).unwrap().handler("m");
        errors.set_log_level(Level::Error);

        let handlers: Vec<Box<dyn LogHandler>> = vec![Box::new(errors), Box::new(verbose)];
        let mut multiplex = MultiplexLogHandler::new(handlers);
        assert_eq!(multiplex.log_level(), Level::Info);

        multiplex.emit(&Record::new(Level::Info, "routine"));
        multiplex.emit(&Record::new(Level::Error, "broken"));

        let verbose = std::fs::read_to_string(&verbose_path).unwrap();
        let errors = std::fs::read_to_string(&errors_path).unwrap();
        assert_eq!(verbose.lines().count(), 2);
        assert_eq!(errors.lines().count(), 1);
        assert!(errors.ends_with("| broken\n"));

        multiplex.set_log_level(Level::Critical);
        assert_eq!(multiplex.log_level(), Level::Critical);
    }

    #[test]
    fn metadata_reaches_every_child() {
        let dir = tempfile::tempdir().unwrap();
        let logging = FileLogging::new(dir.path().join("meta.log")).unwrap();

        let handlers: Vec<Box<dyn LogHandler>> = vec![
            Box::new(logging.handler("a")),
            Box::new(logging.handler("b")),
        ];
        let mut multiplex = MultiplexLogHandler::new(handlers);
        multiplex.set_metadata_value("trace", Some("t-1".into()));

        assert_eq!(multiplex.metadata_value("trace"), Some(&MetadataValue::from("t-1")));
        assert_eq!(multiplex.metadata().prettify(), "trace=t-1");
        assert_eq!(multiplex.len(), 2);
    }
}
