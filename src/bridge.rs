use std::{cell::Cell, path::PathBuf, sync::Arc};

use eyre::Context;
use log::{LevelFilter, Log};

use crate::{
    config::Config,
    console::{ConsoleLogger, ConsoleLogging},
    file::FileLogging,
    handler::{LogHandler, Record},
    logger::Logger,
    stream::StderrLogHandler,
    Level,
};

thread_local! {
    static FORWARDING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as inside [`LogBridge::log`] until dropped.
struct ForwardingGuard;

impl ForwardingGuard {
    fn enter() -> Option<Self> {
        if FORWARDING.with(|forwarding| forwarding.replace(true)) {
            return None;
        }
        Some(Self)
    }
}

impl Drop for ForwardingGuard {
    fn drop(&mut self) {
        FORWARDING.with(|forwarding| forwarding.set(false));
    }
}

fn is_forwarding() -> bool {
    FORWARDING.with(Cell::get)
}

/// Routes `log` crate records into a [`Logger`].
///
/// A handler that logs through the `log` facade itself (for example a
/// [`ConsoleLogHandler`](crate::ConsoleLogHandler) over a
/// [`LogFacadeConsoleLogger`](crate::LogFacadeConsoleLogger)) would call back
/// into this bridge. Such nested records on the same thread are dropped.
pub struct LogBridge {
    filter: LevelFilter,
    logger: Logger,
    config: Config,
}

impl LogBridge {
    pub fn new(filter: LevelFilter, logger: Logger) -> Self {
        Self {
            filter,
            logger,
            config: Config::new(),
        }
    }

    pub fn with_config(self, config: Config) -> Self {
        Self { config, ..self }
    }

    pub fn init(self) -> eyre::Result<()> {
        log::set_max_level(self.filter);
        log::set_boxed_logger(Box::new(self)).context("Failed registering boxed logger")?;

        Ok(())
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.config.enabled
            && !is_forwarding()
            && self.filter >= metadata.level()
            && self.logger.is_enabled(metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Some(_guard) = ForwardingGuard::enter() else {
            return;
        };

        let message = record.args().to_string();
        let forwarded = Record::new(record.level().into(), &message)
            .with_source(record.target())
            .with_location(
                record.file().unwrap_or_default(),
                record.module_path().unwrap_or_default(),
                record.line().unwrap_or_default(),
            );
        self.logger.emit(&forwarded);
    }

    // Every backend writes through before `emit` returns.
    fn flush(&self) {}
}

type HandlerConstructor = Box<dyn Fn(&str, &Config) -> eyre::Result<Box<dyn LogHandler>>>;

pub struct Builder {
    filter: LevelFilter,
    label: String,
    level: Level,
    constructor: HandlerConstructor,
    config: Config,
}

impl Builder {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            filter: LevelFilter::Off,
            label: label.into(),
            level: Level::Info,
            constructor: Box::new(|label, config| {
                Ok(Box::new(StderrLogHandler::with_config(label, config.clone())))
            }),
            config: Config::new(),
        }
    }

    pub fn with_filter(self, filter: LevelFilter) -> Self {
        Self { filter, ..self }
    }

    pub fn with_level(self, level: Level) -> Self {
        Self { level, ..self }
    }

    pub fn with_config(self, config: Config) -> Self {
        Self { config, ..self }
    }

    pub fn with_file_sink(self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        Self {
            constructor: Box::new(move |label, _config| {
                let logging = FileLogging::new(&path).with_context(|| {
                    format!("Failed constructing file sink for {}", path.display())
                })?;
                Ok(Box::new(logging.handler(label)))
            }),
            ..self
        }
    }

    pub fn with_stderr_sink(self) -> Self {
        Self {
            constructor: Box::new(|label, config| {
                Ok(Box::new(StderrLogHandler::with_config(label, config.clone())))
            }),
            ..self
        }
    }

    pub fn with_console_sink(self, console: Arc<dyn ConsoleLogger>) -> Self {
        let logging = ConsoleLogging::new(console);
        Self {
            constructor: Box::new(move |label, _config| Ok(Box::new(logging.handler(label)))),
            ..self
        }
    }

    pub fn build(&self) -> eyre::Result<LogBridge> {
        let mut handler = (self.constructor)(&self.label, &self.config)?;
        handler.set_log_level(self.level);
        Ok(
            LogBridge::new(self.filter, Logger::with_handler(&self.label, handler))
                .with_config(self.config.clone()),
        )
    }
}
