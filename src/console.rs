use std::{fmt, io, sync::Arc};

use yansi::Paint;

use crate::{
    config::Config,
    handler::{HandlerFactory, LogHandler, Record},
    logger::Logger,
    stream::write_line,
    Level, Metadata,
};

/// Levels understood by console loggers, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConsoleLevel {
    Verbose,
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Severe,
    Alert,
    Emergency,
    None,
}

impl fmt::Display for ConsoleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConsoleLevel::Verbose => "Verbose",
            ConsoleLevel::Debug => "Debug",
            ConsoleLevel::Info => "Info",
            ConsoleLevel::Notice => "Notice",
            ConsoleLevel::Warning => "Warning",
            ConsoleLevel::Error => "Error",
            ConsoleLevel::Severe => "Severe",
            ConsoleLevel::Alert => "Alert",
            ConsoleLevel::Emergency => "Emergency",
            ConsoleLevel::None => "None",
        };
        f.write_str(name)
    }
}

impl From<Level> for ConsoleLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => ConsoleLevel::Verbose,
            Level::Debug => ConsoleLevel::Debug,
            Level::Info => ConsoleLevel::Info,
            Level::Notice => ConsoleLevel::Notice,
            Level::Warning => ConsoleLevel::Warning,
            Level::Error => ConsoleLevel::Error,
            Level::Critical => ConsoleLevel::Severe,
        }
    }
}

/// An already configured console logger owned by the caller.
///
/// `message` is only called when the logger is going to print the record,
/// and then exactly once, on the calling thread.
pub trait ConsoleLogger: Send + Sync {
    fn is_enabled_for(&self, level: ConsoleLevel) -> bool;

    fn logln(
        &self,
        level: ConsoleLevel,
        function: &str,
        file: &str,
        line: u32,
        user_info: &Metadata,
        message: &dyn Fn() -> String,
    );
}

#[derive(Clone)]
pub struct ConsoleLogging {
    logger: Arc<dyn ConsoleLogger>,
}

impl ConsoleLogging {
    pub fn new(logger: Arc<dyn ConsoleLogger>) -> Self {
        Self { logger }
    }

    pub fn handler(&self, label: &str) -> ConsoleLogHandler {
        ConsoleLogHandler::new(label, Arc::clone(&self.logger))
    }

    pub fn factory(&self) -> HandlerFactory {
        let logging = self.clone();
        Arc::new(move |label: &str| -> Box<dyn LogHandler> {
            Box::new(logging.handler(label))
        })
    }

    pub fn logger(label: &str, logger: Arc<dyn ConsoleLogger>) -> Logger {
        Logger::with_factory(label, &Self::new(logger).factory())
    }
}

/// Forwards records to a [`ConsoleLogger`].
pub struct ConsoleLogHandler {
    label: String,
    log_level: Level,
    metadata: Metadata,
    logger: Arc<dyn ConsoleLogger>,
}

impl ConsoleLogHandler {
    pub fn new(label: &str, logger: Arc<dyn ConsoleLogger>) -> Self {
        Self {
            label: label.to_string(),
            log_level: Level::Info,
            metadata: Metadata::new(),
            logger,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl LogHandler for ConsoleLogHandler {
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
        self.metadata = metadata;
    }

    // Per-call metadata replaces the stored metadata here instead of being
    // merged into it.
    fn emit(&self, record: &Record<'_>) {
        let user_info = record.metadata.unwrap_or(&self.metadata);
        let message = record.message;

        self.logger.logln(
            record.level.into(),
            record.function,
            record.file,
            record.line,
            user_info,
            &|| message.to_string(),
        );
    }
}

/// Prints to stderr everything at or above `output_level`.
pub struct StderrConsoleLogger {
    output_level: ConsoleLevel,
    config: Config,
}

impl StderrConsoleLogger {
    pub fn new(config: Config) -> Self {
        Self {
            output_level: ConsoleLevel::Debug,
            config,
        }
    }

    pub fn with_output_level(self, output_level: ConsoleLevel) -> Self {
        Self {
            output_level,
            ..self
        }
    }

    fn format_line(
        &self,
        level: ConsoleLevel,
        function: &str,
        file: &str,
        line: u32,
        user_info: &Metadata,
        message: &str,
    ) -> String {
        let time = chrono::Local::now().format(&self.config.datetime_format);
        let level = format!("[{}]", level);
        let level = if self.config.use_ansi {
            level.bold().to_string()
        } else {
            level
        };

        let mut out = format!(
            "{} {} [{}:{}] {} > {}",
            time, level, file, line, function, message
        );
        if !user_info.is_empty() {
            out.push_str(&format!(" {{{}}}", user_info.prettify()));
        }
        out
    }
}

impl ConsoleLogger for StderrConsoleLogger {
    fn is_enabled_for(&self, level: ConsoleLevel) -> bool {
        self.config.enabled && level != ConsoleLevel::None && level >= self.output_level
    }

    fn logln(
        &self,
        level: ConsoleLevel,
        function: &str,
        file: &str,
        line: u32,
        user_info: &Metadata,
        message: &dyn Fn() -> String,
    ) {
        if !self.is_enabled_for(level) {
            return;
        }

        let text = self.format_line(level, function, file, line, user_info, &message());
        write_line(&mut io::stderr().lock(), &text);
    }
}

/// Hands records to whatever `log` implementation is installed.
#[derive(Debug, Default, Clone)]
pub struct LogFacadeConsoleLogger {
    target: String,
}

impl LogFacadeConsoleLogger {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    fn log_level(level: ConsoleLevel) -> Option<log::Level> {
        match level {
            ConsoleLevel::Verbose => Some(log::Level::Trace),
            ConsoleLevel::Debug => Some(log::Level::Debug),
            ConsoleLevel::Info | ConsoleLevel::Notice => Some(log::Level::Info),
            ConsoleLevel::Warning => Some(log::Level::Warn),
            ConsoleLevel::Error
            | ConsoleLevel::Severe
            | ConsoleLevel::Alert
            | ConsoleLevel::Emergency => Some(log::Level::Error),
            ConsoleLevel::None => None,
        }
    }
}

impl ConsoleLogger for LogFacadeConsoleLogger {
    fn is_enabled_for(&self, level: ConsoleLevel) -> bool {
        match Self::log_level(level) {
            Some(level) => log::log_enabled!(target: self.target.as_str(), level),
            None => false,
        }
    }

    fn logln(
        &self,
        level: ConsoleLevel,
        function: &str,
        file: &str,
        line: u32,
        user_info: &Metadata,
        message: &dyn Fn() -> String,
    ) {
        let Some(log_level) = Self::log_level(level) else {
            return;
        };
        if !self.is_enabled_for(level) {
            return;
        }

        let text = message();
        let args = if user_info.is_empty() {
            format!("{} > {}", function, text)
        } else {
            format!("{} > {} {}", function, text, user_info.prettify())
        };

        log::logger().log(
            &log::Record::builder()
                .level(log_level)
                .target(&self.target)
                .file(Some(file))
                .line(Some(line))
                .args(format_args!("{}", args))
                .build(),
        );
    }
}
