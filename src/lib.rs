//! Logging backends that append structured records to a local file or hand
//! them to an existing console logger.
//!
//! ```no_run
//! use filelog::{FileLogging, Logger};
//!
//! let logging = FileLogging::new("/tmp/app.log")?;
//! filelog::bootstrap(logging.factory())?;
//!
//! let logger = Logger::new("app");
//! logger.error("Test Test Test");
//! # Ok::<(), filelog::FileLoggingError>(())
//! ```

pub mod bridge;
pub mod config;
pub mod console;
pub mod error;
pub mod file;
pub mod formatters;
pub mod handler;
pub mod level;
pub mod logger;
pub mod metadata;
pub mod multiplex;
pub mod sinks;
pub mod stream;

pub use bridge::{Builder, LogBridge};
pub use config::Config;
pub use console::{
    ConsoleLevel, ConsoleLogHandler, ConsoleLogger, ConsoleLogging, LogFacadeConsoleLogger,
    StderrConsoleLogger,
};
pub use error::FileLoggingError;
pub use file::{FileLogHandler, FileLogging};
pub use handler::{HandlerFactory, LogHandler, Record};
pub use level::Level;
pub use logger::{bootstrap, Logger};
pub use metadata::{Metadata, MetadataValue};
pub use multiplex::MultiplexLogHandler;
pub use sinks::Encoding;
pub use stream::StderrLogHandler;
