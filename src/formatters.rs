use yansi::Paint;

use crate::{config::Config, handler::Record, Level};

/// Timestamp layout of the file format: local time with numeric offset.
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

pub trait LogFormatter: Sync + Send {
    fn format(&self, label: &str, record: &Record<'_>, metadata: &str) -> String;
}

pub fn file_timestamp() -> String {
    chrono::Local::now().format(FILE_TIMESTAMP_FORMAT).to_string()
}

/// `[ <timestamp> ] [ <level> ] [ <label> ] | <metadata> | <message>` plus a
/// trailing newline. Call-site details are not part of the line.
pub struct FileFormatter;

impl LogFormatter for FileFormatter {
    fn format(&self, label: &str, record: &Record<'_>, metadata: &str) -> String {
        format!(
            "[ {} ] [ {} ] [ {} ] | {} | {}\n",
            file_timestamp(),
            record.level,
            label,
            metadata,
            record.message
        )
    }
}

/// Human oriented single line used on stderr.
pub struct DefaultFormatter {
    config: Config,
}

impl DefaultFormatter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn timestamp(&self) -> String {
        let time = chrono::Local::now()
            .format(&self.config.datetime_format)
            .to_string();
        let time = format!("[{}]", time);

        if self.config.use_ansi {
            time.bright_black().to_string()
        } else {
            time
        }
    }

    fn format_level(&self, level: Level) -> String {
        let short = match level {
            Level::Trace => "TRC",
            Level::Debug => "DEB",
            Level::Info => "INF",
            Level::Notice => "NOT",
            Level::Warning => "WRN",
            Level::Error => "ERR",
            Level::Critical => "CRT",
        };

        if !self.config.use_ansi {
            return short.to_string();
        }

        match level {
            Level::Trace => short.white().to_string(),
            Level::Debug => short.blue().to_string(),
            Level::Info => short.green().to_string(),
            Level::Notice => short.cyan().to_string(),
            Level::Warning => short.yellow().to_string(),
            Level::Error => short.red().to_string(),
            Level::Critical => short.red().bold().to_string(),
        }
    }

    fn format_msg(&self, message: &str) -> String {
        if self.config.use_ansi {
            message.bold().to_string()
        } else {
            message.to_string()
        }
    }
}

impl LogFormatter for DefaultFormatter {
    fn format(&self, label: &str, record: &Record<'_>, metadata: &str) -> String {
        let mut line = format!(
            "{} {} {}:",
            self.timestamp(),
            self.format_level(record.level),
            label
        );
        if !metadata.is_empty() {
            line.push(' ');
            line.push_str(metadata);
        }
        line.push(' ');
        line.push_str(&self.format_msg(record.message));
        line
    }
}
