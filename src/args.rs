use std::path::PathBuf;

use clap::Parser;
use filelog::{Encoding, Level};

#[derive(Parser, Debug)]
#[command(version)]
#[command(about = "Append a single log record to a local file.", long_about = None)]
pub struct Args {
    #[arg(short, long, value_name = "PATH", help = "The log file to append to. Created when missing.")]
    pub file: PathBuf,

    #[arg(short, long, default_value = "filelog", help = "Label written in the record.")]
    pub label: String,

    #[arg(long, default_value_t = Level::Info)]
    pub level: Level,

    #[arg(
        short = 'm',
        long = "meta",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Metadata attached to the record, can be repeated."
    )]
    pub metadata: Vec<(String, String)>,

    #[arg(long, default_value_t = Encoding::Utf8, help = "utf8, ascii or latin1.")]
    pub encoding: Encoding,

    #[arg(
        long,
        short = 'v',
        action = clap::ArgAction::Count,
        help = "Write diagnostics to stderr, repeat for more detail."
    )]
    pub verbose: u8,

    pub message: String,
}

impl Args {
    pub fn tracing_level(&self) -> Option<tracing::Level> {
        match self.verbose {
            0 => None,
            1 => Some(tracing::Level::WARN),
            2 => Some(tracing::Level::DEBUG),
            _ => Some(tracing::Level::TRACE),
        }
    }
}

fn parse_key_value(s: &str) -> eyre::Result<(String, String)> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(eyre::eyre!("expected KEY=VALUE, got '{}'", s)),
    }
}
