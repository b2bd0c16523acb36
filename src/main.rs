mod args;

use std::process::ExitCode;

use clap::Parser;
use eyre::Context;
use filelog::{FileLogging, Level, Logger, Metadata, Record};
use yansi::{Condition, Paint};

use crate::args::Args;

fn setup_tracing(args: &Args) {
    if let Some(level) = args.tracing_level() {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(level)
            .init();
    }
}

fn run(args: Args) -> eyre::Result<()> {
    setup_tracing(&args);

    let logging = FileLogging::with_encoding(&args.file, args.encoding)
        .with_context(|| format!("Failed setting up file logging for {}", args.file.display()))?;

    let mut logger = Logger::with_factory(&args.label, &logging.factory());
    logger.set_log_level(Level::Trace);

    let metadata: Metadata = args.metadata.into_iter().collect();
    let record = Record::new(args.level, &args.message)
        .with_metadata(&metadata)
        .with_source(&args.label)
        .with_location(file!(), "main", line!());
    logger.emit(&record);

    tracing::debug!(target: "filelog", "appended {} record to {}", args.level, args.file.display());
    Ok(())
}

fn error_report(err: &eyre::Report, use_ansi: bool) -> String {
    let report = format!("Error: {}\n\nCaused by:\n  {}", err, err.root_cause());

    if use_ansi {
        report.red().whenever(Condition::ALWAYS).to_string()
    } else {
        report
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Err(err) => {
            eprintln!("{}", error_report(&err, Condition::stderr_is_tty()));
            ExitCode::from(1)
        }
        Ok(_) => ExitCode::from(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_report_is_plain_without_ansi() {
        let err = eyre::eyre!("disk full").wrap_err("Failed setting up file logging");

        let report = error_report(&err, false);

        assert_eq!(
            report,
            "Error: Failed setting up file logging\n\nCaused by:\n  disk full"
        );
        assert!(!report.contains('\x1b'));
    }

    #[test]
    fn error_report_is_red_with_ansi() {
        let err = eyre::eyre!("disk full");

        let report = error_report(&err, true);

        assert!(report.contains("disk full"));
        assert!(report.contains('\x1b'));
    }
}
