use std::{fs, path::Path};

use filelog::{
    formatters::FILE_TIMESTAMP_FORMAT, Encoding, FileLogging, Level, LogHandler, Logger, Metadata,
    MultiplexLogHandler, Record, StderrLogHandler,
};

fn file_size(path: &Path) -> u64 {
    fs::metadata(path).unwrap().len()
}

#[test]
fn fresh_sink_creates_an_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("LogFile.txt");

    let _logging = FileLogging::new(&path).unwrap();

    assert!(path.exists());
    assert_eq!(file_size(&path), 0);
}

#[test]
fn appends_across_logger_calls() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("LogFile.txt");
    let logging = FileLogging::new(&path).unwrap();
    let logger = Logger::with_factory("Test", &logging.factory());

    let mut sizes = Vec::new();
    for _ in 0..5 {
        logger.error("Test Test Test");
        sizes.push(file_size(&path));
    }

    assert!(sizes[0] > 0);
    for pair in sizes.windows(2) {
        assert!(pair[1] > pair[0], "file did not grow: {:?}", sizes);
    }
}

#[test]
fn appends_across_handlers_of_one_sink() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("LogFile.txt");
    let logging = FileLogging::new(&path).unwrap();

    let logger1 = Logger::with_factory("Test", &logging.factory());
    logger1.error("Test Test Test");
    let size1 = file_size(&path);

    let logger2 = Logger::with_factory("Test", &logging.factory());
    logger2.error("Test Test Test");
    let size2 = file_size(&path);

    assert!(size2 > size1);
}

#[test]
fn appends_across_constructor_calls() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("LogFile.txt");

    {
        let logger = FileLogging::logger("first", &path).unwrap();
        logger.error("written before");
    }
    let before = fs::read(&path).unwrap();
    assert!(!before.is_empty());

    let logger = FileLogging::logger("second", &path).unwrap();
    logger.error("written after");

    let after = fs::read(&path).unwrap();
    assert!(after.len() > before.len());
    assert!(after.starts_with(&before));
    assert!(String::from_utf8(after).unwrap().ends_with("| written after\n"));
}

#[test]
fn convenience_logger_writes_with_its_label() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("LogFile.txt");

    let logger = FileLogging::logger("Foobar", &path).unwrap();
    logger.error("Test Test Test");
    let size1 = file_size(&path);
    logger.error("Test Test Test");
    let size2 = file_size(&path);

    assert!(size2 > size1);
    assert!(fs::read_to_string(&path).unwrap().contains("[ Foobar ]"));
}

#[test]
fn error_line_matches_the_file_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("x.log");
    let logger = FileLogging::logger("T", &path).unwrap();

    logger.error("hello");

    let content = fs::read_to_string(&path).unwrap();
    let rest = content.strip_prefix("[ ").unwrap();
    let (timestamp, rest) = rest.split_once(" ] ").unwrap();

    assert_eq!(timestamp.len(), "2024-01-01T00:00:00+0000".len());
    assert!(matches!(timestamp.as_bytes()[19], b'+' | b'-'));
    chrono::DateTime::parse_from_str(timestamp, FILE_TIMESTAMP_FORMAT).unwrap();
    assert_eq!(rest, "[ error ] [ T ] |  | hello\n");
}

#[test]
fn per_call_metadata_wins_over_logger_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meta.log");
    let mut logger = FileLogging::logger("svc", &path).unwrap();
    logger.set_metadata_value("user", "alice");
    logger.set_metadata_value("shard", 3);

    let per_call = Metadata::from([("user", "bob")]);
    logger.log(Level::Warning, "switched", Some(&per_call));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.ends_with("[ warning ] [ svc ] | user=bob shard=3 | switched\n"));
}

#[test]
fn unencodable_message_is_dropped_silently() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ascii.log");
    let logging = FileLogging::with_encoding(&path, Encoding::Ascii).unwrap();
    let logger = Logger::with_factory("T", &logging.factory());

    logger.error("plain");
    let size = file_size(&path);
    logger.error("café");

    assert_eq!(file_size(&path), size);
}

#[test]
fn records_below_the_handler_level_are_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("level.log");
    let logger = FileLogging::logger("T", &path).unwrap();

    logger.debug("not written");
    assert_eq!(file_size(&path), 0);

    logger.notice("written");
    assert!(file_size(&path) > 0);
}

#[test]
fn logs_to_both_file_and_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("both.log");
    let logging = FileLogging::new(&path).unwrap();

    let handlers: Vec<Box<dyn LogHandler>> = vec![
        Box::new(logging.handler("Test")),
        Box::new(StderrLogHandler::new("Test")),
    ];
    let logger = Logger::with_handler("Test", Box::new(MultiplexLogHandler::new(handlers)));

    logger.error("Test Test Test");

    assert!(fs::read_to_string(&path)
        .unwrap()
        .ends_with("[ error ] [ Test ] |  | Test Test Test\n"));
}

#[test]
fn concurrent_handlers_write_whole_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("threads.log");
    let logging = FileLogging::new(&path).unwrap();

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let handler = logging.handler(&format!("worker-{}", worker));
            scope.spawn(move || {
                for i in 0..50 {
                    let message = format!("message {}", i);
                    handler.emit(&Record::new(Level::Info, &message));
                }
            });
        }
    });

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 200);
    assert!(content
        .lines()
        .all(|line| line.starts_with("[ ") && line.contains("] [ info ] [ worker-")));
}
