use std::{fs, sync::Arc};

use filelog::{
    ConsoleLogging, FileLogging, LogBridge, LogFacadeConsoleLogger, LogHandler, Logger,
    MultiplexLogHandler,
};
use log::LevelFilter;

// The bridge becomes the global `log` logger, so this file holds one test.
#[test]
fn facade_console_behind_the_bridge_does_not_recurse() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bridge.log");
    let file = FileLogging::new(&path).unwrap();
    let console = ConsoleLogging::new(Arc::new(LogFacadeConsoleLogger::new("loop")));

    let handlers: Vec<Box<dyn LogHandler>> =
        vec![Box::new(file.handler("loop")), Box::new(console.handler("loop"))];
    let logger = Logger::with_handler("loop", Box::new(MultiplexLogHandler::new(handlers)));
    LogBridge::new(LevelFilter::Trace, logger).init().unwrap();

    log::error!(target: "loop", "boom");
    log::warn!(target: "loop", "again");

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 2, "{:?}", lines);
    assert!(lines[0].ends_with("[ error ] [ loop ] |  | boom"));
    assert!(lines[1].ends_with("[ warning ] [ loop ] |  | again"));
}
