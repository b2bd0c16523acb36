use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileLoggingError {
    #[error("Failed creating log file {}", path.display())]
    ResourceCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed opening log file {} for writing", path.display())]
    ResourceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("The logging system was already bootstrapped")]
    AlreadyBootstrapped,
}

pub type Result<T> = std::result::Result<T, FileLoggingError>;
