use std::{
    fmt,
    fs::{File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::error::{FileLoggingError, Result};

/// Text encoding applied to every line before it hits the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Ascii,
    Latin1,
}

impl Encoding {
    /// Returns `None` when `text` has a character outside the encoding.
    pub fn encode(&self, text: &str) -> Option<Vec<u8>> {
        match self {
            Encoding::Utf8 => Some(text.as_bytes().to_vec()),
            Encoding::Ascii => text.is_ascii().then(|| text.as_bytes().to_vec()),
            Encoding::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).ok())
                .collect(),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Utf8 => f.write_str("utf8"),
            Encoding::Ascii => f.write_str("ascii"),
            Encoding::Latin1 => f.write_str("latin1"),
        }
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "utf8" => Ok(Encoding::Utf8),
            "ascii" | "usascii" => Ok(Encoding::Ascii),
            "latin1" | "iso88591" => Ok(Encoding::Latin1),
            other => Err(format!("unsupported encoding '{}'", other)),
        }
    }
}

/// An append-only file shared by every handler of one `FileLogging`.
///
/// Each line goes out in a single `write` on a handle opened with
/// `O_APPEND`, so there is no lock here: interleaving between concurrent
/// writers is left to the operating system's append primitive.
#[derive(Debug)]
pub struct FileOutputStream {
    file: File,
    file_path: PathBuf,
    encoding: Encoding,
}

impl FileOutputStream {
    pub fn new(path: impl AsRef<Path>, encoding: Encoding) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            match OpenOptions::new().write(true).create_new(true).open(path) {
                Ok(_) => tracing::debug!(target: "filelog", "created log file {}", path.display()),
                // Lost a race with another creator, the file is there now.
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(source) => {
                    return Err(FileLoggingError::ResourceCreation {
                        path: path.to_path_buf(),
                        source,
                    })
                }
            }
        }

        let file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|source| FileLoggingError::ResourceOpen {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(target: "filelog", "opened {} for appending ({})", path.display(), encoding);

        Ok(Self {
            file,
            file_path: path.to_path_buf(),
            encoding,
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Appends `text`. Text the encoding can't represent is dropped, and so
    /// is a failed write; neither reaches the caller.
    pub fn write(&self, text: &str) {
        let Some(bytes) = self.encoding.encode(text) else {
            tracing::debug!(
                target: "filelog",
                "dropping write to {}: text not representable in {}",
                self.file_path.display(),
                self.encoding
            );
            return;
        };

        if let Err(e) = (&self.file).write_all(&bytes) {
            tracing::warn!(target: "filelog", "failed appending to {}: {}", self.file_path.display(), e);
        }
    }
}
