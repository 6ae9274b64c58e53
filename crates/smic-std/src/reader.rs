//! Locating module source text.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::trace;

/// Source text of one module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    /// Module name the source was requested under.
    pub module: String,
    /// File the text was read from, if any.
    pub path: Option<PathBuf>,
    /// Module text.
    pub text: String,
}

/// Failure to read a module that was found.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Offending file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// Supplies module source by name.
pub trait Reader {
    /// Fetch the source of `module`.
    ///
    /// Returns `Ok(None)` if the module is unknown to this reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the module was found but could not be read.
    fn read(&self, module: &str) -> Result<Option<Source>, ReaderError>;
}

/// Default file extensions tried after the bare module name.
pub const DEFAULT_EXTENSIONS: [&str; 4] = ["", ".mib", ".my", ".txt"];

/// Reads `<dir>/<module><ext>` from a list of search directories.
///
/// Directories are searched in order; within each directory the extensions
/// are tried in order. The first existing file wins.
#[derive(Clone, Debug)]
pub struct FileReader {
    dirs: Vec<PathBuf>,
    extensions: Vec<String>,
}

impl FileReader {
    /// Search `dirs` with [`DEFAULT_EXTENSIONS`].
    #[must_use]
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|&e| e.to_owned()).collect(),
        }
    }

    /// Replace the extension list.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }
}

impl Reader for FileReader {
    fn read(&self, module: &str) -> Result<Option<Source>, ReaderError> {
        for dir in &self.dirs {
            for ext in &self.extensions {
                let path = dir.join(format!("{module}{ext}"));
                if !path.is_file() {
                    continue;
                }
                trace!(module, path = %path.display(), "reading module source");
                return match fs::read(&path) {
                    Ok(bytes) => Ok(Some(Source {
                        module: module.to_owned(),
                        text: String::from_utf8_lossy(&bytes).into_owned(),
                        path: Some(path),
                    })),
                    Err(source) => Err(ReaderError::Io { path, source }),
                };
            }
        }
        Ok(None)
    }
}

/// Serves module text from memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryReader {
    modules: HashMap<String, String>,
}

impl MemoryReader {
    /// Empty reader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one module.
    #[must_use]
    pub fn with(mut self, module: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(module, text);
        self
    }

    /// Add or replace one module.
    pub fn insert(&mut self, module: impl Into<String>, text: impl Into<String>) {
        self.modules.insert(module.into(), text.into());
    }
}

impl Reader for MemoryReader {
    fn read(&self, module: &str) -> Result<Option<Source>, ReaderError> {
        Ok(self.modules.get(module).map(|text| Source {
            module: module.to_owned(),
            path: None,
            text: text.clone(),
        }))
    }
}
