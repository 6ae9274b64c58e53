//! Persisting backend output.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Receives rendered module output.
pub trait Writer {
    /// Store `bytes` rendered for `module` with file suffix `suffix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be stored.
    fn write(&self, module: &str, suffix: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Writes `<dir>/<module><suffix>`, creating `dir` if needed.
#[derive(Clone, Debug)]
pub struct FileWriter {
    dir: PathBuf,
}

impl FileWriter {
    /// Write into `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path that output for `module` lands at.
    #[must_use]
    pub fn path(&self, module: &str, suffix: &str) -> PathBuf {
        self.dir.join(format!("{module}{suffix}"))
    }
}

impl Writer for FileWriter {
    fn write(&self, module: &str, suffix: &str, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(module, suffix), bytes)
    }
}

/// Hands output to a closure.
pub struct CallbackWriter<F>(pub F);

impl<F> Writer for CallbackWriter<F>
where
    F: Fn(&str, &str, &[u8]) -> io::Result<()>,
{
    fn write(&self, module: &str, suffix: &str, bytes: &[u8]) -> io::Result<()> {
        (self.0)(module, suffix, bytes)
    }
}
