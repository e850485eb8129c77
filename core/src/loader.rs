//! Native support-library loading.
//!
//! The loader runs first during bootstrap. Any failure is fatal: nothing else
//! in the host can run without the native libraries, so there is no retry.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use satchel_config::NativeConfig;

#[derive(Debug, Error)]
pub enum NativeLoadError {
    #[error("native library directory {} is not accessible: {source}", path.display())]
    Directory { path: PathBuf, source: io::Error },
    #[error("native library '{name}' not found at {}", path.display())]
    Missing { name: String, path: PathBuf },
    #[error("native library '{name}' at {} could not be opened: {source}", path.display())]
    Unreadable {
        name: String,
        path: PathBuf,
        source: io::Error,
    },
    #[error("native loader failed: {0}")]
    Other(String),
}

/// Loads the native support libraries the host depends on.
pub trait NativeLoader: Send + Sync {
    fn initialize(&self, native: &NativeConfig) -> Result<(), NativeLoadError>;
}

/// Platform file name for a library stem (`libfoo.so`, `foo.dll`, `libfoo.dylib`).
#[must_use]
pub fn library_file_name(stem: &str) -> String {
    format!(
        "{}{stem}{}",
        std::env::consts::DLL_PREFIX,
        std::env::consts::DLL_SUFFIX
    )
}

/// Resolves every declared library inside a single directory.
///
/// A relative `library_dir` in the configuration is resolved against
/// `base_dir`; with no `library_dir`, `base_dir` itself is searched.
#[derive(Debug, Clone)]
pub struct LibraryDirLoader {
    base_dir: PathBuf,
}

impl LibraryDirLoader {
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    #[must_use]
    pub fn search_dir(&self, native: &NativeConfig) -> PathBuf {
        match &native.library_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.base_dir.join(dir),
            None => self.base_dir.clone(),
        }
    }

    fn open_library(dir: &Path, name: &str) -> Result<PathBuf, NativeLoadError> {
        let path = dir.join(library_file_name(name));
        match File::open(&path) {
            Ok(_) => Ok(path),
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                Err(NativeLoadError::Missing {
                    name: name.to_string(),
                    path,
                })
            }
            Err(source) => Err(NativeLoadError::Unreadable {
                name: name.to_string(),
                path,
                source,
            }),
        }
    }
}

impl NativeLoader for LibraryDirLoader {
    fn initialize(&self, native: &NativeConfig) -> Result<(), NativeLoadError> {
        if native.libraries.is_empty() {
            tracing::info!("No native support libraries declared");
            return Ok(());
        }

        let dir = self.search_dir(native);
        std::fs::read_dir(&dir).map_err(|source| NativeLoadError::Directory {
            path: dir.clone(),
            source,
        })?;

        for name in &native.libraries {
            let path = Self::open_library(&dir, name)?;
            tracing::debug!(library = %name, path = %path.display(), "Native library resolved");
        }

        tracing::info!(
            count = native.libraries.len(),
            dir = %dir.display(),
            "Native support libraries loaded"
        );
        Ok(())
    }
}
