use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

const DOWNLOADS_SUBDIR: &str = "Downloads";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("invalid download filename: {filename:?}")]
    InvalidFilename { filename: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Local file save for rendered payloads.
pub trait DownloadStorage {
    fn save_download(&self, payload: &[u8], filename: &str) -> StorageResult<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct DownloadService {
    downloads_dir: PathBuf,
}

impl DownloadService {
    pub const fn with_dir(downloads_dir: PathBuf) -> Self {
        Self { downloads_dir }
    }

    pub fn with_default_dir() -> StorageResult<Self> {
        let home = std::env::var("HOME").map_err(|_| StorageError::MissingHomeDirectory)?;
        let mut downloads_dir = PathBuf::from(home);
        downloads_dir.push(DOWNLOADS_SUBDIR);
        Ok(Self::with_dir(downloads_dir))
    }

    pub fn downloads_dir(&self) -> &Path {
        &self.downloads_dir
    }

    fn validate_filename(filename: &str) -> StorageResult<()> {
        let is_plain = Path::new(filename)
            .file_name()
            .is_some_and(|name| name == filename);
        if filename.is_empty() || !is_plain {
            return Err(StorageError::InvalidFilename {
                filename: filename.to_string(),
            });
        }
        Ok(())
    }

    pub fn target_path(&self, filename: &str) -> StorageResult<PathBuf> {
        Self::validate_filename(filename)?;
        Ok(self.downloads_dir.join(filename))
    }

    pub fn save_download(&self, payload: &[u8], filename: &str) -> StorageResult<PathBuf> {
        let target = self.target_path(filename)?;
        write_overwrite(payload, &target)?;
        tracing::info!(path = %target.display(), bytes = payload.len(), "download saved");
        Ok(target)
    }
}

impl DownloadStorage for DownloadService {
    fn save_download(&self, payload: &[u8], filename: &str) -> StorageResult<PathBuf> {
        self.save_download(payload, filename)
    }
}

fn write_overwrite<D: AsRef<Path>>(payload: &[u8], destination: D) -> StorageResult<()> {
    let destination = destination.as_ref();

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    let _ = fs::remove_file(destination);
    fs::write(destination, payload)?;
    Ok(())
}
