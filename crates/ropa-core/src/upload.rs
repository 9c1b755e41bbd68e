//! Collecting photos to upload from a file or folder path.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::UploadConfig;
use crate::error::UploadError;
use crate::types::UploadedImage;

/// Finds and reads uploadable photos.
pub struct FileDiscovery {
    config: UploadConfig,
}

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileDiscovery {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    /// Discover all supported photos at a path.
    ///
    /// If path is a file, returns it if supported.
    /// If path is a directory, recursively finds all supported files,
    /// sorted by path so the upload order is deterministic.
    pub fn discover(&self, path: &Path) -> Vec<DiscoveredFile> {
        if path.is_file() {
            if self.is_supported(path) {
                if let Ok(meta) = std::fs::metadata(path) {
                    return vec![DiscoveredFile {
                        path: path.to_path_buf(),
                        size: meta.len(),
                    }];
                }
            }
            return vec![];
        }

        let mut files: Vec<DiscoveredFile> = WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && self.is_supported(e.path()))
            .filter_map(|e| {
                let size = e.metadata().ok()?.len();
                Some(DiscoveredFile {
                    path: e.into_path(),
                    size,
                })
            })
            .collect();

        files.sort_by(|a, b| a.path.cmp(&b.path));
        files
    }

    /// Read discovered files into memory, enforcing the size limit.
    pub fn read_all(&self, files: &[DiscoveredFile]) -> Result<Vec<UploadedImage>, UploadError> {
        let max_bytes = self.config.max_file_size_mb * 1024 * 1024;
        files
            .iter()
            .map(|file| {
                if file.size > max_bytes {
                    return Err(UploadError::FileTooLarge {
                        path: file.path.clone(),
                        size_mb: file.size / (1024 * 1024),
                        max_mb: self.config.max_file_size_mb,
                    });
                }
                let bytes = std::fs::read(&file.path).map_err(|source| UploadError::Read {
                    path: file.path.clone(),
                    source,
                })?;
                let name = file
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Ok(UploadedImage::new(name, bytes))
            })
            .collect()
    }

    /// Check if a file has a supported extension.
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.config
                    .supported_formats
                    .iter()
                    .any(|fmt| fmt.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    /// Get total size of all discovered files.
    pub fn total_size(files: &[DiscoveredFile]) -> u64 {
        files.iter().map(|f| f.size).sum()
    }
}
