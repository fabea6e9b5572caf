//! ZIP container handling for Power BI template archives.
//!
//! A `.pbit` file is a plain ZIP archive. Unlike OPC packages there is no
//! required manifest entry: the container only has to expose a readable
//! central directory, and any individual entry may be missing.

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error_codes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerLimits {
    pub max_entries: usize,
    pub max_part_uncompressed_bytes: u64,
    pub max_total_uncompressed_bytes: u64,
}

impl Default for ContainerLimits {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            max_part_uncompressed_bytes: 100 * 1024 * 1024,
            max_total_uncompressed_bytes: 500 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContainerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a ZIP container")]
    NotZipContainer,
    #[error("archive has too many entries: {entries} (limit: {max_entries})")]
    TooManyEntries { entries: usize, max_entries: usize },
    #[error("entry '{path}' is too large: {size} bytes (limit: {limit} bytes)")]
    PartTooLarge { path: String, size: u64, limit: u64 },
    #[error("total uncompressed size exceeds limit: would exceed {limit} bytes")]
    TotalTooLarge { limit: u64 },
    #[error("failed to read ZIP entry '{path}': {reason}")]
    ZipRead { path: String, reason: String },
}

impl ContainerError {
    pub fn code(&self) -> &'static str {
        match self {
            ContainerError::Io(_) => error_codes::CONTAINER_IO,
            ContainerError::NotZipContainer => error_codes::CONTAINER_NOT_ZIP,
            ContainerError::TooManyEntries { .. } => error_codes::CONTAINER_TOO_MANY_ENTRIES,
            ContainerError::PartTooLarge { .. } => error_codes::CONTAINER_PART_TOO_LARGE,
            ContainerError::TotalTooLarge { .. } => error_codes::CONTAINER_TOTAL_TOO_LARGE,
            ContainerError::ZipRead { .. } => error_codes::CONTAINER_ZIP,
        }
    }
}

/// Entries requested from an archive, each either present with its raw
/// bytes or recorded as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveEntries {
    entries: BTreeMap<String, Option<Vec<u8>>>,
}

impl ArchiveEntries {
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).and_then(|bytes| bytes.as_deref())
    }

    pub fn take(&mut self, name: &str) -> Option<Vec<u8>> {
        self.entries.get_mut(name).and_then(Option::take)
    }

    pub fn is_missing(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(None))
    }

    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, bytes)| bytes.is_none())
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct TemplateContainer<R: Read + Seek> {
    archive: ZipArchive<R>,
    limits: ContainerLimits,
    total_read: u64,
}

impl<'a> TemplateContainer<Cursor<&'a [u8]>> {
    pub fn open_from_bytes(bytes: &'a [u8]) -> Result<Self, ContainerError> {
        Self::open_from_reader(Cursor::new(bytes))
    }
}

#[cfg(feature = "std-fs")]
impl TemplateContainer<std::fs::File> {
    pub fn open_from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ContainerError> {
        Self::open_from_path_with_limits(path, ContainerLimits::default())
    }

    pub fn open_from_path_with_limits(
        path: impl AsRef<std::path::Path>,
        limits: ContainerLimits,
    ) -> Result<Self, ContainerError> {
        let file = std::fs::File::open(path)?;
        Self::open_from_reader_with_limits(file, limits)
    }
}

impl<R: Read + Seek> TemplateContainer<R> {
    pub fn open_from_reader(reader: R) -> Result<Self, ContainerError> {
        Self::open_from_reader_with_limits(reader, ContainerLimits::default())
    }

    pub fn open_from_reader_with_limits(
        reader: R,
        limits: ContainerLimits,
    ) -> Result<Self, ContainerError> {
        let archive = ZipArchive::new(reader).map_err(|err| match err {
            ZipError::InvalidArchive(_) | ZipError::UnsupportedArchive(_) => {
                ContainerError::NotZipContainer
            }
            ZipError::Io(e) => ContainerError::Io(e),
            other => ContainerError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                other.to_string(),
            )),
        })?;

        if archive.len() > limits.max_entries {
            return Err(ContainerError::TooManyEntries {
                entries: archive.len(),
                max_entries: limits.max_entries,
            });
        }

        Ok(Self {
            archive,
            limits,
            total_read: 0,
        })
    }

    /// Reads one entry, returning `Ok(None)` when the archive has no entry
    /// with that name.
    pub fn read_entry(&mut self, name: &str) -> Result<Option<Vec<u8>>, ContainerError> {
        let size = match self.archive.by_name(name) {
            Ok(file) => file.size(),
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(ZipError::Io(io_err)) => {
                return Err(ContainerError::ZipRead {
                    path: name.to_string(),
                    reason: io_err.to_string(),
                });
            }
            Err(other) => {
                return Err(ContainerError::ZipRead {
                    path: name.to_string(),
                    reason: other.to_string(),
                });
            }
        };

        if size > self.limits.max_part_uncompressed_bytes {
            return Err(ContainerError::PartTooLarge {
                path: name.to_string(),
                size,
                limit: self.limits.max_part_uncompressed_bytes,
            });
        }

        let new_total = self.total_read.saturating_add(size);
        if new_total > self.limits.max_total_uncompressed_bytes {
            return Err(ContainerError::TotalTooLarge {
                limit: self.limits.max_total_uncompressed_bytes,
            });
        }

        let mut file = self.archive.by_name(name).map_err(|e| ContainerError::ZipRead {
            path: name.to_string(),
            reason: e.to_string(),
        })?;

        let mut buf = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
        file.read_to_end(&mut buf).map_err(|e| ContainerError::ZipRead {
            path: name.to_string(),
            reason: e.to_string(),
        })?;

        self.total_read = new_total;
        Ok(Some(buf))
    }

    /// Reads every requested entry. A missing entry is recorded and logged,
    /// never treated as an error.
    pub fn read_entries(&mut self, names: &[&str]) -> Result<ArchiveEntries, ContainerError> {
        let mut out = ArchiveEntries::default();
        for &name in names {
            let bytes = self.read_entry(name)?;
            if bytes.is_none() {
                log::warn!("entry '{name}' not found in archive");
            }
            out.entries.insert(name.to_string(), bytes);
        }
        Ok(out)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.archive.file_names()
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn limits(&self) -> &ContainerLimits {
        &self.limits
    }
}

/// Reads the named entries out of an in-memory archive.
pub fn read_entries(
    archive_bytes: &[u8],
    entry_names: &[&str],
) -> Result<ArchiveEntries, ContainerError> {
    TemplateContainer::open_from_bytes(archive_bytes)?.read_entries(entry_names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;
    use zip::{CompressionMethod, ZipWriter};

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, bytes) in entries {
            writer.start_file(*name, options).expect("start zip entry");
            writer.write_all(bytes).expect("write zip entry");
        }
        writer.finish().expect("finish zip").into_inner()
    }

    #[test]
    fn missing_entries_are_recorded_not_errors() {
        let bytes = build_zip(&[("Report/Layout", b"layout")]);
        let entries =
            read_entries(&bytes, &["Report/Layout", "DataModelSchema"]).expect("valid zip");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries.get("Report/Layout"), Some(b"layout".as_slice()));
        assert!(entries.is_missing("DataModelSchema"));
        assert!(!entries.is_missing("Report/Layout"));
        assert_eq!(entries.missing().collect::<Vec<_>>(), vec!["DataModelSchema"]);
    }

    #[test]
    fn take_moves_bytes_out() {
        let bytes = build_zip(&[("DataModelSchema", b"{}")]);
        let mut entries = read_entries(&bytes, &["DataModelSchema"]).expect("valid zip");
        assert_eq!(entries.take("DataModelSchema"), Some(b"{}".to_vec()));
        assert_eq!(entries.take("DataModelSchema"), None);
    }

    #[test]
    fn non_zip_bytes_are_rejected() {
        let err = read_entries(b"definitely not a zip", &["Report/Layout"])
            .expect_err("garbage should not open");
        assert!(matches!(err, ContainerError::NotZipContainer));
        assert_eq!(err.code(), error_codes::CONTAINER_NOT_ZIP);
    }

    #[test]
    fn part_size_limit_is_enforced() {
        let payload = vec![b'x'; 64];
        let bytes = build_zip(&[("DataModelSchema", &payload)]);
        let limits = ContainerLimits {
            max_part_uncompressed_bytes: 16,
            ..ContainerLimits::default()
        };
        let mut container =
            TemplateContainer::open_from_reader_with_limits(Cursor::new(bytes.as_slice()), limits)
                .expect("valid zip");
        let err = container
            .read_entry("DataModelSchema")
            .expect_err("entry exceeds limit");
        assert!(matches!(err, ContainerError::PartTooLarge { size: 64, .. }));
    }

    #[test]
    fn entry_count_limit_is_enforced() {
        let bytes = build_zip(&[("a", b"1"), ("b", b"2"), ("c", b"3")]);
        let limits = ContainerLimits {
            max_entries: 2,
            ..ContainerLimits::default()
        };
        let err =
            TemplateContainer::open_from_reader_with_limits(Cursor::new(bytes.as_slice()), limits)
                .err()
                .expect("too many entries");
        assert!(matches!(
            err,
            ContainerError::TooManyEntries {
                entries: 3,
                max_entries: 2
            }
        ));
    }

    #[test]
    fn limits_deserialize_with_defaults() {
        let limits: ContainerLimits =
            serde_json::from_str(r#"{"max_entries": 5}"#).expect("limits json");
        assert_eq!(limits.max_entries, 5);
        assert_eq!(
            limits.max_part_uncompressed_bytes,
            ContainerLimits::default().max_part_uncompressed_bytes
        );
    }
}
