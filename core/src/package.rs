use std::io::{Cursor, Read, Seek};

use serde_json::Value;

use crate::container::{ContainerError, ContainerLimits, TemplateContainer};
use crate::sections::{ExtractionResult, assemble};
use crate::text_decode::{TextEncoding, decode};

/// Archive entry holding the report layout document.
pub const LAYOUT_ENTRY: &str = "Report/Layout";

/// Archive entry holding the data model schema document.
pub const MODEL_SCHEMA_ENTRY: &str = "DataModelSchema";

/// The two documents of a Power BI template, decoded.
///
/// A document that was missing or failed to decode is held as `{}`; the
/// names of missing entries are kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct PbitPackage {
    pub layout: Value,
    pub model: Value,
    pub missing_entries: Vec<String>,
}

impl PbitPackage {
    pub fn open<R: Read + Seek>(reader: R) -> Result<Self, ContainerError> {
        Self::open_with_limits(reader, ContainerLimits::default())
    }

    pub fn open_with_limits<R: Read + Seek>(
        reader: R,
        limits: ContainerLimits,
    ) -> Result<Self, ContainerError> {
        let mut container = TemplateContainer::open_from_reader_with_limits(reader, limits)?;
        let mut entries = container.read_entries(&[LAYOUT_ENTRY, MODEL_SCHEMA_ENTRY])?;
        let missing_entries: Vec<String> = entries.missing().map(str::to_string).collect();

        let layout_bytes = entries.take(LAYOUT_ENTRY);
        let model_bytes = entries.take(MODEL_SCHEMA_ENTRY);

        Ok(Self {
            layout: decode(layout_bytes.as_deref(), TextEncoding::Utf16Le),
            model: decode(model_bytes.as_deref(), TextEncoding::Utf16Le),
            missing_entries,
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ContainerError> {
        Self::open(Cursor::new(bytes))
    }

    #[cfg(feature = "std-fs")]
    pub fn open_path(path: impl AsRef<std::path::Path>) -> Result<Self, ContainerError> {
        Self::open_path_with_limits(path, ContainerLimits::default())
    }

    #[cfg(feature = "std-fs")]
    pub fn open_path_with_limits(
        path: impl AsRef<std::path::Path>,
        limits: ContainerLimits,
    ) -> Result<Self, ContainerError> {
        let path = path.as_ref();
        log::debug!("opening template {}", path.display());
        let file = std::fs::File::open(path)?;
        Self::open_with_limits(file, limits)
    }

    pub fn extract(&self) -> ExtractionResult {
        assemble(&self.layout, &self.model)
    }
}

/// Opens an in-memory template and renders its documentation sections.
pub fn extract_template(bytes: &[u8]) -> Result<ExtractionResult, ContainerError> {
    Ok(PbitPackage::from_bytes(bytes)?.extract())
}
