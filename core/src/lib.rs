//! Pbit Doc: documentation extraction for Power BI template files.
//!
//! A `.pbit` is a ZIP archive holding two UTF-16LE JSON documents: the
//! report layout (`Report/Layout`) and the data model schema
//! (`DataModelSchema`). This crate provides functionality for:
//! - Reading those entries while tolerating either one being absent
//! - Decoding them into JSON trees, degrading to `{}` on malformed input
//! - Extracting pages, visuals, tables, measures, sources and relationships
//! - Rendering the six documentation sections as plain-text blocks
//!
//! # Quick Start
//!
//! ```ignore
//! use pbit_doc::{PbitPackage, SectionKey};
//!
//! let pkg = PbitPackage::open(std::fs::File::open("report.pbit")?)?;
//! let sections = pkg.extract();
//!
//! for (key, block) in sections.iter() {
//!     println!("{}\n{}", key.title(), block);
//! }
//! ```

mod container;
mod error_codes;
mod json_path;
mod layout;
mod model;
mod package;
mod render;
mod sections;
mod tabular_schema;
mod text_decode;

pub use container::{
    ArchiveEntries, ContainerError, ContainerLimits, TemplateContainer, read_entries,
};
pub use layout::{
    NO_FIELDS, Position, UNNAMED_PAGE, VisualRecord, extract_pages, extract_visuals, render_pages,
    render_visuals,
};
pub use model::{ColumnRecord, MeasureRecord, RelationshipRecord, SourceRecord};
pub use package::{LAYOUT_ENTRY, MODEL_SCHEMA_ENTRY, PbitPackage, extract_template};
pub use render::{NULL_TEXT, SEPARATOR, render_blocks};
pub use sections::{ExtractionResult, SectionKey, UnknownSection, assemble};
pub use tabular_schema::{
    CALENDAR_TABLE_PREFIXES, extract_columns, extract_measures, extract_relationships,
    extract_sources, extract_table_names, is_calendar_table, render_columns, render_measures,
    render_relationships, render_sources,
};
pub use text_decode::{
    DecodeError, TextEncoding, decode, decode_embedded, empty_document, try_decode,
};
