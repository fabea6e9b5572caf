//! Builders for in-memory Power BI template archives.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use pbit_doc::{LAYOUT_ENTRY, MODEL_SCHEMA_ENTRY};
use serde_json::Value;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

pub fn utf16le(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

pub fn build_zip(entries: Vec<(&str, Vec<u8>)>) -> Vec<u8> {
    let cursor = Cursor::new(Vec::new());
    let mut writer = ZipWriter::new(cursor);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, bytes) in entries {
        writer.start_file(name, options).expect("start zip entry");
        writer.write_all(&bytes).expect("write zip entry");
    }

    writer.finish().expect("finish zip").into_inner()
}

/// A template with the given documents; `None` leaves the entry out.
pub fn build_pbit(layout: Option<&Value>, model: Option<&Value>) -> Vec<u8> {
    let mut entries = vec![("Version", utf16le("1.28"))];
    if let Some(layout) = layout {
        entries.push((LAYOUT_ENTRY, utf16le(&layout.to_string())));
    }
    if let Some(model) = model {
        entries.push((MODEL_SCHEMA_ENTRY, utf16le(&model.to_string())));
    }
    build_zip(entries)
}

/// Wraps a visual config the way the layout stores it: as a JSON string.
pub fn visual_container(config: Value) -> Value {
    serde_json::json!({ "x": 0, "y": 0, "config": config.to_string() })
}
