pub mod json;
pub mod text;

use pbit_doc::{ExtractionResult, SectionKey};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::path::{Path, PathBuf};

/// The documentation of one template, restricted to the selected sections.
#[derive(Serialize)]
pub struct TemplateReport<'a> {
    pub report: &'a str,
    pub path: String,
    pub sections: SelectedSections<'a>,
}

pub struct SelectedSections<'a> {
    pub result: &'a ExtractionResult,
    pub keys: &'a [SectionKey],
}

impl<'a> SelectedSections<'a> {
    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &'a str)> + '_ {
        self.keys.iter().map(|&key| (key, self.result.get(key)))
    }
}

impl Serialize for SelectedSections<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.keys.len()))?;
        for (key, block) in self.iter() {
            map.serialize_entry(key.title(), block)?;
        }
        map.end()
    }
}

/// First path in `base`, `base_v02`, `base_v03`, ... that does not exist.
pub fn versioned_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut version = 2u32;
    loop {
        let candidate = path.with_file_name(format!("{stem}_v{version:02}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn versioned_path_skips_existing_files() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let target = tmp.path().join("Documentação_Vendas.txt");
        assert_eq!(versioned_path(&target), target);

        fs::write(&target, b"v1").expect("write v1");
        let second = versioned_path(&target);
        assert_eq!(second, tmp.path().join("Documentação_Vendas_v02.txt"));

        fs::write(&second, b"v2").expect("write v2");
        assert_eq!(
            versioned_path(&target),
            tmp.path().join("Documentação_Vendas_v03.txt")
        );
    }
}
