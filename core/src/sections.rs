//! Assembly of the six documentation sections handed to document generators.

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::layout::{extract_pages, extract_visuals, render_pages, render_visuals};
use crate::tabular_schema::{
    extract_columns, extract_measures, extract_relationships, extract_sources, render_columns,
    render_measures, render_relationships, render_sources,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKey {
    Pages,
    Tables,
    Measures,
    Visuals,
    Sources,
    Relationships,
}

impl SectionKey {
    /// Every section, in output order.
    pub const ALL: [SectionKey; 6] = [
        SectionKey::Pages,
        SectionKey::Tables,
        SectionKey::Measures,
        SectionKey::Visuals,
        SectionKey::Sources,
        SectionKey::Relationships,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionKey::Pages => "Páginas",
            SectionKey::Tables => "Tabelas",
            SectionKey::Measures => "Medidas",
            SectionKey::Visuals => "Visuais",
            SectionKey::Sources => "Fontes",
            SectionKey::Relationships => "Relacionamentos",
        }
    }

    pub fn alias(self) -> &'static str {
        match self {
            SectionKey::Pages => "pages",
            SectionKey::Tables => "tables",
            SectionKey::Measures => "measures",
            SectionKey::Visuals => "visuals",
            SectionKey::Sources => "sources",
            SectionKey::Relationships => "relationships",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown section '{}'", self.0)
    }
}

impl std::error::Error for UnknownSection {}

impl FromStr for SectionKey {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SectionKey::ALL
            .into_iter()
            .find(|key| key.title().eq_ignore_ascii_case(s) || key.alias().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// Rendered text for every section, always holding all six keys in
/// [`SectionKey::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    blocks: [String; 6],
}

impl ExtractionResult {
    pub fn get(&self, key: SectionKey) -> &str {
        &self.blocks[key as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &str)> {
        SectionKey::ALL
            .into_iter()
            .zip(self.blocks.iter().map(String::as_str))
    }

    /// True when every section rendered empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(String::is_empty)
    }
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.blocks.len()))?;
        for (key, block) in self.iter() {
            map.serialize_entry(key.title(), block)?;
        }
        map.end()
    }
}

/// Runs every extractor over the two documents and renders the sections.
pub fn assemble(layout: &Value, model: &Value) -> ExtractionResult {
    let blocks = SectionKey::ALL.map(|key| match key {
        SectionKey::Pages => render_pages(&extract_pages(layout)),
        SectionKey::Tables => render_columns(&extract_columns(model)),
        SectionKey::Measures => render_measures(&extract_measures(model)),
        SectionKey::Visuals => render_visuals(&extract_visuals(layout)),
        SectionKey::Sources => render_sources(&extract_sources(model)),
        SectionKey::Relationships => render_relationships(&extract_relationships(model)),
    });
    ExtractionResult { blocks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_parse_from_title_or_alias() {
        assert_eq!("Medidas".parse::<SectionKey>(), Ok(SectionKey::Measures));
        assert_eq!("relationships".parse::<SectionKey>(), Ok(SectionKey::Relationships));
        assert_eq!(" FONTES ".parse::<SectionKey>(), Ok(SectionKey::Sources));
        assert_eq!("páginas".parse::<SectionKey>(), Ok(SectionKey::Pages));
        assert!("charts".parse::<SectionKey>().is_err());
    }

    #[test]
    fn empty_documents_still_produce_all_sections() {
        let result = assemble(&json!({}), &json!({}));
        assert!(result.is_empty());
        let keys: Vec<_> = result.iter().map(|(k, _)| k.title()).collect();
        assert_eq!(
            keys,
            vec!["Páginas", "Tabelas", "Medidas", "Visuais", "Fontes", "Relacionamentos"]
        );
    }

    #[test]
    fn sections_route_to_their_extractor() {
        let layout = json!({"sections": [{"displayName": "Inicio"}]});
        let model = json!({"model": {"tables": [{
            "name": "T",
            "measures": [{"name": "M", "expression": "1"}]
        }]}});
        let result = assemble(&layout, &model);
        assert_eq!(result.get(SectionKey::Pages), "Inicio\n-----------\n");
        assert_eq!(
            result.get(SectionKey::Measures),
            "Tabela: T\nMedida: M\nExpressão: 1\n-----------\n"
        );
        assert_eq!(result.get(SectionKey::Tables), "");
        assert_eq!(result.get(SectionKey::Visuals), "");
    }

    #[test]
    fn serializes_in_section_order() {
        let result = assemble(&json!({"sections": [{}]}), &json!({}));
        let text = serde_json::to_string(&result).expect("serialize");
        assert!(text.starts_with("{\"Páginas\":\"Sem Nome\\n-----------\\n\",\"Tabelas\":\"\""));
        assert!(text.ends_with("\"Relacionamentos\":\"\"}"));
    }
}
