//! Report layout extraction: pages and the visuals placed on them.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde_json::{Number, Value};

use crate::json_path::{array_at, at, number_or_zero, str_at, str_or};
use crate::render::{OrNull, SEPARATOR, render_blocks};
use crate::text_decode::{decode_embedded, empty_document};

/// Label used for a page without a `displayName`.
pub const UNNAMED_PAGE: &str = "Sem Nome";

/// Text written when a visual has no bound fields.
pub const NO_FIELDS: &str = "Nenhuma";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    pub x: Number,
    pub y: Number,
    pub width: Number,
    pub height: Number,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            x: Number::from(0),
            y: Number::from(0),
            width: Number::from(0),
            height: Number::from(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualRecord {
    pub page: String,
    pub position: Position,
    pub visual_type: Option<String>,
    pub bound_fields: Vec<String>,
}

impl fmt::Display for VisualRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.position;
        writeln!(f, "Página: {}", self.page)?;
        writeln!(f, "Posição: X={}, Y={}", p.x, p.y)?;
        writeln!(f, "Dimensões: {}x{}", p.width, p.height)?;
        writeln!(f, "Tipo: {}", OrNull(&self.visual_type))?;
        if self.bound_fields.is_empty() {
            writeln!(f, "Medidas: {NO_FIELDS}")?;
        } else {
            writeln!(f, "Medidas: {}", self.bound_fields.join(", "))?;
        }
        writeln!(f, "{SEPARATOR}")
    }
}

fn page_name(section: &Value) -> &str {
    str_or(section, "displayName", UNNAMED_PAGE)
}

/// Page names in document order.
pub fn extract_pages(layout: &Value) -> Vec<String> {
    array_at(layout, &["sections"])
        .iter()
        .map(|section| page_name(section).to_string())
        .collect()
}

/// One record per visual container, pages in document order and visuals in
/// container order within each page.
pub fn extract_visuals(layout: &Value) -> Vec<VisualRecord> {
    let mut out = Vec::new();
    for section in array_at(layout, &["sections"]) {
        let page = page_name(section);
        for container in array_at(section, &["visualContainers"]) {
            let config = visual_config(container);
            out.push(visual_from_config(page, &config));
        }
    }
    out
}

fn visual_config(container: &Value) -> Cow<'_, Value> {
    match container.get("config") {
        Some(Value::String(raw)) => Cow::Owned(decode_embedded(raw)),
        Some(config @ Value::Object(_)) => Cow::Borrowed(config),
        _ => Cow::Owned(empty_document()),
    }
}

fn visual_from_config(page: &str, config: &Value) -> VisualRecord {
    let visual_type = str_at(config, &["singleVisual", "visualType"]).map(str::to_string);

    let position = array_at(config, &["layouts"])
        .first()
        .and_then(|layout| layout.get("position"))
        .map(|pos| Position {
            x: number_or_zero(pos, "x"),
            y: number_or_zero(pos, "y"),
            width: number_or_zero(pos, "width"),
            height: number_or_zero(pos, "height"),
        })
        .unwrap_or_default();

    let projections = at(config, &["singleVisual", "projections"]).and_then(Value::as_object);
    let bound_fields = projections
        .into_iter()
        .flat_map(|roles| roles.values())
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(|binding| str_at(binding, &["queryRef"]))
        .filter(|query_ref| !query_ref.is_empty())
        .map(str::to_string)
        .collect();

    VisualRecord {
        page: page.to_string(),
        position,
        visual_type,
        bound_fields,
    }
}

pub fn render_pages(pages: &[String]) -> String {
    let blocks: Vec<String> = pages
        .iter()
        .map(|name| format!("{name}\n{SEPARATOR}\n"))
        .collect();
    render_blocks(&blocks)
}

pub fn render_visuals(visuals: &[VisualRecord]) -> String {
    render_blocks(visuals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn container(config: Value) -> Value {
        json!({ "config": config.to_string() })
    }

    #[test]
    fn pages_use_default_label() {
        let layout = json!({
            "sections": [
                {"displayName": "Resumo", "visualContainers": []},
                {"visualContainers": []}
            ]
        });
        assert_eq!(extract_pages(&layout), vec!["Resumo", "Sem Nome"]);
        assert!(extract_visuals(&layout).is_empty());
        assert_eq!(
            render_pages(&extract_pages(&layout)),
            "Resumo\n-----------\n\nSem Nome\n-----------\n"
        );
    }

    #[test]
    fn visual_fields_are_read_from_embedded_config() {
        let layout = json!({
            "sections": [{
                "displayName": "Vendas",
                "visualContainers": [container(json!({
                    "singleVisual": {
                        "visualType": "barChart",
                        "projections": {
                            "Category": [{"queryRef": "Produto.Nome"}],
                            "Y": [{"queryRef": "Sum(Vendas.Valor)"}, {"active": true}]
                        }
                    },
                    "layouts": [
                        {"position": {"x": 10.5, "y": 20, "width": 300, "height": 200}},
                        {"position": {"x": 999, "y": 999}}
                    ]
                }))]
            }]
        });

        let visuals = extract_visuals(&layout);
        assert_eq!(visuals.len(), 1);
        let v = &visuals[0];
        assert_eq!(v.page, "Vendas");
        assert_eq!(v.visual_type.as_deref(), Some("barChart"));
        assert_eq!(v.bound_fields, vec!["Produto.Nome", "Sum(Vendas.Valor)"]);
        assert_eq!(
            v.to_string(),
            "Página: Vendas\n\
             Posição: X=10.5, Y=20\n\
             Dimensões: 300x200\n\
             Tipo: barChart\n\
             Medidas: Produto.Nome, Sum(Vendas.Valor)\n\
             -----------\n"
        );
    }

    #[test]
    fn missing_layouts_default_position_to_zero() {
        let layout = json!({
            "sections": [{
                "visualContainers": [container(json!({"singleVisual": {"visualType": "card"}}))]
            }]
        });
        let visuals = extract_visuals(&layout);
        assert_eq!(visuals[0].position, Position::default());
        assert!(visuals[0].to_string().contains("Posição: X=0, Y=0\nDimensões: 0x0\n"));
    }

    #[test]
    fn partial_position_defaults_each_field() {
        let layout = json!({
            "sections": [{
                "visualContainers": [container(json!({
                    "layouts": [{"position": {"x": 5, "height": 7}}]
                }))]
            }]
        });
        let text = render_visuals(&extract_visuals(&layout));
        assert!(text.contains("Posição: X=5, Y=0\n"), "{text}");
        assert!(text.contains("Dimensões: 0x7\n"), "{text}");
    }

    #[test]
    fn malformed_or_missing_config_yields_empty_visual() {
        let layout = json!({
            "sections": [{
                "displayName": "P",
                "visualContainers": [{"config": "{broken"}, {}]
            }]
        });
        let visuals = extract_visuals(&layout);
        assert_eq!(visuals.len(), 2);
        for v in &visuals {
            assert_eq!(v.visual_type, None);
            assert!(v.bound_fields.is_empty());
            assert!(v.to_string().contains("Tipo: None\nMedidas: Nenhuma\n"));
        }
    }

    #[test]
    fn object_config_is_used_directly() {
        let layout = json!({
            "sections": [{
                "visualContainers": [{"config": {"singleVisual": {"visualType": "table"}}}]
            }]
        });
        let visuals = extract_visuals(&layout);
        assert_eq!(visuals[0].visual_type.as_deref(), Some("table"));
    }

    #[test]
    fn duplicate_query_refs_are_kept() {
        let layout = json!({
            "sections": [{
                "visualContainers": [container(json!({
                    "singleVisual": {"projections": {
                        "Values": [{"queryRef": "A"}, {"queryRef": ""}, {"queryRef": "A"}]
                    }}
                }))]
            }]
        });
        assert_eq!(extract_visuals(&layout)[0].bound_fields, vec!["A", "A"]);
    }
}
