use serde_json::Value;

use crate::json_path::{array_at, at, expression_text, str_at, str_or};
use crate::model::{ColumnRecord, MeasureRecord, RelationshipRecord, SourceRecord};
use crate::render::render_blocks;

/// Name prefixes of the calendar tables Power BI generates for date columns.
pub const CALENDAR_TABLE_PREFIXES: [&str; 2] = ["DateTableTemplate", "LocalDateTable"];

const CALCULATED_COLUMN_TYPES: [&str; 2] = ["calculatedTableColumn", "calculated"];

pub fn is_calendar_table(name: &str) -> bool {
    CALENDAR_TABLE_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

fn tables(model: &Value) -> &[Value] {
    array_at(model, &["model", "tables"])
}

fn table_name(table: &Value) -> &str {
    str_or(table, "name", "")
}

fn documented_tables(model: &Value) -> impl Iterator<Item = &Value> {
    tables(model)
        .iter()
        .filter(|table| !is_calendar_table(table_name(table)))
}

/// Names of the tables that are documented, in model order.
pub fn extract_table_names(model: &Value) -> Vec<String> {
    documented_tables(model)
        .map(|table| table_name(table).to_string())
        .collect()
}

pub fn extract_columns(model: &Value) -> Vec<ColumnRecord> {
    let mut out = Vec::new();
    for table in documented_tables(model) {
        let name = table_name(table);
        for column in array_at(table, &["columns"]) {
            let kind = str_or(column, "type", "");
            out.push(ColumnRecord {
                table: name.to_string(),
                name: str_or(column, "name", "").to_string(),
                data_type: str_or(column, "dataType", "").to_string(),
                is_calculated: CALCULATED_COLUMN_TYPES.contains(&kind),
            });
        }
    }
    out
}

/// Measures of every table, calendar tables included.
pub fn extract_measures(model: &Value) -> Vec<MeasureRecord> {
    let mut out = Vec::new();
    for table in tables(model) {
        let name = table_name(table);
        for measure in array_at(table, &["measures"]) {
            out.push(MeasureRecord {
                table: name.to_string(),
                name: str_or(measure, "name", "").to_string(),
                expression: expression_text(measure.get("expression")).unwrap_or_default(),
            });
        }
    }
    out
}

pub fn extract_sources(model: &Value) -> Vec<SourceRecord> {
    let mut out = Vec::new();
    for table in documented_tables(model) {
        let name = table_name(table);
        for partition in array_at(table, &["partitions"]) {
            out.push(SourceRecord {
                table: name.to_string(),
                mode: str_at(partition, &["mode"]).map(str::to_string),
                source_type: str_at(partition, &["source", "type"]).map(str::to_string),
                expression: expression_text(at(partition, &["source", "expression"])),
            });
        }
    }
    out
}

/// Relationships whose endpoints are both documented tables.
///
/// A relationship without a table name on either end is skipped.
pub fn extract_relationships(model: &Value) -> Vec<RelationshipRecord> {
    let mut out = Vec::new();
    for rel in array_at(model, &["model", "relationships"]) {
        let (Some(from_table), Some(to_table)) =
            (str_at(rel, &["fromTable"]), str_at(rel, &["toTable"]))
        else {
            log::warn!(
                "skipping relationship without table names: {}",
                str_or(rel, "name", "<unnamed>")
            );
            continue;
        };

        if is_calendar_table(from_table) || is_calendar_table(to_table) {
            continue;
        }

        out.push(RelationshipRecord {
            from_table: from_table.to_string(),
            from_column: str_or(rel, "fromColumn", "").to_string(),
            to_table: to_table.to_string(),
            to_column: str_or(rel, "toColumn", "").to_string(),
        });
    }
    out
}

pub fn render_columns(columns: &[ColumnRecord]) -> String {
    render_blocks(columns)
}

pub fn render_measures(measures: &[MeasureRecord]) -> String {
    render_blocks(measures)
}

pub fn render_sources(sources: &[SourceRecord]) -> String {
    render_blocks(sources)
}

pub fn render_relationships(relationships: &[RelationshipRecord]) -> String {
    render_blocks(relationships)
}
