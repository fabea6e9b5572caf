//! Documentation records derived from the data model schema.

use std::fmt;

use serde::Serialize;

use crate::render::{OrNull, SEPARATOR};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnRecord {
    pub table: String,
    pub name: String,
    pub data_type: String,
    pub is_calculated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeasureRecord {
    pub table: String,
    pub name: String,
    pub expression: String,
}

/// One partition of a table and where its rows come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRecord {
    pub table: String,
    pub mode: Option<String>,
    pub source_type: Option<String>,
    pub expression: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipRecord {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
}

impl fmt::Display for ColumnRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tabela: {}", self.table)?;
        writeln!(f, "Coluna: {}", self.name)?;
        writeln!(f, "Tipo: {}", self.data_type)?;
        writeln!(f, "Calculada: {}", if self.is_calculated { "Sim" } else { "Não" })?;
        writeln!(f, "{SEPARATOR}")
    }
}

impl fmt::Display for MeasureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tabela: {}", self.table)?;
        writeln!(f, "Medida: {}", self.name)?;
        writeln!(f, "Expressão: {}", self.expression)?;
        writeln!(f, "{SEPARATOR}")
    }
}

impl fmt::Display for SourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tabela: {}", self.table)?;
        writeln!(f, "Modo: {}", OrNull(&self.mode))?;
        writeln!(f, "Tipo: {}", OrNull(&self.source_type))?;
        writeln!(f, "Fonte: {}", OrNull(&self.expression))?;
        writeln!(f, "{SEPARATOR}")
    }
}

impl fmt::Display for RelationshipRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "De: {}.{}", self.from_table, self.from_column)?;
        writeln!(f, "Para: {}.{}", self.to_table, self.to_column)?;
        writeln!(f, "{SEPARATOR}")
    }
}
