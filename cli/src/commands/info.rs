use crate::commands::extract::report_name;
use anyhow::{Context, Result};
use pbit_doc::{
    PbitPackage, extract_columns, extract_measures, extract_pages, extract_relationships,
    extract_sources, extract_table_names, extract_visuals,
};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

pub fn run(path: &str) -> Result<ExitCode> {
    let path = Path::new(path);
    let pkg = PbitPackage::open_path(path)
        .with_context(|| format!("Failed to read template: {}", path.display()))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "Template: {}", report_name(path))?;
    writeln!(handle, "Pages: {}", extract_pages(&pkg.layout).len())?;
    writeln!(handle, "Visuals: {}", extract_visuals(&pkg.layout).len())?;
    writeln!(handle, "Tables: {}", extract_table_names(&pkg.model).len())?;
    writeln!(handle, "Columns: {}", extract_columns(&pkg.model).len())?;
    writeln!(handle, "Measures: {}", extract_measures(&pkg.model).len())?;
    writeln!(handle, "Sources: {}", extract_sources(&pkg.model).len())?;
    writeln!(
        handle,
        "Relationships: {}",
        extract_relationships(&pkg.model).len()
    )?;

    if !pkg.missing_entries.is_empty() {
        writeln!(handle, "Missing entries: {}", pkg.missing_entries.join(", "))?;
    }

    Ok(ExitCode::from(0))
}
