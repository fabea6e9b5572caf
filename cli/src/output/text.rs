use super::TemplateReport;
use anyhow::Result;
use std::io::Write;

pub fn write_text_report<W: Write>(w: &mut W, report: &TemplateReport<'_>) -> Result<()> {
    writeln!(w, "Nome do Relatório: {}", report.report)?;

    for (key, block) in report.sections.iter() {
        writeln!(w)?;
        writeln!(w, "{}", key.title())?;
        if !block.is_empty() {
            write!(w, "{}", block)?;
        }
    }

    Ok(())
}
