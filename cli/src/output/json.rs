use super::TemplateReport;
use anyhow::Result;
use std::io::Write;

pub fn write_json_report<W: Write>(
    w: &mut W,
    report: &TemplateReport<'_>,
    pretty: bool,
) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *w, report)?;
    } else {
        serde_json::to_writer(&mut *w, report)?;
    }
    writeln!(w)?;
    Ok(())
}
