use crate::OutputFormat;
use crate::output::{SelectedSections, TemplateReport, json, text, versioned_path};
use anyhow::{Context, Result};
use pbit_doc::{ContainerLimits, PbitPackage, SectionKey};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Everything the batch runner needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub format: OutputFormat,
    /// Sections to emit; empty means all of them.
    pub sections: Vec<SectionKey>,
    pub out_dir: Option<PathBuf>,
    pub limits: ContainerLimits,
}

impl BatchOptions {
    fn selected_sections(&self) -> Vec<SectionKey> {
        if self.sections.is_empty() {
            SectionKey::ALL.to_vec()
        } else {
            self.sections.clone()
        }
    }
}

pub fn run(inputs: &[String], options: &BatchOptions) -> Result<ExitCode> {
    let mut failures = 0usize;
    for (idx, input) in inputs.iter().enumerate() {
        if let Err(e) = document_template(Path::new(input), options, idx == 0) {
            failures += 1;
            eprintln!("Error: {:#}", e);
        }
    }

    log::info!(
        "documented {} of {} templates",
        inputs.len() - failures,
        inputs.len()
    );

    if failures == 0 {
        Ok(ExitCode::from(0))
    } else {
        Ok(ExitCode::from(2))
    }
}

fn document_template(path: &Path, options: &BatchOptions, first: bool) -> Result<()> {
    log::debug!("processing {}", path.display());

    let pkg = PbitPackage::open_path_with_limits(path, options.limits)
        .with_context(|| format!("Failed to read template: {}", path.display()))?;
    let result = pkg.extract();

    let name = report_name(path);
    let keys = options.selected_sections();
    let report = TemplateReport {
        report: &name,
        path: path.display().to_string(),
        sections: SelectedSections {
            result: &result,
            keys: &keys,
        },
    };

    match &options.out_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            let ext = match options.format {
                OutputFormat::Text => "txt",
                OutputFormat::Json => "json",
            };
            let target = versioned_path(&dir.join(format!("Documentação_{name}.{ext}")));
            let file = File::create(&target)
                .with_context(|| format!("Failed to create output file: {}", target.display()))?;
            let mut writer = BufWriter::new(file);
            write_report(&mut writer, &report, options.format, true)?;
            writer.flush()?;
            println!("Documentação gerada: {}", target.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            if !first && options.format == OutputFormat::Text {
                writeln!(handle)?;
            }
            write_report(&mut handle, &report, options.format, false)?;
        }
    }

    Ok(())
}

fn write_report<W: Write>(
    w: &mut W,
    report: &TemplateReport<'_>,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    match format {
        OutputFormat::Text => text::write_text_report(w, report),
        OutputFormat::Json => json::write_json_report(w, report, pretty),
    }
}

pub(crate) fn report_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
