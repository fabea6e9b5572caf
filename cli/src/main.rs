mod commands;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use pbit_doc::{ContainerLimits, SectionKey};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::commands::extract::BatchOptions;

#[derive(Parser)]
#[command(name = "pbit-doc")]
#[command(about = "Extract documentation from Power BI template (.pbit) files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    #[arg(long, short, global = true, help = "Verbose mode: log progress to stderr")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Extract documentation sections from templates")]
    Extract {
        #[arg(required = true, help = "Template files to document")]
        paths: Vec<String>,
        #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
        #[arg(
            long = "section",
            value_name = "SECTION",
            value_parser = parse_section,
            help = "Only emit this section (repeatable), e.g. Medidas or measures"
        )]
        sections: Vec<SectionKey>,
        #[arg(long, value_name = "DIR", help = "Write one versioned document per template into DIR")]
        out_dir: Option<String>,
        #[arg(long, value_name = "MB", help = "Maximum uncompressed size of one archive entry")]
        max_part_mb: Option<u64>,
    },
    #[command(about = "Show a summary of a template's contents")]
    Info {
        #[arg(help = "Path to the template")]
        path: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_section(raw: &str) -> Result<SectionKey, pbit_doc::UnknownSection> {
    raw.parse()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Extract {
            paths,
            format,
            sections,
            out_dir,
            max_part_mb,
        } => {
            let mut limits = ContainerLimits::default();
            if let Some(mb) = max_part_mb {
                limits.max_part_uncompressed_bytes = mb.saturating_mul(1024 * 1024);
            }
            let options = BatchOptions {
                format,
                sections,
                out_dir: out_dir.map(PathBuf::from),
                limits,
            };
            commands::extract::run(&paths, &options)
        }
        Commands::Info { path } => commands::info::run(&path),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
