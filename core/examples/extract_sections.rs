use pbit_doc::{PbitPackage, SectionKey};
use std::fs::File;

fn usage() -> ! {
    eprintln!("Usage: extract_sections <TEMPLATE.pbit> [SECTION]");
    eprintln!("  SECTION: optionally print only this section (e.g. Medidas)");
    std::process::exit(2);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| usage());
    let only: Option<SectionKey> = args.next().map(|s| s.parse()).transpose()?;

    let pkg = PbitPackage::open(File::open(&path)?)?;
    let sections = pkg.extract();

    println!("missing entries: {}", pkg.missing_entries.len());

    for (key, block) in sections.iter() {
        if only.is_some_and(|wanted| wanted != key) {
            continue;
        }
        println!("== {} ==", key.title());
        print!("{}", block);
    }

    Ok(())
}
