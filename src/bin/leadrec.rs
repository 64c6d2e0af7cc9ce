use std::env;
use std::path::{Path, PathBuf};
use std::process;

use leadrec::{document, reconcile, DedupeResult, LeadsDocument};

fn main() {
    let args: Vec<String> = env::args().collect();
    let input = args.get(1).map(String::as_str).unwrap_or("leads.json");

    if let Err(err) = run(Path::new(input)) {
        eprintln!("leadrec: {err}");
        process::exit(1);
    }
}

fn run(input: &Path) -> DedupeResult<()> {
    let batch = LeadsDocument::load(input)?;
    let outcome = reconcile(batch.leads)?;

    let output_file = sibling(input, "_output.json");
    let log_file = sibling(input, "_output_logs.json");

    LeadsDocument::new(outcome.leads).save(&output_file)?;
    println!("Output file: {}", output_file.display());

    document::save_log(&log_file, &outcome.log)?;
    println!("Output logs: {}", log_file.display());

    Ok(())
}

/// `foo.json` -> `foo<suffix>` next to the input.
fn sibling(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("leads");
    input.with_file_name(format!("{stem}{suffix}"))
}
