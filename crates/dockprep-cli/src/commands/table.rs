use crate::cli::TableArgs;
use crate::error::{CliError, Result};
use dockprep::core::io::table;
use dockprep::core::models::atom::AtomTable;
use tracing::{debug, info, warn};

pub fn run(args: TableArgs) -> Result<()> {
    info!("Reading atom records from {:?}", &args.input);
    let atoms = AtomTable::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;

    for rejection in atoms.rejected() {
        debug!(
            "Line {} skipped: {}",
            rejection.line_number, rejection.reason
        );
    }
    if atoms.is_empty() {
        warn!("No atom records found in {}", args.input.display());
    }

    match &args.output {
        Some(path) => {
            table::write_csv_to_path(&atoms, path)?;
            println!(
                "✓ Wrote {} atom(s) to {} ({} line(s) skipped)",
                atoms.len(),
                path.display(),
                atoms.rejected().len()
            );
        }
        None => {
            table::write_csv(&atoms, std::io::stdout().lock())?;
            info!(
                "Wrote {} atom(s) ({} line(s) skipped)",
                atoms.len(),
                atoms.rejected().len()
            );
        }
    }

    Ok(())
}
