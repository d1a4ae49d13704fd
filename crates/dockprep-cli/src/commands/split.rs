use crate::cli::SplitArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use dockprep::engine::progress::ProgressReporter;
use dockprep::engine::selection::{SavePolicy, StructureRole};
use dockprep::workflows;
use tracing::info;

pub fn run(args: SplitArgs) -> Result<()> {
    let policy = SavePolicy::from(args.save);
    info!("Splitting {:?} with save policy '{}'", &args.input, policy);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let result = workflows::split::run(&args.input, policy, &reporter)?;

    println!(
        "Found {} structure(s) in {}",
        result.structures.len(),
        args.input.display()
    );
    for written in &result.written {
        println!(
            "  {:<6} #{:<3} {:>6} lines -> {}",
            role_label(written.role),
            written.index,
            written.line_count,
            written.path.display()
        );
    }

    Ok(())
}

fn role_label(role: StructureRole) -> &'static str {
    match role {
        StructureRole::Part => "part",
        StructureRole::Main => "main",
        StructureRole::Ligand => "ligand",
    }
}
