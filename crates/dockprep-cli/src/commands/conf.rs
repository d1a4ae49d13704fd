use crate::cli::ConfArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use crate::utils::discover;
use dockprep::workflows;
use tracing::{debug, info};

pub fn run(args: ConfArgs) -> Result<()> {
    let inputs = discover::resolve_inputs(
        args.prep_path.as_deref(),
        args.receptor.as_deref(),
        args.ligand.as_deref(),
    )?;
    info!(
        "Using receptor {:?} and ligand {:?}",
        &inputs.receptor, &inputs.ligand
    );

    info!("Merging configuration from file and CLI arguments...");
    let params = PartialConfig::load(args.config.as_deref())?.merge_with_cli(&args)?;
    debug!("Docking parameters: {:?}", params);

    let preparation =
        workflows::prepare::run_to_path(&inputs.receptor, &inputs.ligand, &params, &args.output)?;

    let config = &preparation.config;
    println!(
        "Ligand: {} atom(s), receptor: {} atom(s)",
        preparation.ligand_atoms, preparation.receptor_atoms
    );
    println!(
        "Center ({:.3}, {:.3}, {:.3}), size ({:.3}, {:.3}, {:.3})",
        config.center.x,
        config.center.y,
        config.center.z,
        config.size.x,
        config.size.y,
        config.size.z
    );
    println!("✓ Vina configuration written to: {}", args.output.display());

    Ok(())
}
