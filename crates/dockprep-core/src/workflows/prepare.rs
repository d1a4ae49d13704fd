use crate::core::io::traits::RecordFile;
use crate::core::io::vina::VinaConfig;
use crate::core::models::atom::AtomTable;
use crate::engine::config::DockingParams;
use crate::engine::error::EngineError;
use crate::engine::search_box::SearchBox;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Outcome of [`run`]: the configuration plus parse statistics for both inputs.
#[derive(Debug, Clone)]
pub struct Preparation {
    pub config: VinaConfig,
    pub ligand_atoms: usize,
    pub ligand_rejected: usize,
    pub receptor_atoms: usize,
    pub receptor_rejected: usize,
}

fn load(path: &Path, what: &str) -> Result<AtomTable, EngineError> {
    let table = AtomTable::read_from_path(path)?;
    debug!(
        "Parsed {} atoms from {} ({} line(s) skipped)",
        table.len(),
        path.display(),
        table.rejected().len()
    );
    for rejection in table.rejected() {
        debug!(
            "{} line {} skipped: {}",
            what, rejection.line_number, rejection.reason
        );
    }
    Ok(table)
}

/// Builds the Vina configuration for `receptor` and `ligand`.
///
/// The search box is centered on the ligand centroid and sized from the receptor
/// extents (see [`SearchBox::from_tables`]). The paths are recorded as given.
#[instrument(skip_all, name = "prepare_workflow", fields(receptor = %receptor.display(), ligand = %ligand.display()))]
pub fn run(
    receptor: &Path,
    ligand: &Path,
    params: &DockingParams,
) -> Result<Preparation, EngineError> {
    info!("Loading ligand and receptor atoms.");
    let ligand_table = load(ligand, "ligand")?;
    let receptor_table = load(receptor, "receptor")?;

    let search_box = SearchBox::from_tables(&ligand_table, &receptor_table, params.padding)?;
    info!(
        "Search box center ({:.3}, {:.3}, {:.3}), size ({:.3}, {:.3}, {:.3})",
        search_box.center.x,
        search_box.center.y,
        search_box.center.z,
        search_box.size.x,
        search_box.size.y,
        search_box.size.z
    );
    if ligand_table.rejected().len() > ligand_table.len() {
        warn!(
            "Most lines of {} were not atom records; check that it is the ligand file.",
            ligand.display()
        );
    }

    let config = VinaConfig {
        receptor: receptor.to_path_buf(),
        ligand: ligand.to_path_buf(),
        energy_range: params.energy_range,
        exhaustiveness: params.exhaustiveness,
        num_modes: params.num_modes,
        cpu: params.cpu,
        center: search_box.center,
        size: search_box.size,
    };

    Ok(Preparation {
        config,
        ligand_atoms: ligand_table.len(),
        ligand_rejected: ligand_table.rejected().len(),
        receptor_atoms: receptor_table.len(),
        receptor_rejected: receptor_table.rejected().len(),
    })
}

/// Runs [`run`] and writes the configuration to `output`. Nothing is written when the
/// preparation fails.
pub fn run_to_path(
    receptor: &Path,
    ligand: &Path,
    params: &DockingParams,
    output: &Path,
) -> Result<Preparation, EngineError> {
    let preparation = run(receptor, ligand, params)?;
    preparation.config.write_to_path(output)?;
    info!("Wrote Vina configuration to {}", output.display());
    Ok(preparation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::DockingParamsBuilder;
    use nalgebra::{Point3, Vector3};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn atom_line(serial: usize, x: f64, y: f64, z: f64) -> String {
        format!(
            "ATOM  {:>5}  CA  ALA A   1    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00     0.000 C",
            serial, x, y, z
        )
    }

    fn write_pdbqt(dir: &TempDir, name: &str, points: &[(f64, f64, f64)]) -> PathBuf {
        let mut text = String::from("REMARK  generated\n");
        for (i, &(x, y, z)) in points.iter().enumerate() {
            text.push_str(&atom_line(i + 1, x, y, z));
            text.push('\n');
        }
        text.push_str("TER\n");
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    fn receptor(dir: &TempDir) -> PathBuf {
        write_pdbqt(
            dir,
            "1abc_receptor.pdbqt",
            &[(0.0, 0.0, 0.0), (100.0, 40.0, 60.0), (50.0, 20.0, 30.0)],
        )
    }

    #[test]
    fn config_uses_ligand_centroid_and_receptor_extent() {
        let dir = tempfile::tempdir().unwrap();
        let receptor = receptor(&dir);
        let ligand = write_pdbqt(
            &dir,
            "1abc_ligand.pdbqt",
            &[(40.0, 10.0, 20.0), (60.0, 30.0, 40.0)],
        );

        let prep = run(&receptor, &ligand, &DockingParams::default()).unwrap();

        assert_eq!(prep.config.center, Point3::new(50.0, 20.0, 30.0));
        assert_eq!(prep.config.size, Vector3::new(70.0, 40.0, 50.0));
        assert_eq!(prep.config.receptor, receptor);
        assert_eq!(prep.config.ligand, ligand);
        assert_eq!(prep.config.energy_range, 3.0);
        assert_eq!(prep.config.exhaustiveness, 8);
        assert_eq!(prep.config.num_modes, 9);
        assert_eq!(prep.ligand_atoms, 2);
        assert_eq!(prep.ligand_rejected, 2);
        assert_eq!(prep.receptor_atoms, 3);
    }

    #[test]
    fn custom_params_flow_into_config() {
        let dir = tempfile::tempdir().unwrap();
        let receptor = receptor(&dir);
        let ligand = write_pdbqt(&dir, "lig.pdbqt", &[(50.0, 20.0, 30.0)]);
        let params = DockingParamsBuilder::new()
            .exhaustiveness(16)
            .cpu(Some(2))
            .padding(5.0)
            .build()
            .unwrap();

        let prep = run(&receptor, &ligand, &params).unwrap();

        assert_eq!(prep.config.exhaustiveness, 16);
        assert_eq!(prep.config.cpu, Some(2));
        assert_eq!(prep.config.size, Vector3::new(55.0, 25.0, 35.0));
    }

    #[test]
    fn ligand_outside_receptor_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let receptor = receptor(&dir);
        let ligand = write_pdbqt(&dir, "lig.pdbqt", &[(50.0, 20.0, 75.0)]);
        let output = dir.path().join("conf.txt");

        let result = run_to_path(&receptor, &ligand, &DockingParams::default(), &output);

        assert!(matches!(
            result,
            Err(EngineError::LigandOutsideReceptor { axis: 'z', .. })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn run_to_path_writes_vina_syntax() {
        let dir = tempfile::tempdir().unwrap();
        let receptor = receptor(&dir);
        let ligand = write_pdbqt(&dir, "lig.pdbqt", &[(50.0, 20.0, 30.0)]);
        let output = dir.path().join("conf.txt");

        run_to_path(&receptor, &ligand, &DockingParams::default(), &output).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], format!("receptor = {}", receptor.display()));
        assert_eq!(lines[1], format!("ligand = {}", ligand.display()));
        assert_eq!(
            &lines[2..],
            &[
                "energy_range = 3.0",
                "exhaustiveness = 8",
                "num_modes = 9",
                "center_x = 50.0",
                "center_y = 20.0",
                "center_z = 30.0",
                "size_x = 70.0",
                "size_y = 40.0",
                "size_z = 50.0",
            ]
        );
    }

    #[test]
    fn missing_input_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let receptor = receptor(&dir);
        let missing = dir.path().join("nope.pdbqt");
        assert!(matches!(
            run(&receptor, &missing, &DockingParams::default()),
            Err(EngineError::Pdbqt { .. })
        ));
    }
}
