use crate::cli::ConfArgs;
use crate::error::{CliError, Result};
use dockprep::engine::config::{DockingParams, DockingParamsBuilder};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialDockingConfig {
    energy_range: Option<f64>,
    exhaustiveness: Option<u32>,
    num_modes: Option<u32>,
    cpu: Option<u32>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialSearchBoxConfig {
    padding: Option<f64>,
}

/// Docking settings read from a TOML file. Every key is optional.
///
/// ```toml
/// [docking]
/// energy-range = 4.0
/// exhaustiveness = 16
/// num-modes = 20
/// cpu = 8
///
/// [search-box]
/// padding = 10.0
/// ```
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialConfig {
    docking: Option<PartialDockingConfig>,
    search_box: Option<PartialSearchBoxConfig>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads `path` when given; an absent path means an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Combines file values with CLI overrides. A CLI flag wins over the file, and
    /// the file wins over the built-in defaults.
    pub fn merge_with_cli(self, args: &ConfArgs) -> Result<DockingParams> {
        let docking = self.docking.unwrap_or_default();
        let search_box = self.search_box.unwrap_or_default();

        let mut builder = DockingParamsBuilder::new().cpu(args.cpu.or(docking.cpu));
        if let Some(v) = args.energy_range.or(docking.energy_range) {
            builder = builder.energy_range(v);
        }
        if let Some(v) = args.exhaustiveness.or(docking.exhaustiveness) {
            builder = builder.exhaustiveness(v);
        }
        if let Some(v) = args.num_modes.or(docking.num_modes) {
            builder = builder.num_modes(v);
        }
        if let Some(v) = args.padding.or(search_box.padding) {
            builder = builder.padding(v);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config_file(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("dockprep.toml");
        fs::write(&path, content).unwrap();
        path
    }

    fn conf_args(extra: &[&str]) -> ConfArgs {
        let mut argv = vec!["dockprep", "conf", "-r", "r.pdbqt", "-l", "l.pdbqt"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Conf(args) => args,
            other => panic!("Expected 'conf' subcommand, got {:?}", other),
        }
    }

    #[test]
    fn no_file_and_no_flags_gives_defaults() {
        let params = PartialConfig::load(None)
            .unwrap()
            .merge_with_cli(&conf_args(&[]))
            .unwrap();
        assert_eq!(params, DockingParams::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [docking]
            exhaustiveness = 32
            cpu = 4

            [search-box]
            padding = 12.5
            "#,
        );

        let params = PartialConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&conf_args(&[]))
            .unwrap();

        assert_eq!(params.exhaustiveness, 32);
        assert_eq!(params.cpu, Some(4));
        assert_eq!(params.padding, 12.5);
        assert_eq!(params.num_modes, 9);
        assert_eq!(params.energy_range, 3.0);
    }

    #[test]
    fn cli_flags_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [docking]
            energy-range = 5.0 # Will be overridden
            num-modes = 12
            "#,
        );
        let args = conf_args(&["--energy-range", "2.5", "--padding", "0"]);

        let params = PartialConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(params.energy_range, 2.5);
        assert_eq!(params.num_modes, 12);
        assert_eq!(params.padding, 0.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(&dir, "[docking]\nseed = 42\n");
        assert!(matches!(
            PartialConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn invalid_values_become_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(&dir, "[docking]\nexhaustiveness = 0\n");
        let result = PartialConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&conf_args(&[]));
        match result {
            Err(CliError::Config(msg)) => assert!(msg.contains("exhaustiveness")),
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PartialConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
