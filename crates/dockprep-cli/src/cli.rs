use clap::{Args, Parser, Subcommand, ValueEnum};
use dockprep::engine::selection::SavePolicy;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    name = "dockprep",
    author,
    version,
    about = "dockprep - Prepare PDBQT structures and AutoDock Vina configuration files for docking.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a PDBQT file into its TER-terminated structures.
    Split(SplitArgs),
    /// Write an AutoDock Vina configuration (conf.txt) for a receptor/ligand pair.
    Conf(ConfArgs),
    /// Export the atom records of a PDBQT file as CSV.
    Table(TableArgs),
}

/// Which structures the `split` subcommand writes.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOption {
    /// Every structure, to its own file.
    All,
    /// The largest structure and the structure nearest to it (the ligand).
    Mains,
    /// Only the largest structure.
    Largest,
}

impl From<SaveOption> for SavePolicy {
    fn from(o: SaveOption) -> Self {
        match o {
            SaveOption::All => SavePolicy::All,
            SaveOption::Mains => SavePolicy::Mains,
            SaveOption::Largest => SavePolicy::Largest,
        }
    }
}

/// Arguments for the `split` subcommand.
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Path to the PDBQT file to split (e.g., prepared with prepare_receptor4.py).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Which structures to save.
    #[arg(short, long, value_enum, default_value_t = SaveOption::All)]
    pub save: SaveOption,
}

/// Arguments for the `conf` subcommand.
#[derive(Args, Debug)]
pub struct ConfArgs {
    /// Prep directory holding `*_receptor.pdbqt` and `*_ligand.pdbqt`.
    #[arg(short = 'p', long = "prep-path", value_name = "DIR")]
    pub prep_path: Option<PathBuf>,

    /// Path to a PDBQT file containing only the protein.
    #[arg(short, long, value_name = "PATH")]
    pub receptor: Option<PathBuf>,

    /// Path to a PDBQT file containing only the ligand.
    #[arg(short, long, value_name = "PATH")]
    pub ligand: Option<PathBuf>,

    /// Where to write the Vina configuration.
    #[arg(short, long, value_name = "PATH", default_value = "conf.txt")]
    pub output: PathBuf,

    /// Optional TOML file with docking defaults.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Docking Overrides ---
    /// Override the maximum energy difference between best and worst mode (kcal/mol).
    #[arg(long, value_name = "FLOAT")]
    pub energy_range: Option<f64>,

    /// Override the exhaustiveness of the global search.
    #[arg(long, value_name = "INT")]
    pub exhaustiveness: Option<u32>,

    /// Override the maximum number of binding modes to generate.
    #[arg(long, value_name = "INT")]
    pub num_modes: Option<u32>,

    /// Number of CPUs for Vina to use (detected by Vina when omitted).
    #[arg(long, value_name = "INT")]
    pub cpu: Option<u32>,

    /// Override the padding added to each half-extent of the receptor (Angstroms).
    #[arg(long, value_name = "FLOAT")]
    pub padding: Option<f64>,
}

/// Arguments for the `table` subcommand.
#[derive(Args, Debug)]
pub struct TableArgs {
    /// Path to the PDBQT file to read.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// CSV output path; standard output when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
