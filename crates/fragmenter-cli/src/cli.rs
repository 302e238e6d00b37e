use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Fragmenter CLI - Enumerate the bond-breaking fragments of a molecule and emit one calculation work unit per fragment charge state.",
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
    /// Fragment a molecule and write work units plus a completion record as JSON.
    Run(RunArgs),
    /// Print the bonds perceived from a structure's geometry.
    Bonds(BondsArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    // --- Core Arguments ---
    /// Path to the parent molecule in XYZ format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the JSON output (work units and completion record).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Fragmentation Overrides ---
    /// Number of cleavage levels to explore; 0 runs until no new fragments appear.
    #[arg(short, long, value_name = "INT", allow_negative_numbers = true)]
    pub depth: Option<i64>,

    #[command(flatten)]
    pub rings: OpenRings,

    #[command(flatten)]
    pub separation: ChargeSeparation,

    // --- Parent Molecule ---
    /// Net charge of the parent molecule.
    #[arg(long, value_name = "INT", allow_negative_numbers = true)]
    pub charge: Option<i32>,

    /// Spin multiplicity of the parent molecule. Derived from electron parity if omitted.
    #[arg(long, value_name = "INT")]
    pub spin: Option<u8>,

    /// Identifier recorded as the provenance of every work unit. Defaults to the input file stem.
    #[arg(long, value_name = "ID")]
    pub parent_id: Option<String>,

    // --- Connectivity ---
    /// Explicit bond list, e.g. "0-1,1-2" or "0-1:double,1-2".
    #[arg(short, long, value_name = "BONDS")]
    pub bonds: Option<String>,

    /// Never perceive bonds from geometry; requires --bonds.
    #[arg(long)]
    pub no_perceive: bool,

    // --- Molecule Store ---
    /// JSON file of previously computed molecules; matching candidates are skipped.
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S fragmentation.depth=2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Mutually exclusive flags for ring handling.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct OpenRings {
    /// Break a ring bond into the ring-opened structure.
    #[arg(long)]
    pub open_rings: bool,
    /// Only break ring bonds in pairs, yielding separated pieces.
    #[arg(long)]
    pub no_open_rings: bool,
}

/// Mutually exclusive flags for additional charge separation.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct ChargeSeparation {
    /// Allow fragment charges beyond the range between zero and the parent charge.
    #[arg(long)]
    pub allow_charge_separation: bool,
    /// Restrict fragment charges to the range between zero and the parent charge.
    #[arg(long)]
    pub no_charge_separation: bool,
}

/// Arguments for the `bonds` subcommand.
#[derive(Args, Debug)]
pub struct BondsArgs {
    /// Path to the molecule in XYZ format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Tolerance added to the covalent radius sum, in Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub tolerance: Option<f64>,

    /// Distance below which two atoms are considered overlapping, in Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub min_distance: Option<f64>,
}
