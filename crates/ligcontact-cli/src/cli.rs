use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "ligcontact - Classify non-covalent protein-ligand contacts (hydrogen bonds, hydrophobic contacts, pi-stacking, salt bridges, metal coordination) from atomic coordinates.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and progress display except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used by the contact detectors.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect contacts between a protein (PDB) and a ligand (SDF).
    Analyze(AnalyzeArgs),
    /// Print the effective, clamped analysis parameters as TOML.
    Params(ParamsArgs),
}

/// Output encodings for the analysis report.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Full report as pretty-printed JSON.
    #[default]
    Json,
    /// Contact list only, one row per contact.
    Csv,
    /// Human-readable table followed by the summaries.
    Text,
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the protein structure in PDB format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub protein: PathBuf,

    /// Path to the ligand structure in SDF (V2000) format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub ligand: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: ParamOverrides,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S contacts.hbond-max-dist=3.2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,

    /// Output format of the report.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write the report to a file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Per-run threshold overrides. Values outside their allowed range are clamped.
#[derive(Args, Debug, Default, Clone)]
pub struct ParamOverrides {
    /// Override the maximum donor-acceptor distance, in angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub hbond_max_dist: Option<f64>,

    /// Override the minimum hydrogen-bond angle, in degrees.
    #[arg(long, value_name = "FLOAT")]
    pub hbond_min_angle: Option<f64>,

    /// Override the maximum carbon-carbon distance for hydrophobic contacts.
    #[arg(long, value_name = "FLOAT")]
    pub hydrophobic_max_dist: Option<f64>,

    /// Override the maximum distance between opposite charges.
    #[arg(long, value_name = "FLOAT")]
    pub salt_bridge_max_dist: Option<f64>,

    /// Override the maximum metal-ligand distance.
    #[arg(long, value_name = "FLOAT")]
    pub metal_max_dist: Option<f64>,

    /// Disable pi-stacking detection, even if enabled in the config file.
    #[arg(long)]
    pub no_pi_stack: bool,
}

/// Arguments for the `params` subcommand.
#[derive(Args, Debug)]
pub struct ParamsArgs {
    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value before printing.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_arguments_parse_with_overrides() {
        let cli = Cli::parse_from([
            "ligcontact",
            "-vv",
            "analyze",
            "-p",
            "protein.pdb",
            "-l",
            "ligand.sdf",
            "--hbond-max-dist",
            "3.2",
            "--no-pi-stack",
            "-S",
            "limits.max-ligand-atoms=50",
            "-f",
            "csv",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Analyze(args) = cli.command else {
            panic!("Expected 'analyze' subcommand");
        };
        assert_eq!(args.protein, PathBuf::from("protein.pdb"));
        assert_eq!(args.overrides.hbond_max_dist, Some(3.2));
        assert!(args.overrides.no_pi_stack);
        assert_eq!(args.set_values, vec!["limits.max-ligand-atoms=50"]);
        assert_eq!(args.format, OutputFormat::Csv);
        assert!(args.output.is_none());
    }

    #[test]
    fn format_defaults_to_json() {
        let cli = Cli::parse_from(["ligcontact", "analyze", "-p", "a.pdb", "-l", "b.sdf"]);
        let Commands::Analyze(args) = cli.command else {
            panic!("Expected 'analyze' subcommand");
        };
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["ligcontact", "-q", "-v", "params"]);
        assert!(result.is_err());
    }

    #[test]
    fn analyze_requires_both_structures() {
        let result = Cli::try_parse_from(["ligcontact", "analyze", "-p", "a.pdb"]);
        assert!(result.is_err());
    }
}
