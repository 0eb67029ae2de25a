use clap::{Args, Parser, Subcommand, ValueEnum};
use scoresift::engine::config::Preset;
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
    about = "scoresift - Select the top-performing candidates from docking and design score files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load score files, run the filter-and-rank pipeline and export the best entries.
    Select(SelectArgs),
    /// List the built-in pipeline presets and their parameters.
    Presets,
}

/// Names accepted by `--preset`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetName {
    /// Top entries by SR_3_interf_E_1_2 after the constraint filter.
    Interface,
    /// Top entries by SR_2_interf_E_1_4 from the best 20% by total_score.
    Glycan,
}

impl From<PresetName> for Preset {
    fn from(name: PresetName) -> Self {
        match name {
            PresetName::Interface => Preset::Interface,
            PresetName::Glycan => Preset::Glycan,
        }
    }
}

/// Arguments for the `select` subcommand.
#[derive(Args, Debug)]
pub struct SelectArgs {
    // --- Core Arguments ---
    /// Working directory containing the score files and structure files.
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub dir: PathBuf,

    /// Built-in pipeline preset to start from. Defaults to 'glycan' unless the
    /// config file names one.
    #[arg(short, long, value_enum, value_name = "NAME")]
    pub preset: Option<PresetName>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Selection Overrides ---
    /// Override the prefix used to find the ranking criterion column.
    #[arg(long, value_name = "PREFIX")]
    pub criterion_prefix: Option<String>,

    /// Override the exclusive upper bound of the constraint filter.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub cutoff: Option<f64>,

    /// Override the number of entries kept by the final ranking.
    #[arg(short = 'k', long, value_name = "INT")]
    pub top_k: Option<usize>,

    /// Enable or disable the quantile stage, overriding the preset and config file.
    #[command(flatten)]
    pub quantile: QuantileOverride,

    // --- Output Overrides ---
    /// Override the output directory, resolved against the working directory.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S selection.top-k=5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,

    /// Fail when score files disagree on their header instead of only warning.
    #[arg(long)]
    pub strict_schema: bool,

    /// Run the pipeline and print the selection without writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

/// A group to handle the mutually exclusive quantile flags.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct QuantileOverride {
    /// Keep only this fraction of the filtered entries, best by the quality column.
    #[arg(long, value_name = "FRACTION")]
    pub quantile: Option<f64>,
    /// Skip the quantile stage.
    #[arg(long)]
    pub no_quantile: bool,
}
