use baseline_report::config::DEFAULT_CONFIG_FILE;
use baseline_report::OutputFormat;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "baseline")]
#[command(
    author,
    version,
    about = "Render bundle API baseline comparisons as nested outline reports"
)]
pub struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the report configuration file
    #[clap(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a baseline comparison into a report file
    Render {
        /// Baseline comparison in JSON form
        input: PathBuf,

        /// Directory the report is written to (overrides the configuration)
        #[clap(short, long)]
        output: Option<PathBuf>,

        /// Report format (overrides the configuration)
        #[clap(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Reject event streams that break depth-first order
        #[clap(long, default_value_t = false)]
        strict: bool,

        /// Also report packages and members without changes
        #[clap(long, default_value_t = false)]
        include_unchanged: bool,
    },

    /// Print the rendered outline and verify that its structure is balanced
    Check {
        /// Baseline comparison in JSON form
        input: PathBuf,

        /// Reject event streams that break depth-first order
        #[clap(long, default_value_t = false)]
        strict: bool,

        /// Also report packages and members without changes
        #[clap(long, default_value_t = false)]
        include_unchanged: bool,
    },

    /// Copy the icon images next to a report
    Icons {
        /// Directory holding the icon images (overrides the configuration)
        #[clap(short, long)]
        source: Option<PathBuf>,

        /// Report output directory (overrides the configuration)
        #[clap(short, long)]
        output: Option<PathBuf>,

        /// Only list the icon paths referenced by reports
        #[clap(long, default_value_t = false)]
        list: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration
        #[clap(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Html,
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Html => OutputFormat::Html,
            FormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}
