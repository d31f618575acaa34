use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "extract-zip")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extracts files from a ZIP archive")]
#[command(after_help = "EXAMPLES:\n  \
    extract-zip release.zip\n  \
    extract-zip release.zip --directory /tmp/release --show-progress")]
pub struct ExtractCli {
    /// Path to the archive to be extracted
    pub archive: PathBuf,

    /// Destination directory for extracted files (defaults to the current directory)
    #[arg(short = 'd', long = "directory")]
    pub directory: Option<PathBuf>,

    /// Display a progress bar and extract entries one by one
    #[arg(short = 'p', long = "show-progress")]
    pub show_progress: bool,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Parser, Debug)]
#[command(name = "getoptdef")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generates a bash array of option definitions from a program's --help output")]
#[command(
    long_about = "Runs the program with its help flag, collects every GNU style option \
                  definition (-x, --long-option[=VALUE]) and writes them as a bash array \
                  literal. Without arguments it describes wget and writes wget.bash."
)]
#[command(after_help = "EXAMPLES:\n  \
    getoptdef\n  \
    getoptdef --program curl --output curl.bash\n  \
    getoptdef --config bashutils.toml")]
pub struct GetoptdefCli {
    /// Program whose help output is parsed
    #[arg(long)]
    pub program: Option<String>,

    /// Argument used to request the help text
    #[arg(long, allow_hyphen_values = true)]
    pub help_flag: Option<String>,

    /// Output file (overwritten if it exists)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Name of the generated bash array
    #[arg(long)]
    pub array_name: Option<String>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<&OutputFormat> for OutputMode {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl ExtractCli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_extractor_with_defaults(self.config.as_ref())?;

        // The flag only ever switches progress on
        let overrides = CliOverrides::new().with_show_progress(self.show_progress.then_some(true));
        config.merge_with_cli_args(&overrides);

        Ok(config)
    }

    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from(&self.output_format)
    }

    pub fn log_level(&self) -> LevelFilter {
        log_level(self.verbose, self.quiet)
    }
}

impl GetoptdefCli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_program_name(self.program.clone())
            .with_help_flag(self.help_flag.clone())
            .with_output_path(self.output.clone())
            .with_array_name(self.array_name.clone())
    }

    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from(&self.output_format)
    }

    pub fn log_level(&self) -> LevelFilter {
        log_level(self.verbose, self.quiet)
    }
}

/// Maps `-v` counts onto log levels; warnings are shown by default.
pub fn log_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }

    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
