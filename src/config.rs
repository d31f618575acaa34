use crate::error::{BashUtilsError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub extractor: ExtractorConfig,
}

/// Settings of the option table generator.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// External executable whose help text is scraped
    pub program_name: String,
    /// Argument used to request the help text
    pub help_flag: String,
    /// Destination of the generated bash snippet
    pub output_path: PathBuf,
    /// Name of the emitted `local -a` array
    pub array_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub show_progress: bool,
    pub progress_label: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::wget()
    }
}

impl GeneratorConfig {
    /// The preset the generator falls back to when nothing else is given.
    pub fn wget() -> Self {
        Self {
            program_name: "wget".to_string(),
            help_flag: "--help".to_string(),
            output_path: PathBuf::from("wget.bash"),
            array_name: "opt_definitions".to_string(),
        }
    }

    pub fn for_program<S: Into<String>>(program: S) -> Self {
        let program_name = program.into();
        let output_path = default_output_path(&program_name);
        Self {
            program_name,
            output_path,
            ..Self::wget()
        }
    }
}

/// `<program>.bash`, the file written when no output path is given.
fn default_output_path(program: &str) -> PathBuf {
    PathBuf::from(format!("{}.bash", program))
}

/// Reads only the `[extractor]` table; other tables may hold anything.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExtractorFile {
    extractor: ExtractorConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            show_progress: false,
            progress_label: "Extracting".to_string(),
        }
    }
}

const DEFAULT_CONFIG_PATHS: [&str; 2] = ["bashutils.toml", ".bashutils.toml"];

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        parse_config_file(path.as_ref())
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match resolve_config_path(config_path) {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Like [`Config::load_with_defaults`], but only `[extractor]` has to be
    /// well formed. The generator settings stay at their defaults.
    pub fn load_extractor_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        let extractor = match resolve_config_path(config_path) {
            Some(path) => parse_config_file::<ExtractorFile>(&path)?.extractor,
            None => ExtractorConfig::default(),
        };

        Ok(Self {
            extractor,
            ..Self::default()
        })
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref program) = cli_args.program_name {
            // Only a derived output name follows the program; a configured one stays
            if cli_args.output_path.is_none()
                && self.generator.output_path == default_output_path(&self.generator.program_name)
            {
                self.generator.output_path = default_output_path(program);
            }
            self.generator.program_name = program.clone();
        }

        if let Some(ref help_flag) = cli_args.help_flag {
            self.generator.help_flag = help_flag.clone();
        }

        if let Some(ref output_path) = cli_args.output_path {
            self.generator.output_path = output_path.clone();
        }

        if let Some(ref array_name) = cli_args.array_name {
            self.generator.array_name = array_name.clone();
        }

        if let Some(show_progress) = cli_args.show_progress {
            self.extractor.show_progress = show_progress;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.generator.program_name.trim().is_empty() {
            return Err(BashUtilsError::Config {
                message: "Program name must not be empty".to_string(),
            });
        }

        if self.generator.help_flag.trim().is_empty() {
            return Err(BashUtilsError::Config {
                message: "Help flag must not be empty".to_string(),
            });
        }

        if self.generator.output_path.as_os_str().is_empty() {
            return Err(BashUtilsError::Config {
                message: "Output path must not be empty".to_string(),
            });
        }

        if !is_shell_identifier(&self.generator.array_name) {
            return Err(BashUtilsError::Config {
                message: format!(
                    "Array name '{}' is not a valid shell identifier",
                    self.generator.array_name
                ),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

fn resolve_config_path<P: AsRef<Path>>(config_path: Option<P>) -> Option<PathBuf> {
    match config_path {
        Some(path) => Some(path.as_ref().to_path_buf()),
        None => DEFAULT_CONFIG_PATHS
            .into_iter()
            .map(PathBuf::from)
            .find(|path| path.exists()),
    }
}

fn parse_config_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(BashUtilsError::Config {
            message: format!("Configuration file not found: {}", path.display()),
        });
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| BashUtilsError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

    let parsed = toml::from_str(&content)
        .map_err(|e| BashUtilsError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

    log::debug!("loaded configuration from {}", path.display());
    Ok(parsed)
}

fn is_shell_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub program_name: Option<String>,
    pub help_flag: Option<String>,
    pub output_path: Option<PathBuf>,
    pub array_name: Option<String>,
    pub show_progress: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program_name(mut self, program: Option<String>) -> Self {
        self.program_name = program;
        self
    }

    pub fn with_help_flag(mut self, help_flag: Option<String>) -> Self {
        self.help_flag = help_flag;
        self
    }

    pub fn with_output_path(mut self, output_path: Option<PathBuf>) -> Self {
        self.output_path = output_path;
        self
    }

    pub fn with_array_name(mut self, array_name: Option<String>) -> Self {
        self.array_name = array_name;
        self
    }

    pub fn with_show_progress(mut self, show_progress: Option<bool>) -> Self {
        self.show_progress = show_progress;
        self
    }
}
