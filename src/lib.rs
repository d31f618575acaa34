pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod optdef;
pub mod ui;

// Public API re-exports
pub use cli::{ExtractCli, GetoptdefCli, OutputFormat};
pub use config::{CliOverrides, Config, ExtractorConfig, GeneratorConfig};
pub use error::{BashUtilsError, Result, UserFriendlyError};

// Core functionality re-exports
pub use archive::{ExtractionMode, ExtractionProgress, ExtractionReport, SkippedEntry, ZipExtractor};
pub use optdef::{
    CommandHelpSource, HelpSource, OptionRecord, OptionTable, OptionTableGenerator, OptionToken,
    StaticHelpSource,
};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use log::LevelFilter;
use std::path::Path;

/// Shared front end of the command-line tools
pub struct BashUtils {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl BashUtils {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(config.extractor.show_progress && !quiet);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Extracts `archive` into `destination`, or the current directory when
    /// none is given. Entry-by-entry mode draws a progress bar.
    pub fn extract_archive(
        &self,
        archive: &Path,
        destination: Option<&Path>,
    ) -> Result<ExtractionReport> {
        let extractor = match destination {
            Some(dir) => ZipExtractor::new(dir),
            None => ZipExtractor::in_current_dir()?,
        }
        .with_progress(self.config.extractor.show_progress);

        self.output_formatter.info(&format!(
            "Extracting {} into {}",
            archive.display(),
            extractor.destination().display()
        ));

        if !extractor.shows_progress() {
            return extractor.extract(archive, None);
        }

        let entry_progress = self
            .progress_manager
            .create_entry_progress(0, &self.config.extractor.progress_label);
        let progress_callback = {
            let pb = entry_progress.clone();
            move |progress: &ExtractionProgress| {
                ui::progress::update_entry_progress(&pb, progress);
            }
        };

        match extractor.extract(archive, Some(&progress_callback)) {
            Ok(report) => {
                ui::progress::finish_progress_with_summary(
                    &entry_progress,
                    report.elapsed,
                    report.skipped_count(),
                );
                Ok(report)
            }
            Err(e) => {
                entry_progress.abandon();
                Err(e)
            }
        }
    }

    /// Builds the option table from `source` and writes it to the
    /// configured output file.
    pub fn generate_option_table<H: HelpSource + ?Sized>(&self, source: &H) -> Result<OptionTable> {
        let generator = OptionTableGenerator::new(self.config.generator.clone());

        self.output_formatter.info(&format!(
            "Reading options from `{} {}`",
            self.config.generator.program_name, self.config.generator.help_flag
        ));

        generator.run(source)
    }

    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn handle_error(&self, error: &BashUtilsError) {
        log::debug!("{:?}", error);
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Installs the `env_logger` backend. `RUST_LOG` takes precedence over
/// `level` when set.
pub fn init_logging(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_timestamp(None);

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    // A second initialisation (tests, embedding) keeps the first logger
    let _ = builder.try_init();
}
