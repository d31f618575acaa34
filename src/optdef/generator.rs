use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::optdef::help::HelpSource;
use crate::optdef::table::OptionTable;
use crate::optdef::token::scan_help_text;
use std::fs;
use std::path::Path;

/// Turns a program's help text into a bash array of option definitions.
pub struct OptionTableGenerator {
    config: GeneratorConfig,
}

impl OptionTableGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate<H: HelpSource + ?Sized>(&self, source: &H) -> Result<OptionTable> {
        let help_text = source.capture(&self.config.program_name, &self.config.help_flag)?;
        self.generate_from_text(&help_text)
    }

    pub fn generate_from_text(&self, help_text: &str) -> Result<OptionTable> {
        let tokens = scan_help_text(help_text);
        log::info!(
            "found {} option definitions in {} help output",
            tokens.len(),
            self.config.program_name
        );

        OptionTable::from_tokens(&self.config.array_name, &self.config.program_name, tokens)
    }

    /// Writes the table to the configured output path, replacing any
    /// existing file.
    pub fn write(&self, table: &OptionTable) -> Result<()> {
        let path = self.config.output_path.as_path();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, table.render())?;
        log::info!("wrote {} entries to {}", table.len(), path.display());
        Ok(())
    }

    /// Generates the table and writes it. Nothing is written on failure.
    pub fn run<H: HelpSource + ?Sized>(&self, source: &H) -> Result<OptionTable> {
        let table = self.generate(source)?;
        self.write(&table)?;
        Ok(table)
    }

    pub fn output_path(&self) -> &Path {
        &self.config.output_path
    }
}
