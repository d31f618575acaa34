use crate::archive::ExtractionReport;
use crate::error::{BashUtilsError, UserFriendlyError};
use crate::optdef::OptionTable;
use crate::ui::progress::format_duration;
use console::{style, Emoji, StyledObject, Term};
use serde_json::{json, Value};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");

#[derive(Debug, Clone, Copy, PartialEq)]
enum MessageKind {
    Success,
    Error,
    Warning,
    Info,
    Suggestion,
}

impl MessageKind {
    /// Verbosity needed before the message is printed; `None` means always.
    fn min_verbosity(self) -> Option<u8> {
        match self {
            MessageKind::Error | MessageKind::Suggestion => None,
            MessageKind::Success | MessageKind::Warning => Some(0),
            MessageKind::Info => Some(1),
        }
    }

    fn label(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
            MessageKind::Warning => "warning",
            MessageKind::Info => "info",
            MessageKind::Suggestion => "suggestion",
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, MessageKind::Error | MessageKind::Suggestion)
    }

    fn emoji(self) -> &'static Emoji<'static, 'static> {
        match self {
            MessageKind::Success => &CHECKMARK,
            MessageKind::Error => &CROSS,
            MessageKind::Warning => &WARNING,
            MessageKind::Info | MessageKind::Suggestion => &INFO,
        }
    }

    fn paint(self, message: &str) -> StyledObject<&str> {
        match self {
            MessageKind::Success => style(message).green().bold(),
            MessageKind::Error => style(message).red().bold(),
            MessageKind::Warning => style(message).yellow().bold(),
            MessageKind::Info | MessageKind::Suggestion => style(message).cyan(),
        }
    }
}

/// Prints user-facing results of both tools in the selected [`OutputMode`].
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors =
            mode == OutputMode::Human && !quiet && Term::stdout().features().colors_supported();

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn success(&self, message: &str) {
        self.emit(MessageKind::Success, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(MessageKind::Error, message);
    }

    pub fn warning(&self, message: &str) {
        self.emit(MessageKind::Warning, message);
    }

    pub fn info(&self, message: &str) {
        self.emit(MessageKind::Info, message);
    }

    pub fn print_user_friendly_error(&self, error: &BashUtilsError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            self.emit(MessageKind::Suggestion, &suggestion);
        }
    }

    pub fn print_extraction_report(&self, report: &ExtractionReport) {
        match self.mode {
            OutputMode::Human => self.print_human_report(report),
            OutputMode::Json => println!(
                "{}",
                serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
            ),
            OutputMode::Plain => self.print_plain_report(report),
        }
    }

    pub fn print_table_summary(&self, table: &OptionTable, output_path: &Path) {
        if self.mode == OutputMode::Json {
            print_json(&json!({
                "type": "summary",
                "output": output_path.display().to_string(),
                "options": table.len(),
                "value_options": table.value_option_count(),
                "flag_options": table.flag_option_count(),
            }));
            return;
        }

        self.success(&format!(
            "Wrote {} option definitions to {}",
            table.len(),
            output_path.display()
        ));
        self.info(&format!(
            "{} take a value, {} are flags",
            table.value_option_count(),
            table.flag_option_count()
        ));
    }

    fn should_show(&self, kind: MessageKind) -> bool {
        match kind.min_verbosity() {
            None => true,
            Some(level) => !self.quiet && self.verbose_level >= level,
        }
    }

    fn emit(&self, kind: MessageKind, message: &str) {
        if !self.should_show(kind) {
            return;
        }

        let line = match self.mode {
            OutputMode::Json => {
                let record = json!({ "type": "message", "level": kind.label(), "message": message });
                serde_json::to_string(&record).unwrap_or_else(|_| "{}".to_string())
            }
            OutputMode::Plain => format!("{}: {}", kind.label().to_uppercase(), message),
            OutputMode::Human if self.use_colors => {
                format!("{}{}", kind.emoji(), kind.paint(message))
            }
            OutputMode::Human => {
                let marker = match kind {
                    MessageKind::Suggestion => "Suggestion:",
                    _ => kind.emoji().1.trim_end(),
                };
                format!("{} {}", marker, message)
            }
        };

        if kind.to_stderr() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn print_human_report(&self, report: &ExtractionReport) {
        self.success(&format!(
            "Extracted {} of {} entries into {} ({})",
            report.extracted_entries,
            report.total_entries,
            report.destination.display(),
            format_duration(report.elapsed)
        ));

        if !report.skipped_entries.is_empty() {
            self.warning(&format!(
                "Skipped {} entries that could not be extracted",
                report.skipped_count()
            ));
            for skipped in &report.skipped_entries {
                self.info(&format!("  {}: {}", skipped.name, skipped.reason));
            }
        }
    }

    fn print_plain_report(&self, report: &ExtractionReport) {
        if self.quiet {
            return;
        }

        println!("Archive: {}", report.archive.display());
        println!("Destination: {}", report.destination.display());
        println!("Entries: {}", report.total_entries);
        println!("Extracted: {}", report.extracted_entries);
        println!("Skipped: {}", report.skipped_count());
        println!("Duration: {:?}", report.elapsed);
    }
}

fn print_json(value: &Value) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}
