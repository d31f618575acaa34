pub mod generator;
pub mod help;
pub mod table;
pub mod token;

pub use generator::OptionTableGenerator;
pub use help::{CommandHelpSource, HelpSource, StaticHelpSource};
pub use table::{OptionRecord, OptionTable, FLAG_INDICATOR};
pub use token::{scan_help_text, OptionToken};
