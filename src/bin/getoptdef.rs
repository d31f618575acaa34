use bashutils::{BashUtils, CommandHelpSource, GetoptdefCli, OutputFormatter, OutputMode, UserFriendlyError};
use clap::Parser;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = GetoptdefCli::parse();
    bashutils::init_logging(cli.log_level());

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            print_startup_error(&e);
            return e.exit_code();
        }
    };

    let tools = BashUtils::new(config, cli.output_mode(), cli.verbose, cli.quiet);

    match tools.generate_option_table(&CommandHelpSource::new()) {
        Ok(table) => {
            tools
                .output_formatter()
                .print_table_summary(&table, &tools.config().generator.output_path);
            0
        }
        Err(e) => {
            tools.handle_error(&e);
            e.exit_code()
        }
    }
}

fn handle_generate_config(cli: &GetoptdefCli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "bashutils.toml".to_string());

    match BashUtils::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  getoptdef --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            e.exit_code()
        }
    }
}

fn print_startup_error(error: &bashutils::BashUtilsError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
