use bashutils::{BashUtils, ExtractCli, OutputFormatter};
use clap::Parser;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = ExtractCli::parse();
    bashutils::init_logging(cli.log_level());

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            let formatter = OutputFormatter::new(cli.output_mode(), 0, false);
            formatter.print_user_friendly_error(&e);
            return e.exit_code();
        }
    };

    let tools = BashUtils::new(config, cli.output_mode(), cli.verbose, cli.quiet);

    match tools.extract_archive(&cli.archive, cli.directory.as_deref()) {
        Ok(report) => {
            tools.output_formatter().print_extraction_report(&report);
            0
        }
        Err(e) => {
            tools.handle_error(&e);
            e.exit_code()
        }
    }
}
