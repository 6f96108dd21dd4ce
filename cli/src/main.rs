mod check;
mod cli;
mod error;
mod icons;
mod init;
mod logging;
mod render;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            input,
            output,
            format,
            strict,
            include_unchanged,
        } => render::execute(
            &cli.config,
            input,
            render::Overrides {
                output,
                format: format.map(Into::into),
                strict,
                include_unchanged,
            },
        ),
        Commands::Check {
            input,
            strict,
            include_unchanged,
        } => check::execute(
            &cli.config,
            input,
            render::Overrides {
                output: None,
                format: None,
                strict,
                include_unchanged,
            },
        ),
        Commands::Icons {
            source,
            output,
            list,
        } => icons::execute(&cli.config, source, output, list),
        Commands::Init { force } => init::execute(&cli.config, force),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "Error:".bold().red(), err.user_message());
        process::exit(1);
    }
}
