//! o365 CLI - Office 365 and SharePoint Online administration.
//!
//! The main entry point for the `o365` CLI binary.

use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;

use o365_cli::{Cli, Commands, ContentTypeCommands, SpoCommands, commands};
use o365_core::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config();

    init_logging(config.log_format, if config.debug { "debug" } else { "warn" });

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("{} {err}", "Error:".red());
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(async {
        match cli.command {
            Commands::Spo(spo) => match spo.command {
                SpoCommands::Status(args) => commands::status::execute(args, &config).await,
                SpoCommands::ContentType(ct) => match ct.command {
                    ContentTypeCommands::FieldRemove(args) => {
                        commands::contenttype_field_remove::execute(args, &config).await
                    }
                },
            },
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("{} {err}", "Error:".red());
            ExitCode::FAILURE
        }
    }
}
