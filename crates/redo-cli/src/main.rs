use clap::Parser;
use owo_colors::{OwoColorize, Style};
use redo_core::error::CoreError;
use redo_core::repository::JsonRepository;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod parser;
mod timezone;
mod util;
mod views;

const DEFAULT_LOG_FILTER: &str = "redo_core=warn,redo_cli=warn";

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = cli::Cli::parse();

    let config = config::Config::new().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring unreadable configuration");
        config::Config::default()
    });
    let tz = match timezone::resolve_timezone(config.timezone.as_deref()) {
        Ok(tz) => tz,
        Err(e) => {
            handle_error(e.into());
            std::process::exit(1);
        }
    };
    tracing::debug!(data_file = %config.data_file.display(), timezone = %tz, "Starting");
    let repository = JsonRepository::new(&config.data_file, tz);

    let result = match cli.command {
        cli::Commands::Add(command) => {
            commands::add::add_task(&repository, command, &config, &tz).await
        }
        cli::Commands::List(command) => commands::list::list_tasks(&repository, command).await,
        cli::Commands::Done(command) => {
            commands::done::done_task(&repository, command, &tz).await
        }
        cli::Commands::Delete(command) => {
            commands::delete::delete_task(&repository, command).await
        }
        cli::Commands::Preview(command) => {
            commands::preview::preview_task(&repository, command, &config, &tz).await
        }
        cli::Commands::Migrate => commands::migrate::migrate_tasks(&repository).await,
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("REDO_LOG")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} Not found: {}", "Error:".style(error_style), s);
            }
            CoreError::AmbiguousId(tasks) => {
                eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
                eprintln!("Did you mean one of these?");
                for (id, text) in tasks {
                    eprintln!("  {} ({})", id.yellow(), text);
                }
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidTimezone(s) => {
                eprintln!(
                    "{} {} (set REDO_TIMEZONE to an IANA name such as 'Europe/Berlin')",
                    "Error:".style(error_style),
                    s
                );
            }
            _ => eprintln!("{} {:#}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
