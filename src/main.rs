use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;

use druid_tasks_exporter::config::{load_config, print_schema, CliArgs};
use druid_tasks_exporter::startup;
use druid_tasks_exporter::utils::logger::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.print_schema {
        return match print_schema() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error printing configuration schema: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error initializing logging: {}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = startup::run(Arc::new(config)).await {
        error!(
            event_name = "server.failed",
            event_domain = "server",
            error = %e,
            "exporter stopped with an error"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
