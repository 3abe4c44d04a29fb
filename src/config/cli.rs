use std::path::PathBuf;

use clap::Parser;

use super::config::QueryErrorPolicy;
use super::logging::LogFormat;

/// Exports Druid task counts per type and status as Prometheus gauges.
///
/// Flags override values from the environment (`DTE_*`), which override the
/// optional YAML file, which overrides the built-in defaults.
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "druid-tasks-exporter", version, about)]
pub struct CliArgs {
    /// The address to listen on for HTTP requests (default ":8080").
    #[arg(long)]
    pub listen_address: Option<String>,

    /// The URI to reach Druid's SQL API (default "http://BROKER:8082/druid/v2/sql/").
    #[arg(long)]
    pub druid_uri: Option<String>,

    /// Path to a YAML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// What a failed Druid query does to the process: exit, or answer the scrape with 503.
    #[arg(long, value_parser = parse_policy)]
    pub on_query_error: Option<QueryErrorPolicy>,

    /// Log level: trace, debug, info, warn or error.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log output format: console or json.
    #[arg(long, value_parser = parse_format)]
    pub log_format: Option<LogFormat>,

    /// Print the JSON schema of the configuration file and exit.
    #[arg(long)]
    pub print_schema: bool,
}

fn parse_policy(value: &str) -> Result<QueryErrorPolicy, String> {
    match value.to_lowercase().as_str() {
        "exit" => Ok(QueryErrorPolicy::Exit),
        "respond" => Ok(QueryErrorPolicy::Respond),
        other => Err(format!("'{other}' is not one of: exit, respond")),
    }
}

fn parse_format(value: &str) -> Result<LogFormat, String> {
    match value.to_lowercase().as_str() {
        "json" => Ok(LogFormat::Json),
        "console" => Ok(LogFormat::Console),
        other => Err(format!("'{other}' is not one of: json, console")),
    }
}
