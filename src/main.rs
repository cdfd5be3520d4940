use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use lighthouse_gate::{
    AuditOptions, DEFAULT_CATEGORIES, DEFAULT_IGNORE_FILE, DEFAULT_LIGHTHOUSE_BIN,
    DEFAULT_SNAPSHOT_FILE,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let Some(url) = cli.url else {
        println!(" You must define the url");
        let _ = Cli::command().print_help();
        return exit_with_error();
    };

    let options = AuditOptions {
        url,
        variability: cli.variability,
        categories: lighthouse_gate::parse_categories(&cli.categories),
        snapshot: cli.snapshot,
        ignore_file: cli.ignore_file,
        debug: cli.debug,
        assume_yes: cli.yes,
        summary: cli.summary,
        lighthouse_bin: cli.lighthouse_bin,
    };

    match lighthouse_gate::audit(options) {
        Ok(outcome) => {
            if outcome.passed() {
                println!("{}", " Exits without errors\n".green());
            } else {
                println!("{}", " Exits with errors\n".red());
            }
            ExitCode::from(outcome.exit_code())
        }
        Err(err) => {
            println!(" [x] Error: {}", format!("{:#}", err).red());
            exit_with_error()
        }
    }
}

fn exit_with_error() -> ExitCode {
    println!("{}", " Exits with errors\n".red());
    ExitCode::FAILURE
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[derive(Parser)]
#[command(
    name = "lighthouse-gate",
    about = "Audit a URL with Lighthouse and fail when scores regress against a snapshot",
    version
)]
struct Cli {
    /// Url for the audit (required)
    #[arg(long)]
    url: Option<String>,
    /// Allowed fractional score regression, e.g. 0.2
    #[arg(long, default_value = "0", value_parser = lighthouse_gate::parse_variability)]
    variability: f64,
    /// Audit categories, separated by commas without spaces
    #[arg(long, default_value = DEFAULT_CATEGORIES)]
    categories: String,
    /// JSON snapshot file
    #[arg(long, default_value = DEFAULT_SNAPSHOT_FILE)]
    snapshot: PathBuf,
    /// Ignore list file
    #[arg(long, default_value = DEFAULT_IGNORE_FILE)]
    ignore_file: PathBuf,
    /// Interactive prompts and verbose logging
    #[arg(long)]
    debug: bool,
    /// Accept ignore-list additions and snapshot updates without prompting
    #[arg(long)]
    yes: bool,
    /// Lighthouse executable
    #[arg(long, default_value = DEFAULT_LIGHTHOUSE_BIN)]
    lighthouse_bin: PathBuf,
    /// Also write a JSON summary of the comparison
    #[arg(long)]
    summary: Option<PathBuf>,
}
