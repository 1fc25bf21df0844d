// Main CLI entry point for devflow-check
// Uses clap for argument parsing

use anyhow::Context;
use clap::{crate_version, value_parser, Arg, ArgAction, ArgMatches, Command};
use devflow_check::config::{ScanConfig, DEFAULT_DELAY, DEFAULT_TIMEOUT};
use devflow_check::engine::ProbeEngine;
use devflow_check::error::ScanError;
use devflow_check::reporting::{render_json, render_outcome, render_summary, RULE};
use devflow_check::scanner::{ScanEvent, Scanner};
use devflow_check::target::ScanTarget;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("devflow-check")
        .version(crate_version!())
        .about("OAuth2 device code flow checker for Salesforce connected apps")
        .after_help("EXAMPLES:\n  devflow-check https://acme.my.salesforce.com\n  devflow-check https://acme.lightning.force.com -c PlatformCLI -c SfdcInsights\n  devflow-check https://acme.my.salesforce.com --json --delay 0")
        .arg(Arg::new("url")
            .num_args(1)
            .help("Salesforce base URL (prompted for when omitted)"))
        .arg(Arg::new("client_id")
            .short('c')
            .long("client-id")
            .action(ArgAction::Append)
            .num_args(1)
            .help("Client ID to test; repeat to replace the built-in list"))
        .arg(Arg::new("timeout")
            .short('t')
            .long("timeout")
            .num_args(1)
            .value_parser(value_parser!(u64))
            .help(format!("Per-request timeout in seconds [default: {}]", DEFAULT_TIMEOUT.as_secs())))
        .arg(Arg::new("delay")
            .short('d')
            .long("delay")
            .num_args(1)
            .value_parser(value_parser!(u64))
            .help(format!("Pause between client IDs in milliseconds [default: {}]", DEFAULT_DELAY.as_millis())))
        .arg(Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print the final report as JSON"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::SetTrue)
            .help("Enable debug logging"))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "devflow_check=debug" } else { "devflow_check=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Read the target from stdin when it was not given as an argument.
async fn prompt_for_url() -> anyhow::Result<String> {
    tokio::task::spawn_blocking(|| -> io::Result<String> {
        print!("Enter Salesforce base URL (e.g., https://AAA.my.salesforce.com): ");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    })
    .await
    .context("prompt task failed")?
    .context("failed to read URL from stdin")
}

fn build_config(matches: &ArgMatches) -> ScanConfig {
    let client_ids = matches
        .get_many::<String>("client_id")
        .map(|ids| ids.cloned().collect())
        .unwrap_or_default();
    let mut config = ScanConfig::default().with_client_ids(client_ids);
    if let Some(secs) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout(Duration::from_secs(*secs));
    }
    if let Some(millis) = matches.get_one::<u64>("delay") {
        config = config.with_delay(Duration::from_millis(*millis));
    }
    config
}

fn print_progress(event: &ScanEvent<'_>) {
    match event {
        ScanEvent::Testing { index, total, client_id } => {
            println!("[{}/{}] Testing ConnectedApp with client_id: {}", index, total, client_id);
        }
        ScanEvent::Tested { client_id, outcome } => {
            println!("{}", render_outcome(client_id, outcome));
            println!();
        }
    }
}

async fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let json = matches.get_flag("json");
    let config = build_config(matches);

    if !json {
        println!(" OAuth2 Device Code Flow Vulnerability Checker");
        println!("{}", RULE);
    }

    let raw = match matches.get_one::<String>("url") {
        Some(url) => url.clone(),
        None => prompt_for_url().await?,
    };
    let target = ScanTarget::parse(&raw)?;

    if !json {
        if let Some(original) = target.original_url() {
            println!("Converting lightning.force.com to my.salesforce.com");
            println!("   Original: {}", original);
            println!("   Normalized: {}", target);
            println!();
        }
        println!("Testing OAuth2 endpoints on: {}", target);
        println!("Testing with {} client IDs...", config.client_ids.len());
        println!();
    }

    let engine = ProbeEngine::new(&config)?;
    let mut scanner = Scanner::new(engine, config);
    if !json {
        scanner = scanner.with_progress(print_progress);
    }
    let report = scanner.run(&target).await;

    if json {
        println!("{}", render_json(&report).context("failed to serialize report")?);
    } else {
        print!("{}", render_summary(&report));
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let code = tokio::select! {
        res = run(&matches) => match res {
            Ok(()) => 0,
            Err(e) => {
                match e.downcast_ref::<ScanError>() {
                    Some(ScanError::MissingUrl) => eprintln!("No URL provided. Exiting."),
                    Some(ScanError::InvalidUrl(reason)) => eprintln!("Invalid URL format: {}", reason),
                    _ => eprintln!("\nUnexpected error: {:#}", e),
                }
                1
            }
        },
        Ok(()) = tokio::signal::ctrl_c() => {
            println!("\n\nScan interrupted by user");
            0
        }
    };

    let _ = io::stdout().flush();
    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let matches = cli().get_matches_from(["devflow-check", "https://acme.my.salesforce.com"]);
        let config = build_config(&matches);
        assert_eq!(config.client_ids.len(), 6);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.delay, DEFAULT_DELAY);
        assert!(!matches.get_flag("json"));
    }

    #[test]
    fn cli_overrides() {
        let matches = cli().get_matches_from([
            "devflow-check", "-c", "First", "--client-id", "Second", "-t", "3", "-d", "0", "--json",
        ]);
        let config = build_config(&matches);
        assert_eq!(config.client_ids, vec!["First".to_string(), "Second".to_string()]);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.delay, Duration::ZERO);
        assert!(matches.get_one::<String>("url").is_none());
        assert!(matches.get_flag("json"));
    }
}
