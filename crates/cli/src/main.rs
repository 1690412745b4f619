mod logging;
mod settings;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::{error, info};
use vpnclick_core::{Delivery, Notifier, RunOutcome, StatusProbe};
use vpnclick_engine::{send_alert, Reconnector};
use vpnclick_gui::{ClickSequencer, EnigoPointer};
use vpnclick_notify::TelegramNotifier;
use vpnclick_status::CliStatusChecker;

use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "vpnclick")]
#[command(about = "Reconnects a VPN client by clicking through its GUI, with status checks and alerts")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Disconnect and reconnect the VPN once (default)
    Run,

    /// Check the VPN state and exit 0 if connected, 1 otherwise
    Status,

    /// Send a test alert through the configured notifier
    Notify {
        /// Message text
        message: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(usage_exit_status(&e));
        }
    };

    logging::init(&cli.log_level, &cli.settings.log_file);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(&cli.settings).await,
        Commands::Status => {
            let state = CliStatusChecker::new(cli.settings.status()).check().await;
            println!("VPN {}", state);
            if state.is_connected() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Notify { message } => match send_test_alert(&cli.settings, &message).await {
            Ok(Delivery::Sent) => {
                println!("Alert sent");
                ExitCode::SUCCESS
            }
            Ok(Delivery::Skipped) => {
                println!("Alerts not configured (set TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID)");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("{:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

/// Exit status for a command line clap refused. Only help and version
/// output count as success; bad values are startup failures.
fn usage_exit_status(e: &clap::Error) -> u8 {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// One reconnection run.
async fn run(settings: &Settings) -> ExitCode {
    info!("=== VPN reconnect emulator started ===");

    let notifier = match TelegramNotifier::new(settings.telegram()) {
        Ok(notifier) => notifier,
        Err(e) => {
            error!("Critical error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = reconnect(settings, &notifier).await;
    ExitCode::from(finish(result, &notifier).await)
}

/// Map a run result to an exit status. Any failure that escaped the
/// orchestrator is logged as critical, alerted and exits 1.
async fn finish<N: Notifier + ?Sized>(result: Result<RunOutcome>, notifier: &N) -> u8 {
    match result {
        Ok(outcome) => {
            if !outcome.is_fatal() {
                info!("=== VPN reconnect emulator finished ===");
            }
            outcome.exit_code()
        }
        Err(e) => {
            error!("Critical error: {:#}", e);
            send_alert(notifier, &format!("Reconnect emulator crashed: {:#}", e)).await;
            1
        }
    }
}

async fn reconnect(settings: &Settings, notifier: &TelegramNotifier) -> Result<RunOutcome> {
    let pointer = EnigoPointer::new().context("Input simulation unavailable")?;
    let clicker = ClickSequencer::new(pointer, settings.targets(), settings.delays());
    let status = CliStatusChecker::new(settings.status());

    let mut reconnector = Reconnector::new(status, notifier, clicker, settings.plan());
    let outcome = reconnector.run().await?;
    info!(?outcome, "Reconnect run complete");
    Ok(outcome)
}

async fn send_test_alert(settings: &Settings, message: &str) -> Result<Delivery> {
    let notifier = TelegramNotifier::new(settings.telegram())?;
    let delivery = notifier
        .notify(message)
        .await
        .context("Test alert failed")?;
    Ok(delivery)
}
