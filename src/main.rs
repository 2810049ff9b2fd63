use anyhow::Context;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;
use sysinfo::System;

use serial_order_intake::config::Config;
use serial_order_intake::messaging::{Command, CommandExecutor, CommandResult, USAGE};
use serial_order_intake::order::LoggingOrderSink;
use serial_order_intake::verification::SimulatedVerifier;
use serial_order_intake::views;
use serial_order_intake::wizard::WizardController;
use serial_order_intake::AppResult;

const LOG_TARGET_STARTUP: &str = "serial_order_intake::startup";
const LOG_FILE_NAME: &str = "serial-order-intake.log";

/// How often the front-end checks on an outstanding verification
const VERIFY_POLL_INTERVAL: Duration = Duration::from_millis(100);

fn initialize_tracing(default_filter: &str) {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_dir = Config::app_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|_| std::path::PathBuf::from("logs"));

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    let file_appender = rolling::daily(&log_dir, LOG_FILE_NAME);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    // Debug builds mirror logs on stderr so they stay out of the screen output
    #[cfg(debug_assertions)]
    {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer)
            .init();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();
    }

    tracing::info!("Log directory: {}", log_dir.display());
}

fn log_runtime_environment() {
    let version = env!("CARGO_PKG_VERSION");
    let os_name = System::long_os_version()
        .or_else(System::name)
        .unwrap_or_else(|| "Unknown OS".to_string());
    let kernel = System::kernel_version().unwrap_or_else(|| "Unknown Kernel".to_string());
    let architecture = std::env::consts::ARCH;

    tracing::info!(target: LOG_TARGET_STARTUP, "Starting Serial Order Intake v{} on ({})", version, architecture);
    tracing::info!(target: LOG_TARGET_STARTUP, "Operating System: {} (kernel {})", os_name, kernel);
}

fn build_executor(config: &Config) -> CommandExecutor {
    let settings = &config.verification;
    let verifier = SimulatedVerifier::new(settings.delay())
        .with_failure_rate(settings.simulated_failure_rate);

    let controller = WizardController::new(Arc::new(verifier), Arc::new(LoggingOrderSink))
        .with_retry_policy(settings.retry_policy());

    CommandExecutor::new(controller)
}

/// Block the prompt until an outstanding verification settles
fn settle_verification(executor: &mut CommandExecutor) {
    let controller = executor.controller_mut();
    while controller.is_loading() {
        controller.wait_for_verification(VERIFY_POLL_INTERVAL);
    }
}

fn print_result(result: &CommandResult) {
    match result {
        CommandResult::Success => {}
        CommandResult::SuccessWithValue(value) => println!("{value}\n"),
        CommandResult::Error(message) => println!("Error: {message}\n"),
    }
}

fn main() -> AppResult<()> {
    let config = Config::load().with_context(|| {
        format!("Failed to load config from {}", Config::config_path_display())
    })?;

    initialize_tracing(&config.log_filter);
    log_runtime_environment();
    tracing::info!("Config file: {}", Config::config_path_display());

    let mut executor = build_executor(&config);
    let (events, _subscription) = executor.controller().events().subscribe();

    println!("Serial Order Intake v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for commands.\n");
    print!("{}", views::render(executor.controller()));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("Error: {message}\n");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{USAGE}");
                continue;
            }
            command => {
                let result = executor.execute(command);
                print_result(&result);
            }
        }

        if executor.controller().is_loading() {
            settle_verification(&mut executor);
        }

        for event in events.try_iter() {
            tracing::debug!("Event: {}", event.description());
        }

        print!("\n{}", views::render(executor.controller()));
    }

    tracing::info!("Session ended");
    Ok(())
}
