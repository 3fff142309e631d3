use std::{
    io::{self, IsTerminal},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use pedal_updater::{
    pedal_updater_config::PedalUpdaterConfig,
    pretty_print_progress::ProgressPrinter,
    prompt::CliPrompter,
    workflow::{Workflow, WorkflowEvent, WorkflowOutcome},
};
use tracing::{debug, error};
use updater_engine::{Category, ErrorKind, UpdaterError};
use utils::logging::{self, Component, LogConfig};

const PROGRESS_BAR_WIDTH: usize = 40;

#[derive(Parser)]
#[command(author, version, about = "Download firmware and effects files for the pedal", long_about = None)]
pub struct Cli {
    /// Config file, created with defaults when missing
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        default_value = ".dev/pedal-updater.toml"
    )]
    config: PathBuf,

    /// Directory for log files (overrides the config file)
    #[arg(short = 'l', long = "log-dir", value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Set console log level
    #[arg(long = "console-log-level", value_name = "LEVEL",
          value_parser = ["trace", "debug", "info", "warn", "error"],
          default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse and download firmware images
    Firmware(CategoryArgs),
    /// Browse and download effects files
    Effects(CategoryArgs),
}

#[derive(Args)]
pub struct CategoryArgs {
    /// Only print the files the server offers
    #[arg(long)]
    list: bool,

    /// File to download (default: first in the listing)
    #[arg(short = 'f', long = "file", value_name = "NAME")]
    file: Option<String>,

    /// Where to save the file
    #[arg(short = 'o', long = "out", value_name = "PATH")]
    out: Option<PathBuf>,

    /// Accept the defaults without prompting
    #[arg(short = 'y', long = "yes")]
    yes: bool,

    /// Listing URL for this run (overrides the config file)
    #[arg(long = "url", value_name = "URL")]
    url: Option<String>,
}

impl Commands {
    fn split(self) -> (Category, CategoryArgs) {
        match self {
            Commands::Firmware(args) => (Category::Firmware, args),
            Commands::Effects(args) => (Category::Effects, args),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match PedalUpdaterConfig::load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            return ExitCode::FAILURE;
        }
    };

    match logging::init_logging(LogConfig {
        component: Component::PedalUpdater,
        log_dir: cli.log_dir.clone().unwrap_or_else(|| config.log_dir.clone()),
        max_level: logging::parse_level(&cli.log_level).unwrap_or(tracing::Level::WARN),
        ..Default::default()
    }) {
        Ok(_) => {
            debug!("Logger initialized for {}", Component::PedalUpdater.as_str());
        }
        Err(e) => {
            eprintln!("Failed to initialize logger: {}", e);
        }
    }

    let (category, args) = cli.command.split();
    if let Some(url) = args.url {
        match category {
            Category::Firmware => config.updater.firmware_url = url,
            Category::Effects => config.updater.effects_url = url,
        }
    }

    let prompter = CliPrompter {
        file: args.file,
        out: args.out,
        interactive: !args.yes && io::stdin().is_terminal(),
        download_dir: config.download_dir.clone(),
    };
    let mut workflow = match Workflow::new(config.updater.clone(), prompter) {
        Ok(workflow) => workflow,
        Err(e) => return report_failure(&e),
    };

    if args.list {
        return match workflow.fetch_listing(category).await {
            Ok(files) if files.is_empty() => {
                println!("No {} files available.", category);
                ExitCode::SUCCESS
            }
            Ok(files) => {
                println!("{}", category.title().bold());
                for file in files {
                    println!("  {}", file);
                }
                ExitCode::SUCCESS
            }
            Err(e) => report_failure(&e),
        };
    }

    let mut printer: Option<ProgressPrinter> = None;
    let result = workflow
        .run(category, |event| match event {
            WorkflowEvent::Started { file_name, .. } => {
                println!("{} Downloading {} ...", "Status:".bold(), file_name);
                printer = Some(ProgressPrinter::new(file_name, PROGRESS_BAR_WIDTH));
            }
            WorkflowEvent::Progress { progress, .. } => {
                if let Some(printer) = printer.as_mut() {
                    printer.update(progress);
                }
            }
        })
        .await;
    if let Some(printer) = printer.as_mut() {
        printer.finish();
    }

    match result {
        Ok(WorkflowOutcome::NoFiles) => {
            println!("No {} files available.", category);
            ExitCode::SUCCESS
        }
        Ok(WorkflowOutcome::Saved { file_name, path }) => {
            println!(
                "{} {} downloaded successfully.",
                "Status:".bold(),
                file_name.green()
            );
            println!("Saved '{}' to: {}", file_name, path.display());
            println!("Last file: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => match e.downcast_ref::<UpdaterError>() {
            Some(updater_error) => report_failure(updater_error),
            None => {
                error!("{:#}", e);
                eprintln!("{} {:#}", "Error:".red(), e);
                ExitCode::FAILURE
            }
        },
    }
}

/// One message and exit code per failure kind.
fn report_failure(e: &UpdaterError) -> ExitCode {
    error!("{}", e);
    match e.kind() {
        ErrorKind::Listing => {
            eprintln!("{} {}", "Error:".red(), e);
            ExitCode::from(2)
        }
        ErrorKind::Selection => {
            eprintln!("{} That file is not in the list. ({})", "Not found:".yellow(), e.reason());
            ExitCode::from(3)
        }
        ErrorKind::Download => {
            eprintln!("{} Download failed.", "Status:".bold());
            eprintln!("{} {}", "Error:".red(), e);
            ExitCode::from(4)
        }
        ErrorKind::Cancelled => {
            println!("{} Download canceled.", "Status:".bold());
            ExitCode::from(5)
        }
    }
}
