mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use rsel_config::SelectConfig;
use rsel_runtime::lifecycle::{check_rules, run_select, wait_for_signal};
use rsel_runtime::tracing_init::init_tracing;

#[derive(Parser)]
#[command(name = "rule-select", about = "Filter rows with boolean rule expressions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter the configured input with the saved rules
    Run {
        /// Path to rule-select.toml
        #[arg(short, long)]
        config: PathBuf,
        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compile each saved rule and report errors with their position
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Print each saved rule in canonical form
    Fmt {
        #[arg(short, long)]
        config: PathBuf,
        /// Reference columns by position instead of name
        #[arg(long)]
        indexed: bool,
    },
    /// List the operators of the rule language
    Ops,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, json } => {
            let config = load(&config)?;
            let _guard = init_tracing(&config.logging, config.log_file().as_deref())?;
            tracing::info!(domain = "sys", base_dir = %config.base_dir().display(), "rule-select run starting");

            let cancel = CancellationToken::new();
            let signal = tokio::spawn(wait_for_signal(cancel.clone()));
            let run_cancel = cancel.clone();
            let run_config = config.clone();
            let result =
                tokio::task::spawn_blocking(move || run_select(&run_config, run_cancel)).await?;
            let interrupted = cancel.is_cancelled();
            cancel.cancel();
            let _ = signal.await;

            match result {
                Ok(summary) => {
                    if json {
                        eprintln!("{}", serde_json::to_string_pretty(&summary)?);
                    } else {
                        eprint!("{}", report::summary(&summary));
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) if interrupted => {
                    eprintln!("rule-select: interrupted: {e}");
                    Ok(ExitCode::from(130))
                }
                Err(e) => Err(anyhow::anyhow!("{e}")),
            }
        }
        Commands::Check { config } => {
            let config = load(&config)?;
            let _guard = init_tracing(&config.logging, config.log_file().as_deref())?;
            let checked = check_rules(&config).map_err(|e| anyhow::anyhow!("{e}"))?;
            print!("{}", report::check(&checked));
            Ok(exit_for(checked.is_clean()))
        }
        Commands::Fmt { config, indexed } => {
            let config = load(&config)?;
            let _guard = init_tracing(&config.logging, config.log_file().as_deref())?;
            let checked = check_rules(&config).map_err(|e| anyhow::anyhow!("{e}"))?;
            print!("{}", report::canonical(&checked, indexed));
            Ok(exit_for(checked.is_clean()))
        }
        Commands::Ops => {
            print!("{}", report::operators());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load(path: &Path) -> Result<SelectConfig> {
    let path = path
        .canonicalize()
        .map_err(|e| anyhow::anyhow!("config path '{}': {e}", path.display()))?;
    SelectConfig::load(&path)
}

fn exit_for(clean: bool) -> ExitCode {
    if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
