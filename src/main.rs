use anyhow::Result;
use clap::Parser;
use pharmarisk::cli::{Cli, Commands};
use pharmarisk::commands::assess::{handle_assess, AssessConfig};
use pharmarisk::formatting::FormattingConfig;
use pharmarisk::RiskError;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            exit_code(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Assess {
            files,
            format,
            output,
            config,
            window_days,
            plain,
            verbosity,
        } => {
            init_logging(verbosity);
            handle_assess(AssessConfig {
                files,
                format: format.into(),
                output,
                config,
                window_days,
                formatting: create_formatting_config(plain),
            })
        }
        Commands::Init { force } => {
            init_logging(0);
            pharmarisk::commands::init::init_config(force)
        }
    }
}

/// 2 for input the user can correct, 1 for everything else.
fn exit_code(err: &anyhow::Error) -> ExitCode {
    let user_fixable = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<RiskError>())
        .any(RiskError::is_user_fixable);

    if user_fixable {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

// RUST_LOG still overrides the verbosity flag
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn create_formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    }
}
