mod cli;
mod commands;
mod io;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use commands::CommandHandler;
use mtrans::{error, types, AppConfig, Context, Registry, Settings};

fn main() -> ExitCode {
    install_panic_hook();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            e.exit_code().into()
        }
    }
}

/// Panics the detection pipeline recovers from go to the debug log instead
/// of stderr; anything else reaches the default hook.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if mtrans::pipeline::in_guarded_call() {
            tracing::debug!(%info, "recovered transform panic");
        } else {
            default_hook(info);
        }
    }));
}

/// `RUST_LOG` wins, then `-v`, then the config file, then `warn`.
fn init_logging(verbose: u8, config_level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => config_level.unwrap_or("warn"),
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> error::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    init_logging(cli.verbose, config.log.level.as_deref());

    let registry = Registry::global();
    let mut settings = Settings::defaults(registry);
    config.apply(registry, &mut settings)?;
    let ctx = Context::new(registry, settings);

    let handler: Box<dyn CommandHandler> = match cli.command {
        Command::Enc {
            transform,
            set,
            r#in,
            out,
            all,
            json,
        } => Box::new(commands::EncCommand {
            transform,
            overrides: set,
            input: types::InputSource::parse(&r#in),
            output: types::OutputDest::parse(&out),
            all,
            json,
        }),

        Command::Dec {
            transform,
            set,
            r#in,
            out,
            json,
        } => Box::new(commands::DecCommand {
            transform,
            overrides: set,
            input: types::InputSource::parse(&r#in),
            output: types::OutputDest::parse(&out),
            json,
        }),

        Command::Detect { r#in, active, json, top } => Box::new(commands::DetectCommand {
            input: types::InputSource::parse(&r#in),
            active,
            json,
            top: top.unwrap_or(config.detect.alternatives),
        }),

        Command::List { json, category } => Box::new(commands::ListCommand { json, category }),

        Command::Info { transform, json } => Box::new(commands::InfoCommand { transform, json }),

        Command::Preview { transform, sample } => Box::new(commands::PreviewCommand { transform, sample }),
    };

    handler.execute(&ctx)
}
