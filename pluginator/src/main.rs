mod cli;

use clap::Parser;
use cli::Cli;
use pluginator_core::{
    BuiltinsDir, GeneratorConfig, PluginGenerator, Provenance, Result, RootName,
};
use std::env;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // No file, `.env` included, is read until the input name is valid.
    // Parsing again lets `.env` values reach the env-backed flags.
    let cli = if RootName::from_file_name(cli.input_name()).is_ok() {
        dotenv::dotenv().ok();
        Cli::parse()
    } else {
        cli
    };

    // RUST_LOG wins over -v / -q. Logs go to stderr so --stdout output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                let level = cli.log_level();
                format!("pluginator={level},pluginator_core={level}").into()
            }),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_source_error() {
                error!("Plugin source rejected: {}", e);
            } else {
                error!("{}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let root = RootName::from_file_name(cli.input_name()).inspect_err(|_| {
        warn!("{}", Provenance::current());
    })?;
    debug!("Root name: {}", root);

    let config = match &cli.config {
        Some(path) => GeneratorConfig::from_toml_path(path)?,
        None => GeneratorConfig::load()?,
    };
    let generator = PluginGenerator::new(root, cli.apply_overrides(config));

    let input_dir = env::current_dir()?;
    if cli.stdout {
        let outcome = generator.generate_to(&input_dir, io::stdout().lock())?;
        info!(
            "Wrote {} plugin {} to stdout",
            outcome.plugin_type,
            generator.root()
        );
        return Ok(());
    }

    let locator = BuiltinsDir::new(input_dir.join(generator.config().output_dir()));
    let report = generator.generate_file(&input_dir, &locator)?;
    debug!(
        "Kept {} lines, dropped {} lines",
        report.outcome.lines_written, report.outcome.lines_dropped
    );
    info!("Generated {}", report.output.display());
    Ok(())
}
