//! Command-line interface definitions for pluginator.

use clap::Parser;
use pluginator_core::{GeneratorConfig, GeneratorConfigBuilder};
use std::path::PathBuf;

/// Pluginator - generates builtin plugin sources from hand-written plugins.
///
/// Meant to run from `go generate` in a plugin's source directory, which sets
/// GOFILE to the file carrying the directive.
#[derive(Parser, Debug)]
#[command(name = "pluginator")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Plugin source file name, e.g. SecretGenerator.go
    #[arg(env = "GOFILE")]
    pub input: Option<String>,

    /// Path to pluginator.toml (default: searched upward from the current directory)
    #[arg(short, long, env = "PLUGINATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Package name of the generated file
    #[arg(long)]
    pub package: Option<String>,

    /// Exported plugin variable whose declaration is dropped
    #[arg(long)]
    pub plugin_symbol: Option<String>,

    /// Output directory (default: ../../../api/<package>)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Fail when the plugin has neither a Transform( nor a Generate( method
    #[arg(long)]
    pub strict: bool,

    /// Write the generated source to stdout instead of the output directory
    #[arg(long)]
    pub stdout: bool,

    /// Enable verbose output (-v, -vv, -vvv for increasing verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// The input file name; an unset GOFILE is treated as an empty name so it
    /// is rejected the same way as a wrong suffix.
    pub fn input_name(&self) -> &str {
        self.input.as_deref().unwrap_or_default()
    }

    /// Applies command-line overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: GeneratorConfig) -> GeneratorConfig {
        let mut builder = GeneratorConfigBuilder::from_config(config);
        if let Some(package) = &self.package {
            builder = builder.package_name(package);
        }
        if let Some(symbol) = &self.plugin_symbol {
            builder = builder.plugin_symbol(symbol);
        }
        if let Some(dir) = &self.output_dir {
            builder = builder.output_dir(dir);
        }
        if self.strict {
            builder = builder.require_plugin_type(true);
        }
        builder.build()
    }

    /// Default tracing directive derived from -v / -q.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
