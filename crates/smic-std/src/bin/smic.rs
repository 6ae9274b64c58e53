//! Compile MIB modules to JSON.
//!
//! Usage: smic [-I dir]... [-o outdir] [--cache dir] [--no-texts] [--rebuild] [-v] MODULE...

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use smic_std::{Compiler, CompilerConfig, FileWriter, JsonBackend, ModuleStatus};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Compiles SNMP MIB modules to JSON")]
struct Args {
    /// Modules to compile, by name.
    #[arg(required = true, value_name = "MODULE")]
    modules: Vec<String>,

    /// Directory searched for module sources. May be repeated.
    #[arg(
        short = 'I',
        long = "include",
        value_name = "DIR",
        env = "SMIC_MIBDIRS",
        value_delimiter = ':'
    )]
    search_dirs: Vec<PathBuf>,

    /// Directory rendered modules are written to.
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Directory holding compiled table caches.
    #[arg(long = "cache", value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Drop STATUS, DESCRIPTION and REFERENCE texts.
    #[arg(long)]
    no_texts: bool,

    /// Ignore cached tables.
    #[arg(long)]
    rebuild: bool,

    /// Log more. Repeat for more detail; RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> CompilerConfig {
        CompilerConfig {
            search_dirs: self.search_dirs.clone(),
            retain_text: !self.no_texts,
            cache_dir: self.cache_dir.clone(),
            rebuild: self.rebuild,
            ..CompilerConfig::default()
        }
    }

    fn default_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.default_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    debug!(?args, "starting smic");

    let compiler = Compiler::from_config(&args.config());
    let writer = FileWriter::new(&args.output_dir);
    let report = match compiler.compile_and_write(&args.modules, &JsonBackend::pretty(), &writer)
    {
        Ok(report) => report,
        Err(e) => {
            eprintln!("smic: {e}");
            return ExitCode::FAILURE;
        }
    };

    for (module, status) in &report.statuses {
        match status {
            ModuleStatus::Failed(e) => println!("{module}: failed: {e}"),
            ModuleStatus::DependencyFailed(dep) => println!("{module}: dependency failed: {dep}"),
            _ => println!("{module}: {}", status.as_str()),
        }
    }

    let requested_ok = args
        .modules
        .iter()
        .all(|m| report.status(m).is_some_and(ModuleStatus::is_success));
    if requested_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
