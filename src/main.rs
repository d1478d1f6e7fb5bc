use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::info;
use topo_canon::settings::delimiter_byte;
use topo_canon::{derive_output_path, process_file, CanonError, Mode, Settings};

#[derive(Parser)]
#[command(name = "topo-canon")]
#[command(about = "Group, order and relabel survey field-data codes")]
#[command(version)]
struct Cli {
    #[arg(help = "Delimited survey export to canonicalize")]
    input: PathBuf,
    #[arg(help = "Output path (default: <stem>_<suffix>.<ext> next to the input)")]
    output: Option<PathBuf>,
    #[arg(long, short, value_enum, help = "Processing mode [default: grouped]")]
    mode: Option<Mode>,
    #[arg(long, short, value_name = "N", help = "Zero-based index of the ordering-key field [default: 1]")]
    key_field: Option<usize>,
    #[arg(long, short, value_parser = parse_delimiter, help = "Field delimiter, a single ASCII character or `tab` [default: ,]")]
    delimiter: Option<char>,
    #[arg(long, short, value_name = "PATH", help = "JSON settings file; flags override its values")]
    config: Option<PathBuf>,
    #[arg(long, short, help = "Suffix for the derived output file name [default: canon]")]
    suffix: Option<String>,
    #[arg(long, short, action = ArgAction::Count, help = "More logging (-v info, -vv debug)")]
    verbose: u8,
}

fn parse_delimiter(s: &str) -> std::result::Result<char, String> {
    let c = match s {
        "tab" | "\\t" => '\t',
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(format!("expected a single character, got {s:?}")),
            }
        }
    };
    delimiter_byte(c).map_err(|e| e.to_string())?;
    Ok(c)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for_error(&e)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    if let Some(mode) = cli.mode {
        settings.mode = mode;
    }
    if let Some(key_field) = cli.key_field {
        settings.key_field = key_field;
    }
    if let Some(delimiter) = cli.delimiter {
        settings.delimiter = delimiter;
    }
    if let Some(suffix) = cli.suffix {
        settings.output_suffix = suffix;
    }

    let output = cli
        .output
        .unwrap_or_else(|| derive_output_path(&cli.input, &settings.output_suffix));

    let summary = process_file(&cli.input, &output, &settings)
        .with_context(|| format!("canonicalizing {}", cli.input.display()))?;
    info!(
        "{} -> {}: {} rows in, {} rows out",
        cli.input.display(),
        output.display(),
        summary.rows_read,
        summary.rows_written
    );
    Ok(())
}

fn exit_code_for_error(err: &anyhow::Error) -> ExitCode {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CanonError>())
        .map(|e| ExitCode::from(e.exit_code()))
        .unwrap_or(ExitCode::from(2))
}
