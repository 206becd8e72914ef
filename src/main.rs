// Builds a suggestion model from the command line and prints it as JSON.
//
//   suggestion-loader <header-file> [archive.tar | archive.tar.gz | mapping.dsl ...]
//
// Files ending in `.dsl` are read as DSL mapping files, everything else is
// handed to the loader as a type archive. Log output goes to stderr and is
// controlled through RUST_LOG (default `info`).

use std::path::Path;
use std::process::ExitCode;

use suggestion_loader::archive::ArchiveBlob;
use suggestion_loader::dsl::DslMappingFile;
use suggestion_loader::error::Result;
use suggestion_loader::loader::SuggestionLoader;
use suggestion_loader::settings::{DEFAULT_CONFIG_NAME, LoaderSettings};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: suggestion-loader <header-file> [archive | mapping.dsl ...]";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((header_path, inputs)) = args.split_first() else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };
    match run(header_path, inputs) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "build failed");
            ExitCode::FAILURE
        }
    }
}

fn run(header_path: &str, inputs: &[String]) -> Result<String> {
    let settings = LoaderSettings::load(DEFAULT_CONFIG_NAME)?;
    let header = std::fs::read_to_string(header_path)?;

    let mut archives = Vec::new();
    let mut dsl_files = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        if path.extension().is_some_and(|ext| ext == "dsl") {
            let file = DslMappingFile::parse(&std::fs::read_to_string(path)?);
            for message in file.errors() {
                warn!(file = %input, %message, "skipped DSL mapping line");
            }
            dsl_files.push(file);
        } else {
            archives.push(ArchiveBlob::named(input.as_str(), std::fs::read(path)?));
        }
    }

    let mut loader = SuggestionLoader::with_settings(settings);
    let outcome = loader.build(&header, &archives, &dsl_files)?;
    Ok(serde_json::to_string_pretty(&outcome)?)
}
