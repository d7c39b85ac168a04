use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tapefold::loader::{default_output_path, TableLoader};
use tapefold::{translate, TapeError, Translation};
use tracing_subscriber::EnvFilter;

/// Exit status for an unrecognized model tag.
const INVALID_MODEL_EXIT: u8 = 2;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// The description to translate, or a directory of `.in` descriptions
    #[clap(short, long, default_value = "machine.in")]
    input: PathBuf,

    /// Where to write the translation (defaults to the input with a `.out` extension)
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Print a JSON summary of each translation
    #[clap(long)]
    json: bool,

    /// Log progress to stderr
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.input.is_dir() {
        return run_directory(&cli).map_or(ExitCode::SUCCESS, |e| exit_code(&e));
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));
    match run_file(&cli.input, &output, cli.json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            exit_code(&e)
        }
    }
}

fn exit_code(error: &TapeError) -> ExitCode {
    match error.root() {
        TapeError::InvalidModel(_) => ExitCode::from(INVALID_MODEL_EXIT),
        _ => ExitCode::FAILURE,
    }
}

/// Translates one description. Nothing is written if translation fails.
fn run_file(input: &Path, output: &Path, json: bool) -> Result<(), TapeError> {
    let table = TableLoader::load_table(input)?;
    let translation = translate(&table);
    TableLoader::write_table(output, &translation.table)?;

    if json {
        print_summary(input, output, &translation);
    }

    Ok(())
}

/// Translates every description in a directory, next to its input.
///
/// Keeps going past failures, printing each one with its file as it happens. Returns the
/// first failure, if any.
fn run_directory(cli: &Cli) -> Option<TapeError> {
    let output_dir = cli.output.as_deref().unwrap_or(&cli.input);
    let mut first_error = None;

    for result in TableLoader::load_tables(&cli.input) {
        let outcome = result.and_then(|(path, table)| {
            let translation = translate(&table);
            let name = path.file_name().unwrap_or_default();
            let output = default_output_path(&output_dir.join(name));
            TableLoader::write_table(&output, &translation.table)?;

            if cli.json {
                print_summary(&path, &output, &translation);
            }
            Ok(())
        });

        if let Err(e) = outcome {
            eprintln!("{e}");
            first_error.get_or_insert(e);
        }
    }

    first_error
}

fn print_summary(input: &Path, output: &Path, translation: &Translation) {
    let summary = serde_json::json!({
        "input": input.display().to_string(),
        "output": output.display().to_string(),
        "source": translation.source,
        "target": translation.target(),
        "states": translation.states,
        "alphabet": translation.alphabet,
        "original": translation.original,
        "generated": translation.generated,
    });

    println!("{summary}");
}
